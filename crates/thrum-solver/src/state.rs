//! Kinematic system state.

use thrum_core::StateQuantity;

/// All bodies' displacement, velocity and derived acceleration at one
/// instant, in DOF order.
///
/// Displacements are measured relative to each body's XLOC reference
/// position. The acceleration vector always satisfies the governing
/// equation at `t` for the state's own `x` and `v`.
#[derive(Clone, Debug, PartialEq)]
pub struct SystemState {
    /// Simulation time in seconds.
    pub t: f64,
    /// Displacements in m.
    pub x: Vec<f64>,
    /// Velocities in m/s.
    pub v: Vec<f64>,
    /// Accelerations in m/s².
    pub a: Vec<f64>,
}

impl SystemState {
    /// An all-zero state for `n` degrees of freedom at `t = 0`.
    pub fn zeroed(n: usize) -> Self {
        Self {
            t: 0.0,
            x: vec![0.0; n],
            v: vec![0.0; n],
            a: vec![0.0; n],
        }
    }

    /// Number of degrees of freedom.
    pub fn dof_count(&self) -> usize {
        self.x.len()
    }

    /// First non-finite component, as `(dof, quantity)`, scanning
    /// displacement before velocity before acceleration per body.
    pub fn first_non_finite(&self) -> Option<(usize, StateQuantity)> {
        for dof in 0..self.dof_count() {
            if !self.x[dof].is_finite() {
                return Some((dof, StateQuantity::Displacement));
            }
            if !self.v[dof].is_finite() {
                return Some((dof, StateQuantity::Velocity));
            }
            if !self.a[dof].is_finite() {
                return Some((dof, StateQuantity::Acceleration));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_state_is_finite() {
        let s = SystemState::zeroed(3);
        assert_eq!(s.dof_count(), 3);
        assert_eq!(s.first_non_finite(), None);
    }

    #[test]
    fn nan_velocity_detected_with_quantity() {
        let mut s = SystemState::zeroed(2);
        s.v[1] = f64::NAN;
        assert_eq!(s.first_non_finite(), Some((1, StateQuantity::Velocity)));
    }

    #[test]
    fn displacement_reported_before_acceleration() {
        let mut s = SystemState::zeroed(1);
        s.x[0] = f64::INFINITY;
        s.a[0] = f64::NAN;
        assert_eq!(
            s.first_non_finite(),
            Some((0, StateQuantity::Displacement))
        );
    }
}
