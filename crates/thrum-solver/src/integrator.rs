//! Classical fourth-order Runge-Kutta integration.
//!
//! The second-order system `M·a = F(t) + b − C·v − K·x` is advanced as
//! the first-order pair `(x', v') = (v, a)`. M is diagonal, so the
//! inversion inside the derivative is elementwise.
//!
//! Each step is a pure transformation of [`SystemState`]; the struct
//! only holds scratch buffers so the per-step loop allocates nothing
//! beyond the returned state. The incoming state's derived
//! acceleration doubles as the first stage slope, so a step costs four
//! forcing evaluations: the three remaining stages plus the derived
//! acceleration of the new state.

use rand::Rng;
use thrum_system::SystemMatrices;

use crate::forcing::ForcingSet;
use crate::state::SystemState;

/// RK4 stepper with reusable scratch buffers for `n` DOFs.
#[derive(Clone, Debug)]
pub struct Rk4 {
    xs: Vec<f64>,
    v2: Vec<f64>,
    v3: Vec<f64>,
    v4: Vec<f64>,
    a2: Vec<f64>,
    a3: Vec<f64>,
    a4: Vec<f64>,
    force: Vec<f64>,
}

/// Evaluate the derivative's acceleration half at `(t, x, v)`.
fn eval_accel<R: Rng>(
    sys: &SystemMatrices,
    forcing: &ForcingSet,
    rng: &mut R,
    t: f64,
    x: &[f64],
    v: &[f64],
    force: &mut [f64],
    out: &mut [f64],
) {
    forcing.eval_into(t, rng, force);
    sys.acceleration_into(force, x, v, out);
}

impl Rk4 {
    /// Stepper for an `n`-DOF system.
    pub fn new(n: usize) -> Self {
        Self {
            xs: vec![0.0; n],
            v2: vec![0.0; n],
            v3: vec![0.0; n],
            v4: vec![0.0; n],
            a2: vec![0.0; n],
            a3: vec![0.0; n],
            a4: vec![0.0; n],
            force: vec![0.0; n],
        }
    }

    /// Recompute `state.a` from the governing equation at the state's
    /// own `(t, x, v)`. Used to derive the acceleration of the initial
    /// sample.
    pub fn refresh_acceleration<R: Rng>(
        &mut self,
        sys: &SystemMatrices,
        forcing: &ForcingSet,
        rng: &mut R,
        state: &mut SystemState,
    ) {
        forcing.eval_into(state.t, rng, &mut self.force);
        sys.acceleration_into(&self.force, &state.x, &state.v, &mut state.a);
    }

    /// Advance `state` by `dt`, returning the state at `state.t + dt`
    /// with its acceleration derived at the new time.
    ///
    /// `state.a` must hold the governing-equation acceleration for
    /// `(state.t, state.x, state.v)`; states produced by this method
    /// and by [`refresh_acceleration`](Rk4::refresh_acceleration)
    /// always do.
    pub fn step<R: Rng>(
        &mut self,
        sys: &SystemMatrices,
        forcing: &ForcingSet,
        rng: &mut R,
        state: &SystemState,
        dt: f64,
    ) -> SystemState {
        let n = state.dof_count();
        let half = dt / 2.0;
        let Self {
            xs,
            v2,
            v3,
            v4,
            a2,
            a3,
            a4,
            force,
        } = self;

        // Stage 2 at t + dt/2, using the state's own slopes as stage 1.
        for i in 0..n {
            xs[i] = state.x[i] + state.v[i] * half;
            v2[i] = state.v[i] + state.a[i] * half;
        }
        eval_accel(sys, forcing, rng, state.t + half, xs, v2, force, a2);

        // Stage 3 at t + dt/2.
        for i in 0..n {
            xs[i] = state.x[i] + v2[i] * half;
            v3[i] = state.v[i] + a2[i] * half;
        }
        eval_accel(sys, forcing, rng, state.t + half, xs, v3, force, a3);

        // Stage 4 at t + dt.
        for i in 0..n {
            xs[i] = state.x[i] + v3[i] * dt;
            v4[i] = state.v[i] + a3[i] * dt;
        }
        eval_accel(sys, forcing, rng, state.t + dt, xs, v4, force, a4);

        let sixth = dt / 6.0;
        let mut next = SystemState {
            t: state.t + dt,
            x: (0..n)
                .map(|i| state.x[i] + sixth * (state.v[i] + 2.0 * v2[i] + 2.0 * v3[i] + v4[i]))
                .collect(),
            v: (0..n)
                .map(|i| state.v[i] + sixth * (state.a[i] + 2.0 * a2[i] + 2.0 * a3[i] + a4[i]))
                .collect(),
            a: vec![0.0; n],
        };
        eval_accel(
            sys,
            forcing,
            rng,
            next.t,
            &next.x,
            &next.v,
            force,
            &mut next.a,
        );
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use thrum_system::Topology;
    use thrum_test_utils::{deck_of, grounded};

    fn oscillator() -> (SystemMatrices, ForcingSet) {
        // m = 1, k = 4: x(t) = cos(2t) from x0 = 1, v0 = 0.
        let deck = deck_of(10.0, 0.01, vec![grounded(1, 1.0, 4.0, 0.0)]);
        let topo = Topology::build(&deck).unwrap();
        let sys = SystemMatrices::assemble(&deck, &topo);
        let forcing = ForcingSet::from_deck(&deck);
        (sys, forcing)
    }

    fn initial(sys: &SystemMatrices, forcing: &ForcingSet, rk4: &mut Rk4) -> SystemState {
        let mut state = SystemState::zeroed(1);
        state.x[0] = 1.0;
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        rk4.refresh_acceleration(sys, forcing, &mut rng, &mut state);
        state
    }

    #[test]
    fn refresh_acceleration_satisfies_governing_equation() {
        let (sys, forcing) = oscillator();
        let mut rk4 = Rk4::new(1);
        let state = initial(&sys, &forcing, &mut rk4);
        // a = -k/m * x = -4.
        assert!((state.a[0] + 4.0).abs() < 1e-12);
    }

    #[test]
    fn step_tracks_harmonic_solution() {
        let (sys, forcing) = oscillator();
        let mut rk4 = Rk4::new(1);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut state = initial(&sys, &forcing, &mut rk4);
        let dt = 0.01;
        for _ in 0..100 {
            state = rk4.step(&sys, &forcing, &mut rng, &state, dt);
        }
        // After t = 1: x = cos(2), v = -2 sin(2).
        assert!((state.t - 1.0).abs() < 1e-12);
        assert!((state.x[0] - (2.0_f64).cos()).abs() < 1e-8);
        assert!((state.v[0] + 2.0 * (2.0_f64).sin()).abs() < 1e-7);
    }

    #[test]
    fn fourth_order_convergence() {
        let (sys, forcing) = oscillator();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let exact = (2.0_f64).cos();

        let mut err = [0.0f64; 2];
        for (slot, steps) in err.iter_mut().zip([50usize, 100]) {
            let dt = 1.0 / steps as f64;
            let mut rk4 = Rk4::new(1);
            let mut state = initial(&sys, &forcing, &mut rk4);
            for _ in 0..steps {
                state = rk4.step(&sys, &forcing, &mut rng, &state, dt);
            }
            *slot = (state.x[0] - exact).abs();
        }
        // Halving dt must shrink the error by roughly 2^4.
        assert!(err[0] / err[1] > 8.0, "ratio {}", err[0] / err[1]);
    }

    #[test]
    fn step_is_pure_in_the_input_state() {
        let (sys, forcing) = oscillator();
        let mut rk4 = Rk4::new(1);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let state = initial(&sys, &forcing, &mut rk4);
        let before = state.clone();
        let _ = rk4.step(&sys, &forcing, &mut rng, &state, 0.01);
        assert_eq!(state, before);
    }
}
