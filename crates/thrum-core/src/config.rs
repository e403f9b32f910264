//! Global simulation time window and step size.

use crate::ConfigError;

/// The global time settings of a deck: simulate `[0, tmax]` in fixed
/// increments of `tstep`.
///
/// `tmax` need not be an integer multiple of `tstep`; the final step is
/// clipped so the last sample lands exactly on `tmax`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Simulation end time in seconds, strictly positive.
    pub tmax: f64,
    /// Nominal step size in seconds, strictly positive.
    pub tstep: f64,
}

impl SimulationConfig {
    /// Check that both settings are finite and strictly positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tmax.is_finite() || self.tmax <= 0.0 {
            return Err(ConfigError::InvalidTimeSetting {
                name: "TMAX",
                value: self.tmax,
            });
        }
        if !self.tstep.is_finite() || self.tstep <= 0.0 {
            return Err(ConfigError::InvalidTimeSetting {
                name: "TSTEP",
                value: self.tstep,
            });
        }
        Ok(())
    }

    /// Number of integration steps, `ceil(tmax / tstep)` with a guard
    /// against the ratio landing a rounding error above an integer. The
    /// recorded series has `step_count() + 1` samples including `t = 0`.
    pub fn step_count(&self) -> usize {
        let ratio = self.tmax / self.tstep;
        let n = ratio.ceil();
        // A ratio epsilon above an integer would otherwise schedule a
        // spurious near-zero-length final step.
        let n = if n - ratio > 1.0 - 1e-9 { n - 1.0 } else { n };
        n as usize
    }

    /// Time of the k-th sample: `k * tstep`, with the final sample
    /// pinned to exactly `tmax`.
    pub fn sample_time(&self, k: usize) -> f64 {
        if k >= self.step_count() {
            self.tmax
        } else {
            k as f64 * self.tstep
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn validate_accepts_positive_settings() {
        let cfg = SimulationConfig {
            tmax: 10.0,
            tstep: 0.1,
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_tmax() {
        let cfg = SimulationConfig {
            tmax: 0.0,
            tstep: 0.1,
        };
        match cfg.validate() {
            Err(ConfigError::InvalidTimeSetting { name: "TMAX", .. }) => {}
            other => panic!("expected InvalidTimeSetting(TMAX), got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_negative_tstep() {
        let cfg = SimulationConfig {
            tmax: 10.0,
            tstep: -0.1,
        };
        match cfg.validate() {
            Err(ConfigError::InvalidTimeSetting { name: "TSTEP", .. }) => {}
            other => panic!("expected InvalidTimeSetting(TSTEP), got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_nan_tstep() {
        let cfg = SimulationConfig {
            tmax: 10.0,
            tstep: f64::NAN,
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn step_count_exact_multiple() {
        let cfg = SimulationConfig {
            tmax: 10.0,
            tstep: 0.1,
        };
        assert_eq!(cfg.step_count(), 100);
    }

    #[test]
    fn step_count_partial_final_step() {
        let cfg = SimulationConfig {
            tmax: 0.25,
            tstep: 0.1,
        };
        assert_eq!(cfg.step_count(), 3);
        assert_eq!(cfg.sample_time(0), 0.0);
        assert!((cfg.sample_time(2) - 0.2).abs() < 1e-12);
        assert_eq!(cfg.sample_time(3), 0.25);
    }

    #[test]
    fn last_sample_lands_exactly_on_tmax() {
        let cfg = SimulationConfig {
            tmax: 2.0,
            tstep: 0.3,
        };
        let n = cfg.step_count();
        assert_eq!(n, 7);
        assert_eq!(cfg.sample_time(n), 2.0);
    }

    proptest! {
        #[test]
        fn step_count_covers_tmax(
            tmax in 0.01f64..100.0,
            tstep in 0.001f64..1.0,
        ) {
            let cfg = SimulationConfig { tmax, tstep };
            let n = cfg.step_count();
            // Enough steps to reach tmax, never a full step too many.
            prop_assert!(n as f64 * tstep >= tmax - 1e-6 * tstep);
            prop_assert!((n as f64 - 1.0) * tstep < tmax);
            prop_assert_eq!(cfg.sample_time(n), tmax);
        }

        #[test]
        fn sample_times_monotone(
            tmax in 0.01f64..100.0,
            tstep in 0.001f64..1.0,
        ) {
            let cfg = SimulationConfig { tmax, tstep };
            let n = cfg.step_count();
            for k in 1..=n {
                prop_assert!(cfg.sample_time(k) > cfg.sample_time(k - 1));
            }
        }
    }
}
