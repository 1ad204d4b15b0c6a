//! Build a ready-to-run solver from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a `Scenario` bundle
//! containing the validated `Solver` (with its emitter) and the host run
//! settings.
//!
//! With the `viewer` feature the bundle is a Bevy `Resource`, read by the
//! viewer's physics and transform-sync systems.

use crate::configuration::config::{EmitterConfig, RunConfig, ScenarioConfig};
use crate::error::ConfigError;
use crate::simulation::engine::Solver;
use crate::simulation::growth::{FixedOrigin, PendulumOrigin};
use crate::simulation::states::NVec3;

#[cfg_attr(feature = "viewer", derive(bevy::prelude::Resource))]
pub struct Scenario {
    pub solver: Solver,
    pub run: RunConfig,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, ConfigError> {
        let params = cfg.parameters();
        let origin = NVec3::from(cfg.spawn.origin);

        // Emitter: stationary or the swinging pendulum
        let solver = match cfg.spawn.emitter {
            EmitterConfig::Fixed => Solver::new(params, FixedOrigin::at(origin))?,
            EmitterConfig::Pendulum => Solver::new(
                params,
                PendulumOrigin {
                    position: origin,
                    amplitude_deg: cfg.spawn.swing_degrees,
                    speed: cfg.spawn.swing_speed,
                },
            )?,
        };

        Ok(Self {
            solver,
            run: cfg.run,
        })
    }

    /// Drive the solver for the configured number of frames
    /// Returns the population after the last frame
    pub fn run_headless(&mut self) -> usize {
        for frame in 0..self.run.frames {
            if let Some(i) = self.solver.tick(self.run.dt) {
                log::debug!("frame {frame}: admitted particle {i}");
            }
        }
        self.solver.active_particle_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_yaml_values_surface_as_config_errors() {
        let cfg = ScenarioConfig::from_yaml("solver:\n  constraint_radius: 0.0\n").unwrap();
        assert!(matches!(
            Scenario::build_scenario(cfg),
            Err(ConfigError::ConstraintRadius(_))
        ));
    }

    #[test]
    fn headless_run_grows_the_population() {
        let yaml = r#"
solver:
  max_particles: 20
  sub_steps: 4
spawn:
  emitter: "fixed"
  origin: [0.0, 80.0, 0.0]
run:
  frames: 300
"#;
        let mut scenario = Scenario::build_scenario(ScenarioConfig::from_yaml(yaml).unwrap()).unwrap();
        let n = scenario.run_headless();
        assert!(n > 1 && n <= 20, "population {n}");
    }
}
