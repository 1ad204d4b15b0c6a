pub mod simulation;
pub mod configuration;
pub mod error;
#[cfg(feature = "viewer")]
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{ParticleStore, ParticleSnapshot, NVec3};
pub use simulation::params::Parameters;
pub use simulation::engine::Solver;
pub use simulation::forces::{Acceleration, AccelSet, UniformGravity};
pub use simulation::integrator::{integrate, RenderSync, NoSync};
pub use simulation::constraint::SphereConstraint;
pub use simulation::collision::{resolve_collisions, CollisionMode};
pub use simulation::growth::{GrowthController, GrowthState, SpawnOrigin, SpawnPose, FixedOrigin, PendulumOrigin};
pub use simulation::scenario::Scenario;

pub use configuration::config::{SolverConfig, SpawnConfig, RunConfig, EmitterConfig, ScenarioConfig};
pub use error::ConfigError;

#[cfg(feature = "viewer")]
pub use visualization::vsim_vis3d::run_3d;

pub use benchmark::benchmark::{bench_collisions, bench_step};
