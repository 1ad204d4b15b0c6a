//! Configuration types for loading solver scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`SolverConfig`]   – physical constants, container and capacity
//! - [`SpawnConfig`]    – emitter placement, launch velocity and radius range
//! - [`RunConfig`]      – how long a headless host drives the solver
//! - [`ScenarioConfig`] – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! Every key is optional and falls back to the default shown:
//!
//! ```yaml
//! solver:
//!   sub_steps: 8
//!   gravity: [0.0, -9.8, 0.0]
//!   constraint_center: [0.0, 50.0, 0.0]
//!   constraint_radius: 50.0
//!   max_particles: 1000
//!   spawn_spacing: 5.0
//!   collision_mode: "sequential"  # or "parallel"
//!
//! spawn:
//!   origin: [0.0, 80.0, 0.0]
//!   emitter: "pendulum"           # or "fixed"
//!   swing_degrees: 50.0
//!   swing_speed: 1.0
//!   launch_offset: [0.0, -2.0, 0.0]
//!   min_radius: 0.0
//!   max_radius: 5.0
//!   seed: 42
//!
//! run:
//!   frames: 600
//!   dt: 0.016666
//! ```
//!
//! [`ScenarioConfig::parameters`] maps this onto the runtime [`Parameters`],
//! which are validated when the solver is built.

use serde::Deserialize;

use crate::simulation::collision::CollisionMode;
use crate::simulation::params::Parameters;
use crate::simulation::states::NVec3;

/// Which emitter the growth controller spawns from
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmitterConfig {
    #[serde(rename = "fixed")] // stationary, identity orientation
    Fixed,

    #[default]
    #[serde(rename = "pendulum")] // swings about X and Z as simulation time advances
    Pendulum,
}

/// Physical constants, container and capacity
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SolverConfig {
    pub sub_steps: u32,              // sub-steps per frame
    pub gravity: [f64; 3],           // uniform acceleration
    pub constraint_center: [f64; 3], // bounding sphere centre
    pub constraint_radius: f64,      // bounding sphere radius
    pub max_particles: usize,        // population capacity
    pub spawn_spacing: f64,          // distance the newest particle must clear before the next spawn
    pub collision_mode: CollisionMode,
}

impl Default for SolverConfig {
    fn default() -> Self {
        let p = Parameters::default();
        Self {
            sub_steps: p.sub_steps,
            gravity: p.gravity.into(),
            constraint_center: p.constraint_center.into(),
            constraint_radius: p.constraint_radius,
            max_particles: p.max_particles,
            spawn_spacing: p.spawn_spacing,
            collision_mode: p.collision_mode,
        }
    }
}

/// Emitter and per-particle spawn settings
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SpawnConfig {
    pub origin: [f64; 3],        // emitter position
    pub emitter: EmitterConfig,
    pub swing_degrees: f64,      // pendulum amplitude
    pub swing_speed: f64,        // pendulum angular speed, rad per simulation second
    pub launch_offset: [f64; 3], // initial per-step displacement in the emitter frame
    pub min_radius: f64,
    pub max_radius: f64,
    pub seed: u64,               // radius rng seed, same seed -> same radii
}

impl Default for SpawnConfig {
    fn default() -> Self {
        let p = Parameters::default();
        Self {
            origin: [0.0, 80.0, 0.0],
            emitter: EmitterConfig::Pendulum,
            swing_degrees: 50.0,
            swing_speed: 1.0,
            launch_offset: p.launch_offset.into(),
            min_radius: p.min_radius,
            max_radius: p.max_radius,
            seed: p.seed,
        }
    }
}

/// Headless host settings
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct RunConfig {
    pub frames: usize, // frames to simulate
    pub dt: f64,       // host frame delta
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            dt: 1.0 / 60.0,
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ScenarioConfig {
    pub solver: SolverConfig,
    pub spawn: SpawnConfig,
    pub run: RunConfig,
}

impl ScenarioConfig {
    /// Parse a scenario from YAML text
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    /// Runtime parameters (not yet validated)
    pub fn parameters(&self) -> Parameters {
        Parameters {
            sub_steps: self.solver.sub_steps,
            gravity: NVec3::from(self.solver.gravity),
            constraint_center: NVec3::from(self.solver.constraint_center),
            constraint_radius: self.solver.constraint_radius,
            max_particles: self.solver.max_particles,
            spawn_spacing: self.solver.spawn_spacing,
            collision_mode: self.solver.collision_mode,
            launch_offset: NVec3::from(self.spawn.launch_offset),
            min_radius: self.spawn.min_radius,
            max_radius: self.spawn.max_radius,
            seed: self.spawn.seed,
        }
    }
}
