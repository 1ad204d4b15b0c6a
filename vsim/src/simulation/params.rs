//! Numerical and physical parameters for the solver
//!
//! `Parameters` holds the per-run settings:
//! - sub-step count and gravity,
//! - bounding sphere (`constraint_center`, `constraint_radius`),
//! - population capacity and spawn spacing,
//! - spawn launch offset, radius bounds and random seed,
//! - collision execution mode

use crate::error::ConfigError;
use crate::simulation::collision::CollisionMode;
use crate::simulation::states::NVec3;

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub sub_steps: u32, // physics sub-steps per frame
    pub gravity: NVec3, // uniform acceleration
    pub constraint_center: NVec3, // bounding sphere centre
    pub constraint_radius: f64, // bounding sphere radius
    pub max_particles: usize, // population capacity
    pub spawn_spacing: f64, // distance the newest particle must travel before the next spawn
    pub collision_mode: CollisionMode,
    pub launch_offset: NVec3, // initial per-step displacement, emitter local frame
    pub min_radius: f64, // spawn radius lower bound
    pub max_radius: f64, // spawn radius upper bound
    pub seed: u64, // radius rng seed
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            sub_steps: 8,
            gravity: NVec3::new(0.0, -9.8, 0.0),
            constraint_center: NVec3::new(0.0, 50.0, 0.0),
            constraint_radius: 50.0,
            max_particles: 1000,
            spawn_spacing: 5.0,
            collision_mode: CollisionMode::Sequential,
            launch_offset: NVec3::new(0.0, -2.0, 0.0),
            min_radius: 0.0,
            max_radius: 5.0,
            seed: 42,
        }
    }
}

fn finite(v: &NVec3, what: &'static str) -> Result<(), ConfigError> {
    if v.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(ConfigError::NonFinite(what))
    }
}

impl Parameters {
    /// Reject constants the solver cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sub_steps == 0 {
            return Err(ConfigError::NoSubSteps);
        }
        if !self.constraint_radius.is_finite() || self.constraint_radius <= 0.0 {
            return Err(ConfigError::ConstraintRadius(self.constraint_radius));
        }
        // NaN bounds fail the comparisons below as well
        if !(self.min_radius >= 0.0 && self.min_radius <= self.max_radius && self.max_radius.is_finite()) {
            return Err(ConfigError::RadiusBounds {
                min: self.min_radius,
                max: self.max_radius,
            });
        }
        if self.max_radius / 2.0 >= self.constraint_radius {
            return Err(ConfigError::ParticleTooLarge {
                max_radius: self.max_radius,
                constraint_radius: self.constraint_radius,
            });
        }
        if !self.spawn_spacing.is_finite() || self.spawn_spacing < 0.0 {
            return Err(ConfigError::SpawnSpacing(self.spawn_spacing));
        }
        finite(&self.gravity, "gravity")?;
        finite(&self.constraint_center, "constraint centre")?;
        finite(&self.launch_offset, "launch offset")?;
        Ok(())
    }
}
