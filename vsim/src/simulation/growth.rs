//! Incremental population growth
//!
//! The [`GrowthController`] admits at most one particle per tick. After each
//! admission it waits until the newest particle has travelled `spawn_spacing`
//! away from the spawn origin before admitting the next one, spreading the
//! cost of a large population over many frames.
//!
//! ```text
//! Idle ──first tick──▶ Spawning ──admit──▶ Spacing ──far enough──▶ Spawning
//!                          │                  ▲  │
//!                          │                  └──┘ too close
//!                          └──store full──▶ Done (terminal)
//! ```

use nalgebra::{UnitQuaternion, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::simulation::params::Parameters;
use crate::simulation::states::{ParticleStore, NVec3};

/// Where, and facing which way, the next particle appears
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPose {
    pub position: NVec3,
    pub orientation: UnitQuaternion<f64>,
}

/// Host-provided emitter, evaluated at the explicit simulation time `t`
pub trait SpawnOrigin {
    fn pose(&self, t: f64) -> SpawnPose;
}

/// Emitter that never moves
#[derive(Debug, Clone, Copy)]
pub struct FixedOrigin {
    pub position: NVec3,
    pub orientation: UnitQuaternion<f64>,
}

impl FixedOrigin {
    pub fn at(position: NVec3) -> Self {
        Self {
            position,
            orientation: UnitQuaternion::identity(),
        }
    }
}

impl SpawnOrigin for FixedOrigin {
    fn pose(&self, _t: f64) -> SpawnPose {
        SpawnPose {
            position: self.position,
            orientation: self.orientation,
        }
    }
}

/// Emitter swinging like a pendulum around its fixed position
/// Tilts by `amplitude_deg * cos(speed t)` about X and `amplitude_deg * sin(speed t)` about Z
#[derive(Debug, Clone, Copy)]
pub struct PendulumOrigin {
    pub position: NVec3,
    pub amplitude_deg: f64,
    pub speed: f64,
}

impl PendulumOrigin {
    pub fn new(position: NVec3) -> Self {
        Self {
            position,
            amplitude_deg: 50.0,
            speed: 1.0,
        }
    }
}

impl SpawnOrigin for PendulumOrigin {
    fn pose(&self, t: f64) -> SpawnPose {
        let phase = t * self.speed;
        let about_x = (self.amplitude_deg * phase.cos()).to_radians();
        let about_z = (self.amplitude_deg * phase.sin()).to_radians();
        let orientation = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), about_x)
            * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), about_z);
        SpawnPose {
            position: self.position,
            orientation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthState {
    Idle,     // nothing spawned yet
    Spacing,  // waiting for the newest particle to clear the origin
    Spawning, // admitting one particle
    Done,     // capacity reached, terminal
}

pub struct GrowthController {
    state: GrowthState,
    spacing: f64,
    launch_offset: NVec3,
    min_radius: f64,
    max_radius: f64,
    rng: StdRng,
}

impl GrowthController {
    pub fn new(params: &Parameters) -> Self {
        Self {
            state: GrowthState::Idle,
            spacing: params.spawn_spacing,
            launch_offset: params.launch_offset,
            min_radius: params.min_radius,
            max_radius: params.max_radius,
            rng: StdRng::seed_from_u64(params.seed),
        }
    }

    pub fn state(&self) -> GrowthState {
        self.state
    }

    /// Pick up new spawn settings, state and rng stream are kept
    pub fn reconfigure(&mut self, params: &Parameters) {
        self.spacing = params.spawn_spacing;
        self.launch_offset = params.launch_offset;
        self.min_radius = params.min_radius;
        self.max_radius = params.max_radius;
    }

    /// Advance one scheduler tick at simulation time `t`
    /// Returns the index of the admitted particle, if any
    pub fn tick(&mut self, t: f64, store: &mut ParticleStore, origin: &dyn SpawnOrigin) -> Option<usize> {
        match self.state {
            GrowthState::Done => return None,
            GrowthState::Idle => self.state = GrowthState::Spawning,
            GrowthState::Spacing => {
                let Some(newest) = store.active().checked_sub(1) else {
                    self.state = GrowthState::Spawning;
                    return self.admit(t, store, origin);
                };
                let pose = origin.pose(t);
                if (store.current[newest] - pose.position).norm() < self.spacing {
                    return None;
                }
                self.state = GrowthState::Spawning;
            }
            GrowthState::Spawning => {}
        }
        self.admit(t, store, origin)
    }

    fn admit(&mut self, t: f64, store: &mut ParticleStore, origin: &dyn SpawnOrigin) -> Option<usize> {
        if store.is_full() {
            log::info!("growth finished with {} particles", store.active());
            self.state = GrowthState::Done;
            return None;
        }

        let pose = origin.pose(t);
        let last = pose.position - pose.orientation * self.launch_offset;
        let radius = self.rng.gen_range(self.min_radius..=self.max_radius);
        let index = store.push(pose.position, last, radius)?;
        log::debug!("admitted particle {index} at {:?} with radius {radius:.3}", pose.position);

        self.state = if store.is_full() {
            log::info!("growth finished with {} particles", store.active());
            GrowthState::Done
        } else {
            GrowthState::Spacing
        };
        Some(index)
    }
}
