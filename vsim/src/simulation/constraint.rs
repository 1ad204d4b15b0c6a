//! Spherical containment
//!
//! Keeps every particle's interaction sphere inside one bounding sphere by
//! projecting escaped particles back onto the shell.

use crate::simulation::states::{ParticleStore, NVec3};

/// Distances below this are treated as coincident
pub const EPSILON: f64 = 1e-9;

/// Bounding sphere all particles must stay inside
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereConstraint {
    pub center: NVec3,
    pub max_distance: f64,
}

impl SphereConstraint {
    /// Clamp particle `i`. Returns true if it was moved.
    pub fn enforce(&self, store: &mut ParticleStore, i: usize) -> bool {
        let limit = self.max_distance - store.radius[i] / 2.0;
        let to_obj = store.current[i] - self.center;
        let distance = to_obj.norm();
        if distance <= limit {
            return false;
        }

        let n = if distance < EPSILON {
            log::trace!("particle {i} sits on the constraint centre, projecting along +Y");
            NVec3::y()
        } else {
            to_obj / distance
        };
        store.current[i] = self.center + n * limit;
        true
    }

    /// Clamp particles `0..count`, returns how many were moved
    pub fn enforce_all(&self, store: &mut ParticleStore, count: usize) -> usize {
        (0..count).filter(|&i| self.enforce(store, i)).count()
    }
}
