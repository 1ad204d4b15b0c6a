//! Core state types for the sphere solver.
//!
//! Particles live in a single struct-of-arrays [`ParticleStore`]:
//! - `current` / `last` positions (velocity is implicit: `current - last`)
//! - `accel`, the pending acceleration accumulator
//! - `radius`, visual size; the interaction radius is `radius / 2`
//!
//! Slots `0..active` are live. The store never shrinks.

use nalgebra::Vector3;
pub type NVec3 = Vector3<f64>;

/// Read-only view of one particle handed to the host for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSnapshot {
    pub position: NVec3,
    pub radius: f64,
}

#[derive(Debug, Clone)]
pub struct ParticleStore {
    pub current: Vec<NVec3>, // position at this step
    pub last: Vec<NVec3>, // position one step ago
    pub accel: Vec<NVec3>, // pending acceleration
    pub radius: Vec<f64>, // visual radius
    capacity: usize,
}

impl ParticleStore {
    /// Empty store able to hold `capacity` particles
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            current: Vec::with_capacity(capacity),
            last: Vec::with_capacity(capacity),
            accel: Vec::with_capacity(capacity),
            radius: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Number of admitted particles
    pub fn active(&self) -> usize {
        self.current.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.active() >= self.capacity
    }

    /// Grow (never shrink) the number of slots
    pub(crate) fn set_capacity(&mut self, capacity: usize) {
        let extra = capacity.saturating_sub(self.active());
        self.current.reserve(extra);
        self.last.reserve(extra);
        self.accel.reserve(extra);
        self.radius.reserve(extra);
        self.capacity = capacity;
    }

    /// Activate the next slot. Returns its index, or `None` once full.
    pub fn push(&mut self, current: NVec3, last: NVec3, radius: f64) -> Option<usize> {
        if self.is_full() {
            return None;
        }
        self.current.push(current);
        self.last.push(last);
        self.accel.push(NVec3::zeros());
        self.radius.push(radius);
        Some(self.current.len() - 1)
    }

    /// Add `a` into the pending acceleration of particle `i`
    #[inline]
    pub fn accelerate(&mut self, i: usize, a: NVec3) {
        self.accel[i] += a;
    }

    /// Implicit per-step displacement of particle `i`
    #[inline]
    pub fn displacement(&self, i: usize) -> NVec3 {
        self.current[i] - self.last[i]
    }

    pub fn snapshot(&self, i: usize) -> Option<ParticleSnapshot> {
        Some(ParticleSnapshot {
            position: *self.current.get(i)?,
            radius: *self.radius.get(i)?,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = ParticleSnapshot> + '_ {
        self.current
            .iter()
            .zip(self.radius.iter())
            .map(|(p, r)| ParticleSnapshot { position: *p, radius: *r })
    }
}
