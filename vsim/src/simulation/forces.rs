//! Force / acceleration contributors for the solver
//!
//! Each contributor adds into the store's pending acceleration. Uniform
//! gravity is the only source the solver registers; the set exists so more
//! sources can be composed without touching the step driver.

use crate::simulation::states::{ParticleStore, NVec3};

/// Collection of acceleration terms (gravity, drag, etc)
/// Contributions are summed into `ParticleStore::accel`
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new(),
        }
    }

    /// Add an acceleration term
    pub fn with(mut self, term: impl Acceleration + Send + Sync + 'static) -> Self {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Let every term add its contribution for particles `0..count` at time `t`
    /// The accumulator is not zeroed here, integration clears it
    pub fn accumulate_accels(&self, t: f64, store: &mut ParticleStore, count: usize) {
        for term in &self.terms {
            term.acceleration(t, store, count);
        }
    }
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for acceleration sources operating on [`ParticleStore`]
/// Implementations add their contribution into `store.accel[i]` for `i < count`
pub trait Acceleration {
    fn acceleration(&self, t: f64, store: &mut ParticleStore, count: usize);
}

/// Constant acceleration applied to every particle
pub struct UniformGravity {
    pub g: NVec3,
}

impl Acceleration for UniformGravity {
    fn acceleration(&self, _t: f64, store: &mut ParticleStore, count: usize) {
        for i in 0..count {
            store.accelerate(i, self.g);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Wind(NVec3);

    impl Acceleration for Wind {
        fn acceleration(&self, _t: f64, store: &mut ParticleStore, count: usize) {
            for a in store.accel.iter_mut().take(count) {
                *a += self.0;
            }
        }
    }

    #[test]
    fn terms_are_summed() {
        let mut store = ParticleStore::with_capacity(2);
        store.push(NVec3::zeros(), NVec3::zeros(), 1.0);
        store.push(NVec3::x(), NVec3::x(), 1.0);

        let forces = AccelSet::new()
            .with(UniformGravity { g: NVec3::new(0.0, -9.8, 0.0) })
            .with(Wind(NVec3::new(1.0, 0.0, 0.0)));
        forces.accumulate_accels(0.0, &mut store, 2);

        for a in &store.accel {
            assert!((a - NVec3::new(1.0, -9.8, 0.0)).norm() < 1e-12);
        }
    }

    #[test]
    fn only_active_count_is_touched() {
        let mut store = ParticleStore::with_capacity(2);
        store.push(NVec3::zeros(), NVec3::zeros(), 1.0);
        store.push(NVec3::x(), NVec3::x(), 1.0);

        let forces = AccelSet::new().with(UniformGravity { g: NVec3::new(0.0, -1.0, 0.0) });
        forces.accumulate_accels(0.0, &mut store, 1);

        assert_eq!(store.accel[0], NVec3::new(0.0, -1.0, 0.0));
        assert_eq!(store.accel[1], NVec3::zeros());
    }
}
