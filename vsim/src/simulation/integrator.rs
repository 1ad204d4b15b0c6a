//! Position-Verlet integration for the particle store
//!
//! Velocity is never stored: it is recovered from the position history
//! and the accumulator is consumed on every step.

use super::states::{ParticleStore, NVec3};

/// Host hook fired after a particle's position is final for the step
pub trait RenderSync {
    fn position_updated(&mut self, index: usize, position: &NVec3);
}

/// Sink that ignores every update (headless runs, tests)
pub struct NoSync;

impl RenderSync for NoSync {
    fn position_updated(&mut self, _index: usize, _position: &NVec3) {}
}

/// Advance particle `i` by one step of size `dt`
/// x_n+1 = x_n + (x_n - x_n-1) + a dt^2, then clears `a`
#[inline]
pub fn integrate(store: &mut ParticleStore, i: usize, dt: f64) {
    let cur = store.current[i];
    // implicit velocity from the history
    let v = cur - store.last[i];
    store.last[i] = cur;
    store.current[i] = cur + v + store.accel[i] * (dt * dt);
    store.accel[i] = NVec3::zeros();
}

/// Integrate particles `0..count` and report each new position to `sink`
pub fn integrate_all(store: &mut ParticleStore, count: usize, dt: f64, sink: &mut dyn RenderSync) {
    for i in 0..count {
        integrate(store, i, dt);
        sink.position_updated(i, &store.current[i]);
    }
}
