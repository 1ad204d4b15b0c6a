//! Pairwise sphere overlap resolution
//!
//! Every unordered pair `(i, j)`, `i < j`, is tested once per call (O(n^2)).
//! Overlapping pairs are pushed apart symmetrically along the axis joining
//! their centres until they just touch. One pass only: clusters of three or
//! more settle over successive sub-steps.
//!
//! Two execution modes:
//! - [`CollisionMode::Sequential`] corrects in place, later pairs see earlier
//!   corrections (Gauss-Seidel order)
//! - [`CollisionMode::Parallel`] splits the outer loop over rayon workers. Each
//!   worker folds its corrections into a private buffer computed from the
//!   positions at the start of the call; the buffers are summed and applied
//!   once all workers are done, so no slot is written concurrently

use rayon::prelude::*;
use serde::Deserialize;

use crate::simulation::constraint::EPSILON;
use crate::simulation::states::{ParticleStore, NVec3};

/// How the resolver's outer loop is executed
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionMode {
    #[default]
    #[serde(rename = "sequential")]
    Sequential,
    #[serde(rename = "parallel")]
    Parallel,
}

/// Correction for the pair at `a`, `b` with combined interaction radius `min_distance`
/// Returns the displacement to add to `a` (`b` gets the negation), if they overlap
#[inline]
fn pair_correction(a: NVec3, b: NVec3, min_distance: f64) -> Option<NVec3> {
    let axis = a - b;
    let distance = axis.norm();
    if distance >= min_distance {
        return None;
    }
    let n = if distance < EPSILON {
        log::trace!("coincident particles, separating along +X");
        NVec3::x()
    } else {
        axis / distance
    };
    let delta = min_distance - distance;
    Some(0.5 * delta * n)
}

/// Resolve overlaps among particles `0..count`. Returns the number of corrected pairs.
pub fn resolve_collisions(store: &mut ParticleStore, count: usize, mode: CollisionMode) -> usize {
    match mode {
        CollisionMode::Sequential => resolve_sequential(store, count),
        CollisionMode::Parallel => resolve_parallel(store, count),
    }
}

fn resolve_sequential(store: &mut ParticleStore, count: usize) -> usize {
    let mut hits = 0;
    for i in 0..count {
        let ri = store.radius[i] / 2.0;
        for j in (i + 1)..count {
            let min_distance = ri + store.radius[j] / 2.0;
            if let Some(c) = pair_correction(store.current[i], store.current[j], min_distance) {
                store.current[i] += c;
                store.current[j] -= c;
                hits += 1;
            }
        }
    }
    hits
}

fn resolve_parallel(store: &mut ParticleStore, count: usize) -> usize {
    if count < 2 {
        return 0;
    }
    let positions = &store.current[..count];
    let radius = &store.radius[..count];

    // Per-worker buffers: (corrections, pair hits)
    let (corrections, hits) = (0..count)
        .into_par_iter()
        .fold(
            || (vec![NVec3::zeros(); count], 0usize),
            |(mut acc, mut hits), i| {
                let ri = radius[i] / 2.0;
                for j in (i + 1)..count {
                    let min_distance = ri + radius[j] / 2.0;
                    if let Some(c) = pair_correction(positions[i], positions[j], min_distance) {
                        acc[i] += c;
                        acc[j] -= c;
                        hits += 1;
                    }
                }
                (acc, hits)
            },
        )
        .reduce(
            || (vec![NVec3::zeros(); count], 0usize),
            |(mut a, ha), (b, hb)| {
                for (x, y) in a.iter_mut().zip(b.iter()) {
                    *x += *y;
                }
                (a, ha + hb)
            },
        );

    for (p, c) in store.current[..count].iter_mut().zip(corrections.iter()) {
        *p += *c;
    }
    hits
}
