use std::time::Instant;

use crate::simulation::collision::{resolve_collisions, CollisionMode};
use crate::simulation::engine::Solver;
use crate::simulation::growth::FixedOrigin;
use crate::simulation::params::Parameters;
use crate::simulation::states::{ParticleStore, NVec3};

/// Helper to build a packed store of size `n` inside a radius-5 ball
fn make_store(n: usize) -> ParticleStore {
    let mut store = ParticleStore::with_capacity(n);

    for i in 0..n {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        let x = NVec3::new(
            (i_f * 0.37).sin() * 5.0,
            (i_f * 0.13).cos() * 5.0,
            (i_f * 0.07).sin() * 5.0,
        );
        store.push(x, x, 0.5);
    }
    store
}

/// Time one resolver pass per mode for a range of n
/// Paste output directly into a spreadsheet to graph
pub fn bench_collisions() {
    println!("N,sequential_ms,parallel_ms");

    for n in [200, 400, 800, 1600, 3200, 6400] {
        let template = make_store(n);

        // Warm up the rayon pool
        let mut warm = template.clone();
        resolve_collisions(&mut warm, n, CollisionMode::Parallel);

        let mut seq = template.clone();
        let t0 = Instant::now();
        resolve_collisions(&mut seq, n, CollisionMode::Sequential);
        let ms_seq = t0.elapsed().as_secs_f64() * 1000.0;

        let mut par = template.clone();
        let t1 = Instant::now();
        resolve_collisions(&mut par, n, CollisionMode::Parallel);
        let ms_par = t1.elapsed().as_secs_f64() * 1000.0;

        println!("{},{:.6},{:.6}", n, ms_seq, ms_par);
    }
}

/// Time full solver frames while the population grows
/// Prints the per-frame cost every `every` frames
pub fn bench_step(mode: CollisionMode, frames: usize, every: usize) {
    let params = Parameters {
        max_particles: 2000,
        spawn_spacing: 1.0,
        collision_mode: mode,
        ..Default::default()
    };
    let origin = FixedOrigin::at(NVec3::new(0.0, 90.0, 0.0));
    let mut solver = match Solver::new(params, origin) {
        Ok(s) => s,
        Err(e) => {
            log::error!("benchmark configuration rejected: {e}");
            return;
        }
    };

    println!("frame,particles,frame_ms");
    let every = every.max(1);
    for frame in 0..frames {
        let t0 = Instant::now();
        solver.tick(1.0 / 60.0);
        let ms = t0.elapsed().as_secs_f64() * 1000.0;

        if frame % every == 0 {
            println!("{},{},{:.6}", frame, solver.active_particle_count(), ms);
        }
    }
}
