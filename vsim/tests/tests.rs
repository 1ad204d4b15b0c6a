use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use vsim::simulation::states::{ParticleStore, NVec3};
use vsim::simulation::params::Parameters;
use vsim::simulation::integrator::{integrate, RenderSync};
use vsim::simulation::constraint::SphereConstraint;
use vsim::simulation::collision::{resolve_collisions, CollisionMode};
use vsim::simulation::growth::{FixedOrigin, GrowthState};
use vsim::simulation::engine::Solver;

const EPS: f64 = 1e-9;

/// Build a store from (position, radius) pairs at rest
pub fn store_at_rest(particles: &[(NVec3, f64)]) -> ParticleStore {
    let mut store = ParticleStore::with_capacity(particles.len());
    for (p, r) in particles {
        store.push(*p, *p, *r);
    }
    store
}

/// Parameters for the two-particle growth scenario
pub fn growth_params() -> Parameters {
    Parameters {
        sub_steps: 1,
        gravity: NVec3::new(0.0, -9.8, 0.0),
        max_particles: 2,
        spawn_spacing: 5.0,
        ..Default::default()
    }
}

fn random_point(rng: &mut StdRng, extent: f64) -> NVec3 {
    NVec3::new(
        rng.gen_range(-extent..extent),
        rng.gen_range(-extent..extent),
        rng.gen_range(-extent..extent),
    )
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn integrate_without_acceleration_extrapolates() {
    let cur = NVec3::new(3.0, -1.0, 2.0);
    let last = NVec3::new(2.5, -0.5, 2.0);
    let mut store = store_at_rest(&[(cur, 1.0)]);
    store.last[0] = last;

    integrate(&mut store, 0, 0.016);
    assert!((store.current[0] - (2.0 * cur - last)).norm() < EPS);
    assert_eq!(store.last[0], cur);
}

#[test]
fn solver_keeps_constant_velocity_without_gravity() {
    let params = Parameters {
        sub_steps: 1,
        gravity: NVec3::zeros(),
        spawn_spacing: 1.0e6,
        ..Default::default()
    };
    let origin = FixedOrigin::at(params.constraint_center);
    let mut solver = Solver::new(params, origin).unwrap();

    for n in 1..=20 {
        solver.tick(0.1);
        let y = solver.particle_snapshot(0).unwrap().position.y;
        assert!((y - (50.0 - 2.0 * n as f64)).abs() < EPS, "tick {n}: y = {y}");
    }
    assert_eq!(solver.active_particle_count(), 1);
}

struct CountingSync {
    calls: usize,
}

impl RenderSync for CountingSync {
    fn position_updated(&mut self, _index: usize, position: &NVec3) {
        assert!(position.iter().all(|c| c.is_finite()));
        self.calls += 1;
    }
}

#[test]
fn render_sync_fires_once_per_particle_per_sub_step() {
    let params = Parameters { sub_steps: 3, spawn_spacing: 0.0, ..Default::default() };
    let origin = FixedOrigin::at(NVec3::new(0.0, 80.0, 0.0));
    let mut solver = Solver::new(params, origin).unwrap();
    let mut sync = CountingSync { calls: 0 };

    solver.tick_with(0.01, &mut sync);
    assert_eq!(sync.calls, 3);

    solver.tick_with(0.01, &mut sync);
    assert_eq!(sync.calls, 3 + 2 * 3);
}

// ==================================================================================
// Constraint tests
// ==================================================================================

#[test]
fn constraint_contains_every_particle() {
    let mut rng = StdRng::seed_from_u64(1);
    let c = SphereConstraint { center: NVec3::new(0.0, 50.0, 0.0), max_distance: 50.0 };

    let particles: Vec<(NVec3, f64)> = (0..500)
        .map(|_| (c.center + random_point(&mut rng, 120.0), rng.gen_range(0.0..5.0)))
        .collect();
    let mut store = store_at_rest(&particles);

    c.enforce_all(&mut store, particles.len());
    for (p, r) in store.current.iter().zip(store.radius.iter()) {
        let d = (p - c.center).norm();
        assert!(d <= c.max_distance - r / 2.0 + EPS, "d = {d}, r = {r}");
    }
}

// ==================================================================================
// Collision tests
// ==================================================================================

#[test]
fn two_overlapping_spheres_are_pushed_to_contact() {
    for mode in [CollisionMode::Sequential, CollisionMode::Parallel] {
        let mut store = store_at_rest(&[
            (NVec3::new(-0.5, 0.0, 0.0), 4.0),
            (NVec3::new(0.5, 0.0, 0.0), 4.0),
        ]);
        resolve_collisions(&mut store, 2, mode);

        let d = (store.current[0] - store.current[1]).norm();
        assert!((d - 4.0).abs() < EPS, "{mode:?}: distance {d}");
        // each moved 1.5 away from the midpoint at the origin
        assert!((store.current[0] - NVec3::new(-2.0, 0.0, 0.0)).norm() < EPS);
        assert!((store.current[1] - NVec3::new(2.0, 0.0, 0.0)).norm() < EPS);
    }
}

#[test]
fn random_pairs_separate_symmetrically() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let a = random_point(&mut rng, 3.0);
        let b = random_point(&mut rng, 3.0);
        let (ra, rb) = (rng.gen_range(0.1..5.0), rng.gen_range(0.1..5.0));
        let min_distance = ra / 2.0 + rb / 2.0;
        let before = (a - b).norm();

        let mut store = store_at_rest(&[(a, ra), (b, rb)]);
        resolve_collisions(&mut store, 2, CollisionMode::Sequential);

        let da = store.current[0] - a;
        let db = store.current[1] - b;
        assert!((da + db).norm() < EPS, "corrections not equal and opposite");

        let after = (store.current[0] - store.current[1]).norm();
        if before < min_distance {
            assert!((after - min_distance).abs() < 1e-9, "before {before}, after {after}");
        } else {
            assert_eq!(da, NVec3::zeros());
            assert_eq!(db, NVec3::zeros());
        }
    }
}

#[test]
fn parallel_matches_sequential_on_isolated_pairs() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut particles = Vec::new();
    for k in 0..32 {
        // pairs 100 units apart never interact with each other
        let base = NVec3::new(100.0 * k as f64, 0.0, 0.0);
        particles.push((base + random_point(&mut rng, 0.5), 2.0));
        particles.push((base + random_point(&mut rng, 0.5), 2.0));
    }

    let mut seq = store_at_rest(&particles);
    let mut par = store_at_rest(&particles);
    let hits_seq = resolve_collisions(&mut seq, particles.len(), CollisionMode::Sequential);
    let hits_par = resolve_collisions(&mut par, particles.len(), CollisionMode::Parallel);

    assert_eq!(hits_seq, hits_par);
    for (s, p) in seq.current.iter().zip(par.current.iter()) {
        assert!((s - p).norm() < 1e-9);
    }
}

// ==================================================================================
// Growth tests
// ==================================================================================

#[test]
fn second_particle_waits_for_spacing() {
    let params = growth_params();
    let origin_pos = NVec3::new(0.0, 50.0, 0.0);
    let mut solver = Solver::new(params, FixedOrigin::at(origin_pos)).unwrap();

    solver.tick(0.1);
    assert_eq!(solver.active_particle_count(), 1);

    let mut second_at = None;
    for frame in 1..200 {
        let before = solver.active_particle_count();
        let newest = solver.particle_snapshot(before - 1).unwrap().position;
        let cleared = (newest - origin_pos).norm() >= 5.0;

        solver.tick(0.1);
        let after = solver.active_particle_count();

        if before == 1 {
            assert_eq!(after == 2, cleared, "frame {frame}: admission must follow the spacing gate");
            if after == 2 {
                second_at = Some(frame);
            }
        } else {
            assert_eq!(after, 2);
        }
    }

    assert!(second_at.is_some(), "second particle never admitted");
    assert_eq!(solver.growth_state(), GrowthState::Done);
}

#[test]
fn population_is_monotonic_and_bounded() {
    let params = Parameters { max_particles: 40, sub_steps: 4, ..Default::default() };
    let mut solver = Solver::new(params, FixedOrigin::at(NVec3::new(0.0, 80.0, 0.0))).unwrap();

    let mut last = 0;
    for _ in 0..2000 {
        solver.tick(1.0 / 60.0);
        let n = solver.active_particle_count();
        assert!(n >= last);
        assert!(n <= 40);
        assert!(n - last <= 1, "more than one admission in a tick");
        last = n;
    }
    assert_eq!(last, 40);
}

#[test]
fn long_run_stays_finite_and_near_container() {
    let params = Parameters {
        max_particles: 150,
        spawn_spacing: 3.0,
        collision_mode: CollisionMode::Parallel,
        ..Default::default()
    };
    let mut solver = Solver::new(params, FixedOrigin::at(NVec3::new(0.0, 80.0, 0.0))).unwrap();

    for _ in 0..1500 {
        solver.tick(1.0 / 60.0);
    }

    let c = *solver.constraint();
    for p in solver.particles() {
        assert!(p.position.iter().all(|v| v.is_finite()));
        // positions are read one integration past the last clamp
        assert!((p.position - c.center).norm() < 2.0 * c.max_distance);
    }
}
