//! Step driver: the solver the host talks to
//!
//! One `tick(dt)` per host frame: the growth controller gets a chance to
//! admit one particle, then the frame is split into `sub_steps` sub-steps of
//! `dt / sub_steps`, each running
//! gravity -> containment -> collisions -> integration
//! over the particles that were active when the frame started.

use crate::error::ConfigError;
use crate::simulation::collision::resolve_collisions;
use crate::simulation::constraint::SphereConstraint;
use crate::simulation::forces::{AccelSet, Acceleration, UniformGravity};
use crate::simulation::growth::{GrowthController, GrowthState, SpawnOrigin};
use crate::simulation::integrator::{integrate_all, NoSync, RenderSync};
use crate::simulation::params::Parameters;
use crate::simulation::states::{ParticleSnapshot, ParticleStore};

pub struct Solver {
    params: Parameters,
    store: ParticleStore,
    forces: AccelSet,
    constraint: SphereConstraint,
    growth: GrowthController,
    origin: Box<dyn SpawnOrigin + Send + Sync>,
    t: f64, // simulation time, advanced by every tick
}

impl Solver {
    pub fn new(params: Parameters, origin: impl SpawnOrigin + Send + Sync + 'static) -> Result<Self, ConfigError> {
        params.validate()?;
        log::info!(
            "solver configured: {} sub-steps, capacity {}, {:?} collisions",
            params.sub_steps, params.max_particles, params.collision_mode
        );

        Ok(Self {
            store: ParticleStore::with_capacity(params.max_particles),
            forces: AccelSet::new().with(UniformGravity { g: params.gravity }),
            constraint: SphereConstraint {
                center: params.constraint_center,
                max_distance: params.constraint_radius,
            },
            growth: GrowthController::new(&params),
            origin: Box::new(origin),
            t: 0.0,
            params,
        })
    }

    /// Replace the running configuration. Particles and growth state are kept.
    pub fn configure(&mut self, params: Parameters) -> Result<(), ConfigError> {
        params.validate()?;
        if params.max_particles < self.store.active() {
            return Err(ConfigError::CapacityBelowActive {
                requested: params.max_particles,
                active: self.store.active(),
            });
        }
        log::info!(
            "solver reconfigured: {} sub-steps, capacity {}, {:?} collisions",
            params.sub_steps, params.max_particles, params.collision_mode
        );

        self.store.set_capacity(params.max_particles);
        self.forces = AccelSet::new().with(UniformGravity { g: params.gravity });
        self.constraint = SphereConstraint {
            center: params.constraint_center,
            max_distance: params.constraint_radius,
        };
        self.growth.reconfigure(&params);
        self.params = params;
        Ok(())
    }

    /// Swap the emitter the growth controller spawns from
    pub fn set_origin(&mut self, origin: impl SpawnOrigin + Send + Sync + 'static) {
        self.origin = Box::new(origin);
    }

    /// Register an extra acceleration source alongside gravity
    /// Dropped again by the next `configure`
    pub fn add_force(&mut self, term: impl Acceleration + Send + Sync + 'static) {
        let forces = std::mem::take(&mut self.forces);
        self.forces = forces.with(term);
    }

    /// One host frame without render notifications
    pub fn tick(&mut self, dt: f64) -> Option<usize> {
        self.tick_with(dt, &mut NoSync)
    }

    /// One host frame: at most one admission, then a full sub-stepped step
    /// Returns the index of the particle admitted this frame, if any
    pub fn tick_with(&mut self, dt: f64, sink: &mut dyn RenderSync) -> Option<usize> {
        let admitted = self.growth.tick(self.t, &mut self.store, self.origin.as_ref());
        self.step_with(dt, sink);
        admitted
    }

    pub fn step(&mut self, dt: f64) {
        self.step_with(dt, &mut NoSync);
    }

    /// Advance every active particle by `dt`, split into `sub_steps` sub-steps
    pub fn step_with(&mut self, dt: f64, sink: &mut dyn RenderSync) {
        if !dt.is_finite() || dt <= 0.0 {
            log::warn!("ignoring step with dt = {dt}");
            return;
        }

        // frozen for the whole frame
        let count = self.store.active();
        let sub_dt = dt / f64::from(self.params.sub_steps);

        for k in 0..self.params.sub_steps {
            let t = self.t + f64::from(k) * sub_dt;
            self.forces.accumulate_accels(t, &mut self.store, count);
            self.constraint.enforce_all(&mut self.store, count);
            resolve_collisions(&mut self.store, count, self.params.collision_mode);
            integrate_all(&mut self.store, count, sub_dt, sink);
        }
        self.t += dt;
    }

    pub fn active_particle_count(&self) -> usize {
        self.store.active()
    }

    pub fn particle_snapshot(&self, index: usize) -> Option<ParticleSnapshot> {
        self.store.snapshot(index)
    }

    pub fn particles(&self) -> impl Iterator<Item = ParticleSnapshot> + '_ {
        self.store.iter()
    }

    pub fn growth_state(&self) -> GrowthState {
        self.growth.state()
    }

    pub fn parameters(&self) -> &Parameters {
        &self.params
    }

    pub fn constraint(&self) -> &SphereConstraint {
        &self.constraint
    }

    /// Simulation time, the sum of all deltas passed to `step`
    pub fn time(&self) -> f64 {
        self.t
    }

    pub fn store(&self) -> &ParticleStore {
        &self.store
    }
}
