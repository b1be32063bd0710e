use crate::core::PhysicsError;
use crate::domain::SimulationConfig;
use crate::rigid_body::{RigidBody, Vec2};
use crate::systems::contact::{Contact, ContactDesc};

use super::correction::{CorrectionReport, PositionCorrector};
use super::resolver::{CollisionResolver, ResolveReport};

/// Manages all rigid bodies in the simulation
pub struct RigidBodySystem {
    bodies: Vec<RigidBody>,
    next_id: u32,
    config: SimulationConfig,
    resolver: CollisionResolver,
    corrector: PositionCorrector,
}

/// What one step did, for perf stats and tests
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepReport {
    pub resolve: ResolveReport,
    pub correction: CorrectionReport,
    pub integrated: u32,
}

impl RigidBodySystem {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            bodies: Vec::new(),
            next_id: 1,
            resolver: CollisionResolver::new(&config),
            corrector: PositionCorrector::new(&config),
            config,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Swap tunables; bodies are kept
    pub fn set_config(&mut self, config: SimulationConfig) {
        self.resolver = CollisionResolver::new(&config);
        self.corrector = PositionCorrector::new(&config);
        self.config = config;
    }

    /// Add a new rigid body and return its id.
    pub fn add_body(&mut self, mut body: RigidBody) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        body.id = id;
        body.active = true;
        self.bodies.push(body);
        id
    }

    /// Remove a rigid body by ID.
    ///
    /// Indices of other bodies may change; contacts built before the removal are stale.
    pub fn remove_body(&mut self, id: u32) -> bool {
        if let Some(idx) = self.index_of(id) {
            self.bodies.swap_remove(idx);
            return true;
        }
        false
    }

    /// Remove all bodies (used by World::clear()).
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.next_id = 1;
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Bodies in index order; contacts refer to these indices
    pub fn bodies(&self) -> &[RigidBody] {
        &self.bodies
    }

    pub fn index_of(&self, id: u32) -> Option<usize> {
        self.bodies.iter().position(|b| b.id == id)
    }

    pub fn body(&self, id: u32) -> Option<&RigidBody> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn body_mut(&mut self, id: u32) -> Option<&mut RigidBody> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    /// Accelerate every active body by the configured gravity.
    pub fn apply_gravity(&mut self) {
        let g = self.config.gravity;
        for body in self.bodies.iter_mut().filter(|b| b.active) {
            body.accelerate(g);
        }
    }

    /// Force/torque accumulators in body order
    pub fn accumulators(&self) -> Vec<(Vec2, f32)> {
        self.bodies.iter().map(|b| b.accumulators()).collect()
    }

    /// Put back accumulators taken with `accumulators()`
    pub fn restore_accumulators(&mut self, saved: &[(Vec2, f32)]) {
        for (body, &acc) in self.bodies.iter_mut().zip(saved) {
            body.restore_accumulators(acc);
        }
    }

    /// Turn id-based contact records into index-based contacts against current state
    pub fn contacts_from_descs(&self, descs: &[ContactDesc]) -> Result<Vec<Contact>, PhysicsError> {
        descs
            .iter()
            .map(|d| {
                let line = self
                    .index_of(d.line_owner)
                    .ok_or(PhysicsError::UnknownBody(d.line_owner as usize))?;
                let point = self
                    .index_of(d.point_owner)
                    .ok_or(PhysicsError::UnknownBody(d.point_owner as usize))?;
                Contact::between(&self.bodies, line, point, d.normal, d.depth, d.point)
            })
            .collect()
    }

    /// Main update loop: resolve velocities, correct positions, integrate.
    ///
    /// `contacts` must have been generated from the current body state.
    pub fn step(&mut self, contacts: &[Contact], dt: f32) -> Result<StepReport, PhysicsError> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(PhysicsError::InvalidTimeStep(dt));
        }

        let resolve = self.resolver.resolve(&mut self.bodies, contacts, dt)?;
        let correction = self.corrector.correct(&mut self.bodies, contacts)?;

        let scale = self.config.world_scale;
        let mut integrated = 0;
        for body in self.bodies.iter_mut().filter(|b| b.active) {
            body.update(dt, scale);
            integrated += 1;
        }

        Ok(StepReport { resolve, correction, integrated })
    }
}

impl Default for RigidBodySystem {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}
