//! World - rigid body simulation orchestration
//!
//! WorldCore only orchestrates; the physics lives in systems/:
//! - body state and integration in rigid_body
//! - contact records in contact
//! - velocity and position passes in rigid_body_system
//!
//! Contact detection is not part of the engine. The driver builds contacts
//! from the current body poses and passes them to `step`.

use crate::core::PhysicsError;
use crate::domain::SimulationConfig;
use crate::rigid_body::RigidBody;
use crate::rigid_body_system::{RigidBodySystem, StepReport};
use crate::systems::contact::{Contact, ContactDesc};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "step/step.rs"]
mod step;
#[path = "rigid/rigid.rs"]
mod rigid;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
mod facade;

pub use facade::World;
pub use perf_stats::PerfStats;

use perf_timer::PerfTimer;

/// The simulation world
pub struct WorldCore {
    rigid_bodies: RigidBodySystem,

    // State
    frame: u64,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl WorldCore {
    /// Create a new world with default tuning
    pub fn new() -> Self {
        init::create_world_core(SimulationConfig::default())
    }

    pub fn with_config(config: SimulationConfig) -> Self {
        init::create_world_core(config)
    }

    pub fn frame(&self) -> u64 { self.frame }

    pub fn config(&self) -> &SimulationConfig {
        self.rigid_bodies.config()
    }

    /// Replace tunables from JSON; invalid configs leave the current one in place
    pub fn load_config_json(&mut self, json: &str) -> Result<(), PhysicsError> {
        settings::load_config_json(self, json)
    }

    pub fn config_json(&self) -> String {
        self.config().to_json()
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    pub fn set_gravity(&mut self, x: f32, y: f32) -> Result<(), PhysicsError> {
        settings::set_gravity(self, x, y)
    }

    pub fn set_world_scale(&mut self, scale: f32) -> Result<(), PhysicsError> {
        settings::set_world_scale(self, scale)
    }

    /// Remove all bodies
    pub fn clear(&mut self) {
        self.rigid_bodies.clear();
        self.frame = 0;
    }

    // === RIGID BODY API ===

    /// Add an already-built body; returns its id
    pub fn add_body(&mut self, body: RigidBody) -> u32 {
        self.rigid_bodies.add_body(body)
    }

    /// Spawn a dynamic box centered at (x, y) with size (w, h)
    pub fn spawn_box(&mut self, x: f32, y: f32, w: f32, h: f32, mass: f32) -> Result<u32, PhysicsError> {
        rigid::spawn_box(self, x, y, w, h, mass)
    }

    /// Spawn a dynamic circle (regular polygon with `segments` vertices)
    pub fn spawn_circle(&mut self, x: f32, y: f32, radius: f32, segments: u32, mass: f32) -> Result<u32, PhysicsError> {
        rigid::spawn_circle(self, x, y, radius, segments, mass)
    }

    /// Spawn a dynamic convex polygon from flattened `[x0, y0, x1, y1, ...]` vertices
    pub fn spawn_polygon(&mut self, x: f32, y: f32, vertices: &[f32], mass: f32) -> Result<u32, PhysicsError> {
        rigid::spawn_polygon(self, x, y, vertices, mass)
    }

    pub fn spawn_static_box(&mut self, x: f32, y: f32, w: f32, h: f32) -> u32 {
        rigid::spawn_static_box(self, x, y, w, h)
    }

    pub fn spawn_static_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32) -> u32 {
        rigid::spawn_static_line(self, x0, y0, x1, y1)
    }

    /// Remove a rigid body by ID
    pub fn remove_body(&mut self, id: u32) -> bool {
        rigid::remove_body(self, id)
    }

    /// Get number of rigid bodies
    pub fn body_count(&self) -> usize {
        rigid::body_count(self)
    }

    pub fn body(&self, id: u32) -> Option<&RigidBody> {
        self.rigid_bodies.body(id)
    }

    pub fn body_mut(&mut self, id: u32) -> Option<&mut RigidBody> {
        self.rigid_bodies.body_mut(id)
    }

    /// Bodies in index order (contact owners index into this slice)
    pub fn bodies(&self) -> &[RigidBody] {
        self.rigid_bodies.bodies()
    }

    /// World outline of a body as `[x0, y0, x1, y1, ...]` (empty for unknown ids)
    pub fn body_vertices(&self, id: u32) -> Vec<f32> {
        rigid::body_vertices(self, id)
    }

    /// Build index-based contacts from id-based records against the current state
    pub fn contacts_from_descs(&self, descs: &[ContactDesc]) -> Result<Vec<Contact>, PhysicsError> {
        self.rigid_bodies.contacts_from_descs(descs)
    }

    /// Step the simulation forward with the contacts of the current state
    pub fn step(&mut self, contacts: &[Contact], dt: f32) -> Result<StepReport, PhysicsError> {
        step::step(self, contacts, dt)
    }

    /// Step with a JSON contact list (`ContactDesc` records)
    pub fn step_json(&mut self, json: &str, dt: f32) -> Result<StepReport, PhysicsError> {
        let descs = ContactDesc::list_from_json(json)?;
        let contacts = self.contacts_from_descs(&descs)?;
        self.step(&contacts, dt)
    }
}

impl Default for WorldCore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
