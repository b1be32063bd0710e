//! Rigid2D Engine - 2D rigid body impulse physics in WASM
//!
//! Polygonal bodies under gravity with impulse-based contact response:
//! restitution + Coulomb friction, then Baumgarte-style position correction.
//! Contact detection is done by the caller.
//!
//! Architecture:
//! - core/          - Errors
//! - domain/        - Simulation settings
//! - systems/       - Bodies, contacts, solver passes
//! - simulation/    - Orchestration and the WASM facade

pub mod core;
pub mod domain;
pub mod systems;
pub mod simulation;

// Compatibility re-exports (short paths for the common types)
pub use systems::contact;
pub use systems::rigid_body;
pub use systems::rigid_body_system;

use wasm_bindgen::prelude::*;

// Re-export wasm-bindgen-rayon for thread pool initialization
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    web_sys::console::log_1(&"🦀 Rigid2D WASM Engine initialized!".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use crate::core::PhysicsError;
pub use contact::{Contact, ContactDesc};
pub use domain::SimulationConfig;
pub use rigid_body::{RigidBody, Vec2};
pub use rigid_body_system::{CollisionResolver, PositionCorrector, RigidBodySystem, StepReport};
pub use simulation::{PerfStats, World, WorldCore};
