//! Systems - bodies, contacts and the per-step solver passes

pub mod contact;
pub mod rigid_body;
pub mod rigid_body_system;
