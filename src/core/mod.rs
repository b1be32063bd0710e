//! Core - shared error types

pub mod error;

pub use error::PhysicsError;
