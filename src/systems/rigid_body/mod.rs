//! RigidBody - A solid body that moves as a unit
//!
//! The body stores its shape as offsets from its center of mass and
//! transforms them to world coordinates using position and rotation.

mod vec2;
mod body;

pub use vec2::Vec2;
pub use body::RigidBody;
