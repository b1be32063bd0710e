//! Error types for body construction and contact resolution.

use thiserror::Error;

/// Errors raised at the boundary of the physics core.
///
/// Malformed input (impossible mass, bad contact data) is rejected here instead
/// of being clamped. Numerical edge cases with a defined fallback (separating
/// contacts, negligible friction, sub-slop overlap) never produce an error.
#[derive(Debug, Error)]
pub enum PhysicsError {
    /// A body was built from an empty sample list.
    #[error("body needs at least one sample point")]
    EmptyShape,

    /// A sample mass is negative or not finite, or the total is not positive.
    #[error("invalid mass {mass}: dynamic bodies need finite non-negative samples and a positive total")]
    InvalidMass {
        /// Offending sample mass, or the summed mass.
        mass: f32,
    },

    /// Contact normal is not unit length.
    #[error("contact normal ({x}, {y}) is not unit length")]
    InvalidNormal {
        /// Normal x component.
        x: f32,
        /// Normal y component.
        y: f32,
    },

    /// Penetration depth is negative or not finite.
    #[error("invalid penetration depth {0}")]
    InvalidDepth(f32),

    /// A contact names the same body as line owner and point owner.
    #[error("contact references body {0} as both line and point owner")]
    SelfContact(usize),

    /// A contact or command references a body that does not exist.
    #[error("unknown body {0}")]
    UnknownBody(usize),

    /// Effective mass of a contact is zero (e.g. two static bodies touching).
    #[error("degenerate contact between bodies {line_owner} and {point_owner}: zero effective mass")]
    DegenerateContact {
        /// Index of the edge-contributing body.
        line_owner: usize,
        /// Index of the vertex-contributing body.
        point_owner: usize,
    },

    /// Computed impulse exceeded the sanity bound.
    #[error("impulse {impulse} exceeds bound {bound} (unstable contact geometry)")]
    ImpulseOverflow {
        /// Magnitude of the computed normal impulse.
        impulse: f32,
        /// Configured limit.
        bound: f32,
    },

    /// Step duration is zero, negative or not finite.
    #[error("invalid time step {0}")]
    InvalidTimeStep(f32),

    /// Configuration value out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// JSON payload could not be parsed.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

impl PhysicsError {
    /// Creates an invalid config error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
