use serde::{Deserialize, Serialize};

use crate::core::PhysicsError;
use crate::rigid_body::Vec2;

/// Simulation length units per physical meter used by the sandbox renderer.
pub const DEFAULT_WORLD_SCALE: f32 = 10.0;
/// Screen-space gravity (y grows downwards).
pub const DEFAULT_GRAVITY: Vec2 = Vec2::new(0.0, 9.81);

/// Tunables for integration and contact response.
///
/// All fields are optional in JSON; missing ones fall back to [`Default`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationConfig {
    /// Simulation units per meter, applied to linear and angular velocity updates.
    pub world_scale: f32,
    /// Acceleration applied to every dynamic body each step.
    pub gravity: Vec2,
    /// Coefficient of restitution for non-resting contacts.
    pub restitution: f32,
    /// Added to |gravity * dt|² when deciding whether a contact is resting.
    pub resting_epsilon: f32,
    pub static_friction: f32,
    pub dynamic_friction: f32,
    /// Fraction of penetration removed per step (usually 0.2 to 0.8).
    pub correction_percent: f32,
    /// Penetration tolerated without correction (usually 0.01 to 0.1).
    pub slop: f32,
    /// Sanity bound on a single normal impulse.
    pub max_impulse: f32,
    /// Tangential impulses below this are dropped.
    pub friction_epsilon: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            world_scale: DEFAULT_WORLD_SCALE,
            gravity: DEFAULT_GRAVITY,
            restitution: 0.3,
            resting_epsilon: 0.01,
            static_friction: 0.61,
            dynamic_friction: 0.47,
            correction_percent: 0.3,
            slop: 0.05,
            max_impulse: 100_000.0,
            friction_epsilon: 0.000_001,
        }
    }
}

impl SimulationConfig {
    /// Unit-scale config (1 simulation unit per meter), handy for analytic checks
    pub fn unit_scale() -> Self {
        Self { world_scale: 1.0, ..Self::default() }
    }

    pub fn from_json(json: &str) -> Result<Self, PhysicsError> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !(self.world_scale.is_finite() && self.world_scale > 0.0) {
            return Err(PhysicsError::invalid_config(format!(
                "worldScale must be positive, got {}",
                self.world_scale
            )));
        }
        if !self.gravity.is_finite() {
            return Err(PhysicsError::invalid_config("gravity must be finite"));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(PhysicsError::invalid_config(format!(
                "restitution must be in [0, 1], got {}",
                self.restitution
            )));
        }
        if !(self.correction_percent > 0.0 && self.correction_percent <= 1.0) {
            return Err(PhysicsError::invalid_config(format!(
                "correctionPercent must be in (0, 1], got {}",
                self.correction_percent
            )));
        }
        let non_negative = [
            ("restingEpsilon", self.resting_epsilon),
            ("staticFriction", self.static_friction),
            ("dynamicFriction", self.dynamic_friction),
            ("slop", self.slop),
            ("frictionEpsilon", self.friction_epsilon),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(PhysicsError::invalid_config(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        if !(self.max_impulse > 0.0) {
            return Err(PhysicsError::invalid_config("maxImpulse must be positive"));
        }
        Ok(())
    }
}
