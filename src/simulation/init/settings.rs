use crate::core::PhysicsError;
use crate::domain::SimulationConfig;
use crate::rigid_body::Vec2;

use super::perf_stats::PerfStats;
use super::WorldCore;

pub(super) fn enable_perf_metrics(world: &mut WorldCore, enabled: bool) {
    world.perf_enabled = enabled;
    if !enabled {
        world.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(world: &WorldCore) -> PerfStats {
    world.perf_stats.clone()
}

pub(super) fn load_config_json(world: &mut WorldCore, json: &str) -> Result<(), PhysicsError> {
    let config = SimulationConfig::from_json(json)?;
    tracing::debug!(world_scale = config.world_scale, "config loaded");
    world.rigid_bodies.set_config(config);
    Ok(())
}

pub(super) fn set_gravity(world: &mut WorldCore, x: f32, y: f32) -> Result<(), PhysicsError> {
    let config = SimulationConfig {
        gravity: Vec2::new(x, y),
        ..world.rigid_bodies.config().clone()
    };
    config.validate()?;
    world.rigid_bodies.set_config(config);
    Ok(())
}

pub(super) fn set_world_scale(world: &mut WorldCore, scale: f32) -> Result<(), PhysicsError> {
    let config = SimulationConfig {
        world_scale: scale,
        ..world.rigid_bodies.config().clone()
    };
    config.validate()?;
    world.rigid_bodies.set_config(config);
    Ok(())
}
