use crate::core::PhysicsError;
use crate::rigid_body::{RigidBody, Vec2};

use super::WorldCore;

pub(super) fn spawn_box(world: &mut WorldCore, x: f32, y: f32, w: f32, h: f32, mass: f32) -> Result<u32, PhysicsError> {
    let body = RigidBody::rectangle(Vec2::new(x, y), Vec2::new(w, h), mass)?;
    Ok(world.rigid_bodies.add_body(body))
}

pub(super) fn spawn_circle(
    world: &mut WorldCore,
    x: f32,
    y: f32,
    radius: f32,
    segments: u32,
    mass: f32,
) -> Result<u32, PhysicsError> {
    let body = RigidBody::circle(Vec2::new(x, y), radius, segments as usize, mass)?;
    Ok(world.rigid_bodies.add_body(body))
}

pub(super) fn spawn_polygon(world: &mut WorldCore, x: f32, y: f32, vertices: &[f32], mass: f32) -> Result<u32, PhysicsError> {
    let points: Vec<Vec2> = vertices
        .chunks_exact(2)
        .map(|p| Vec2::new(p[0], p[1]))
        .collect();
    let body = RigidBody::polygon(Vec2::new(x, y), &points, mass)?;
    Ok(world.rigid_bodies.add_body(body))
}

pub(super) fn spawn_static_box(world: &mut WorldCore, x: f32, y: f32, w: f32, h: f32) -> u32 {
    let body = RigidBody::static_rectangle(Vec2::new(x, y), Vec2::new(w, h));
    world.rigid_bodies.add_body(body)
}

pub(super) fn spawn_static_line(world: &mut WorldCore, x0: f32, y0: f32, x1: f32, y1: f32) -> u32 {
    let body = RigidBody::static_line(Vec2::new(x0, y0), Vec2::new(x1, y1));
    world.rigid_bodies.add_body(body)
}

pub(super) fn remove_body(world: &mut WorldCore, id: u32) -> bool {
    world.rigid_bodies.remove_body(id)
}

pub(super) fn body_count(world: &WorldCore) -> usize {
    world.rigid_bodies.body_count()
}

pub(super) fn body_vertices(world: &WorldCore, id: u32) -> Vec<f32> {
    let Some(body) = world.rigid_bodies.body(id) else {
        return Vec::new();
    };
    body.world_vertices()
        .into_iter()
        .flat_map(|v| [v.x, v.y])
        .collect()
}
