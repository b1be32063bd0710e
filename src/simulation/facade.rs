use wasm_bindgen::prelude::*;

use crate::core::PhysicsError;

use super::perf_stats::PerfStats;
use super::WorldCore;

fn to_js(err: PhysicsError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct World {
    core: WorldCore,
}

#[wasm_bindgen]
impl World {
    /// Create a new world with default tuning
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            core: WorldCore::new(),
        }
    }

    #[wasm_bindgen(js_name = newWithConfig)]
    pub fn new_with_config(json: String) -> Result<World, JsValue> {
        let mut core = WorldCore::new();
        core.load_config_json(&json).map_err(to_js)?;
        Ok(Self { core })
    }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.core.frame() }

    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> usize { self.core.body_count() }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }

    pub fn set_gravity(&mut self, x: f32, y: f32) -> Result<(), JsValue> {
        self.core.set_gravity(x, y).map_err(to_js)
    }

    pub fn set_world_scale(&mut self, scale: f32) -> Result<(), JsValue> {
        self.core.set_world_scale(scale).map_err(to_js)
    }

    pub fn load_config(&mut self, json: String) -> Result<(), JsValue> {
        self.core.load_config_json(&json).map_err(to_js)
    }

    pub fn get_config_json(&self) -> String {
        self.core.config_json()
    }

    /// Remove all bodies
    pub fn clear(&mut self) {
        self.core.clear();
    }

    // === RIGID BODY API ===

    /// Spawn a box centered at (x, y) with size (w, h); returns the body ID
    pub fn spawn_box(&mut self, x: f32, y: f32, w: f32, h: f32, mass: f32) -> Result<u32, JsValue> {
        self.core.spawn_box(x, y, w, h, mass).map_err(to_js)
    }

    pub fn spawn_circle(&mut self, x: f32, y: f32, radius: f32, segments: u32, mass: f32) -> Result<u32, JsValue> {
        self.core.spawn_circle(x, y, radius, segments, mass).map_err(to_js)
    }

    /// Spawn a polygon from flattened local vertices `[x0, y0, x1, y1, ...]`
    pub fn spawn_polygon(&mut self, x: f32, y: f32, vertices: Vec<f32>, mass: f32) -> Result<u32, JsValue> {
        self.core.spawn_polygon(x, y, &vertices, mass).map_err(to_js)
    }

    pub fn spawn_static_box(&mut self, x: f32, y: f32, w: f32, h: f32) -> u32 {
        self.core.spawn_static_box(x, y, w, h)
    }

    pub fn spawn_static_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32) -> u32 {
        self.core.spawn_static_line(x0, y0, x1, y1)
    }

    /// Remove a rigid body by ID
    pub fn remove_body(&mut self, id: u32) -> bool {
        self.core.remove_body(id)
    }

    pub fn body_x(&self, id: u32) -> f32 {
        self.core.body(id).map(|b| b.pos.x).unwrap_or(0.0)
    }

    pub fn body_y(&self, id: u32) -> f32 {
        self.core.body(id).map(|b| b.pos.y).unwrap_or(0.0)
    }

    pub fn body_angle(&self, id: u32) -> f32 {
        self.core.body(id).map(|b| b.angle).unwrap_or(0.0)
    }

    /// World outline `[x0, y0, x1, y1, ...]` for drawing
    pub fn body_vertices(&self, id: u32) -> Vec<f32> {
        self.core.body_vertices(id)
    }

    /// Step the simulation forward.
    ///
    /// `contacts_json` is the detection output for the current poses:
    /// `[{ lineOwner, pointOwner, normal: [x, y], depth, point: [x, y] }]`.
    pub fn step(&mut self, contacts_json: String, dt: f32) -> Result<(), JsValue> {
        self.core.step_json(&contacts_json, dt).map(|_| ()).map_err(to_js)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
