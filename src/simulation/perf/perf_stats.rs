use wasm_bindgen::prelude::*;

#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) solve_ms: f64,
    pub(super) contacts: u32,
    pub(super) separating: u32,
    pub(super) impulses_applied: u32,
    pub(super) friction_clamped: u32,
    pub(super) within_slop: u32,
    pub(super) max_depth: f32,
    pub(super) total_normal_impulse: f32,
    pub(super) bodies: u32,
    pub(super) integrated: u32,
    pub(super) kinetic_energy: f32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn solve_ms(&self) -> f64 { self.solve_ms }
    #[wasm_bindgen(getter)]
    pub fn contacts(&self) -> u32 { self.contacts }
    #[wasm_bindgen(getter)]
    pub fn separating(&self) -> u32 { self.separating }
    #[wasm_bindgen(getter)]
    pub fn impulses_applied(&self) -> u32 { self.impulses_applied }
    #[wasm_bindgen(getter)]
    pub fn friction_clamped(&self) -> u32 { self.friction_clamped }
    #[wasm_bindgen(getter)]
    pub fn within_slop(&self) -> u32 { self.within_slop }
    #[wasm_bindgen(getter)]
    pub fn max_depth(&self) -> f32 { self.max_depth }
    #[wasm_bindgen(getter)]
    pub fn total_normal_impulse(&self) -> f32 { self.total_normal_impulse }
    #[wasm_bindgen(getter)]
    pub fn bodies(&self) -> u32 { self.bodies }
    #[wasm_bindgen(getter)]
    pub fn integrated(&self) -> u32 { self.integrated }
    #[wasm_bindgen(getter)]
    pub fn kinetic_energy(&self) -> f32 { self.kinetic_energy }
}
