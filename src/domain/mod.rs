//! Domain - simulation settings

pub mod config;

pub use config::SimulationConfig;
