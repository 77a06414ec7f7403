//! Headless simulation engine for POLARITY.
//!
//! `GameEngine` owns the hecs world and the entity store, drains
//! player commands at tick boundaries, runs the per-tick pipeline
//! (behavior, collision, cull, boss spawn), and produces
//! `FrameSnapshot`s. Fully deterministic under a fixed seed.

pub mod audio;
pub mod engine;
pub mod store;
pub mod systems;

pub use engine::{GameEngine, SimConfig};

#[cfg(test)]
mod tests;
