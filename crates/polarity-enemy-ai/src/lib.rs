//! Enemy AI for the POLARITY simulation kernel.
//!
//! Implements the scripted enemy flight paths and the boss decision
//! logic as pure functions over plain data. No ECS dependency; the
//! sim crate feeds these from its world and applies the results.

pub mod boss;
pub mod paths;

pub use polarity_core as core;

#[cfg(test)]
mod tests;
