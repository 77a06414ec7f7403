//! Per-tick simulation systems, run in pipeline order: behavior,
//! collision, cull, boss spawner, snapshot.

pub mod behavior;
pub mod collision;
pub mod cull;
pub mod snapshot;
pub mod spawner;
