//! Core types and definitions for the POLARITY simulation kernel.
//!
//! This crate defines the vocabulary shared across all other crates:
//! archetypes, components, events, constants, and the sprite extent
//! table. It has no dependency on any runtime framework.

pub mod archetype;
pub mod commands;
pub mod components;
pub mod constants;
pub mod events;
pub mod sprites;
pub mod state;
pub mod types;
