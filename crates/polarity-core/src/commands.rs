//! Player commands accepted by the engine.

use serde::{Deserialize, Serialize};

/// Thrust along the ship's view axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Thrust {
    Forward,
    Back,
    Stop,
}

/// Commands queued by the frontend and drained at the next tick
/// boundary. Strafe commands hold for a single tick; the frontend
/// re-queues them while the key is held.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlayerCommand {
    /// Clear the world and set up the given level.
    StartLevel { level: u32 },
    /// Set the ship's vertical thrust.
    Thrust { dir: Thrust },
    StrafeLeft,
    StrafeRight,
    StrafeBack,
    /// Fire the ship's gun.
    Fire,
    /// Flip the ship's color polarity.
    SwapColor,
}
