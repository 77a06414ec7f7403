//! Fundamental geometric and simulation types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Bounding sphere (circle in 2D) used by the broad phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub center: Vec2,
    pub radius: f32,
}

impl Sphere {
    /// Whether two spheres overlap: center distance at most the sum
    /// of the radii.
    pub fn intersects(&self, other: &Sphere) -> bool {
        let r = self.radius + other.radius;
        self.center.distance_squared(other.center) <= r * r
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the fixed tick rate.
    pub fn dt(&self) -> f32 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += f64::from(crate::constants::DT);
    }
}

/// Unit view vector for an orientation angle (radians).
/// Orientation 0 faces "up" (+y); positive angles roll left.
pub fn view_vector(orientation: f32) -> Vec2 {
    Vec2::new(-orientation.sin(), orientation.cos())
}

/// Normal to the view vector, pointing to the entity's right.
pub fn side_vector(view: Vec2) -> Vec2 {
    Vec2::new(view.y, -view.x)
}
