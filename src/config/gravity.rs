//! Configuration for gravity shaping and fall speed.

use bevy::prelude::*;

/// Configuration for gravity shaping and fall speed.
///
/// The controller does not integrate gravity itself; it writes a gravity
/// scale to the body every physics tick and overwrites vertical velocity
/// when it drops below the terminal floor.
#[derive(Reflect, Debug, Clone, Copy)]
pub struct GravityConfig {
    /// Baseline gravity scale (while rising or at rest).
    pub gravity_scale: f32,

    /// Gravity scale multiplier applied while descending (>= 1.0).
    pub fall_multiplier: f32,

    /// Terminal fall speed. Negative: vertical velocity may not go more
    /// negative than this.
    pub max_fall_speed: f32,
}

impl Default for GravityConfig {
    fn default() -> Self {
        Self {
            gravity_scale: 4.0,
            fall_multiplier: 2.0,
            max_fall_speed: -20.0,
        }
    }
}
