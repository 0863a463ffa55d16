//! Configuration for horizontal run movement.

use bevy::prelude::*;

/// Configuration for horizontal run movement.
///
/// Horizontal motion is force-driven: each physics tick the controller
/// computes the gap between the desired speed and the body's current
/// horizontal velocity and applies a force shaped by [`velocity_power`].
///
/// [`velocity_power`]: RunConfig::velocity_power
#[derive(Reflect, Debug, Clone, Copy)]
pub struct RunConfig {
    /// Base horizontal movement speed (units/second).
    pub move_speed: f32,

    /// Rate of acceleration when moving toward a nonzero target speed.
    pub acceleration: f32,

    /// Rate of deceleration when the target speed is (near) zero.
    pub deceleration: f32,

    /// Exponent shaping how aggressively force ramps with speed error
    /// (lower = snappier, higher = smoother). Typical authored range 0.8-1.0.
    pub velocity_power: f32,

    /// Fraction of acceleration/deceleration available while airborne (0.0-1.0).
    pub air_control: f32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            move_speed: 8.0,
            acceleration: 10.0,
            deceleration: 10.0,
            velocity_power: 0.9,
            air_control: 0.8,
        }
    }
}
