//! Configuration for jump mechanics.

use bevy::prelude::*;

/// Configuration for jump mechanics: impulse strength, jump-assist windows
/// and variable jump height.
#[derive(Reflect, Debug, Clone, Copy)]
pub struct JumpConfig {
    /// Vertical velocity applied when a jump fires.
    pub jump_force: f32,

    /// Multiplier applied to upward velocity when the jump button is
    /// released early (0.0-1.0). Shortens the jump arc; has no effect once
    /// the body is falling.
    pub jump_cut_multiplier: f32,

    /// Number of allowed jumps before landing (1 = normal, 2 = double jump).
    pub max_jump_count: i32,

    /// Grace period (seconds) after leaving ground during which a jump is
    /// still accepted as if grounded.
    pub coyote_time: f32,

    /// Window (seconds) during which a jump press made before landing is
    /// still honored on landing.
    pub jump_buffer_time: f32,
}

impl Default for JumpConfig {
    fn default() -> Self {
        Self {
            jump_force: 14.0,
            jump_cut_multiplier: 0.5,
            max_jump_count: 1,
            coyote_time: 0.1,
            jump_buffer_time: 0.1,
        }
    }
}
