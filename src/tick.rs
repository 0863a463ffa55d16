//! Pure per-tick movement logic.
//!
//! The Bevy systems are thin wrappers around the functions here, so all
//! timing and state-machine behavior is testable without an ECS world or a
//! physics engine. Two operations exist, matching the two host-loop
//! callbacks that drive the controller:
//!
//! - [`frame_tick`]: variable-rate input sampling, assist-timer countdown
//!   and the jump decision. May edit vertical velocity (jump, jump cut).
//! - [`physics_tick`]: fixed-rate force computation, gravity shaping and
//!   the terminal fall-speed clamp. Never touches horizontal velocity
//!   directly; horizontal motion is a force the engine integrates.

use bevy::prelude::*;

use crate::config::{GravityConfig, JumpConfig, MovementConfig, RunConfig};
use crate::state::MovementState;

/// Target speeds with a smaller magnitude than this select the deceleration
/// rate instead of the acceleration rate.
pub const TARGET_SPEED_THRESHOLD: f32 = 0.01;

/// One frame tick's worth of sampled input.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    /// Raw horizontal axis sample. Expected domain [-1, 1], passed through
    /// unclamped.
    pub axis: f32,
    /// Jump press edge for this tick.
    pub jump_pressed: bool,
    /// Jump release edge for this tick.
    pub jump_released: bool,
}

/// Result of a frame tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameOutput {
    /// Whether a jump fired this tick.
    pub jumped: bool,
    /// Whether an early release cut the jump short this tick.
    pub jump_cut: bool,
    /// New vertical velocity to write to the body, if the tick changed it.
    /// Horizontal velocity is never touched by the frame tick.
    pub new_vertical_velocity: Option<f32>,
}

/// Result of a physics tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhysicsOutput {
    /// Additive force along the rightward axis for the engine to integrate.
    pub force: Vec2,
    /// Gravity scale to write to the body this tick.
    pub gravity_scale: f32,
    /// Terminal-speed overwrite for vertical velocity, if it fell below the
    /// configured floor.
    pub clamped_vertical_velocity: Option<f32>,
}

/// Run one frame tick for an actor.
///
/// `state.is_grounded` must already hold this tick's ground-probe result
/// (the sensor runs immediately before this in the frame). `vertical_velocity`
/// is the body's current vertical velocity; if the tick jumps or cuts a jump,
/// the replacement value is returned in the output.
///
/// Order matters and mirrors the classic feel recipe:
/// 1. store the axis sample,
/// 2. grounded: restore jumps and the coyote window; airborne: count coyote
///    down (it may go negative, which counts as inactive),
/// 3. a press edge arms the jump buffer, otherwise it counts down,
/// 4. if the gate opens (see [`MovementState::jump_gate_open`]) the jump
///    fires and consumes the buffered press,
/// 5. a release edge while still rising multiplies vertical velocity by the
///    jump-cut factor, including a jump fired earlier in this same tick.
pub fn frame_tick(
    state: &mut MovementState,
    config: &JumpConfig,
    input: &FrameInput,
    dt: f32,
    vertical_velocity: f32,
) -> FrameOutput {
    state.horizontal_input = input.axis;

    if state.is_grounded {
        state.jumps_remaining = config.max_jump_count;
        state.coyote_timer = config.coyote_time;
    } else {
        state.coyote_timer -= dt;
    }

    if input.jump_pressed {
        state.jump_buffer_timer = config.jump_buffer_time;
    } else {
        state.jump_buffer_timer -= dt;
    }

    let mut vertical = vertical_velocity;
    let mut edited = false;
    let mut jumped = false;
    if state.jump_gate_open() {
        vertical = config.jump_force;
        state.jumps_remaining -= 1;
        // Zeroing the coyote window prevents a second jump from the same
        // ground-leave event; zeroing the buffer consumes the press.
        state.coyote_timer = 0.0;
        state.jump_buffer_timer = 0.0;
        jumped = true;
        edited = true;
    }

    let mut jump_cut = false;
    if input.jump_released && vertical > 0.0 {
        vertical *= config.jump_cut_multiplier;
        jump_cut = true;
        edited = true;
    }

    FrameOutput {
        jumped,
        jump_cut,
        new_vertical_velocity: edited.then_some(vertical),
    }
}

/// Compute the horizontal run force for one physics tick.
///
/// The force has the sign of the gap between target and current speed, with
/// magnitude `(|gap| * rate) ^ velocity_power`. The rate is the acceleration
/// when there is meaningful input and the deceleration when coasting to a
/// stop, scaled by `air_control` while airborne. A zero gap always yields a
/// zero force, for any exponent.
pub fn run_force(
    config: &RunConfig,
    horizontal_input: f32,
    is_grounded: bool,
    horizontal_velocity: f32,
) -> f32 {
    let target_speed = horizontal_input * config.move_speed;
    let speed_difference = target_speed - horizontal_velocity;

    let base_rate = if target_speed.abs() > TARGET_SPEED_THRESHOLD {
        config.acceleration
    } else {
        config.deceleration
    };
    let rate = if is_grounded {
        base_rate
    } else {
        base_rate * config.air_control
    };

    if speed_difference == 0.0 {
        return 0.0;
    }
    (speed_difference.abs() * rate).powf(config.velocity_power) * speed_difference.signum()
}

/// Compute the gravity scale and terminal-speed clamp for one physics tick.
///
/// The fall multiplier applies whenever vertical velocity is negative and is
/// recomputed every tick with no hysteresis. The clamp returns a replacement
/// vertical velocity only when the body is below the configured floor.
pub fn shape_fall(config: &GravityConfig, vertical_velocity: f32) -> (f32, Option<f32>) {
    let gravity_scale = if vertical_velocity < 0.0 {
        config.gravity_scale * config.fall_multiplier
    } else {
        config.gravity_scale
    };
    let clamped = (vertical_velocity < config.max_fall_speed).then_some(config.max_fall_speed);
    (gravity_scale, clamped)
}

/// Run one full physics tick for an actor: run force, gravity shaping and
/// fall clamp, from the body's current velocity.
pub fn physics_tick(
    state: &MovementState,
    config: &MovementConfig,
    velocity: Vec2,
) -> PhysicsOutput {
    let force = run_force(
        &config.run,
        state.horizontal_input,
        state.is_grounded,
        velocity.x,
    );
    let (gravity_scale, clamped_vertical_velocity) = shape_fall(&config.gravity, velocity.y);
    PhysicsOutput {
        force: Vec2::X * force,
        gravity_scale,
        clamped_vertical_velocity,
    }
}
