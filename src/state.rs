//! Per-actor movement state.

use bevy::prelude::*;

/// Mutable per-actor state owned by the movement controller.
///
/// Inserted automatically when a [`MovementConfig`](crate::config::MovementConfig)
/// passes validation, and lives for the actor's lifetime. The frame tick
/// refreshes `is_grounded` and the assist timers; the physics tick reads them.
///
/// The timers may go negative between resets: once at or below zero they are
/// treated as inactive and are never re-clamped to zero except by their reset.
/// Likewise `jumps_remaining` is restored by grounding, not floor-clamped by
/// the jump action itself, so it can transiently dip below zero when a jump
/// is granted from the coyote window alone.
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub struct MovementState {
    /// Last-sampled horizontal axis value. Expected domain [-1, 1], but
    /// out-of-domain values are passed through unclamped.
    pub horizontal_input: f32,

    /// Jumps left before the actor must touch ground again.
    /// Reset to `max_jump_count` on every grounded frame tick.
    pub jumps_remaining: i32,

    /// Whether the ground probe overlapped ground geometry this frame tick.
    pub is_grounded: bool,

    /// Seconds remaining in which a jump is still permitted after leaving
    /// ground. Counts down only while airborne.
    pub coyote_timer: f32,

    /// Seconds remaining in which a queued jump press is still honored.
    pub jump_buffer_timer: f32,

    // Force bookkeeping, written by the physics tick and flushed to the
    // backend at the end of each fixed step.
    accumulated_force: Vec2,
    applied_force: Vec2,
}

impl Default for MovementState {
    fn default() -> Self {
        Self {
            horizontal_input: 0.0,
            jumps_remaining: 0,
            is_grounded: false,
            coyote_timer: 0.0,
            jump_buffer_timer: 0.0,
            accumulated_force: Vec2::ZERO,
            applied_force: Vec2::ZERO,
        }
    }
}

impl MovementState {
    /// Create a fresh state. Jumps and timers start inactive; grounding
    /// restores them on the first grounded frame tick.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the coyote window is currently open.
    pub fn coyote_active(&self) -> bool {
        self.coyote_timer > 0.0
    }

    /// Whether a buffered jump press is still pending.
    pub fn buffer_active(&self) -> bool {
        self.jump_buffer_timer > 0.0
    }

    /// The jump gate: a jump is granted iff a buffered press is pending and
    /// either the coyote window is open or jumps remain.
    ///
    /// The OR is deliberately loose: a multi-jump actor can jump from the
    /// coyote window even with zero jumps remaining, driving the count
    /// negative. Grounding restores it.
    pub fn jump_gate_open(&self) -> bool {
        self.buffer_active() && (self.coyote_active() || self.jumps_remaining > 0)
    }

    /// Accumulate a force to be flushed to the physics backend at the end of
    /// the current fixed step. Called by backend `apply_force` implementations.
    pub fn add_force(&mut self, force: Vec2) {
        self.accumulated_force += force;
    }

    /// Start a new fixed step: returns the force applied last step (so the
    /// backend can subtract it, preserving external user forces) and clears
    /// both accumulators.
    pub fn prepare_new_frame(&mut self) -> Vec2 {
        let applied = self.applied_force;
        self.applied_force = Vec2::ZERO;
        self.accumulated_force = Vec2::ZERO;
        applied
    }

    /// Finish a fixed step: returns the force accumulated this step and
    /// records it for subtraction next step.
    pub fn finalize_frame(&mut self) -> Vec2 {
        self.applied_force = self.accumulated_force;
        self.accumulated_force = Vec2::ZERO;
        self.applied_force
    }
}

/// Marker inserted on an actor whose [`MovementConfig`](crate::config::MovementConfig)
/// failed validation. The actor's controller is permanently disabled; fix the
/// config and remove this marker to retry initialization.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct ControllerDisabled;
