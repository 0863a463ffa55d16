//! Movement input components.
//!
//! These components are the controller's input surface: player input or AI
//! writes them each frame, and the frame tick consumes them.

use bevy::prelude::*;

/// Horizontal movement input for one actor.
///
/// The axis is expected in [-1, 1] but is deliberately passed through
/// unclamped: the controller multiplies it by `move_speed` as-is, so an
/// analog stick, a digital axis, or an AI steering value all work.
///
/// # Example
///
/// ```rust
/// use platformer2d_controller::prelude::*;
///
/// let mut intent = MovementIntent::new();
/// intent.set_axis(1.0);
/// assert!(intent.is_active());
///
/// intent.clear();
/// assert!(!intent.is_active());
/// ```
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct MovementIntent {
    /// Horizontal axis value (-1.0 = left, 1.0 = right).
    pub axis: f32,
}

impl MovementIntent {
    /// Create a new empty intent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the horizontal axis. Not clamped; see the type docs.
    pub fn set_axis(&mut self, axis: f32) {
        self.axis = axis;
    }

    /// Clear the horizontal axis.
    pub fn clear(&mut self) {
        self.axis = 0.0;
    }

    /// Check if there is meaningful horizontal input.
    pub fn is_active(&self) -> bool {
        self.axis.abs() > 0.001
    }
}

/// Jump button input with edge derivation.
///
/// The controller consumes press/release *edges*, not button level. Either
/// report edges directly with [`press`] and [`release`], or feed the raw
/// level every frame with [`set_held`] and let the component derive
/// consistent edges. Edges are cleared by the controller after each frame
/// tick, so one press buffers at most one jump.
///
/// [`press`]: JumpInput::press
/// [`release`]: JumpInput::release
/// [`set_held`]: JumpInput::set_held
///
/// # Example
///
/// ```rust
/// use platformer2d_controller::prelude::*;
///
/// let mut jump = JumpInput::default();
/// jump.set_held(true);
/// assert!(jump.pressed_this_tick());
///
/// // Holding produces no further press edges.
/// jump.clear_edges();
/// jump.set_held(true);
/// assert!(!jump.pressed_this_tick());
///
/// jump.set_held(false);
/// assert!(jump.released_this_tick());
/// ```
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct JumpInput {
    held: bool,
    pressed: bool,
    released: bool,
}

impl JumpInput {
    /// Report a press edge. Ignored if the button is already held.
    pub fn press(&mut self) {
        if !self.held {
            self.pressed = true;
            self.held = true;
        }
    }

    /// Report a release edge. Ignored if the button is not held.
    pub fn release(&mut self) {
        if self.held {
            self.released = true;
            self.held = false;
        }
    }

    /// Feed the raw button level; press/release edges are derived from the
    /// change against the previously reported level.
    pub fn set_held(&mut self, held: bool) {
        if held {
            self.press();
        } else {
            self.release();
        }
    }

    /// Whether the button is currently held.
    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Whether a press edge is pending for this frame tick.
    pub fn pressed_this_tick(&self) -> bool {
        self.pressed
    }

    /// Whether a release edge is pending for this frame tick.
    pub fn released_this_tick(&self) -> bool {
        self.released
    }

    /// Clear pending edges. Called by the controller after each frame tick;
    /// only needed manually when driving the tick functions directly.
    pub fn clear_edges(&mut self) {
        self.pressed = false;
        self.released = false;
    }
}
