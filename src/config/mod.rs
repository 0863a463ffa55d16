//! Controller configuration.
//!
//! Configuration is grouped by concern into plain sub-structs and aggregated
//! into the [`MovementConfig`] component. All values are author-configured
//! and validated once when the controller initializes; there is no runtime
//! reconfiguration contract beyond plain field mutation.

mod gravity;
mod ground;
mod jump;
mod run;

pub use gravity::GravityConfig;
pub use ground::GroundCheckConfig;
pub use jump::JumpConfig;
pub use run::RunConfig;

use bevy::prelude::*;

use crate::error::ConfigError;

/// Aggregated, author-configured movement settings for one actor.
///
/// Add this component (together with [`MovementIntent`](crate::intent::MovementIntent)
/// and [`JumpInput`](crate::intent::JumpInput)) to a physics body to drive it
/// with the movement controller. The controller validates the config when it
/// first sees it and inserts a [`MovementState`](crate::state::MovementState)
/// on success; on failure the actor is disabled and the error is logged.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct MovementConfig {
    /// Horizontal run movement.
    pub run: RunConfig,
    /// Jump mechanics and assist windows.
    pub jump: JumpConfig,
    /// Gravity shaping and terminal fall speed.
    pub gravity: GravityConfig,
    /// Ground overlap probe.
    pub ground: GroundCheckConfig,
}

impl MovementConfig {
    /// Create a config with default tuning.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set run movement parameters.
    pub fn with_run(mut self, run: RunConfig) -> Self {
        self.run = run;
        self
    }

    /// Builder: set jump parameters.
    pub fn with_jump(mut self, jump: JumpConfig) -> Self {
        self.jump = jump;
        self
    }

    /// Builder: set gravity parameters.
    pub fn with_gravity(mut self, gravity: GravityConfig) -> Self {
        self.gravity = gravity;
        self
    }

    /// Builder: set ground probe parameters.
    pub fn with_ground_check(mut self, ground: GroundCheckConfig) -> Self {
        self.ground = ground;
        self
    }

    /// Builder: set base horizontal movement speed.
    pub fn with_move_speed(mut self, speed: f32) -> Self {
        self.run.move_speed = speed;
        self
    }

    /// Builder: set jump impulse strength.
    pub fn with_jump_force(mut self, force: f32) -> Self {
        self.jump.jump_force = force;
        self
    }

    /// Builder: set the number of allowed jumps before landing.
    pub fn with_max_jump_count(mut self, count: i32) -> Self {
        self.jump.max_jump_count = count;
        self
    }

    /// Builder: set coyote time duration.
    pub fn with_coyote_time(mut self, seconds: f32) -> Self {
        self.jump.coyote_time = seconds;
        self
    }

    /// Builder: set jump buffer duration.
    pub fn with_jump_buffer_time(mut self, seconds: f32) -> Self {
        self.jump.jump_buffer_time = seconds;
        self
    }

    /// Builder: set which collision layers count as ground.
    pub fn with_ground_layer(mut self, layer_mask: u32) -> Self {
        self.ground.ground_layer = layer_mask;
        self
    }

    /// Check every field against its allowed domain.
    ///
    /// Returns the first violation found. A zero `acceleration` or
    /// `deceleration` is allowed: it degrades gracefully to zero movement
    /// force rather than producing a domain error.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("move_speed", self.run.move_speed),
            ("acceleration", self.run.acceleration),
            ("deceleration", self.run.deceleration),
            ("velocity_power", self.run.velocity_power),
            ("air_control", self.run.air_control),
            ("jump_force", self.jump.jump_force),
            ("jump_cut_multiplier", self.jump.jump_cut_multiplier),
            ("coyote_time", self.jump.coyote_time),
            ("jump_buffer_time", self.jump.jump_buffer_time),
            ("gravity_scale", self.gravity.gravity_scale),
            ("fall_multiplier", self.gravity.fall_multiplier),
            ("max_fall_speed", self.gravity.max_fall_speed),
            ("ground.radius", self.ground.radius),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite(field));
            }
        }
        if !self.ground.check_offset.is_finite() {
            return Err(ConfigError::NonFinite("ground.check_offset"));
        }

        for (field, value) in [
            ("acceleration", self.run.acceleration),
            ("deceleration", self.run.deceleration),
            ("velocity_power", self.run.velocity_power),
            ("coyote_time", self.jump.coyote_time),
            ("jump_buffer_time", self.jump.jump_buffer_time),
            ("ground.radius", self.ground.radius),
        ] {
            if value < 0.0 {
                return Err(ConfigError::Negative(field));
            }
        }

        for (field, value) in [
            ("air_control", self.run.air_control),
            ("jump_cut_multiplier", self.jump.jump_cut_multiplier),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfRange {
                    field,
                    min: 0.0,
                    max: 1.0,
                    value,
                });
            }
        }

        if self.jump.max_jump_count < 1 {
            return Err(ConfigError::NoJumps(self.jump.max_jump_count));
        }
        if self.gravity.fall_multiplier < 1.0 {
            return Err(ConfigError::OutOfRange {
                field: "fall_multiplier",
                min: 1.0,
                max: f32::INFINITY,
                value: self.gravity.fall_multiplier,
            });
        }
        if self.gravity.max_fall_speed >= 0.0 {
            return Err(ConfigError::FallSpeedNotNegative(self.gravity.max_fall_speed));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(MovementConfig::default().validate(), Ok(()));
    }

    #[test]
    fn builders_compose() {
        let config = MovementConfig::new()
            .with_move_speed(12.0)
            .with_jump_force(18.0)
            .with_max_jump_count(2)
            .with_coyote_time(0.2)
            .with_ground_layer(0b0100);

        assert_eq!(config.run.move_speed, 12.0);
        assert_eq!(config.jump.jump_force, 18.0);
        assert_eq!(config.jump.max_jump_count, 2);
        assert_eq!(config.jump.coyote_time, 0.2);
        assert_eq!(config.ground.ground_layer, 0b0100);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn rejects_non_finite_values() {
        let mut config = MovementConfig::default();
        config.run.move_speed = f32::NAN;
        assert_eq!(config.validate(), Err(ConfigError::NonFinite("move_speed")));
    }

    #[test]
    fn rejects_negative_ground_radius() {
        let mut config = MovementConfig::default();
        config.ground.radius = -0.1;
        assert_eq!(config.validate(), Err(ConfigError::Negative("ground.radius")));
    }

    #[test]
    fn rejects_out_of_range_air_control() {
        let mut config = MovementConfig::default();
        config.run.air_control = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange {
                field: "air_control",
                ..
            })
        ));
    }

    #[test]
    fn rejects_zero_jump_count() {
        let config = MovementConfig::default().with_max_jump_count(0);
        assert_eq!(config.validate(), Err(ConfigError::NoJumps(0)));
    }

    #[test]
    fn rejects_non_negative_max_fall_speed() {
        let mut config = MovementConfig::default();
        config.gravity.max_fall_speed = 0.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::FallSpeedNotNegative(0.0))
        );
    }

    #[test]
    fn zero_accel_rates_are_allowed() {
        let mut config = MovementConfig::default();
        config.run.acceleration = 0.0;
        config.run.deceleration = 0.0;
        assert_eq!(config.validate(), Ok(()));
    }
}
