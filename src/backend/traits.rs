//! Physics backend abstraction.
//!
//! The controller owns no physics simulation: it reads and edits velocity,
//! applies forces, and writes a gravity scale on a body owned by an external
//! 2D physics engine. This trait is the seam that makes the engine swappable.

use bevy::prelude::*;

/// The kinematic-body contract a physics engine must provide.
///
/// Implement this to integrate a physics engine with the movement
/// controller. Besides the body accessors, a backend supplies a plugin that
/// registers its engine-specific systems, most importantly the ground
/// sensor, which must refresh
/// [`MovementState::is_grounded`](crate::state::MovementState) once per frame
/// tick in the [`Sensors`](crate::MovementControllerSet::Sensors) set.
pub trait PhysicsBackend: 'static + Send + Sync {
    /// Returns the plugin that sets up this backend.
    fn plugin() -> impl Plugin;

    /// Get the current 2D velocity of a body.
    fn get_velocity(world: &World, entity: Entity) -> Vec2;

    /// Overwrite the 2D velocity of a body.
    fn set_velocity(world: &mut World, entity: Entity, velocity: Vec2);

    /// Apply an additive force to a body, integrated by the engine over the
    /// physics timestep given the body's mass.
    fn apply_force(world: &mut World, entity: Entity, force: Vec2);

    /// Get the scalar gravity multiplier of a body.
    fn get_gravity_scale(world: &World, entity: Entity) -> f32;

    /// Overwrite the scalar gravity multiplier of a body.
    fn set_gravity_scale(world: &mut World, entity: Entity, scale: f32);

    /// Get the current 2D position of a body (consumed by the ground sensor,
    /// not by the tick logic).
    fn get_position(world: &World, entity: Entity) -> Vec2;
}
