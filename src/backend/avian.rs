//! Avian2D physics backend implementation.
//!
//! This module provides the physics backend for Avian2D (bevy_avian2d).
//! Enable with the `avian2d` feature.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::backend::PhysicsBackend;
use crate::config::MovementConfig;
use crate::state::MovementState;
use crate::MovementControllerSet;

/// Avian2D physics backend for the movement controller.
///
/// Velocity and gravity scale map directly onto Avian's `LinearVelocity` and
/// `GravityScale` components. Run forces are accumulated into
/// [`MovementState`] and flushed to `ConstantForce` at the end of each fixed
/// step; the ground probe is a dedicated system using `SpatialQuery` as a
/// system parameter.
pub struct Avian2dBackend;

impl PhysicsBackend for Avian2dBackend {
    fn plugin() -> impl Plugin {
        Avian2dBackendPlugin
    }

    fn get_velocity(world: &World, entity: Entity) -> Vec2 {
        world
            .get::<LinearVelocity>(entity)
            .map(|v| v.0)
            .unwrap_or(Vec2::ZERO)
    }

    fn set_velocity(world: &mut World, entity: Entity, velocity: Vec2) {
        if let Some(mut vel) = world.get_mut::<LinearVelocity>(entity) {
            vel.0 = velocity;
        }
    }

    fn apply_force(world: &mut World, entity: Entity, force: Vec2) {
        // Accumulate into MovementState instead of directly modifying forces.
        // Forces are flushed to ConstantForce at the end of the fixed step by
        // apply_movement_forces.
        if let Some(mut state) = world.get_mut::<MovementState>(entity) {
            state.add_force(force);
        }
    }

    fn get_gravity_scale(world: &World, entity: Entity) -> f32 {
        world
            .get::<GravityScale>(entity)
            .map(|scale| scale.0)
            .unwrap_or(1.0)
    }

    fn set_gravity_scale(world: &mut World, entity: Entity, scale: f32) {
        if let Some(mut gravity_scale) = world.get_mut::<GravityScale>(entity) {
            gravity_scale.0 = scale;
        } else {
            world.entity_mut(entity).insert(GravityScale(scale));
        }
    }

    fn get_position(world: &World, entity: Entity) -> Vec2 {
        // Try Avian's Position component first, then fall back to Transform
        world
            .get::<Position>(entity)
            .map(|p| p.0)
            .or_else(|| world.get::<Transform>(entity).map(|t| t.translation.xy()))
            .or_else(|| {
                world
                    .get::<GlobalTransform>(entity)
                    .map(|t| t.translation().xy())
            })
            .unwrap_or(Vec2::ZERO)
    }
}

/// Plugin that sets up Avian2D-specific systems for the movement controller.
pub struct Avian2dBackendPlugin;

impl Plugin for Avian2dBackendPlugin {
    fn build(&self, app: &mut App) {
        // Ground probe runs at the start of every frame tick.
        app.add_systems(
            Update,
            avian_ground_overlap.in_set(MovementControllerSet::Sensors),
        );

        // Force bookkeeping brackets the fixed-step phases: subtract last
        // step's forces first, apply this step's accumulated forces last.
        app.add_systems(
            FixedUpdate,
            clear_movement_forces.in_set(MovementControllerSet::Preparation),
        );
        app.add_systems(
            FixedUpdate,
            apply_movement_forces.in_set(MovementControllerSet::FinalApplication),
        );
    }
}

/// Ground probe: a point+radius circle overlap against the configured
/// ground layers, excluding the probing body itself.
fn avian_ground_overlap(
    spatial_query: SpatialQuery,
    mut q_controllers: Query<(Entity, &GlobalTransform, &MovementConfig, &mut MovementState)>,
) {
    for (entity, transform, config, mut state) in &mut q_controllers {
        let (point, radius) = config.ground.probe(transform.translation().xy());
        let filter = SpatialQueryFilter::from_mask(config.ground.ground_layer)
            .with_excluded_entities([entity]);
        let hits = spatial_query.shape_intersections(&Collider::circle(radius), point, 0.0, &filter);
        state.is_grounded = !hits.is_empty();
    }
}

/// Clear controller forces at the start of each fixed step.
///
/// Subtracts the forces applied last step from `ConstantForce` and clears
/// the accumulators, so external user forces on the same body are preserved.
fn clear_movement_forces(mut q: Query<(&mut MovementState, Option<&mut ConstantForce>)>) {
    for (mut state, constant_force) in &mut q {
        let to_subtract = state.prepare_new_frame();
        if let Some(mut force) = constant_force {
            force.0 -= to_subtract;
        }
    }
}

/// Apply accumulated controller forces at the end of each fixed step, so
/// Avian's physics step integrates them.
///
/// Avian's `RigidBody` does not require `ConstantForce`, so a body seen for
/// the first time gets one inserted here; from then on the existing component
/// is edited in place.
fn apply_movement_forces(
    mut commands: Commands,
    mut q: Query<(Entity, &mut MovementState, Option<&mut ConstantForce>)>,
) {
    for (entity, mut state, constant_force) in &mut q {
        let to_apply = state.finalize_frame();
        match constant_force {
            Some(mut force) => force.0 += to_apply,
            None => {
                if to_apply != Vec2::ZERO {
                    commands.entity(entity).insert(ConstantForce(to_apply));
                }
            }
        }
    }
}
