//! Controller systems.
//!
//! These wrap the pure tick functions in [`crate::tick`] and are generic
//! over the physics backend. The backend's own plugin contributes the ground
//! sensor and any force-flushing systems; everything here is engine-agnostic.

use bevy::log::{debug, error};
use bevy::prelude::*;

use crate::backend::PhysicsBackend;
use crate::config::{GravityConfig, JumpConfig, MovementConfig, RunConfig};
use crate::intent::{JumpInput, MovementIntent};
use crate::state::{ControllerDisabled, MovementState};
use crate::tick::{self, FrameInput};

/// Initialize controllers for actors whose [`MovementConfig`] has not been
/// seen yet.
///
/// Validation happens exactly once, up front: a valid config gets a fresh
/// [`MovementState`] and the baseline gravity scale written to its body; an
/// invalid config disables the actor loudly. There are no per-tick checks
/// after this point.
pub(crate) fn initialize_controllers<B: PhysicsBackend>(world: &mut World) {
    let pending: Vec<(Entity, MovementConfig)> = world
        .query_filtered::<(Entity, &MovementConfig), (
            Without<MovementState>,
            Without<ControllerDisabled>,
        )>()
        .iter(world)
        .map(|(entity, config)| (entity, *config))
        .collect();

    for (entity, config) in pending {
        match config.validate() {
            Ok(()) => {
                B::set_gravity_scale(world, entity, config.gravity.gravity_scale);
                world.entity_mut(entity).insert(MovementState::new());
                debug!("movement controller initialized for {entity}");
            }
            Err(err) => {
                error!("invalid movement config on {entity}, disabling controller: {err}");
                world.entity_mut(entity).insert(ControllerDisabled);
            }
        }
    }
}

/// Run the frame tick for every controlled actor.
///
/// Consumes the pending jump edges, updates the assist timers, and performs
/// the jump / jump-cut velocity edits through the backend. Runs after the
/// backend's ground sensor so `is_grounded` reflects this tick.
pub(crate) fn resolve_frame_tick<B: PhysicsBackend>(world: &mut World) {
    let dt = world.resource::<Time>().delta_secs();

    let mut ticks: Vec<(Entity, JumpConfig, FrameInput)> = Vec::new();
    let mut query = world.query_filtered::<(
        Entity,
        &MovementConfig,
        Option<&MovementIntent>,
        Option<&mut JumpInput>,
    ), With<MovementState>>();
    for (entity, config, intent, jump_input) in query.iter_mut(world) {
        let (jump_pressed, jump_released) = match jump_input {
            Some(mut input) => {
                let edges = (input.pressed_this_tick(), input.released_this_tick());
                input.clear_edges();
                edges
            }
            None => (false, false),
        };
        ticks.push((
            entity,
            config.jump,
            FrameInput {
                axis: intent.map_or(0.0, |i| i.axis),
                jump_pressed,
                jump_released,
            },
        ));
    }

    for (entity, jump_config, input) in ticks {
        let velocity = B::get_velocity(world, entity);
        let Some(mut state) = world.get_mut::<MovementState>(entity) else {
            continue;
        };
        let output = tick::frame_tick(&mut state, &jump_config, &input, dt, velocity.y);
        if let Some(vertical) = output.new_vertical_velocity {
            B::set_velocity(world, entity, Vec2::new(velocity.x, vertical));
        }
    }
}

/// Accumulate the horizontal run force for every controlled actor.
///
/// The force is handed to the backend; the engine integrates it into
/// velocity given body mass. Horizontal velocity is never set directly.
pub(crate) fn accumulate_run_force<B: PhysicsBackend>(world: &mut World) {
    let actors: Vec<(Entity, RunConfig, f32, bool)> = world
        .query::<(Entity, &MovementConfig, &MovementState)>()
        .iter(world)
        .map(|(entity, config, state)| {
            (entity, config.run, state.horizontal_input, state.is_grounded)
        })
        .collect();

    for (entity, run_config, horizontal_input, is_grounded) in actors {
        let velocity = B::get_velocity(world, entity);
        let force = tick::run_force(&run_config, horizontal_input, is_grounded, velocity.x);
        if force != 0.0 {
            B::apply_force(world, entity, Vec2::X * force);
        }
    }
}

/// Write the directional gravity scale and clamp terminal fall speed.
///
/// The gravity scale is written back every tick, not just on transitions;
/// the clamp overwrites vertical velocity only, leaving horizontal motion
/// untouched.
pub(crate) fn shape_gravity_and_clamp<B: PhysicsBackend>(world: &mut World) {
    let actors: Vec<(Entity, GravityConfig)> = world
        .query_filtered::<(Entity, &MovementConfig), With<MovementState>>()
        .iter(world)
        .map(|(entity, config)| (entity, config.gravity))
        .collect();

    for (entity, gravity_config) in actors {
        let velocity = B::get_velocity(world, entity);
        let (gravity_scale, clamped) = tick::shape_fall(&gravity_config, velocity.y);
        B::set_gravity_scale(world, entity, gravity_scale);
        if let Some(vertical) = clamped {
            B::set_velocity(world, entity, Vec2::new(velocity.x, vertical));
        }
    }
}
