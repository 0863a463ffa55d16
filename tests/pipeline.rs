//! End-to-end pipeline tests against a scripted physics backend.
//!
//! The backend stores velocity and gravity scale in plain components and
//! integrates forces with unit mass, so jump, buffering, jump cut, run
//! force, and fall clamping can be verified through real app updates without
//! a physics engine.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use platformer2d_controller::prelude::*;

const FRAME: f64 = 1.0 / 60.0;

#[derive(Component, Default)]
struct Vel(Vec2);

#[derive(Component)]
struct GravScale(f32);

/// Scripted ground contact, toggled by each test instead of a spatial query.
#[derive(Component)]
struct FakeGround(bool);

struct TestBackend;

impl PhysicsBackend for TestBackend {
    fn plugin() -> impl Plugin {
        TestBackendPlugin
    }

    fn get_velocity(world: &World, entity: Entity) -> Vec2 {
        world.get::<Vel>(entity).map(|v| v.0).unwrap_or(Vec2::ZERO)
    }

    fn set_velocity(world: &mut World, entity: Entity, velocity: Vec2) {
        if let Some(mut vel) = world.get_mut::<Vel>(entity) {
            vel.0 = velocity;
        }
    }

    fn apply_force(world: &mut World, entity: Entity, force: Vec2) {
        // Unit mass, integrated over the fixed timestep.
        let dt = world.resource::<Time>().delta_secs();
        if let Some(mut vel) = world.get_mut::<Vel>(entity) {
            vel.0 += force * dt;
        }
    }

    fn get_gravity_scale(world: &World, entity: Entity) -> f32 {
        world.get::<GravScale>(entity).map(|g| g.0).unwrap_or(1.0)
    }

    fn set_gravity_scale(world: &mut World, entity: Entity, scale: f32) {
        if let Some(mut gravity_scale) = world.get_mut::<GravScale>(entity) {
            gravity_scale.0 = scale;
        } else {
            world.entity_mut(entity).insert(GravScale(scale));
        }
    }

    fn get_position(world: &World, entity: Entity) -> Vec2 {
        world
            .get::<Transform>(entity)
            .map(|t| t.translation.truncate())
            .unwrap_or(Vec2::ZERO)
    }
}

struct TestBackendPlugin;

impl Plugin for TestBackendPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            fake_ground_sensor.in_set(MovementControllerSet::Sensors),
        );
    }
}

fn fake_ground_sensor(mut q: Query<(&FakeGround, &mut MovementState)>) {
    for (ground, mut state) in &mut q {
        state.is_grounded = ground.0;
    }
}

fn create_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
        FRAME,
    )));
    app.insert_resource(Time::<Fixed>::from_hz(60.0));
    app.add_plugins(MovementControllerPlugin::<TestBackend>::default());
    app
}

fn spawn_player(app: &mut App, grounded: bool) -> Entity {
    app.world_mut()
        .spawn((
            Transform::default(),
            MovementConfig::default(),
            MovementIntent::default(),
            JumpInput::default(),
            Vel::default(),
            FakeGround(grounded),
        ))
        .id()
}

fn press_jump(app: &mut App, entity: Entity) {
    let mut input = app.world_mut().get_mut::<JumpInput>(entity).unwrap();
    input.press();
}

fn release_jump(app: &mut App, entity: Entity) {
    let mut input = app.world_mut().get_mut::<JumpInput>(entity).unwrap();
    input.release();
}

fn velocity(app: &App, entity: Entity) -> Vec2 {
    app.world().get::<Vel>(entity).unwrap().0
}

#[test]
fn valid_config_gets_state_and_baseline_gravity() {
    let mut app = create_test_app();
    let player = spawn_player(&mut app, true);

    app.update();

    assert!(app.world().get::<MovementState>(player).is_some());
    assert!(app.world().get::<ControllerDisabled>(player).is_none());
    let scale = app.world().get::<GravScale>(player).unwrap().0;
    assert_eq!(scale, MovementConfig::default().gravity.gravity_scale);
}

#[test]
fn invalid_config_disables_controller() {
    let mut app = create_test_app();
    let player = app
        .world_mut()
        .spawn((
            Transform::default(),
            MovementConfig::default().with_max_jump_count(0),
            MovementIntent::default(),
            JumpInput::default(),
            Vel::default(),
            FakeGround(true),
        ))
        .id();

    app.update();
    app.update();

    assert!(app.world().get::<MovementState>(player).is_none());
    assert!(app.world().get::<ControllerDisabled>(player).is_some());
}

#[test]
fn grounded_press_jumps_at_full_force() {
    let mut app = create_test_app();
    let player = spawn_player(&mut app, true);

    // First frame initializes the controller and grounds the actor.
    app.update();

    press_jump(&mut app, player);
    app.update();

    let jump_force = MovementConfig::default().jump.jump_force;
    assert_eq!(velocity(&app, player).y, jump_force);

    // Jump spends coyote: the count went from 1 to 0 and the window closed.
    let state = app.world().get::<MovementState>(player).unwrap();
    assert_eq!(state.jumps_remaining, 0);
    assert!(!state.coyote_active());
}

#[test]
fn buffered_press_fires_exactly_once_on_landing() {
    let mut app = create_test_app();
    let player = spawn_player(&mut app, false);

    app.update();

    // Airborne with no jumps and no coyote window: the press only buffers.
    press_jump(&mut app, player);
    app.update();
    assert_eq!(velocity(&app, player).y, 0.0);

    // Land within the buffer window (default 0.1 s = 6 frames).
    app.world_mut().get_mut::<FakeGround>(player).unwrap().0 = true;
    app.update();

    let jump_force = MovementConfig::default().jump.jump_force;
    assert_eq!(velocity(&app, player).y, jump_force);

    // The buffer was consumed: staying grounded does not re-trigger.
    app.world_mut().get_mut::<Vel>(player).unwrap().0.y = 0.0;
    app.update();
    assert_eq!(velocity(&app, player).y, 0.0);
}

#[test]
fn buffered_press_expires_before_landing() {
    let mut app = create_test_app();
    let player = spawn_player(&mut app, false);

    app.update();
    press_jump(&mut app, player);

    // Stay airborne past the 0.1 s buffer window.
    for _ in 0..10 {
        app.update();
    }

    app.world_mut().get_mut::<FakeGround>(player).unwrap().0 = true;
    app.update();
    assert_eq!(velocity(&app, player).y, 0.0);
}

#[test]
fn early_release_cuts_jump_velocity() {
    let mut app = create_test_app();
    let player = spawn_player(&mut app, true);

    app.update();
    press_jump(&mut app, player);
    app.update();

    release_jump(&mut app, player);
    app.update();

    let config = MovementConfig::default();
    let expected = config.jump.jump_force * config.jump.jump_cut_multiplier;
    assert!((velocity(&app, player).y - expected).abs() < 1e-5);
}

#[test]
fn release_while_descending_does_nothing() {
    let mut app = create_test_app();
    let player = spawn_player(&mut app, false);

    app.update();
    press_jump(&mut app, player);
    app.world_mut().get_mut::<Vel>(player).unwrap().0.y = -5.0;

    release_jump(&mut app, player);
    app.update();
    assert_eq!(velocity(&app, player).y, -5.0);
}

#[test]
fn fall_speed_is_clamped_to_terminal() {
    let mut app = create_test_app();
    let player = spawn_player(&mut app, false);

    app.update();
    app.world_mut().get_mut::<Vel>(player).unwrap().0 = Vec2::new(3.0, -100.0);

    // A few frames so the fixed schedule is guaranteed to have run.
    for _ in 0..4 {
        app.update();
    }

    let config = MovementConfig::default();
    let vel = velocity(&app, player);
    assert_eq!(vel.y, config.gravity.max_fall_speed);
    // Horizontal velocity survives the clamp (no run input, no decel force
    // large enough to zero it in a few frames).
    assert!(vel.x > 0.0);

    // Descending: the heavier fall gravity scale is in effect.
    let scale = app.world().get::<GravScale>(player).unwrap().0;
    assert_eq!(
        scale,
        config.gravity.gravity_scale * config.gravity.fall_multiplier
    );
}

#[test]
fn run_input_accelerates_toward_move_speed() {
    let mut app = create_test_app();
    let player = spawn_player(&mut app, true);

    app.update();
    app.world_mut()
        .get_mut::<MovementIntent>(player)
        .unwrap()
        .set_axis(1.0);

    for _ in 0..30 {
        app.update();
    }

    let vx = velocity(&app, player).x;
    let move_speed = MovementConfig::default().run.move_speed;
    assert!(vx > 0.0, "expected rightward motion, got {vx}");
    assert!(vx <= move_speed + 1e-3, "overshot move_speed: {vx}");
}

#[test]
fn double_jump_config_allows_mid_air_jump() {
    let mut app = create_test_app();
    let player = app
        .world_mut()
        .spawn((
            Transform::default(),
            MovementConfig::default().with_max_jump_count(2),
            MovementIntent::default(),
            JumpInput::default(),
            Vel::default(),
            FakeGround(true),
        ))
        .id();

    app.update();
    press_jump(&mut app, player);
    app.update();

    // Leave the ground, wait out the coyote window, then jump again on the
    // second charge.
    app.world_mut().get_mut::<FakeGround>(player).unwrap().0 = false;
    app.world_mut().get_mut::<Vel>(player).unwrap().0.y = 0.0;
    for _ in 0..8 {
        app.update();
    }

    release_jump(&mut app, player);
    app.update();
    press_jump(&mut app, player);
    app.update();

    let jump_force = MovementConfig::default().jump.jump_force;
    assert_eq!(velocity(&app, player).y, jump_force);
    let state = app.world().get::<MovementState>(player).unwrap();
    assert_eq!(state.jumps_remaining, 0);
}
