//! # `platformer2d_controller`
//!
//! A snappy 2D platformer movement controller with physics backend
//! abstraction, plus a smoothed follow camera.
//!
//! This crate provides a tuneable jump-and-run controller that:
//! - Drives horizontal movement through forces with a nonlinear response
//!   curve, so the physics engine keeps authority over collisions
//! - Resolves jumps with coyote time, input buffering, and variable height
//!   via jump cut on early release
//! - Shapes gravity per fall phase (heavier while descending) and clamps
//!   terminal fall speed
//! - Detects ground with a point-and-radius overlap probe
//! - Abstracts the physics backend for easy swapping (Avian2D included)
//!
//! ## Architecture
//!
//! Work is split across two cadences:
//!
//! 1. The **frame tick** (`Update`) reads input edges, runs the ground
//!    probe, advances the assist timers, and performs jump and jump-cut
//!    velocity edits. Input is never missed between physics steps.
//! 2. The **physics tick** (`FixedUpdate`) accumulates the run force,
//!    writes the directional gravity scale, and clamps fall speed, at the
//!    fixed simulation rate.
//!
//! ## System Order
//!
//! Phases are defined by [`MovementControllerSet`]:
//!
//! - `Update`: **Setup** → **Sensors** → **JumpResolution**
//! - `FixedUpdate`: **Preparation** → **ForceAccumulation** →
//!   **GravityShaping** → **FinalApplication**
//!
//! ## Usage
//!
//! ```rust
//! use bevy::prelude::*;
//! use platformer2d_controller::prelude::*;
//!
//! // Components to spawn on a player entity; MovementState is inserted
//! // automatically once the config validates.
//! let config = MovementConfig::default();
//! let intent = MovementIntent::default();
//! let jump = JumpInput::default();
//! ```

use bevy::prelude::*;

pub mod backend;
pub mod camera;
pub mod config;
pub mod debug;
pub mod error;
pub mod intent;
pub mod state;
pub mod tick;

// Systems are internal - they're added automatically by the plugin
pub(crate) mod systems;

/// System sets for the movement controller phases.
///
/// The first three run in `Update` every rendered frame; the rest run in
/// `FixedUpdate` at the physics rate. Within each schedule the sets are
/// chained.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementControllerSet {
    /// Frame phase 1: validate new configs and insert controller state.
    Setup,
    /// Frame phase 2: ground probe and other sensor reads.
    Sensors,
    /// Frame phase 3: timers, jump, and jump cut. Runs after Sensors so the
    /// grounded flag reflects this frame.
    JumpResolution,
    /// Physics phase 1: clear forces carried over from the previous step.
    Preparation,
    /// Physics phase 2: accumulate the horizontal run force.
    ForceAccumulation,
    /// Physics phase 3: directional gravity scale and fall speed clamp.
    GravityShaping,
    /// Physics phase 4: hand accumulated forces to the physics engine.
    FinalApplication,
}

pub mod prelude {
    //! Convenient re-exports for common usage.
    //!
    //! ```rust,no_run
    //! use bevy::prelude::*;
    //! use platformer2d_controller::prelude::*;
    //!
    //! fn spawn_player(mut commands: Commands) {
    //!     commands.spawn((
    //!         Transform::from_xyz(0.0, 5.0, 0.0),
    //!         MovementConfig::default(),
    //!         MovementIntent::default(),
    //!         JumpInput::default(),
    //!     ));
    //! }
    //! ```

    pub use crate::MovementControllerPlugin;
    pub use crate::MovementControllerSet;
    pub use crate::backend::PhysicsBackend;
    pub use crate::camera::{CameraFollow, CameraFollowPlugin, FollowBounds};
    pub use crate::config::{
        GravityConfig, GroundCheckConfig, JumpConfig, MovementConfig, RunConfig,
    };
    pub use crate::debug::GroundProbeGizmoPlugin;
    pub use crate::error::ConfigError;
    pub use crate::intent::{JumpInput, MovementIntent};
    pub use crate::state::{ControllerDisabled, MovementState};

    #[cfg(feature = "avian2d")]
    pub use crate::backend::Avian2dBackend;
}

/// Main plugin for the movement controller.
///
/// Generic over a physics backend `B` which provides velocity, force, and
/// gravity scale access for controlled bodies.
///
/// # Examples
///
/// With the Avian2D backend:
/// ```rust,no_run
/// use bevy::prelude::*;
/// use avian2d::prelude::*;
/// use platformer2d_controller::prelude::*;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(PhysicsPlugins::default())
///     .add_plugins(MovementControllerPlugin::<Avian2dBackend>::default())
///     .run();
/// ```
pub struct MovementControllerPlugin<B: backend::PhysicsBackend> {
    _marker: std::marker::PhantomData<B>,
}

impl<B: backend::PhysicsBackend> Default for MovementControllerPlugin<B> {
    fn default() -> Self {
        Self {
            _marker: std::marker::PhantomData,
        }
    }
}

impl<B: backend::PhysicsBackend> MovementControllerPlugin<B> {
    /// Create a new movement controller plugin.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<B: backend::PhysicsBackend> Plugin for MovementControllerPlugin<B> {
    fn build(&self, app: &mut App) {
        // Register core types
        app.register_type::<config::MovementConfig>();
        app.register_type::<state::MovementState>();
        app.register_type::<state::ControllerDisabled>();
        app.register_type::<intent::MovementIntent>();
        app.register_type::<intent::JumpInput>();

        // Add the physics backend plugin; it contributes the ground sensor
        // and any force bookkeeping systems.
        app.add_plugins(B::plugin());

        // Frame cadence: Setup -> Sensors -> JumpResolution.
        // The ground probe must run before jump resolution so coyote and
        // buffer decisions see this frame's grounded flag.
        app.configure_sets(
            Update,
            (
                MovementControllerSet::Setup,
                MovementControllerSet::Sensors,
                MovementControllerSet::JumpResolution,
            )
                .chain(),
        );

        // Physics cadence: Preparation -> ForceAccumulation -> GravityShaping
        // -> FinalApplication.
        app.configure_sets(
            FixedUpdate,
            (
                MovementControllerSet::Preparation,
                MovementControllerSet::ForceAccumulation,
                MovementControllerSet::GravityShaping,
                MovementControllerSet::FinalApplication,
            )
                .chain(),
        );

        app.add_systems(
            Update,
            (
                systems::initialize_controllers::<B>.in_set(MovementControllerSet::Setup),
                systems::resolve_frame_tick::<B>.in_set(MovementControllerSet::JumpResolution),
            ),
        );

        app.add_systems(
            FixedUpdate,
            (
                systems::accumulate_run_force::<B>
                    .in_set(MovementControllerSet::ForceAccumulation),
                systems::shape_gravity_and_clamp::<B>
                    .in_set(MovementControllerSet::GravityShaping),
            ),
        );
    }
}
