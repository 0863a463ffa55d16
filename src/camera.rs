//! Camera follow behavior.
//!
//! A smoothed, optionally bounds-clamped, optionally pixel-grid-snapped
//! camera that tracks a followed entity once per frame tick, with an
//! externally-triggered shake effect. Stateless vector math apart from the
//! smoothing velocity and the shake countdown; it runs in `PostUpdate`
//! before transform propagation, the engine's "after all gameplay updates"
//! slot.

use bevy::prelude::*;
use bevy::transform::TransformSystems;
use rand::Rng;

/// World-space clamp bounds for the camera center.
///
/// The center is kept inside `[min + viewport_half_extents,
/// max - viewport_half_extents]` per axis, so the visible rectangle never
/// leaves the bounds.
#[derive(Reflect, Debug, Clone, Copy)]
pub struct FollowBounds {
    /// Bottom-left corner of the allowed world region.
    pub min: Vec2,
    /// Top-right corner of the allowed world region.
    pub max: Vec2,
    /// Half the size of the visible area (orthographic half-height and
    /// half-width).
    pub viewport_half_extents: Vec2,
}

#[derive(Reflect, Debug, Clone, Copy, Default)]
struct ShakeState {
    duration: f32,
    magnitude: f32,
    damping_speed: f32,
}

/// Camera follow component.
///
/// Attach to a camera entity and point [`target`](CameraFollow::target) at
/// the entity to track. When no target is bound the follow system silently
/// no-ops for that camera.
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub struct CameraFollow {
    /// The entity the camera tracks. `None` disables following.
    pub target: Option<Entity>,

    /// Offset from the target position (z keeps the camera in front of the
    /// scene).
    pub offset: Vec3,

    /// Smoothing time constant in seconds; smaller values are snappier.
    pub smooth_time: f32,

    /// Whether to track the target on the X axis.
    pub follow_x: bool,

    /// Whether to track the target on the Y axis.
    pub follow_y: bool,

    /// Optional world-space clamp for the camera center.
    pub bounds: Option<FollowBounds>,

    /// Optional pixel-grid snapping: pixels per world unit (e.g. 16 or 32).
    /// Matches the sprite PPU for pixel-art games.
    pub pixel_snap: Option<f32>,

    // Smoothing velocity carried between frames.
    velocity: Vec3,

    shake: ShakeState,
}

impl Default for CameraFollow {
    fn default() -> Self {
        Self {
            target: None,
            offset: Vec3::new(0.0, 2.0, -10.0),
            smooth_time: 0.2,
            follow_x: true,
            follow_y: true,
            bounds: None,
            pixel_snap: None,
            velocity: Vec3::ZERO,
            shake: ShakeState::default(),
        }
    }
}

impl CameraFollow {
    /// Create a follow component tracking `target`.
    pub fn new(target: Entity) -> Self {
        Self {
            target: Some(target),
            ..default()
        }
    }

    /// Builder: set the follow offset.
    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    /// Builder: set the smoothing time constant.
    pub fn with_smooth_time(mut self, seconds: f32) -> Self {
        self.smooth_time = seconds;
        self
    }

    /// Builder: clamp the camera center to world bounds.
    pub fn with_bounds(mut self, bounds: FollowBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Builder: snap the camera position to a pixel grid.
    pub fn with_pixel_snap(mut self, pixels_per_unit: f32) -> Self {
        self.pixel_snap = Some(pixels_per_unit);
        self
    }

    /// Trigger a camera shake. Can be called from gameplay code, e.g. when
    /// the player takes damage. `damping_speed` scales how fast the shake
    /// fades (1.0 = real time).
    pub fn shake(&mut self, duration: f32, magnitude: f32, damping_speed: f32) {
        self.shake = ShakeState {
            duration,
            magnitude,
            damping_speed,
        };
    }

    /// Whether a shake is currently active.
    pub fn is_shaking(&self) -> bool {
        self.shake.duration > 0.0
    }

    /// Advance the shake countdown and produce this frame's offset.
    fn tick_shake(&mut self, dt: f32, rng: &mut impl Rng) -> Vec3 {
        if self.shake.duration > 0.0 {
            let offset = random_in_unit_circle(rng) * self.shake.magnitude;
            self.shake.duration -= dt * self.shake.damping_speed;
            offset.extend(0.0)
        } else {
            self.shake.duration = 0.0;
            Vec3::ZERO
        }
    }
}

/// Plugin registering the camera follow system.
pub struct CameraFollowPlugin;

impl Plugin for CameraFollowPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<CameraFollow>();
        app.add_systems(
            PostUpdate,
            follow_target.before(TransformSystems::Propagate),
        );
    }
}

fn follow_target(
    time: Res<Time>,
    targets: Query<&GlobalTransform, Without<CameraFollow>>,
    mut cameras: Query<(&mut Transform, &mut CameraFollow)>,
) {
    let dt = time.delta_secs();
    let mut rng = rand::thread_rng();

    for (mut transform, mut follow) in &mut cameras {
        // No followed entity bound: the whole tick is a no-op.
        let Some(target) = follow.target else {
            continue;
        };
        let Ok(target_transform) = targets.get(target) else {
            continue;
        };

        let mut desired = target_transform.translation() + follow.offset;
        if !follow.follow_x {
            desired.x = transform.translation.x;
        }
        if !follow.follow_y {
            desired.y = transform.translation.y;
        }

        let mut velocity = follow.velocity;
        let mut smoothed = smooth_damp(
            transform.translation,
            desired,
            &mut velocity,
            follow.smooth_time,
            dt,
        );
        follow.velocity = velocity;

        if let Some(bounds) = follow.bounds {
            smoothed = clamp_to_bounds(smoothed, &bounds);
        }

        smoothed += follow.tick_shake(dt, &mut rng);

        if let Some(ppu) = follow.pixel_snap {
            smoothed = snap_to_pixel_grid(smoothed, ppu);
        }

        transform.translation = smoothed;
    }
}

/// Critically-damped spring smoothing toward a target position.
///
/// `velocity` carries smoothing state between calls. The result never
/// overshoots for reasonable timesteps; `smooth_time` is roughly the time to
/// cover most of the remaining distance.
pub fn smooth_damp(
    current: Vec3,
    target: Vec3,
    velocity: &mut Vec3,
    smooth_time: f32,
    dt: f32,
) -> Vec3 {
    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + change * omega) * dt;
    *velocity = (*velocity - temp * omega) * exp;
    target + (change + temp) * exp
}

/// Clamp a camera center so the visible rectangle stays inside the bounds.
pub fn clamp_to_bounds(position: Vec3, bounds: &FollowBounds) -> Vec3 {
    Vec3::new(
        clamp_axis(
            position.x,
            bounds.min.x + bounds.viewport_half_extents.x,
            bounds.max.x - bounds.viewport_half_extents.x,
        ),
        clamp_axis(
            position.y,
            bounds.min.y + bounds.viewport_half_extents.y,
            bounds.max.y - bounds.viewport_half_extents.y,
        ),
        position.z,
    )
}

// Degenerate bounds (viewport larger than the region) pin to the midpoint
// instead of panicking in f32::clamp.
fn clamp_axis(value: f32, lo: f32, hi: f32) -> f32 {
    if lo <= hi {
        value.clamp(lo, hi)
    } else {
        (lo + hi) * 0.5
    }
}

/// Snap a position to the pixel grid to avoid sub-pixel movement. Z is left
/// unchanged.
pub fn snap_to_pixel_grid(position: Vec3, pixels_per_unit: f32) -> Vec3 {
    Vec3::new(
        (position.x * pixels_per_unit).round() / pixels_per_unit,
        (position.y * pixels_per_unit).round() / pixels_per_unit,
        position.z,
    )
}

fn random_in_unit_circle(rng: &mut impl Rng) -> Vec2 {
    let angle = rng.gen_range(0.0..std::f32::consts::TAU);
    let radius = rng.gen::<f32>().sqrt();
    Vec2::from_angle(angle) * radius
}
