//! Configuration for the ground overlap probe.

use bevy::prelude::*;

/// Configuration for the ground overlap probe.
///
/// Grounding is a point+radius overlap test against collidable geometry
/// matching [`ground_layer`], performed once per frame tick by the physics
/// backend's sensor system.
///
/// [`ground_layer`]: GroundCheckConfig::ground_layer
#[derive(Reflect, Debug, Clone, Copy)]
pub struct GroundCheckConfig {
    /// Offset of the probe point from the body position (usually at the feet).
    pub check_offset: Vec2,

    /// Radius of the overlap circle.
    pub radius: f32,

    /// Opaque collision layer mask: which layers count as ground.
    pub ground_layer: u32,
}

impl Default for GroundCheckConfig {
    fn default() -> Self {
        Self {
            check_offset: Vec2::new(0.0, -0.5),
            radius: 0.1,
            ground_layer: u32::MAX,
        }
    }
}

impl GroundCheckConfig {
    /// Resolve the probe circle for a body at `position`.
    ///
    /// Also used for debug overlay drawing; has no effect on simulation.
    pub fn probe(&self, position: Vec2) -> (Vec2, f32) {
        (position + self.check_offset, self.radius)
    }
}
