//! Debug visualization for the ground probe.

use bevy::prelude::*;

use crate::config::MovementConfig;
use crate::state::MovementState;

/// Draws the ground probe circle for every controlled actor: green while
/// grounded, red while airborne. Add alongside the controller plugin when
/// tuning probe offsets.
pub struct GroundProbeGizmoPlugin;

impl Plugin for GroundProbeGizmoPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, draw_ground_probes);
    }
}

fn draw_ground_probes(
    mut gizmos: Gizmos,
    q_controllers: Query<(&GlobalTransform, &MovementConfig, &MovementState)>,
) {
    for (transform, config, state) in &q_controllers {
        let (point, radius) = config.ground.probe(transform.translation().xy());
        let color = if state.is_grounded {
            Color::srgb(0.2, 0.9, 0.2)
        } else {
            Color::srgb(0.9, 0.2, 0.2)
        };
        gizmos.circle_2d(point, radius, color);
    }
}
