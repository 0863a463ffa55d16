use bevy::prelude::*;

/// Backend plugin that registers nothing. For backends whose accessors need
/// no supporting systems, such as test doubles that fake the ground sensor
/// themselves.
pub struct NoOpBackendPlugin;

impl Plugin for NoOpBackendPlugin {
    fn build(&self, _app: &mut App) {}
}
