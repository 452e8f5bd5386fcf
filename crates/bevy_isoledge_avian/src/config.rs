//! Configuration for generated bodies.

use bevy::prelude::*;

/// Which bodies the plugin spawns for a compiled world.
///
/// Raw wall bodies ([`LayerWalls`](crate::components::LayerWalls)) are always
/// spawned.
#[derive(Resource, Debug, Clone)]
pub struct IsoLedgeAvianConfig {
    /// Spawn one [`FloorRegion`](crate::components::FloorRegion) sensor per
    /// tile group.
    pub spawn_floor_sensors: bool,
    /// Spawn [`SuperimposedLedges`](crate::components::SuperimposedLedges)
    /// bodies for walls copied onto higher layers.
    pub spawn_superimposed: bool,
}

impl Default for IsoLedgeAvianConfig {
    fn default() -> Self {
        Self {
            spawn_floor_sensors: true,
            spawn_superimposed: true,
        }
    }
}
