//! Markers on the bodies spawned under a world entity.
//!
//! Games give each layer its own collision layers by querying these and
//! inserting `CollisionLayers`.

use bevy::prelude::*;
use bevy_isoledge_core::keys::{LayerId, TileGroupId};

/// Static body holding every raw wall run of one layer.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerWalls {
    pub layer: LayerId,
}

/// Static body holding the walls of `layer` as seen from `super_layer`.
///
/// Entities walking on `super_layer` collide with these to stay off the
/// lower layer's ledges.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuperimposedLedges {
    pub layer: LayerId,
    pub super_layer: LayerId,
}

/// Sensor covering the walkable area of one tile group.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloorRegion {
    pub layer: LayerId,
    pub tile_group: TileGroupId,
}
