//! Tiled map import for `bevy_isoledge`.
//!
//! Reads the tile layers of a `.tmx` file as compiler input. Each visible
//! tile layer becomes one [`Layer`](bevy_isoledge_core::layer::Layer); any
//! non-empty tile is an occupied cell.
//!
//! # Z-index
//!
//! A layer's Z-index is its integer `z_index` custom property when present,
//! otherwise its position among the map's visible tile layers (group layers
//! are flattened in document order).
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use bevy_isoledge_core::prelude::*;
//! use bevy_isoledge_tiled::{IsoLedgeTiledPlugin, IsoWorldMap};
//!
//! App::new()
//!     .add_plugins(DefaultPlugins)
//!     .add_plugins(IsoLedgePlugin::default())
//!     .add_plugins(IsoLedgeTiledPlugin)
//!     .add_systems(Startup, |mut commands: Commands, assets: Res<AssetServer>| {
//!         commands.spawn(IsoWorldMap(assets.load("maps/terrace.tmx")));
//!     })
//!     .run();
//! ```
//!
//! Without Bevy's asset server, [`load_layers`] parses a file directly.

pub mod layers;
pub mod loader;
pub mod plugin;

pub mod prelude {
    //! Common imports for `bevy_isoledge_tiled`.

    pub use crate::layers::{TiledLayerError, layers_from_map, load_layers, load_stack};
    pub use crate::loader::TiledLayersAsset;
    pub use crate::plugin::{IsoLedgeTiledPlugin, IsoWorldMap};
}

pub use layers::{TiledLayerError, layers_from_map, load_layers, load_stack};
pub use plugin::{IsoLedgeTiledPlugin, IsoWorldMap};
