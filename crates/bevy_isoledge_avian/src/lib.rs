//! `Avian2D` physics integration for `bevy_isoledge`.
//!
//! Observes [`WorldCompiled`](bevy_isoledge_core::events::WorldCompiled) and
//! spawns static bodies under the world entity.
//!
//! # Bodies
//!
//! - [`LayerWalls`]: compound polyline of every raw wall run on a layer
//! - [`SuperimposedLedges`]: a lower layer's walls as seen from a higher
//!   layer, so entities up there cannot walk off the visual ledge
//! - [`FloorRegion`]: sensor over each tile group's walkable cells
//!
//! All geometry goes through the
//! [`IsoProjection`](bevy_isoledge_core::projection::IsoProjection) in
//! `IsoLedgeConfig`.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use avian2d::prelude::*;
//! use bevy::prelude::*;
//! use bevy_isoledge_avian::{IsoLedgeAvianConfig, IsoLedgeAvianPlugin};
//! use bevy_isoledge_core::IsoLedgePlugin;
//!
//! App::new()
//!     .add_plugins(DefaultPlugins)
//!     .add_plugins(PhysicsPlugins::default())
//!     .add_plugins(IsoLedgePlugin::default())
//!     .add_plugins(IsoLedgeAvianPlugin::new(IsoLedgeAvianConfig {
//!         spawn_floor_sensors: false,
//!         ..default()
//!     }))
//!     .run();
//! ```

pub mod bodies;
pub mod components;
pub mod config;
pub mod plugin;
pub mod shapes;

pub mod prelude {
    //! Common imports for `bevy_isoledge_avian`.

    pub use crate::components::*;
    pub use crate::config::IsoLedgeAvianConfig;
    pub use crate::plugin::IsoLedgeAvianPlugin;
}

// Re-export at crate root for convenience
pub use components::{FloorRegion, LayerWalls, SuperimposedLedges};
pub use config::IsoLedgeAvianConfig;
pub use plugin::IsoLedgeAvianPlugin;
