//! # `bevy_isoledge`
//!
//! Ledges and walls for isometric, multi-layer tile worlds.
//!
//! A world is a stack of Z-ordered tile layers. `bevy_isoledge` compiles it
//! into walkable floor regions, blocking walls, and drop-through ledges where
//! an entity may step off a higher layer onto a lower one. Walls of lower
//! layers are copied onto the layers above them until something in front
//! hides them.
//!
//! ## Crates
//!
//! - `bevy_isoledge_core`: the compiler, its Bevy plugin and debug drawing
//! - `bevy_isoledge_tiled` (feature `tiled`): `.tmx` import
//! - `bevy_isoledge_avian` (feature `avian`): `Avian2D` colliders
//!
//! ## Example
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use bevy_isoledge::prelude::*;
//!
//! App::new()
//!     .add_plugins(DefaultPlugins)
//!     .add_plugins(BevyIsoLedgePlugin::default())
//!     .run();
//! ```

use bevy::prelude::*;

pub mod prelude {
    //! Everything needed to compile and use a world.

    pub use bevy_isoledge_core::prelude::*;

    #[cfg(feature = "avian")]
    pub use bevy_isoledge_avian::prelude::*;
    #[cfg(feature = "tiled")]
    pub use bevy_isoledge_tiled::prelude::*;

    pub use crate::BevyIsoLedgePlugin;
}

/// Adds the compiler and every enabled integration.
#[derive(Default)]
pub struct BevyIsoLedgePlugin {
    pub config: bevy_isoledge_core::IsoLedgeConfig,
    #[cfg(feature = "avian")]
    pub avian: bevy_isoledge_avian::IsoLedgeAvianConfig,
}

impl Plugin for BevyIsoLedgePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(bevy_isoledge_core::IsoLedgePlugin::new(self.config.clone()));

        #[cfg(feature = "tiled")]
        app.add_plugins(bevy_isoledge_tiled::IsoLedgeTiledPlugin);

        #[cfg(feature = "avian")]
        app.add_plugins(bevy_isoledge_avian::IsoLedgeAvianPlugin::new(self.avian.clone()));
    }
}
