//! # `bevy_isoledge_core`
//!
//! Ledge compiler for `bevy_isoledge`. Turns a stack of Z-ordered tile layers
//! into walkable floor regions, blocking walls and drop-through ledges.
//!
//! **This crate does NOT create physics bodies** - `bevy_isoledge_avian`
//! observes [`WorldCompiled`](events::WorldCompiled) and builds colliders from
//! the compiled geometry.
//!
//! ## Pipeline
//!
//! 1. [`LayerStack`](layer::LayerStack): validates that Z-indices form `0..N`
//! 2. [`PerimeterCompiler`](perimeter::PerimeterCompiler): tile groups, hole
//!    groups and their boundary loops
//! 3. [`LedgeClassifier`](ledge::LedgeClassifier): wall/passable edges and
//!    maximal wall runs (ledge groups)
//! 4. [`LedgeSuperimposer`](ledge::LedgeSuperimposer): copies each run onto
//!    the layers above it until occluded
//!
//! [`compile`](compile::compile) runs all four and returns a
//! [`CompiledWorld`](compile::CompiledWorld). Every result is addressed with
//! the composite keys in [`keys`].
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use bevy_isoledge_core::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(IsoLedgePlugin::default())
//!         .add_systems(Startup, spawn_world)
//!         .run();
//! }
//!
//! fn spawn_world(mut commands: Commands) {
//!     commands.spawn(IsoWorldLayers(vec![
//!         Layer::from_rows(0, &["####", "####"]),
//!         Layer::from_rows(1, &[".##.", "...."]),
//!     ]));
//! }
//! ```

pub mod compile;
pub mod components;
pub mod debug;
pub mod edge;
pub mod error;
pub mod events;
pub mod keys;
pub mod layer;
pub mod ledge;
pub mod perimeter;
pub mod plugin;
pub mod projection;
pub mod systems;

pub mod prelude {
    //! Common imports for `bevy_isoledge_core` users.

    pub use crate::compile::{CompileSettings, CompiledWorld, compile, compile_layers};
    pub use crate::components::{CompileFailed, IsoWorldLayers, RecompileWorld};
    pub use crate::debug::{DebugLedges, IsoLedgeDebugPlugin};
    pub use crate::edge::{Direction, Edge, EdgeCollection, Orientation};
    pub use crate::error::{CompileError, InvariantViolation, LayerStackError};
    pub use crate::events::{WorldCompileFailed, WorldCompiled};
    pub use crate::keys::{
        Boundary, BoundaryKey, HoleGroupId, HoleGroupKey, LayerId, LedgeCollKey, LedgeGroupId,
        LedgeGroupKey, TileGroupId, TileGroupKey,
    };
    pub use crate::layer::{Layer, LayerStack, TileOccupancy};
    pub use crate::ledge::{
        EdgeClass, LedgeClassifier, LedgeData, LedgeGroup, LedgeSuperimposer,
    };
    pub use crate::perimeter::{PerimeterCompiler, PerimeterData};
    pub use crate::plugin::{IsoLedgeConfig, IsoLedgePlugin};
    pub use crate::projection::IsoProjection;
}

// Re-export plugin types at crate root for convenience
pub use plugin::{IsoLedgeConfig, IsoLedgePlugin};
