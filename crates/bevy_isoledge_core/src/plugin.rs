//! Plugin for `bevy_isoledge_core`.

use bevy::prelude::*;

use crate::compile::CompileSettings;
use crate::projection::IsoProjection;
use crate::systems::compile_pending_worlds;

/// Global compiler configuration.
///
/// Changing it does not touch worlds that are already compiled; mark them
/// with [`RecompileWorld`](crate::components::RecompileWorld) to apply it.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct IsoLedgeConfig {
    /// Layers below an edge searched for a landing tile.
    pub drop_depth: u32,
    /// Whether diagonal front tiles occlude superimposed ledges.
    pub occlude_diagonals: bool,
    /// Grid to world mapping used by collider and debug output.
    pub projection: IsoProjection,
}

impl Default for IsoLedgeConfig {
    fn default() -> Self {
        let settings = CompileSettings::default();
        Self {
            drop_depth: settings.drop_depth,
            occlude_diagonals: settings.occlude_diagonals,
            projection: IsoProjection::default(),
        }
    }
}

impl IsoLedgeConfig {
    pub fn settings(&self) -> CompileSettings {
        CompileSettings {
            drop_depth: self.drop_depth,
            occlude_diagonals: self.occlude_diagonals,
        }
    }
}

/// Compiles every [`IsoWorldLayers`](crate::components::IsoWorldLayers)
/// entity into a [`CompiledWorld`](crate::compile::CompiledWorld).
///
/// # Example
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_isoledge_core::prelude::*;
///
/// App::new()
///     .add_plugins(MinimalPlugins)
///     .add_plugins(IsoLedgePlugin::new(IsoLedgeConfig {
///         drop_depth: 2,
///         ..default()
///     }))
///     .run();
/// ```
#[derive(Default)]
pub struct IsoLedgePlugin {
    config: IsoLedgeConfig,
}

impl IsoLedgePlugin {
    /// Create a new plugin with custom configuration.
    pub fn new(config: IsoLedgeConfig) -> Self {
        Self { config }
    }
}

impl Plugin for IsoLedgePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone());

        // Runs before user systems so compiled geometry is visible the same frame
        app.add_systems(PreUpdate, compile_pending_worlds);
    }
}
