//! Plugin for `Avian2D` physics integration.

use bevy::prelude::*;

use crate::bodies;
use crate::config::IsoLedgeAvianConfig;

/// Plugin that turns compiled worlds into `Avian2D` bodies.
///
/// This plugin:
/// - Registers the [`IsoLedgeAvianConfig`] resource
/// - Adds an observer that spawns wall, ledge and floor bodies whenever a
///   world finishes compiling
///
/// # Example
///
/// ```rust,no_run
/// use avian2d::prelude::*;
/// use bevy::prelude::*;
/// use bevy_isoledge_avian::IsoLedgeAvianPlugin;
/// use bevy_isoledge_core::IsoLedgePlugin;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(PhysicsPlugins::default())
///     .add_plugins(IsoLedgePlugin::default())
///     .add_plugins(IsoLedgeAvianPlugin::default())
///     .run();
/// ```
#[derive(Default)]
pub struct IsoLedgeAvianPlugin {
    pub config: IsoLedgeAvianConfig,
}

impl IsoLedgeAvianPlugin {
    /// Create a new plugin with custom configuration.
    pub fn new(config: IsoLedgeAvianConfig) -> Self {
        Self { config }
    }
}

impl Plugin for IsoLedgeAvianPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone());
        app.add_observer(bodies::on_world_compiled);

        info!("IsoLedgeAvianPlugin initialized");
    }
}
