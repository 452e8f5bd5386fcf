//! Plugin wiring `.tmx` assets into world compilation.

use bevy::prelude::*;
use bevy_isoledge_core::components::IsoWorldLayers;
use bevy_isoledge_core::systems::compile_pending_worlds;

use crate::loader::{TiledLayersAsset, TiledLayersLoader};

/// A world whose layers come from a `.tmx` asset.
///
/// Once the asset is loaded, [`IsoWorldLayers`] is inserted on the same
/// entity and the world compiles that frame.
///
/// # Example
///
/// ```rust,no_run
/// # use bevy::prelude::*;
/// # use bevy_isoledge_tiled::IsoWorldMap;
/// fn spawn_world(mut commands: Commands, asset_server: Res<AssetServer>) {
///     commands.spawn(IsoWorldMap(asset_server.load("maps/terrace.tmx")));
/// }
/// ```
#[derive(Component, Debug, Clone)]
pub struct IsoWorldMap(pub Handle<TiledLayersAsset>);

/// Registers the `.tmx` layer loader.
///
/// Add after `AssetPlugin` and `IsoLedgePlugin`.
pub struct IsoLedgeTiledPlugin;

impl Plugin for IsoLedgeTiledPlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<TiledLayersAsset>()
            .register_asset_loader(TiledLayersLoader);

        app.add_systems(PreUpdate, insert_loaded_layers.before(compile_pending_worlds));
    }
}

/// Copy loaded layers onto world entities that do not have them yet.
pub fn insert_loaded_layers(
    mut commands: Commands,
    assets: Res<Assets<TiledLayersAsset>>,
    worlds: Query<(Entity, &IsoWorldMap), Without<IsoWorldLayers>>,
) {
    for (entity, map) in &worlds {
        let Some(asset) = assets.get(&map.0) else {
            continue;
        };
        debug!("Layers ready for world {:?}", entity);
        commands
            .entity(entity)
            .insert(IsoWorldLayers(asset.layers.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_isoledge_core::compile::CompiledWorld;
    use bevy_isoledge_core::layer::Layer;
    use bevy_isoledge_core::plugin::IsoLedgePlugin;

    #[test]
    fn test_loaded_asset_feeds_compiler() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .add_plugins(IsoLedgePlugin::default())
            .add_plugins(IsoLedgeTiledPlugin);

        let handle = app
            .world_mut()
            .resource_mut::<Assets<TiledLayersAsset>>()
            .add(TiledLayersAsset {
                layers: vec![Layer::from_rows(0, &["##"]), Layer::from_rows(1, &["#."])],
            });
        let world = app.world_mut().spawn(IsoWorldMap(handle)).id();

        app.update();

        let compiled = app.world().get::<CompiledWorld>(world).unwrap();
        assert_eq!(compiled.stack.len(), 2);
    }
}
