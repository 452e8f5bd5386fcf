//! Loads a world from `assets/maps/terrace.tmx`.
//!
//! Tile layers map to compiler layers by their `z_index` property.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy_isoledge::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(PhysicsPlugins::default())
        .add_plugins(BevyIsoLedgePlugin::default())
        .add_plugins(IsoLedgeDebugPlugin)
        .init_resource::<DebugLedges>()
        .add_systems(Startup, setup)
        .add_observer(|trigger: On<WorldCompileFailed>| {
            error!("Map failed to compile: {}", trigger.event().error);
        })
        .run();
}

fn setup(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.spawn(Camera2d);
    commands.spawn(IsoWorldMap(asset_server.load("maps/terrace.tmx")));
}
