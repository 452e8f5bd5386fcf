//! Compiles a small hand-written world and draws its walls and ledges.
//!
//! The terrace on layer 1 overhangs the ground, so its outer edge is a drop
//! everywhere. The pillar on the terrace corner has walls on its two open
//! sides, and the ground's rim is copied onto every layer above it.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy_isoledge::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(PhysicsPlugins::default())
        .add_plugins(BevyIsoLedgePlugin::default())
        .add_plugins(IsoLedgeDebugPlugin)
        .insert_resource(DebugLedges {
            show_superimposed: true,
            ..default()
        })
        .add_systems(Startup, (setup_camera, spawn_world))
        .add_observer(report_compiled)
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((Camera2d, Transform::from_xyz(0.0, -96.0, 0.0)));
}

fn spawn_world(mut commands: Commands) {
    commands.spawn(IsoWorldLayers(vec![
        Layer::from_rows(0, &["######", "######", "######", "######", "######"]).with_name("ground"),
        Layer::from_rows(1, &["......", ".####.", ".#..#.", ".####.", "......"]).with_name("terrace"),
        Layer::from_rows(2, &["......", ".#....", "......", "......", "......"]).with_name("pillar"),
    ]));
}

fn report_compiled(trigger: On<WorldCompiled>, worlds: Query<&CompiledWorld>) {
    let Ok(world) = worlds.get(trigger.event().entity) else {
        return;
    };
    for (layer, _) in world.stack.iter() {
        info!(
            "{}: {} raw ledge groups, visible on {:?}",
            layer,
            world.ledges.ledges_on(layer, layer).count(),
            world.ledges.super_layers(layer)
        );
    }
}
