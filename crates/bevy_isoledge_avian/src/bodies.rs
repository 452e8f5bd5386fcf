//! Body generation for compiled worlds.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy_isoledge_core::compile::CompiledWorld;
use bevy_isoledge_core::events::WorldCompiled;
use bevy_isoledge_core::plugin::IsoLedgeConfig;

use crate::components::{FloorRegion, LayerWalls, SuperimposedLedges};
use crate::config::IsoLedgeAvianConfig;
use crate::shapes;

/// Observer that spawns static bodies when a world finishes compiling.
///
/// Bodies from a previous compilation of the same world are despawned first,
/// so recompiling never leaves stale colliders behind. All bodies are
/// children of the world entity:
/// - one [`LayerWalls`] per layer with at least one raw wall run
/// - one [`SuperimposedLedges`] per (layer, super layer) pair with copies
/// - one [`FloorRegion`] sensor per tile group
///
/// An invariant violation in any floor shape is logged as an error and no
/// bodies are spawned for the world.
pub fn on_world_compiled(
    trigger: On<WorldCompiled>,
    worlds: Query<&CompiledWorld>,
    children: Query<&Children>,
    spawned: Query<(), Or<(With<LayerWalls>, With<SuperimposedLedges>, With<FloorRegion>)>>,
    core_config: Res<IsoLedgeConfig>,
    config: Res<IsoLedgeAvianConfig>,
    mut commands: Commands,
) {
    let world_entity = trigger.event().entity;

    let Ok(world) = worlds.get(world_entity) else {
        warn!("WorldCompiled event for entity without CompiledWorld component");
        return;
    };

    if let Ok(previous) = children.get(world_entity) {
        for child in previous.to_vec() {
            if spawned.contains(child) {
                commands.entity(child).despawn();
            }
        }
    }

    let projection = &core_config.projection;

    // A degenerate floor aborts before anything spawns
    let floors = if config.spawn_floor_sensors {
        match shapes::floor_colliders(projection, world.perimeter.iter_tile_groups()) {
            Ok(floors) => floors,
            Err(error) => {
                error!(
                    "Not spawning ledge bodies for world {:?}: {}",
                    world_entity, error
                );
                return;
            }
        }
    } else {
        Vec::new()
    };

    let mut bodies = Vec::new();

    for (layer, _) in world.stack.iter() {
        let walls = world.ledges.ledges_on(layer, layer).map(|(_, edges)| edges);
        if let Some(collider) = shapes::walls_to_collider(projection, walls) {
            bodies.push(
                commands
                    .spawn((
                        LayerWalls { layer },
                        RigidBody::Static,
                        collider,
                        Transform::default(),
                        Name::new(format!("Walls: {layer}")),
                    ))
                    .id(),
            );
        }

        if !config.spawn_superimposed {
            continue;
        }
        for super_layer in world.ledges.super_layers(layer) {
            if super_layer == layer {
                continue;
            }
            let copies = world.ledges.ledges_on(layer, super_layer).map(|(_, edges)| edges);
            if let Some(collider) = shapes::walls_to_collider(projection, copies) {
                bodies.push(
                    commands
                        .spawn((
                            SuperimposedLedges { layer, super_layer },
                            RigidBody::Static,
                            collider,
                            Transform::default(),
                            Name::new(format!("Ledges: {layer} on {super_layer}")),
                        ))
                        .id(),
                );
            }
        }
    }

    for (region, collider) in floors {
        bodies.push(
            commands
                .spawn((
                    region,
                    RigidBody::Static,
                    Sensor,
                    collider,
                    Transform::default(),
                    Name::new(format!("Floor: {} {}", region.layer, region.tile_group)),
                ))
                .id(),
        );
    }

    info!(
        "Spawned {} ledge bodies for world {:?}",
        bodies.len(),
        world_entity
    );
    if !bodies.is_empty() {
        commands.entity(world_entity).add_children(&bodies);
    }
}
