//! Debug visualization for compiled worlds.

use bevy::prelude::*;

use crate::compile::CompiledWorld;
use crate::edge::EdgeCollection;
use crate::plugin::IsoLedgeConfig;
use crate::projection::IsoProjection;

/// Resource that enables drawing tile-group outlines and wall runs.
///
/// Drawing needs gizmos, so add [`IsoLedgeDebugPlugin`] next to
/// `DefaultPlugins` and insert this resource to turn it on.
///
/// # Example
///
/// ```rust,no_run
/// # use bevy::prelude::*;
/// # use bevy_isoledge_core::debug::DebugLedges;
/// fn enable_debug(mut commands: Commands) {
///     commands.insert_resource(DebugLedges::default());
/// }
/// ```
#[derive(Resource, Debug, Clone)]
pub struct DebugLedges {
    /// Outer loops of tile groups
    pub floor_color: Color,
    /// Raw wall runs on their own layer
    pub wall_color: Color,
    /// Draw superimposed copies as well
    pub show_superimposed: bool,
    /// Color for superimposed copies
    pub superimposed_color: Color,
}

impl Default for DebugLedges {
    fn default() -> Self {
        Self {
            floor_color: Color::srgba(0.0, 1.0, 0.0, 0.4),
            wall_color: Color::srgba(1.0, 0.2, 0.2, 0.9),
            show_superimposed: false,
            superimposed_color: Color::srgba(1.0, 0.8, 0.0, 0.6),
        }
    }
}

/// Adds the [`draw_ledges_debug`] system.
pub struct IsoLedgeDebugPlugin;

impl Plugin for IsoLedgeDebugPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PostUpdate,
            draw_ledges_debug.run_if(resource_exists::<DebugLedges>),
        );
    }
}

/// Draws every compiled world. Only runs when `DebugLedges` is present.
pub fn draw_ledges_debug(
    debug: Res<DebugLedges>,
    config: Res<IsoLedgeConfig>,
    worlds: Query<(&CompiledWorld, Option<&GlobalTransform>)>,
    mut gizmos: Gizmos,
) {
    for (world, transform) in &worlds {
        let origin = transform.map_or(Vec2::ZERO, |transform| transform.translation().truncate());

        for (_, _, group) in world.perimeter.iter_tile_groups() {
            draw_run(&mut gizmos, &config.projection, origin, &group.outer, debug.floor_color);
        }

        for (_, group) in world.ledges.iter_groups() {
            draw_run(&mut gizmos, &config.projection, origin, &group.edges, debug.wall_color);
            if debug.show_superimposed && group.reach > group.origin {
                // Copies share planar coordinates, so nudge them up to keep them visible
                let lift = Vec2::Y * config.projection.tile_size.y * 0.1;
                draw_run(
                    &mut gizmos,
                    &config.projection,
                    origin + lift,
                    &group.edges,
                    debug.superimposed_color,
                );
            }
        }
    }
}

fn draw_run(
    gizmos: &mut Gizmos,
    projection: &IsoProjection,
    origin: Vec2,
    edges: &EdgeCollection,
    color: Color,
) {
    let points = projection.path(edges);
    gizmos.linestrip_2d(points.into_iter().map(|point| origin + point), color);
}
