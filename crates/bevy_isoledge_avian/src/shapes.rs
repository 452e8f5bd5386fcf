//! Collider shapes from compiled geometry.
//!
//! | Geometry | Avian Collider |
//! |----------|----------------|
//! | Wall run | `Collider::polyline(vertices, None)` |
//! | Several runs | `Collider::polyline(vertices, Some(indices))` |
//! | Tile group floor | `Collider::trimesh` of its cells |

use std::collections::HashMap;

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy_isoledge_core::edge::EdgeCollection;
use bevy_isoledge_core::error::InvariantViolation;
use bevy_isoledge_core::keys::{LayerId, TileGroupId};
use bevy_isoledge_core::perimeter::TileGroup;
use bevy_isoledge_core::projection::IsoProjection;

use crate::components::FloorRegion;

/// Polyline collider following one wall run. Closed runs return to their
/// start.
///
/// Returns `None` for an empty run.
pub fn ledge_to_collider(projection: &IsoProjection, edges: &EdgeCollection) -> Option<Collider> {
    let points = projection.path(edges);
    if points.len() < 2 {
        return None;
    }
    Some(Collider::polyline(points, None))
}

/// One polyline collider for a set of wall runs.
///
/// Runs share the vertex buffer but only get segments between their own
/// consecutive points, so separate runs stay disconnected. Returns `None`
/// when no run has a segment.
pub fn walls_to_collider<'a>(
    projection: &IsoProjection,
    runs: impl IntoIterator<Item = &'a EdgeCollection>,
) -> Option<Collider> {
    let mut vertices: Vec<Vec2> = Vec::new();
    let mut indices: Vec<[u32; 2]> = Vec::new();

    for run in runs {
        let points = projection.path(run);
        if points.len() < 2 {
            continue;
        }
        let base = vertices.len() as u32;
        indices.extend((0..points.len() as u32 - 1).map(|i| [base + i, base + i + 1]));
        vertices.extend(points);
    }

    if indices.is_empty() {
        None
    } else {
        Some(Collider::polyline(vertices, Some(indices)))
    }
}

/// Solid triangle mesh over a tile group's cells. Holes stay open.
pub fn floor_to_collider(
    projection: &IsoProjection,
    group: &TileGroup,
) -> Result<Collider, InvariantViolation> {
    // A group always has a closed outer loop; reject anything degenerate
    projection.polygon(&group.outer)?;

    let mut vertex_ids: HashMap<IVec2, u32> = HashMap::new();
    let mut vertices = Vec::new();
    let mut vertex = |corner: IVec2| {
        *vertex_ids.entry(corner).or_insert_with(|| {
            vertices.push(projection.project(corner));
            (vertices.len() - 1) as u32
        })
    };

    let mut indices = Vec::with_capacity(group.cells.len() * 2);
    for &cell in &group.cells {
        let nw = vertex(cell);
        let ne = vertex(cell + IVec2::X);
        let se = vertex(cell + IVec2::ONE);
        let sw = vertex(cell + IVec2::Y);
        indices.push([nw, ne, se]);
        indices.push([nw, se, sw]);
    }

    Ok(Collider::trimesh(vertices, indices))
}

/// Floor colliders for every tile group, or the first invariant violation.
///
/// Nothing is returned unless every group produced a shape.
pub fn floor_colliders<'a>(
    projection: &IsoProjection,
    groups: impl IntoIterator<Item = (LayerId, TileGroupId, &'a TileGroup)>,
) -> Result<Vec<(FloorRegion, Collider)>, InvariantViolation> {
    groups
        .into_iter()
        .map(|(layer, tile_group, group)| {
            floor_to_collider(projection, group).map(|collider| (FloorRegion { layer, tile_group }, collider))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_isoledge_core::layer::{Layer, LayerStack};
    use bevy_isoledge_core::perimeter::{PerimeterCompiler, PerimeterData};

    fn perimeter(rows: &[&str]) -> PerimeterData {
        let stack = LayerStack::build(vec![Layer::from_rows(0, rows)]).unwrap();
        PerimeterCompiler.compile(&stack).unwrap()
    }

    #[test]
    fn test_ledge_to_collider() {
        let data = perimeter(&["##"]);
        let (_, _, group) = data.iter_tile_groups().next().unwrap();
        let collider = ledge_to_collider(&IsoProjection::default(), &group.outer);
        assert!(collider.is_some());
    }

    #[test]
    fn test_empty_run_no_collider() {
        let collider = ledge_to_collider(&IsoProjection::default(), &EdgeCollection::default());
        assert!(collider.is_none());
    }

    #[test]
    fn test_walls_to_collider() {
        let data = perimeter(&["#.#"]);
        let runs: Vec<&EdgeCollection> = data.iter_tile_groups().map(|(_, _, group)| &group.outer).collect();
        assert_eq!(runs.len(), 2);

        let collider = walls_to_collider(&IsoProjection::default(), runs).unwrap();
        // Two closed squares: five points and four segments each
        let polyline = collider.shape().as_polyline().unwrap();
        assert_eq!(polyline.vertices().len(), 10);
        assert_eq!(polyline.indices().len(), 8);
        assert!(!polyline.indices().contains(&[4, 5]));

        assert!(walls_to_collider(&IsoProjection::default(), Vec::new()).is_none());
    }

    #[test]
    fn test_floor_colliders_stop_at_first_bad_group() {
        let data = perimeter(&["#.#"]);
        let mut groups: Vec<TileGroup> = data.iter_tile_groups().map(|(_, _, group)| group.clone()).collect();
        let projection = IsoProjection::default();

        let ok = floor_colliders(
            &projection,
            groups
                .iter()
                .enumerate()
                .map(|(index, group)| (LayerId(0), TileGroupId(index as u32), group)),
        );
        assert_eq!(ok.map(|floors| floors.len()), Ok(2));

        groups[1].outer = EdgeCollection::new(groups[1].outer.edges()[..2].to_vec());
        let err = floor_colliders(
            &projection,
            groups
                .iter()
                .enumerate()
                .map(|(index, group)| (LayerId(0), TileGroupId(index as u32), group)),
        );
        assert!(matches!(err, Err(InvariantViolation::VertexCount { expected: 4, .. })));
    }

    #[test]
    fn test_floor_to_collider() {
        let data = perimeter(&["###", "#.#", "###"]);
        let (_, _, group) = data.iter_tile_groups().next().unwrap();
        assert!(floor_to_collider(&IsoProjection::default(), group).is_ok());
    }
}
