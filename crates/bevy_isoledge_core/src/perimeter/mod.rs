//! Perimeter compilation: tile groups, hole groups and their boundary loops.
//!
//! For every layer the [`PerimeterCompiler`]:
//! 1. Labels maximal 4-connected groups of occupied cells (row-major discovery)
//! 2. Labels the void around each group with 8-connectivity, splitting it into
//!    the outside and enclosed holes
//! 3. Traces the outer loop (clockwise) and every hole loop (counter-clockwise)

mod trace;

use bevy::prelude::*;

use crate::edge::EdgeCollection;
use crate::error::InvariantViolation;
use crate::keys::{Boundary, BoundaryKey, HoleGroupId, HoleGroupKey, LayerId, TileGroupId, TileGroupKey};
use crate::layer::{Layer, LayerStack};

/// An enclosed void region inside a tile group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HoleGroup {
    /// Void cells, row-major. May include tiles of other groups.
    pub cells: Vec<IVec2>,
    /// Inner perimeter, counter-clockwise on screen.
    pub edges: EdgeCollection,
}

/// A maximal 4-connected set of occupied cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TileGroup {
    /// Occupied cells, row-major.
    pub cells: Vec<IVec2>,
    /// Outer perimeter, clockwise on screen.
    pub outer: EdgeCollection,
    /// Holes, indexed by [`HoleGroupId`].
    pub holes: Vec<HoleGroup>,
}

impl TileGroup {
    pub fn boundary(&self, boundary: Boundary) -> Option<&EdgeCollection> {
        match boundary {
            Boundary::Outer => Some(&self.outer),
            Boundary::Hole(hole) => self.holes.get(hole.index()).map(|hole| &hole.edges),
        }
    }

    /// Every boundary loop, outer first, then holes by id.
    pub fn boundaries(&self) -> impl Iterator<Item = (Boundary, &EdgeCollection)> {
        core::iter::once((Boundary::Outer, &self.outer)).chain(
            self.holes
                .iter()
                .enumerate()
                .map(|(index, hole)| (Boundary::Hole(HoleGroupId::from_index(index)), &hole.edges)),
        )
    }
}

/// Tile groups of one layer, indexed by [`TileGroupId`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LayerPerimeter {
    pub tile_groups: Vec<TileGroup>,
}

/// Tile groups, hole groups and boundary loops of every layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PerimeterData {
    layers: Vec<LayerPerimeter>,
}

impl PerimeterData {
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layer(&self, layer: LayerId) -> Option<&LayerPerimeter> {
        self.layers.get(layer.index())
    }

    /// Number of tile groups on a layer.
    pub fn max_tile_groups(&self, key: TileGroupKey) -> Option<usize> {
        self.layer(key.layer).map(|layer| layer.tile_groups.len())
    }

    /// Number of holes inside a tile group. Zero for a solid group.
    pub fn max_hole_groups(&self, key: HoleGroupKey) -> Option<usize> {
        self.tile_group(key.layer, key.tile_group)
            .map(|group| group.holes.len())
    }

    pub fn tile_group(&self, layer: LayerId, tile_group: TileGroupId) -> Option<&TileGroup> {
        self.layer(layer)?.tile_groups.get(tile_group.index())
    }

    /// The boundary loop a key addresses.
    pub fn edge_collection(&self, key: BoundaryKey) -> Option<&EdgeCollection> {
        self.tile_group(key.layer, key.tile_group)?
            .boundary(key.boundary)
    }

    /// Like [`edge_collection`](Self::edge_collection), for pipeline stages
    /// that treat a miss as a bug.
    pub(crate) fn require(&self, key: BoundaryKey) -> Result<&EdgeCollection, InvariantViolation> {
        self.edge_collection(key)
            .ok_or(InvariantViolation::MissingBoundary(key))
    }

    /// Every boundary loop in id order: layer, tile group, then outer before holes.
    pub fn iter_boundaries(&self) -> impl Iterator<Item = (BoundaryKey, &EdgeCollection)> {
        self.layers.iter().enumerate().flat_map(|(layer, perimeter)| {
            perimeter
                .tile_groups
                .iter()
                .enumerate()
                .flat_map(move |(tile_group, group)| {
                    group.boundaries().map(move |(boundary, edges)| {
                        (
                            BoundaryKey::new(
                                LayerId::from_index(layer),
                                TileGroupId::from_index(tile_group),
                                boundary,
                            ),
                            edges,
                        )
                    })
                })
        })
    }

    /// Every tile group in id order.
    pub fn iter_tile_groups(&self) -> impl Iterator<Item = (LayerId, TileGroupId, &TileGroup)> {
        self.layers.iter().enumerate().flat_map(|(layer, perimeter)| {
            perimeter
                .tile_groups
                .iter()
                .enumerate()
                .map(move |(tile_group, group)| {
                    (
                        LayerId::from_index(layer),
                        TileGroupId::from_index(tile_group),
                        group,
                    )
                })
        })
    }
}

/// Finds tile groups and traces their boundaries, layer by layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PerimeterCompiler;

impl PerimeterCompiler {
    pub fn compile(&self, stack: &LayerStack) -> Result<PerimeterData, InvariantViolation> {
        let layers = stack
            .iter()
            .map(|(id, layer)| self.compile_layer(id, layer))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PerimeterData { layers })
    }

    pub fn compile_layer(
        &self,
        id: LayerId,
        layer: &Layer,
    ) -> Result<LayerPerimeter, InvariantViolation> {
        let mut tile_groups = Vec::new();
        for (index, cells) in trace::label_tile_groups(layer).into_iter().enumerate() {
            let traced = trace::trace_group(id, TileGroupId::from_index(index), &cells)?;
            tile_groups.push(TileGroup {
                cells,
                outer: traced.outer,
                holes: traced
                    .holes
                    .into_iter()
                    .map(|(cells, edges)| HoleGroup { cells, edges })
                    .collect(),
            });
        }

        debug!(
            "Layer {} '{}': {} tile groups, {} holes",
            id.0,
            layer.name(),
            tile_groups.len(),
            tile_groups.iter().map(|group| group.holes.len()).sum::<usize>()
        );

        Ok(LayerPerimeter { tile_groups })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(layers: Vec<Layer>) -> PerimeterData {
        let stack = LayerStack::build(layers).unwrap();
        PerimeterCompiler.compile(&stack).unwrap()
    }

    #[test]
    fn test_single_cell() {
        let data = compile(vec![Layer::from_rows(0, &["...", ".#.", "..."])]);
        let layer = TileGroupKey { layer: LayerId(0) };
        let group = HoleGroupKey {
            layer: LayerId(0),
            tile_group: TileGroupId(0),
        };

        assert_eq!(data.max_tile_groups(layer), Some(1));
        assert_eq!(data.max_hole_groups(group), Some(0));

        let outer = data
            .edge_collection(BoundaryKey::new(LayerId(0), TileGroupId(0), Boundary::Outer))
            .unwrap();
        assert_eq!(outer.len(), 4);
        assert!(outer.is_closed());
        // No concave vertices: every turn is a right turn.
        assert!(
            outer
                .edges()
                .windows(2)
                .all(|pair| pair[1].heading() == pair[0].heading().clockwise())
        );
    }

    #[test]
    fn test_ring_has_one_hole_with_opposite_winding() {
        let data = compile(vec![Layer::from_rows(0, &["###", "#.#", "###"])]);
        let key = HoleGroupKey {
            layer: LayerId(0),
            tile_group: TileGroupId(0),
        };
        assert_eq!(data.max_tile_groups(TileGroupKey { layer: LayerId(0) }), Some(1));
        assert_eq!(data.max_hole_groups(key), Some(1));

        let outer = data
            .edge_collection(BoundaryKey::new(LayerId(0), TileGroupId(0), Boundary::Outer))
            .unwrap();
        let hole = data
            .edge_collection(BoundaryKey::new(
                LayerId(0),
                TileGroupId(0),
                Boundary::Hole(HoleGroupId(0)),
            ))
            .unwrap();

        assert_eq!(outer.len(), 12);
        assert_eq!(hole.len(), 4);
        assert!(hole.is_closed());
        assert_eq!(outer.signed_area(), 9);
        assert_eq!(hole.signed_area(), -1);
        assert_eq!(
            data.tile_group(LayerId(0), TileGroupId(0)).unwrap().holes[0].cells,
            vec![IVec2::new(1, 1)]
        );
    }

    #[test]
    fn test_tile_group_ids_follow_row_major_discovery() {
        let data = compile(vec![Layer::from_rows(0, &["..#", "#..", "..."])]);
        let first = data.tile_group(LayerId(0), TileGroupId(0)).unwrap();
        let second = data.tile_group(LayerId(0), TileGroupId(1)).unwrap();
        assert_eq!(first.cells, vec![IVec2::new(2, 0)]);
        assert_eq!(second.cells, vec![IVec2::new(0, 1)]);
    }

    #[test]
    fn test_outer_loop_starts_at_first_cell() {
        let data = compile(vec![Layer::from_rows(0, &[".##", "##."])]);
        let outer = data
            .edge_collection(BoundaryKey::new(LayerId(0), TileGroupId(0), Boundary::Outer))
            .unwrap();
        assert_eq!(outer.edges()[0].start, IVec2::new(1, 0));
        assert_eq!(outer.len(), 10);
    }

    #[test]
    fn test_missing_keys() {
        let data = compile(vec![Layer::from_rows(0, &["#"])]);
        assert_eq!(data.max_tile_groups(TileGroupKey { layer: LayerId(4) }), None);
        assert_eq!(
            data.max_hole_groups(HoleGroupKey {
                layer: LayerId(0),
                tile_group: TileGroupId(1),
            }),
            None
        );
        let key = BoundaryKey::new(LayerId(0), TileGroupId(0), Boundary::Hole(HoleGroupId(0)));
        assert_eq!(data.edge_collection(key), None);
        assert_eq!(data.require(key), Err(InvariantViolation::MissingBoundary(key)));
    }

    #[test]
    fn test_empty_layer_has_no_groups() {
        let data = compile(vec![Layer::empty(0, 4, 4)]);
        assert_eq!(data.max_tile_groups(TileGroupKey { layer: LayerId(0) }), Some(0));
        assert_eq!(data.iter_boundaries().count(), 0);
    }

    #[test]
    fn test_boundaries_iterate_outer_first() {
        let data = compile(vec![Layer::from_rows(0, &["#####", "#.#.#", "#####"])]);
        let boundaries: Vec<Boundary> = data.iter_boundaries().map(|(key, _)| key.boundary).collect();
        assert_eq!(
            boundaries,
            vec![
                Boundary::Outer,
                Boundary::Hole(HoleGroupId(0)),
                Boundary::Hole(HoleGroupId(1)),
            ]
        );
    }
}
