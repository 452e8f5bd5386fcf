//! Propagation of wall runs onto higher layers.

use bevy::prelude::*;

use crate::edge::{Edge, EdgeCollection};
use crate::layer::{Layer, LayerStack};
use crate::ledge::LedgeData;

/// Decides whether a higher layer blocks a lower wall edge.
pub trait OcclusionRule {
    fn occludes(&self, layer: &Layer, edge: &Edge) -> bool;
}

/// A layer occludes an edge when it has a tile on the edge's own cell, or on
/// the cell directly in front of it (across the edge).
///
/// With `include_diagonals`, the two cells diagonally in front of the edge
/// also occlude.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrontOcclusion {
    pub include_diagonals: bool,
}

impl FrontOcclusion {
    fn cells(&self, edge: &Edge) -> impl Iterator<Item = IVec2> {
        let front = edge.outside_cell();
        let along = edge.heading().offset();
        let diagonals = self
            .include_diagonals
            .then_some([front - along, front + along])
            .into_iter()
            .flatten();
        [edge.inside_cell(), front].into_iter().chain(diagonals)
    }
}

impl OcclusionRule for FrontOcclusion {
    fn occludes(&self, layer: &Layer, edge: &Edge) -> bool {
        self.cells(edge).any(|cell| layer.is_occupied_at(cell))
    }
}

/// Copies each wall run up the stack until the first occluding layer.
#[derive(Debug, Clone, Default)]
pub struct LedgeSuperimposer<O = FrontOcclusion> {
    rule: O,
}

impl<O: OcclusionRule> LedgeSuperimposer<O> {
    pub fn new(rule: O) -> Self {
        Self { rule }
    }

    /// Whether `layer` blocks any edge of the run.
    pub fn is_occluded(&self, layer: &Layer, run: &EdgeCollection) -> bool {
        run.iter().any(|edge| self.rule.occludes(layer, edge))
    }

    /// Extend every run's reach over consecutive unoccluded layers above its
    /// origin.
    ///
    /// Layers are tested bottom-up and the first occluded layer ends the run's
    /// propagation; nothing above it is tested.
    pub fn superimpose(&self, stack: &LayerStack, mut ledges: LedgeData) -> LedgeData {
        for group in ledges.groups_mut() {
            let mut reach = group.origin;
            for (super_layer, layer) in stack.above(group.origin) {
                if self.is_occluded(layer, &group.edges) {
                    break;
                }
                reach = super_layer;
            }
            group.reach = reach;
        }

        debug!(
            "Superimposed {} ledge groups into {} copies",
            ledges.ledge_count(),
            ledges.superimposed_count()
        );
        ledges
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::edge::Direction;
    use crate::keys::{Boundary, BoundaryKey, LayerId, LedgeGroupId, TileGroupId};
    use crate::ledge::{DropBelow, LedgeClassifier};
    use crate::perimeter::PerimeterCompiler;

    fn raw(stack: &LayerStack) -> LedgeData {
        let perimeter = PerimeterCompiler.compile(stack).unwrap();
        LedgeClassifier::<DropBelow>::default()
            .classify(stack, &perimeter)
            .unwrap()
    }

    fn ground_key(super_layer: u32) -> crate::keys::LedgeCollKey {
        BoundaryKey::new(LayerId(0), TileGroupId(0), Boundary::Outer)
            .at_super_layer(LayerId(super_layer))
            .with_ledge(LedgeGroupId(0))
    }

    /// Records which cell's edge was tested on which layer.
    struct Recording<'a> {
        inner: FrontOcclusion,
        tested: &'a RefCell<Vec<(IVec2, u32)>>,
    }

    impl OcclusionRule for Recording<'_> {
        fn occludes(&self, layer: &Layer, edge: &Edge) -> bool {
            self.tested.borrow_mut().push((edge.inside_cell(), layer.z_index()));
            self.inner.occludes(layer, edge)
        }
    }

    #[test]
    fn test_occlusion_stops_propagation_for_good() {
        let stack = LayerStack::build(vec![
            Layer::from_rows(0, &["...", ".#.", "..."]),
            Layer::empty(1, 3, 3),
            Layer::from_rows(2, &["...", "..#", "..."]),
            Layer::empty(3, 3, 3),
        ])
        .unwrap();

        let tested = RefCell::new(Vec::new());
        let superimposer = LedgeSuperimposer::new(Recording {
            inner: FrontOcclusion::default(),
            tested: &tested,
        });
        let ledges = superimposer.superimpose(&stack, raw(&stack));

        assert!(ledges.ledge_collection(ground_key(0)).is_some());
        assert!(ledges.ledge_collection(ground_key(1)).is_some());
        assert!(ledges.ledge_collection(ground_key(2)).is_none());
        assert!(ledges.ledge_collection(ground_key(3)).is_none());
        // Only the layer 2 tile's own run reaches layer 3
        let tested = tested.borrow();
        assert!(tested.contains(&(IVec2::new(1, 1), 2)));
        assert!(!tested.contains(&(IVec2::new(1, 1), 3)));
        assert!(
            tested
                .iter()
                .filter(|(_, z)| *z == 3)
                .all(|(cell, _)| *cell == IVec2::new(2, 1))
        );

        let group = ledges
            .ledge_group(ground_key(0).group.boundary_key(), LedgeGroupId(0))
            .unwrap();
        assert_eq!(group.reach, LayerId(1));
        assert_eq!(group.super_layers().collect::<Vec<_>>(), vec![LayerId(0), LayerId(1)]);
    }

    #[test]
    fn test_unoccluded_run_reaches_the_top() {
        let stack = LayerStack::build(vec![
            Layer::from_rows(0, &["#"]),
            Layer::empty(1, 1, 1),
            Layer::empty(2, 1, 1),
        ])
        .unwrap();
        let ledges = LedgeSuperimposer::<FrontOcclusion>::default().superimpose(&stack, raw(&stack));
        for super_layer in 0..3 {
            assert!(ledges.ledge_collection(ground_key(super_layer)).is_some());
        }
        assert_eq!(ledges.superimposed_count(), 2);
        assert_eq!(
            ledges.super_layers(LayerId(0)),
            vec![LayerId(0), LayerId(1), LayerId(2)]
        );
    }

    #[test]
    fn test_tile_directly_above_occludes() {
        let stack = LayerStack::build(vec![Layer::from_rows(0, &["#"]), Layer::from_rows(1, &["#"])]).unwrap();
        let ledges = LedgeSuperimposer::<FrontOcclusion>::default().superimpose(&stack, raw(&stack));
        assert!(ledges.ledge_collection(ground_key(0)).is_some());
        assert!(ledges.ledge_collection(ground_key(1)).is_none());
        assert_eq!(ledges.superimposed_count(), 0);
    }

    #[test]
    fn test_copies_keep_planar_coordinates() {
        let stack = LayerStack::build(vec![Layer::from_rows(0, &["##"]), Layer::empty(1, 2, 1)]).unwrap();
        let ledges = LedgeSuperimposer::<FrontOcclusion>::default().superimpose(&stack, raw(&stack));
        assert_eq!(
            ledges.ledge_collection(ground_key(0)),
            ledges.ledge_collection(ground_key(1))
        );
    }

    #[test]
    fn test_diagonal_occlusion_is_opt_in() {
        let layer = Layer::from_rows(1, &["..#", "...", "..."]);
        // North edge of (1, 1): front cell is (1, 0), diagonals (0, 0) and (2, 0).
        let edge = Edge::of_cell(IVec2::new(1, 1), Direction::North);

        assert!(!FrontOcclusion::default().occludes(&layer, &edge));
        assert!(
            FrontOcclusion {
                include_diagonals: true
            }
            .occludes(&layer, &edge)
        );
    }
}
