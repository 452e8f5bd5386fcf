//! Wall/passable classification and grouping into ledge runs.

use bevy::prelude::*;

use crate::edge::{Edge, EdgeCollection};
use crate::error::InvariantViolation;
use crate::keys::{BoundaryKey, TileGroupId};
use crate::layer::LayerStack;
use crate::ledge::{BoundaryLedges, EdgeClass, LayerLedges, LedgeData, LedgeGroup, TileGroupLedges};
use crate::perimeter::PerimeterData;

/// Decides whether a boundary edge lets an entity fall through.
pub trait DropRule {
    fn classify(&self, stack: &LayerStack, key: BoundaryKey, edge: &Edge) -> EdgeClass;
}

/// An edge is passable when one of the `depth` layers directly below has a
/// tile on the far side of the edge to land on.
///
/// Tiles on the edge's own layer never count, and layer 0 has nothing below
/// it, so its edges are always walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropBelow {
    pub depth: u32,
}

impl Default for DropBelow {
    fn default() -> Self {
        Self { depth: 1 }
    }
}

impl DropRule for DropBelow {
    fn classify(&self, stack: &LayerStack, key: BoundaryKey, edge: &Edge) -> EdgeClass {
        let landing = edge.outside_cell();
        let can_land = (1..=self.depth)
            .map_while(|depth| key.layer.below(depth))
            .filter_map(|below| stack.get(below))
            .any(|layer| layer.is_occupied_at(landing));
        if can_land {
            EdgeClass::Passable
        } else {
            EdgeClass::Wall
        }
    }
}

/// Labels boundary edges and groups contiguous walls into ledge groups.
#[derive(Debug, Clone, Default)]
pub struct LedgeClassifier<R = DropBelow> {
    rule: R,
}

impl<R: DropRule> LedgeClassifier<R> {
    pub fn new(rule: R) -> Self {
        Self { rule }
    }

    /// Classify every edge of one loop, in loop order.
    pub fn classify_edges(
        &self,
        stack: &LayerStack,
        key: BoundaryKey,
        edges: &EdgeCollection,
    ) -> Vec<EdgeClass> {
        edges
            .iter()
            .map(|edge| self.rule.classify(stack, key, edge))
            .collect()
    }

    /// Raw ledge groups for every boundary loop. Each group's reach is its
    /// own layer.
    pub fn classify(
        &self,
        stack: &LayerStack,
        perimeter: &PerimeterData,
    ) -> Result<LedgeData, InvariantViolation> {
        let mut layers = Vec::with_capacity(perimeter.layer_count());
        for layer_id in stack.ids() {
            let layer_perimeter = perimeter
                .layer(layer_id)
                .ok_or(InvariantViolation::MissingLayer(layer_id))?;

            let mut tile_groups = Vec::with_capacity(layer_perimeter.tile_groups.len());
            let mut passable = 0;
            for (index, group) in layer_perimeter.tile_groups.iter().enumerate() {
                let mut boundaries = Vec::with_capacity(group.holes.len() + 1);
                for (boundary, _) in group.boundaries() {
                    let key = BoundaryKey::new(layer_id, TileGroupId::from_index(index), boundary);
                    let edges = perimeter.require(key)?;
                    let classes = self.classify_edges(stack, key, edges);
                    passable += classes.iter().filter(|class| **class == EdgeClass::Passable).count();

                    let mut groups = Vec::new();
                    for run in group_wall_runs(edges, &classes) {
                        run.validate_chain(key)?;
                        groups.push(LedgeGroup::new(run, layer_id));
                    }
                    boundaries.push(BoundaryLedges { groups });
                }
                tile_groups.push(TileGroupLedges { boundaries });
            }

            debug!(
                "Layer {}: {} passable edges, {} ledge groups",
                layer_id.0,
                passable,
                tile_groups
                    .iter()
                    .flat_map(|group| &group.boundaries)
                    .map(|boundary| boundary.groups.len())
                    .sum::<usize>()
            );
            layers.push(LayerLedges { tile_groups });
        }
        Ok(LedgeData::from_layers(layers))
    }
}

/// Split a closed loop into maximal runs of wall edges.
///
/// A loop without passable edges is one run in loop order. Otherwise the
/// scan starts right after the first passable edge, so no run wraps past the
/// scan start and runs are numbered in the order they are met.
pub(crate) fn group_wall_runs(edges: &EdgeCollection, classes: &[EdgeClass]) -> Vec<EdgeCollection> {
    let count = edges.len();
    let Some(first_passable) = classes.iter().position(|class| *class == EdgeClass::Passable) else {
        return if count == 0 {
            Vec::new()
        } else {
            vec![edges.clone()]
        };
    };

    let mut runs = Vec::new();
    let mut current = Vec::new();
    for step in 1..=count {
        let index = (first_passable + step) % count;
        match classes[index] {
            EdgeClass::Wall => current.push(edges.edges()[index]),
            EdgeClass::Passable => {
                if !current.is_empty() {
                    runs.push(EdgeCollection::new(core::mem::take(&mut current)));
                }
            }
        }
    }
    runs
}
