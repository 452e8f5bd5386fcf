//! Ledge groups: contiguous wall runs along boundary loops.
//!
//! [`LedgeClassifier`] cuts every boundary loop into runs of
//! [`EdgeClass::Wall`] edges separated by passable gaps.
//! [`LedgeSuperimposer`] then decides how far up the stack each run is
//! copied. The result is one [`LedgeData`] owning both the raw, same-layer
//! runs and their superimposed copies.

mod classify;
mod superimpose;

pub use classify::{DropBelow, DropRule, LedgeClassifier};
pub use superimpose::{FrontOcclusion, LedgeSuperimposer, OcclusionRule};

use crate::edge::EdgeCollection;
use crate::keys::{
    Boundary, BoundaryKey, LayerId, LedgeCollKey, LedgeGroupId, TileGroupId,
};

/// Whether an entity can cross a boundary edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeClass {
    /// Blocks movement: void beyond, or no legal landing below.
    Wall,
    /// An entity may step off here and fall onto a lower layer.
    Passable,
}

/// One maximal run of wall edges.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LedgeGroup {
    /// The run's edges, in loop order. Planar coordinates are shared by
    /// every super layer the run is present on.
    pub edges: EdgeCollection,
    /// Layer the run was traced on.
    pub origin: LayerId,
    /// Highest super layer the run is present on. Equal to `origin` until
    /// superimposed.
    pub reach: LayerId,
}

impl LedgeGroup {
    pub fn new(edges: EdgeCollection, origin: LayerId) -> Self {
        Self {
            edges,
            origin,
            reach: origin,
        }
    }

    /// Present on `origin..=reach`, never anywhere else.
    pub fn is_present_on(&self, super_layer: LayerId) -> bool {
        self.origin <= super_layer && super_layer <= self.reach
    }

    /// Every super layer this run is present on, ascending.
    pub fn super_layers(&self) -> impl Iterator<Item = LayerId> {
        (self.origin.0..=self.reach.0).map(LayerId)
    }

    /// Super layers above the origin, ascending.
    pub fn superimposed_layers(&self) -> impl Iterator<Item = LayerId> {
        (self.origin.0 + 1..=self.reach.0).map(LayerId)
    }
}

/// Ledge groups of one boundary loop, indexed by [`LedgeGroupId`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BoundaryLedges {
    pub groups: Vec<LedgeGroup>,
}

/// Ledges of one tile group, indexed by [`Boundary::slot`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TileGroupLedges {
    pub boundaries: Vec<BoundaryLedges>,
}

/// Ledges of one layer, indexed by [`TileGroupId`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LayerLedges {
    pub tile_groups: Vec<TileGroupLedges>,
}

/// Ledge groups of every boundary loop, raw and superimposed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LedgeData {
    layers: Vec<LayerLedges>,
}

impl LedgeData {
    pub(crate) fn from_layers(layers: Vec<LayerLedges>) -> Self {
        Self { layers }
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    fn boundary(&self, key: BoundaryKey) -> Option<&BoundaryLedges> {
        self.layers
            .get(key.layer.index())?
            .tile_groups
            .get(key.tile_group.index())?
            .boundaries
            .get(key.boundary.slot())
    }

    /// Number of ledge groups on a boundary loop.
    pub fn max_ledge_groups(&self, key: BoundaryKey) -> Option<usize> {
        self.boundary(key).map(|ledges| ledges.groups.len())
    }

    pub fn ledge_group(&self, key: BoundaryKey, ledge_group: LedgeGroupId) -> Option<&LedgeGroup> {
        self.boundary(key)?.groups.get(ledge_group.index())
    }

    /// Edges of one run as seen from `key.group.super_layer`.
    ///
    /// `None` when the run does not exist or is not present on that super
    /// layer.
    pub fn ledge_collection(&self, key: LedgeCollKey) -> Option<&EdgeCollection> {
        let group = self.ledge_group(key.group.boundary_key(), key.ledge_group)?;
        group
            .is_present_on(key.group.super_layer)
            .then_some(&group.edges)
    }

    /// Every run in id order, addressed at its origin layer.
    pub fn iter_groups(&self) -> impl Iterator<Item = (LedgeCollKey, &LedgeGroup)> {
        self.layers.iter().enumerate().flat_map(|(layer, ledges)| {
            let layer = LayerId::from_index(layer);
            ledges
                .tile_groups
                .iter()
                .enumerate()
                .flat_map(move |(tile_group, group)| {
                    let tile_group = TileGroupId::from_index(tile_group);
                    group
                        .boundaries
                        .iter()
                        .enumerate()
                        .flat_map(move |(slot, boundary)| {
                            let key = BoundaryKey::new(layer, tile_group, Boundary::from_slot(slot))
                                .at_super_layer(layer);
                            boundary.groups.iter().enumerate().map(move |(index, ledge)| {
                                (key.with_ledge(LedgeGroupId::from_index(index)), ledge)
                            })
                        })
                })
        })
    }

    pub(crate) fn groups_mut(&mut self) -> impl Iterator<Item = &mut LedgeGroup> {
        self.layers.iter_mut().flat_map(|layer| {
            layer.tile_groups.iter_mut().flat_map(|group| {
                group
                    .boundaries
                    .iter_mut()
                    .flat_map(|boundary| boundary.groups.iter_mut())
            })
        })
    }

    /// Every run traced on `layer` that is present on `super_layer`.
    ///
    /// With `super_layer == layer` these are the raw walls; above it, the
    /// superimposed copies.
    pub fn ledges_on(
        &self,
        layer: LayerId,
        super_layer: LayerId,
    ) -> impl Iterator<Item = (LedgeCollKey, &EdgeCollection)> {
        self.iter_groups()
            .filter(move |(key, group)| key.group.layer == layer && group.is_present_on(super_layer))
            .map(move |(key, group)| {
                let key = key
                    .group
                    .boundary_key()
                    .at_super_layer(super_layer)
                    .with_ledge(key.ledge_group);
                (key, &group.edges)
            })
    }

    /// Distinct super layers for which `layer` owns at least one run, ascending.
    pub fn super_layers(&self, layer: LayerId) -> Vec<LayerId> {
        let mut super_layers: Vec<LayerId> = self
            .iter_groups()
            .filter(|(key, _)| key.group.layer == layer)
            .flat_map(|(_, group)| group.super_layers())
            .collect();
        super_layers.sort_unstable();
        super_layers.dedup();
        super_layers
    }

    /// Total runs, counted once each at their origin.
    pub fn ledge_count(&self) -> usize {
        self.iter_groups().count()
    }

    /// Total superimposed copies across all super layers.
    pub fn superimposed_count(&self) -> usize {
        self.iter_groups()
            .map(|(_, group)| group.superimposed_layers().count())
            .sum()
    }
}
