//! Dense integer ids and the composite keys that address compiled geometry.
//!
//! Ids are assigned deterministically during compilation (row-major discovery
//! order), so the same layer stack always yields the same ids. Keys are plain
//! addresses into the nested vectors held by
//! [`PerimeterData`](crate::perimeter::PerimeterData) and
//! [`LedgeData`](crate::ledge::LedgeData).

use core::fmt;

macro_rules! dense_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u32);

        impl $name {
            /// Position of this id in its owning container.
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            pub(crate) fn from_index(index: usize) -> Self {
                Self(index as u32)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, " {}"), self.0)
            }
        }
    };
}

dense_id!(
    /// Layer id. Equal to the layer's Z-index once the stack is validated.
    LayerId,
    "layer"
);
dense_id!(
    /// Tile group id, dense per layer.
    TileGroupId,
    "tile group"
);
dense_id!(
    /// Hole group id, dense per (layer, tile group).
    HoleGroupId,
    "hole group"
);
dense_id!(
    /// Ledge group id, dense per (layer, tile group, boundary).
    LedgeGroupId,
    "ledge group"
);

impl LayerId {
    /// The layer directly above this one.
    pub const fn above(self) -> Self {
        Self(self.0 + 1)
    }

    /// The layer `depth` steps below, if it exists.
    pub fn below(self, depth: u32) -> Option<Self> {
        self.0.checked_sub(depth).map(Self)
    }
}

/// Which boundary loop of a tile group is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Boundary {
    /// The tile group's outer perimeter.
    Outer,
    /// The inner perimeter of one enclosed hole.
    Hole(HoleGroupId),
}

impl Boundary {
    /// Slot of this boundary inside a tile group: 0 is the outer loop,
    /// hole `h` lives at `h + 1`.
    pub const fn slot(self) -> usize {
        match self {
            Boundary::Outer => 0,
            Boundary::Hole(hole) => hole.index() + 1,
        }
    }

    pub(crate) fn from_slot(slot: usize) -> Self {
        match slot {
            0 => Boundary::Outer,
            n => Boundary::Hole(HoleGroupId::from_index(n - 1)),
        }
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Boundary::Outer => f.write_str("outer boundary"),
            Boundary::Hole(hole) => write!(f, "{hole}"),
        }
    }
}

/// Addresses the tile-group count of one layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileGroupKey {
    pub layer: LayerId,
}

/// Addresses the hole-group count of one tile group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HoleGroupKey {
    pub layer: LayerId,
    pub tile_group: TileGroupId,
}

/// Addresses one boundary loop (outer or hole) of a tile group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BoundaryKey {
    pub layer: LayerId,
    pub tile_group: TileGroupId,
    pub boundary: Boundary,
}

impl BoundaryKey {
    pub fn new(layer: LayerId, tile_group: TileGroupId, boundary: Boundary) -> Self {
        Self {
            layer,
            tile_group,
            boundary,
        }
    }

    /// Key of this boundary's ledge groups as seen from `super_layer`.
    pub fn at_super_layer(self, super_layer: LayerId) -> LedgeGroupKey {
        LedgeGroupKey {
            layer: self.layer,
            tile_group: self.tile_group,
            boundary: self.boundary,
            super_layer,
        }
    }
}

/// Addresses the ledge groups of one boundary as seen from one super layer.
///
/// `super_layer == layer` addresses the raw, same-layer runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LedgeGroupKey {
    pub layer: LayerId,
    pub tile_group: TileGroupId,
    pub boundary: Boundary,
    pub super_layer: LayerId,
}

impl LedgeGroupKey {
    pub fn boundary_key(self) -> BoundaryKey {
        BoundaryKey::new(self.layer, self.tile_group, self.boundary)
    }

    pub fn with_ledge(self, ledge_group: LedgeGroupId) -> LedgeCollKey {
        LedgeCollKey {
            group: self,
            ledge_group,
        }
    }

    /// Whether this key addresses a superimposed copy rather than a raw run.
    pub fn is_superimposed(self) -> bool {
        self.super_layer != self.layer
    }
}

/// Addresses one ledge group's edge collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LedgeCollKey {
    pub group: LedgeGroupKey,
    pub ledge_group: LedgeGroupId,
}

impl fmt::Display for LedgeCollKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/super {}/{}",
            self.group.layer,
            self.group.tile_group,
            self.group.boundary,
            self.group.super_layer.0,
            self.ledge_group
        )
    }
}
