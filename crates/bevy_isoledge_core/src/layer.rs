//! Tile layers and the validated, Z-ordered [`LayerStack`].

use std::collections::BTreeMap;

use bevy::prelude::*;

use crate::error::LayerStackError;
use crate::keys::LayerId;

/// Occupancy query supplied by a world description.
///
/// This is all the compiler needs from a layer source. [`LayerStack::build`]
/// snapshots every source into an owned [`Layer`], so nothing is queried
/// after construction.
pub trait TileOccupancy {
    /// Z-index of the layer. A stack needs these to be exactly `0..N`.
    fn z_index(&self) -> u32;

    /// Grid size in cells.
    fn size(&self) -> UVec2;

    /// Whether the cell at `(x, y)` holds a tile. Only called in bounds.
    fn is_occupied(&self, x: u32, y: u32) -> bool;

    /// Human readable name, for logging.
    fn name(&self) -> &str {
        ""
    }
}

/// One Z-indexed grid of tile occupancy.
///
/// Cells are stored row-major: `index = y * width + x`, with `y` growing
/// southward.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Layer {
    name: String,
    z_index: u32,
    size: UVec2,
    cells: Vec<bool>,
}

impl Layer {
    /// Create an empty layer.
    pub fn empty(z_index: u32, width: u32, height: u32) -> Self {
        Self {
            name: String::new(),
            z_index,
            size: UVec2::new(width, height),
            cells: vec![false; width as usize * height as usize],
        }
    }

    /// Snapshot any occupancy source.
    pub fn from_occupancy(source: &impl TileOccupancy) -> Self {
        let size = source.size();
        let mut layer = Self::empty(source.z_index(), size.x, size.y).with_name(source.name());
        for y in 0..size.y {
            for x in 0..size.x {
                if source.is_occupied(x, y) {
                    layer.set(x, y, true);
                }
            }
        }
        layer
    }

    /// Build a layer from ASCII rows, `#` marking an occupied cell.
    ///
    /// Rows may differ in length; the layer is as wide as the longest row.
    ///
    /// ```
    /// # use bevy_isoledge_core::layer::Layer;
    /// let ring = Layer::from_rows(0, &["###", "#.#", "###"]);
    /// assert!(ring.is_occupied_at((0, 0).into()));
    /// assert!(!ring.is_occupied_at((1, 1).into()));
    /// ```
    pub fn from_rows(z_index: u32, rows: &[&str]) -> Self {
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0) as u32;
        let mut layer = Self::empty(z_index, width, rows.len() as u32);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if ch == '#' {
                    layer.set(x as u32, y as u32, true);
                }
            }
        }
        layer
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn z_index(&self) -> u32 {
        self.z_index
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.x
    }

    pub fn height(&self) -> u32 {
        self.size.y
    }

    /// Set cell occupancy. Out of bounds writes are ignored.
    pub fn set(&mut self, x: u32, y: u32, occupied: bool) {
        if x < self.size.x && y < self.size.y {
            if let Some(slot) = self.cells.get_mut(cell_index(self.size.x, x, y)) {
                *slot = occupied;
            }
        }
    }

    /// Occupancy at a planar cell. Anything outside the grid is empty.
    pub fn is_occupied_at(&self, cell: IVec2) -> bool {
        if cell.x < 0 || cell.y < 0 {
            return false;
        }
        let (x, y) = (cell.x as u32, cell.y as u32);
        if x >= self.size.x || y >= self.size.y {
            return false;
        }
        self.cells
            .get(cell_index(self.size.x, x, y))
            .copied()
            .unwrap_or(false)
    }

    /// Iterate occupied cells in row-major order.
    pub fn iter_occupied(&self) -> impl Iterator<Item = IVec2> + '_ {
        let width = self.size.x.max(1) as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, occupied)| **occupied)
            .map(move |(index, _)| IVec2::new((index % width) as i32, (index / width) as i32))
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|occupied| **occupied).count()
    }
}

/// Row-major slot of a cell, computed in `usize` so wide layers never wrap.
fn cell_index(width: u32, x: u32, y: u32) -> usize {
    y as usize * width as usize + x as usize
}

impl TileOccupancy for Layer {
    fn z_index(&self) -> u32 {
        self.z_index
    }

    fn size(&self) -> UVec2 {
        self.size
    }

    fn is_occupied(&self, x: u32, y: u32) -> bool {
        self.is_occupied_at(IVec2::new(x as i32, y as i32))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Validated, Z-ordered collection of layers.
///
/// Position in the stack equals Z-index equals [`LayerId`]. Built once per
/// world load and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LayerStack {
    layers: Vec<Layer>,
}

impl LayerStack {
    /// Validate and order a set of layers.
    ///
    /// Fails unless the Z-indices are exactly `0..N` with no duplicates.
    pub fn build<T: TileOccupancy>(
        sources: impl IntoIterator<Item = T>,
    ) -> Result<Self, LayerStackError> {
        let mut by_index: BTreeMap<u32, Vec<Layer>> = BTreeMap::new();
        for source in sources {
            let layer = Layer::from_occupancy(&source);
            by_index.entry(layer.z_index).or_default().push(layer);
        }

        let Some(&max) = by_index.keys().next_back() else {
            return Err(LayerStackError::Empty);
        };

        let missing: Vec<u32> = (0..=max).filter(|z| !by_index.contains_key(z)).collect();
        let duplicated: Vec<u32> = by_index
            .iter()
            .filter(|(_, layers)| layers.len() > 1)
            .map(|(z, _)| *z)
            .collect();

        if !missing.is_empty() || !duplicated.is_empty() {
            return Err(LayerStackError::IndexesNotASequence {
                missing,
                duplicated,
            });
        }

        let layers: Vec<Layer> = by_index.into_values().flatten().collect();
        debug!("Built layer stack with {} layers", layers.len());
        Ok(Self { layers })
    }

    /// The layer whose Z-index is `id`.
    pub fn get(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(id.index())
    }

    /// The highest layer.
    pub fn last(&self) -> &Layer {
        // A stack is never empty: `build` rejects empty input.
        &self.layers[self.layers.len() - 1]
    }

    pub fn last_id(&self) -> LayerId {
        LayerId::from_index(self.layers.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Layers in ascending Z order, paired with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (LayerId, &Layer)> {
        self.layers
            .iter()
            .enumerate()
            .map(|(index, layer)| (LayerId::from_index(index), layer))
    }

    pub fn ids(&self) -> impl Iterator<Item = LayerId> {
        (0..self.layers.len()).map(LayerId::from_index)
    }

    /// Layers strictly above `id`, ascending.
    pub fn above(&self, id: LayerId) -> impl Iterator<Item = (LayerId, &Layer)> {
        self.iter().skip(id.index() + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dense_indices_build_in_order() {
        let stack = LayerStack::build(vec![
            Layer::empty(2, 1, 1).with_name("top"),
            Layer::empty(0, 1, 1).with_name("ground"),
            Layer::empty(1, 1, 1).with_name("middle"),
        ])
        .unwrap();

        assert_eq!(stack.len(), 3);
        assert_eq!(stack.get(LayerId(0)).unwrap().name(), "ground");
        assert_eq!(stack.get(LayerId(1)).unwrap().name(), "middle");
        assert_eq!(stack.last().name(), "top");
        assert_eq!(stack.last().z_index(), 2);
        assert_eq!(stack.last_id(), LayerId(2));
    }

    #[test]
    fn test_missing_index_is_named() {
        let err = LayerStack::build(vec![Layer::empty(0, 1, 1), Layer::empty(2, 1, 1)]).unwrap_err();
        assert_eq!(
            err,
            LayerStackError::IndexesNotASequence {
                missing: vec![1],
                duplicated: vec![],
            }
        );
    }

    #[test]
    fn test_duplicate_index_is_rejected() {
        let err = LayerStack::build(vec![
            Layer::empty(0, 1, 1),
            Layer::empty(1, 1, 1),
            Layer::empty(1, 1, 1),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            LayerStackError::IndexesNotASequence {
                missing: vec![],
                duplicated: vec![1],
            }
        );
    }

    #[test]
    fn test_stack_not_starting_at_zero() {
        let err = LayerStack::build(vec![Layer::empty(1, 1, 1)]).unwrap_err();
        assert!(matches!(
            err,
            LayerStackError::IndexesNotASequence { ref missing, .. } if missing == &[0]
        ));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            LayerStack::build(Vec::<Layer>::new()).unwrap_err(),
            LayerStackError::Empty
        );
    }

    #[test]
    fn test_out_of_bounds_is_empty() {
        let layer = Layer::from_rows(0, &["#"]);
        assert!(layer.is_occupied_at(IVec2::new(0, 0)));
        assert!(!layer.is_occupied_at(IVec2::new(-1, 0)));
        assert!(!layer.is_occupied_at(IVec2::new(0, 1)));
        assert!(!layer.is_occupied_at(IVec2::new(5, 5)));
    }

    #[test]
    fn test_cell_index_past_u32() {
        assert_eq!(cell_index(u32::MAX, 1, 2), 2 * u32::MAX as usize + 1);
        assert_eq!(cell_index(70_000, 0, 70_000), 4_900_000_000);

        let mut layer = Layer::empty(0, 3, 2);
        layer.set(2, 1, true);
        assert_eq!(layer.iter_occupied().collect::<Vec<_>>(), vec![IVec2::new(2, 1)]);
    }

    #[test]
    fn test_from_rows_ragged() {
        let layer = Layer::from_rows(0, &["#", "..#"]);
        assert_eq!(layer.size(), UVec2::new(3, 2));
        let cells: Vec<IVec2> = layer.iter_occupied().collect();
        assert_eq!(cells, vec![IVec2::new(0, 0), IVec2::new(2, 1)]);
    }
}
