//! Connected-region labelling and boundary tracing for one layer.

use std::collections::{HashMap, VecDeque};

use bevy::math::IVec2;

use crate::edge::{Direction, Edge, EdgeCollection};
use crate::error::InvariantViolation;
use crate::keys::{Boundary, BoundaryKey, HoleGroupId, LayerId, TileGroupId};
use crate::layer::Layer;

/// 8-neighbourhood, used for void regions.
const RING: [IVec2; 8] = [
    IVec2::new(-1, -1),
    IVec2::new(0, -1),
    IVec2::new(1, -1),
    IVec2::new(-1, 0),
    IVec2::new(1, 0),
    IVec2::new(-1, 1),
    IVec2::new(0, 1),
    IVec2::new(1, 1),
];

/// Row-major ordering for cells.
pub(crate) fn row_major(cell: &IVec2) -> (i32, i32) {
    (cell.y, cell.x)
}

/// Label 4-connected occupied cells. Groups come out in discovery order of
/// a row-major scan, each group's cells sorted row-major.
pub(crate) fn label_tile_groups(layer: &Layer) -> Vec<Vec<IVec2>> {
    let width = layer.width() as usize;
    let mut visited = vec![false; width * layer.height() as usize];
    let mut groups = Vec::new();
    let mut queue = VecDeque::new();

    for seed in layer.iter_occupied() {
        let seed_index = seed.y as usize * width + seed.x as usize;
        if visited[seed_index] {
            continue;
        }
        visited[seed_index] = true;
        queue.push_back(seed);

        let mut cells = Vec::new();
        while let Some(cell) = queue.pop_front() {
            cells.push(cell);
            for direction in Direction::ALL {
                let next = cell + direction.offset();
                if !layer.is_occupied_at(next) {
                    continue;
                }
                let index = next.y as usize * width + next.x as usize;
                if !visited[index] {
                    visited[index] = true;
                    queue.push_back(next);
                }
            }
        }

        cells.sort_by_key(row_major);
        groups.push(cells);
    }

    groups
}

/// Which region a padded cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Unlabelled,
    Group,
    Outside,
    Hole(u32),
}

/// A tile group's bounding box grown by one cell, with every cell labelled
/// as group, outside void, or enclosed hole.
struct RegionMap {
    origin: IVec2,
    size: IVec2,
    regions: Vec<Region>,
}

impl RegionMap {
    fn new(cells: &[IVec2]) -> Self {
        let mut min = IVec2::MAX;
        let mut max = IVec2::MIN;
        for cell in cells {
            min = min.min(*cell);
            max = max.max(*cell);
        }
        let origin = min - IVec2::ONE;
        let size = max - min + IVec2::splat(3);
        let mut map = Self {
            origin,
            size,
            regions: vec![Region::Unlabelled; (size.x * size.y) as usize],
        };
        for cell in cells {
            if let Some(index) = map.index(*cell) {
                map.regions[index] = Region::Group;
            }
        }
        map
    }

    fn index(&self, cell: IVec2) -> Option<usize> {
        let local = cell - self.origin;
        if local.x < 0 || local.y < 0 || local.x >= self.size.x || local.y >= self.size.y {
            return None;
        }
        Some((local.y * self.size.x + local.x) as usize)
    }

    /// Region of any cell; beyond the padded box is outside.
    fn region(&self, cell: IVec2) -> Region {
        self.index(cell)
            .map_or(Region::Outside, |index| self.regions[index])
    }

    fn flood_void(&mut self, seed: IVec2, label: Region) -> Vec<IVec2> {
        let mut cells = Vec::new();
        let Some(seed_index) = self.index(seed) else {
            return cells;
        };
        self.regions[seed_index] = label;
        let mut queue = VecDeque::from([seed]);
        while let Some(cell) = queue.pop_front() {
            cells.push(cell);
            for offset in RING {
                let next = cell + offset;
                let Some(index) = self.index(next) else {
                    continue;
                };
                if self.regions[index] == Region::Unlabelled {
                    self.regions[index] = label;
                    queue.push_back(next);
                }
            }
        }
        cells.sort_by_key(row_major);
        cells
    }

    /// Label the outside, then every enclosed void in row-major order of its
    /// first cell. Returns the hole cell lists, indexed by hole id.
    fn label_voids(&mut self) -> Vec<Vec<IVec2>> {
        // The padding ring is void and connected, so one fill from the corner
        // reaches the whole outside.
        self.flood_void(self.origin, Region::Outside);

        let mut holes = Vec::new();
        for y in 0..self.size.y {
            for x in 0..self.size.x {
                let cell = self.origin + IVec2::new(x, y);
                if self.region(cell) == Region::Unlabelled {
                    let label = Region::Hole(holes.len() as u32);
                    holes.push(self.flood_void(cell, label));
                }
            }
        }
        holes
    }
}

/// Traced perimeter of one tile group.
pub(crate) struct TracedGroup {
    pub(crate) outer: EdgeCollection,
    pub(crate) holes: Vec<(Vec<IVec2>, EdgeCollection)>,
}

/// Trace the outer loop and every hole loop of one tile group.
pub(crate) fn trace_group(
    layer: LayerId,
    tile_group: TileGroupId,
    cells: &[IVec2],
) -> Result<TracedGroup, InvariantViolation> {
    let mut regions = RegionMap::new(cells);
    let hole_cells = regions.label_voids();

    // Bucket boundary edges by the region they face. Slot 0 is the outside.
    let mut buckets: Vec<Vec<Edge>> = vec![Vec::new(); hole_cells.len() + 1];
    for cell in cells {
        for outward in Direction::ALL {
            let slot = match regions.region(*cell + outward.offset()) {
                Region::Group => continue,
                Region::Outside | Region::Unlabelled => 0,
                Region::Hole(hole) => hole as usize + 1,
            };
            buckets[slot].push(Edge::of_cell(*cell, outward));
        }
    }

    let key = |boundary| BoundaryKey::new(layer, tile_group, boundary);

    // A group's first cell always has its north side on the outer boundary.
    let first = cells[0];
    let outer_key = key(Boundary::Outer);
    let outer = trace_loop(
        outer_key,
        &buckets[0],
        Edge::of_cell(first, Direction::North),
    )?;
    if outer.signed_area() <= 0 {
        return Err(InvariantViolation::WrongWinding { key: outer_key });
    }

    let mut holes = Vec::with_capacity(hole_cells.len());
    for (index, void_cells) in hole_cells.into_iter().enumerate() {
        let hole_key = key(Boundary::Hole(HoleGroupId::from_index(index)));
        // The cell above a hole's first cell is always part of the group.
        let above = void_cells[0] + Direction::North.offset();
        let edges = trace_loop(
            hole_key,
            &buckets[index + 1],
            Edge::of_cell(above, Direction::South),
        )?;
        if edges.signed_area() >= 0 {
            return Err(InvariantViolation::WrongWinding { key: hole_key });
        }
        holes.push((void_cells, edges));
    }

    Ok(TracedGroup { outer, holes })
}

/// Follow boundary edges from `start` until the loop closes.
///
/// At every vertex a right turn is preferred over going straight, and
/// straight over a left turn. At a diagonal pinch this keeps hugging the
/// current cell, so tiles stay 4-connected and voids 8-connected.
fn trace_loop(
    key: BoundaryKey,
    edges: &[Edge],
    start: Edge,
) -> Result<EdgeCollection, InvariantViolation> {
    let mut outgoing: HashMap<IVec2, Vec<usize>> = HashMap::with_capacity(edges.len());
    let mut start_index = None;
    for (index, edge) in edges.iter().enumerate() {
        outgoing.entry(edge.start).or_default().push(index);
        if *edge == start {
            start_index = Some(index);
        }
    }
    let Some(start_index) = start_index else {
        return Err(InvariantViolation::OpenLoop { key });
    };

    let mut used = vec![false; edges.len()];
    used[start_index] = true;
    let mut traced = vec![start];
    let mut current = start;

    while current.end != start.start {
        let heading = current.heading();
        let preference = [heading.clockwise(), heading, heading.counter_clockwise()];
        let candidates = outgoing.get(&current.end).map_or(&[][..], Vec::as_slice);

        let next = preference.iter().find_map(|wanted| {
            candidates
                .iter()
                .copied()
                .find(|&index| !used[index] && edges[index].heading() == *wanted)
        });
        let Some(next) = next else {
            return Err(InvariantViolation::OpenLoop { key });
        };

        used[next] = true;
        current = edges[next];
        traced.push(current);
    }

    let remaining = used.iter().filter(|used| !**used).count();
    if remaining > 0 {
        return Err(InvariantViolation::UntracedEdges { key, remaining });
    }

    let collection = EdgeCollection::new(traced);
    collection.validate_loop(key)?;
    Ok(collection)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_use_four_connectivity() {
        let layer = Layer::from_rows(0, &["#.", ".#"]);
        let groups = label_tile_groups(&layer);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0], vec![IVec2::new(0, 0)]);
        assert_eq!(groups[1], vec![IVec2::new(1, 1)]);
    }

    #[test]
    fn test_group_cells_are_row_major() {
        let layer = Layer::from_rows(0, &[".#", "##"]);
        let groups = label_tile_groups(&layer);
        assert_eq!(
            groups[0],
            vec![IVec2::new(1, 0), IVec2::new(0, 1), IVec2::new(1, 1)]
        );
    }

    #[test]
    fn test_diagonal_void_cells_form_one_hole() {
        // Two void cells touching only at a corner are a single hole.
        let layer = Layer::from_rows(0, &["####", "#.##", "##.#", "####"]);
        let groups = label_tile_groups(&layer);
        assert_eq!(groups.len(), 1);

        let traced = trace_group(LayerId(0), TileGroupId(0), &groups[0]).unwrap();
        assert_eq!(traced.holes.len(), 1);
        assert_eq!(
            traced.holes[0].0,
            vec![IVec2::new(1, 1), IVec2::new(2, 2)]
        );
        assert_eq!(traced.holes[0].1.len(), 8);
        assert_eq!(traced.outer.len(), 16);
    }

    #[test]
    fn test_pinched_outline_is_one_loop() {
        // The notch at the top right touches the body only diagonally,
        // leaving a pinch vertex on the outer boundary.
        let layer = Layer::from_rows(0, &["##.", "#.#", "###"]);
        let groups = label_tile_groups(&layer);
        assert_eq!(groups.len(), 1);

        let traced = trace_group(LayerId(0), TileGroupId(0), &groups[0]).unwrap();
        // The center void is 8-connected to the outside through the pinch.
        assert!(traced.holes.is_empty());
        assert_eq!(traced.outer.len(), 16);
        assert!(traced.outer.is_closed());
    }

    #[test]
    fn test_other_groups_inside_a_hole_stay_in_the_hole() {
        let layer = Layer::from_rows(0, &["#####", "#...#", "#.#.#", "#...#", "#####"]);
        let groups = label_tile_groups(&layer);
        assert_eq!(groups.len(), 2);

        let ring = trace_group(LayerId(0), TileGroupId(0), &groups[0]).unwrap();
        assert_eq!(ring.holes.len(), 1);
        assert_eq!(ring.holes[0].0.len(), 9);
        assert_eq!(ring.holes[0].1.len(), 12);

        let island = trace_group(LayerId(0), TileGroupId(1), &groups[1]).unwrap();
        assert!(island.holes.is_empty());
        assert_eq!(island.outer.len(), 4);
    }
}
