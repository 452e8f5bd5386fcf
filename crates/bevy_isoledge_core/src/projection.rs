//! Grid to world-space mapping for isometric (2:1 diamond) maps.

use bevy::prelude::*;

use crate::edge::EdgeCollection;
use crate::error::InvariantViolation;

/// Maps grid vertices onto the isometric screen plane.
///
/// Grid `+x` runs down-right and grid `+y` (south) runs down-left. World `+y`
/// is up, so both get negated on the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsoProjection {
    /// Width and height of one diamond tile in world units.
    pub tile_size: Vec2,
}

impl Default for IsoProjection {
    fn default() -> Self {
        Self {
            tile_size: Vec2::new(64.0, 32.0),
        }
    }
}

impl IsoProjection {
    pub fn new(tile_size: Vec2) -> Self {
        Self { tile_size }
    }

    /// World position of a grid vertex.
    pub fn project(&self, vertex: IVec2) -> Vec2 {
        let half = self.tile_size / 2.0;
        let vertex = vertex.as_vec2();
        Vec2::new((vertex.x - vertex.y) * half.x, -(vertex.x + vertex.y) * half.y)
    }

    /// Fractional grid position of a world point. Inverse of [`project`](Self::project).
    pub fn unproject(&self, world: Vec2) -> Vec2 {
        let half = self.tile_size / 2.0;
        let a = world.x / half.x;
        let b = -world.y / half.y;
        Vec2::new((a + b) / 2.0, (b - a) / 2.0)
    }

    /// The grid cell under a world point.
    pub fn cell_at(&self, world: Vec2) -> IVec2 {
        self.unproject(world).floor().as_ivec2()
    }

    /// World position of a cell's centre.
    pub fn cell_center(&self, cell: IVec2) -> Vec2 {
        (self.project(cell) + self.project(cell + IVec2::ONE)) / 2.0
    }

    /// Projected vertices of a run or loop, in edge order.
    ///
    /// Closed loops do not repeat their first vertex. Collinear edges are
    /// merged when `simplify` is set.
    pub fn polyline(&self, edges: &EdgeCollection, simplify: bool) -> Vec<Vec2> {
        let vertices = if simplify {
            edges.corners()
        } else {
            edges.vertices()
        };
        vertices.into_iter().map(|vertex| self.project(vertex)).collect()
    }

    /// Simplified polyline that returns to its start for closed loops.
    pub fn path(&self, edges: &EdgeCollection) -> Vec<Vec2> {
        let mut points = self.polyline(edges, true);
        if let Some(&first) = points.first().filter(|_| edges.is_closed()) {
            points.push(first);
        }
        points
    }

    /// Projected corners of a closed loop, ready for a polygon shape.
    pub fn polygon(&self, edges: &EdgeCollection) -> Result<Vec<Vec2>, InvariantViolation> {
        let corners = self.polyline(edges, true);
        if !edges.is_closed() || corners.len() < 4 {
            return Err(InvariantViolation::VertexCount {
                expected: 4,
                actual: corners.len(),
            });
        }
        Ok(corners)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::{Direction, Edge};

    fn unit_cell() -> EdgeCollection {
        EdgeCollection::new(
            [Direction::North, Direction::East, Direction::South, Direction::West]
                .into_iter()
                .map(|outward| Edge::of_cell(IVec2::ZERO, outward))
                .collect(),
        )
    }

    #[test]
    fn test_project_diamond() {
        let projection = IsoProjection::default();
        assert_eq!(projection.project(IVec2::ZERO), Vec2::ZERO);
        assert_eq!(projection.project(IVec2::new(1, 0)), Vec2::new(32.0, -16.0));
        assert_eq!(projection.project(IVec2::new(0, 1)), Vec2::new(-32.0, -16.0));
        assert_eq!(projection.project(IVec2::ONE), Vec2::new(0.0, -32.0));
    }

    #[test]
    fn test_unproject_inverts_project() {
        let projection = IsoProjection::new(Vec2::new(48.0, 24.0));
        for vertex in [IVec2::new(3, -2), IVec2::new(0, 7), IVec2::new(-5, -5)] {
            let back = projection.unproject(projection.project(vertex));
            assert!((back - vertex.as_vec2()).length() < 1e-4);
        }
        let center = projection.cell_center(IVec2::new(2, 1));
        assert_eq!(projection.cell_at(center), IVec2::new(2, 1));
    }

    #[test]
    fn test_polyline_of_square_run() {
        let projection = IsoProjection::default();
        let points = projection.polyline(&unit_cell(), false);
        assert_eq!(
            points,
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(32.0, -16.0),
                Vec2::new(0.0, -32.0),
                Vec2::new(-32.0, -16.0),
            ]
        );
    }

    #[test]
    fn test_path_closes_loops_only() {
        let projection = IsoProjection::default();
        let closed = projection.path(&unit_cell());
        assert_eq!(closed.len(), 5);
        assert_eq!(closed.first(), closed.last());

        let open = EdgeCollection::new(unit_cell().edges()[..2].to_vec());
        assert_eq!(projection.path(&open).len(), 3);
    }

    #[test]
    fn test_polygon_rejects_open_runs() {
        let projection = IsoProjection::default();
        assert_eq!(projection.polygon(&unit_cell()).map(|points| points.len()), Ok(4));

        let open = EdgeCollection::new(unit_cell().edges()[..2].to_vec());
        assert!(matches!(
            projection.polygon(&open),
            Err(InvariantViolation::VertexCount { expected: 4, .. })
        ));
    }
}
