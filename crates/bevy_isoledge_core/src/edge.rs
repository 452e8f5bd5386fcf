//! Grid boundary edges and ordered edge collections.
//!
//! Coordinates are lattice points on the cell grid: cell `(x, y)` spans
//! `(x, y)..(x + 1, y + 1)`, with `y` growing southward. Every edge is walked
//! with the cell that owns it on the walker's right, so outer perimeters wind
//! clockwise on screen and hole perimeters counter-clockwise.

use bevy::math::IVec2;

use crate::error::InvariantViolation;
use crate::keys::BoundaryKey;

/// Compass direction on the grid. North is `-y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Unit step toward this direction.
    pub const fn offset(self) -> IVec2 {
        match self {
            Direction::North => IVec2::new(0, -1),
            Direction::East => IVec2::new(1, 0),
            Direction::South => IVec2::new(0, 1),
            Direction::West => IVec2::new(-1, 0),
        }
    }

    /// Quarter turn clockwise on screen.
    pub const fn clockwise(self) -> Self {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    pub const fn counter_clockwise(self) -> Self {
        match self {
            Direction::North => Direction::West,
            Direction::East => Direction::North,
            Direction::South => Direction::East,
            Direction::West => Direction::South,
        }
    }

    pub const fn orientation(self) -> Orientation {
        match self {
            Direction::North | Direction::South => Orientation::Vertical,
            Direction::East | Direction::West => Orientation::Horizontal,
        }
    }
}

/// Axis an edge runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

impl Orientation {
    const fn label(self) -> &'static str {
        match self {
            Orientation::Vertical => "VERTICAL",
            Orientation::Horizontal => "HORIZONTAL",
        }
    }
}

/// One unit-length boundary edge.
///
/// `outward` points from the occupied cell that owns the edge toward the
/// cell on the other side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub orientation: Orientation,
    pub start: IVec2,
    pub end: IVec2,
    pub outward: Direction,
}

impl Edge {
    /// The edge of `cell` facing `outward`, walked with `cell` on the right.
    pub fn of_cell(cell: IVec2, outward: Direction) -> Self {
        let (start, end) = match outward {
            Direction::North => (cell, cell + IVec2::new(1, 0)),
            Direction::East => (cell + IVec2::new(1, 0), cell + IVec2::new(1, 1)),
            Direction::South => (cell + IVec2::new(1, 1), cell + IVec2::new(0, 1)),
            Direction::West => (cell + IVec2::new(0, 1), cell),
        };
        Self {
            // The edge runs perpendicular to the direction it faces.
            orientation: match outward.orientation() {
                Orientation::Vertical => Orientation::Horizontal,
                Orientation::Horizontal => Orientation::Vertical,
            },
            start,
            end,
            outward,
        }
    }

    /// Walking direction from `start` to `end`.
    pub fn heading(&self) -> Direction {
        self.outward.clockwise()
    }

    /// The occupied cell this edge belongs to.
    pub fn inside_cell(&self) -> IVec2 {
        match self.outward {
            Direction::North => self.start,
            Direction::East => self.start - IVec2::new(1, 0),
            Direction::South => self.end - IVec2::new(0, 1),
            Direction::West => self.end,
        }
    }

    /// The cell across the edge.
    pub fn outside_cell(&self) -> IVec2 {
        self.inside_cell() + self.outward.offset()
    }

    /// Check the orientation tag against the endpoints.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let delta = self.end - self.start;
        let consistent = match self.orientation {
            Orientation::Horizontal => delta.y == 0 && delta.x.abs() == 1,
            Orientation::Vertical => delta.x == 0 && delta.y.abs() == 1,
        };
        if consistent && delta == self.heading().offset() {
            Ok(())
        } else {
            Err(InvariantViolation::OrientationMismatch {
                start: self.start,
                end: self.end,
                tag: self.orientation.label(),
            })
        }
    }
}

/// Ordered sequence of contiguous edges.
///
/// Either a closed boundary loop, or an open run cut out of one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct EdgeCollection {
    edges: Vec<Edge>,
}

impl EdgeCollection {
    pub fn new(edges: Vec<Edge>) -> Self {
        Self { edges }
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Each edge ends where the next one starts.
    pub fn is_contiguous(&self) -> bool {
        self.edges.windows(2).all(|pair| pair[0].end == pair[1].start)
    }

    /// Contiguous, and the last edge ends where the first begins.
    pub fn is_closed(&self) -> bool {
        match (self.edges.first(), self.edges.last()) {
            (Some(first), Some(last)) => self.is_contiguous() && last.end == first.start,
            _ => false,
        }
    }

    /// Polyline vertices. A closed loop does not repeat its first vertex.
    pub fn vertices(&self) -> Vec<IVec2> {
        let Some(first) = self.edges.first() else {
            return Vec::new();
        };
        let mut vertices = Vec::with_capacity(self.edges.len() + 1);
        vertices.push(first.start);
        vertices.extend(self.edges.iter().map(|edge| edge.end));
        if self.is_closed() {
            vertices.pop();
        }
        vertices
    }

    /// Corner vertices only: collinear runs are collapsed.
    pub fn corners(&self) -> Vec<IVec2> {
        let closed = self.is_closed();
        let mut corners = Vec::new();
        for (index, edge) in self.edges.iter().enumerate() {
            let previous = if index == 0 {
                if closed { self.edges.last() } else { None }
            } else {
                self.edges.get(index - 1)
            };
            match previous {
                Some(previous) if previous.heading() == edge.heading() => {}
                _ => corners.push(edge.start),
            }
        }
        if let Some(last) = self.edges.last().filter(|_| !closed) {
            corners.push(last.end);
        }
        corners
    }

    /// Shoelace area in screen coordinates. Positive for clockwise (outer)
    /// loops, negative for counter-clockwise (hole) loops.
    pub fn signed_area(&self) -> i64 {
        let doubled: i64 = self
            .edges
            .iter()
            .map(|edge| {
                i64::from(edge.start.x) * i64::from(edge.end.y)
                    - i64::from(edge.end.x) * i64::from(edge.start.y)
            })
            .sum();
        doubled / 2
    }

    /// Check every edge tag, contiguity and closure.
    pub fn validate_loop(&self, key: BoundaryKey) -> Result<(), InvariantViolation> {
        self.validate_chain(key)?;
        if !self.is_closed() {
            return Err(InvariantViolation::OpenLoop { key });
        }
        Ok(())
    }

    /// Check every edge tag and contiguity.
    pub fn validate_chain(&self, key: BoundaryKey) -> Result<(), InvariantViolation> {
        for edge in &self.edges {
            edge.validate()?;
        }
        if let Some(position) = self
            .edges
            .windows(2)
            .position(|pair| pair[0].end != pair[1].start)
        {
            return Err(InvariantViolation::DisconnectedEdges {
                key,
                position: position + 1,
            });
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a EdgeCollection {
    type Item = &'a Edge;
    type IntoIter = core::slice::Iter<'a, Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}
