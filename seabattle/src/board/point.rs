//! Points on the ocean and the directions a ship can extend in.
use std::{fmt, iter::FusedIterator};

use rand::{
    distributions::{Distribution, Standard},
    Rng,
};

/// The coordinates of a cell in the ocean.
///
/// Coordinates are signed so that the neighbors of border cells, and shots fired
/// outside of the ocean, can still be represented. Such points are simply never in
/// bounds.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Point {
    /// Horizontal position of the cell.
    pub x: i32,
    /// Vertical position of the cell.
    pub y: i32,
}

impl Point {
    /// Construct a [`Point`] from the given `x` and `y`.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The point one cell away in the given direction.
    pub fn step(self, dir: Direction) -> Self {
        self.advance(dir, 1)
    }

    /// The point `n` cells away in the given direction.
    pub fn advance(self, dir: Direction, n: i32) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x + dx * n, self.y + dy * n)
    }

    /// Iterate the 8 cells surrounding this point, including diagonals. Starts straight
    /// up and goes clockwise. Points outside of any ocean are included.
    pub fn neighbors(self) -> Neighbors {
        Neighbors {
            center: self,
            next: 0,
        }
    }

    /// Get the inclusive run of points from `start` to `end`, walking in `dir`.
    ///
    /// The length of the run is the axis distance between the two points plus one, so
    /// `end` must lie on the line through `start` along `dir` for the run to finish
    /// on it.
    pub fn range(start: Point, end: Point, dir: Direction) -> impl Iterator<Item = Point> {
        let len = (start.x - end.x).abs() + (start.y - end.y).abs() + 1;
        (0..len).map(move |i| start.advance(dir, i))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Offsets of the neighbors of a cell, clockwise from straight up.
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Iterator over the neighbors of a [`Point`].
#[derive(Debug, Clone)]
pub struct Neighbors {
    center: Point,
    next: usize,
}

impl Iterator for Neighbors {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        let (dx, dy) = NEIGHBOR_OFFSETS.get(self.next)?;
        self.next += 1;
        Some(Point::new(self.center.x + dx, self.center.y + dy))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = NEIGHBOR_OFFSETS.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Neighbors {}
impl FusedIterator for Neighbors {}

/// Direction a ship extends in from its starting cell.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Direction {
    /// Towards lower `y`.
    Up,
    /// Towards higher `y`.
    Down,
    /// Towards lower `x`.
    Left,
    /// Towards higher `x`.
    Right,
}

impl Direction {
    /// All directions.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step `(dx, dy)` for this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// The direction pointing the other way.
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Whether this direction runs along the `y` axis.
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// The two directions perpendicular to this one.
    pub fn sides(self) -> [Direction; 2] {
        if self.is_vertical() {
            [Direction::Left, Direction::Right]
        } else {
            [Direction::Up, Direction::Down]
        }
    }
}

impl Distribution<Direction> for Standard {
    /// Picks one of the four directions uniformly.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Direction {
        Direction::ALL[rng.gen_range(0, Direction::ALL.len())]
    }
}
