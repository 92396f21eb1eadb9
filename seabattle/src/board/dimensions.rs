//! Implements the rectangular bounds of the ocean.
use crate::board::{InvalidDimensions, Point};

/// Largest allowed width or height of the ocean.
pub const MAX_SIDE: usize = 30;

/// Width and height of the ocean. Both sides are in `1..=MAX_SIDE`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct OceanDimensions {
    /// Width of the ocean. This cooresponds to the `x` coordinate.
    width: usize,
    /// Height of the ocean. This cooresponds to the `y` coordinate.
    height: usize,
}

impl OceanDimensions {
    /// Create new [`OceanDimensions`] with the specified width and height.
    /// Returns an error if either side is 0 or larger than [`MAX_SIDE`].
    pub fn new(width: usize, height: usize) -> Result<Self, InvalidDimensions> {
        if (1..=MAX_SIDE).contains(&width) && (1..=MAX_SIDE).contains(&height) {
            Ok(Self { width, height })
        } else {
            Err(InvalidDimensions::new(width, height))
        }
    }

    /// Get the width of these [`OceanDimensions`].
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the height of these [`OceanDimensions`].
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells in the ocean.
    pub fn total_size(&self) -> usize {
        self.width * self.height
    }

    /// Check if the given [`Point`] lies inside the ocean.
    pub fn contains(&self, point: Point) -> bool {
        self.try_linearize(point).is_some()
    }

    /// Get an iterator over rows of the ocean. Each row is an iterator over the points
    /// of that row.
    pub fn iter_coordinates(&self) -> impl Iterator<Item = impl Iterator<Item = Point>> {
        let width = self.width as i32;
        (0..self.height as i32).map(move |y| (0..width).map(move |x| Point::new(x, y)))
    }

    /// Iterate every point of the ocean in row-major order.
    pub fn iter_points(&self) -> impl Iterator<Item = Point> {
        self.iter_coordinates().flatten()
    }

    /// Convert a point to a row-major index. Returns `None` if the point is out of
    /// bounds.
    pub(crate) fn try_linearize(&self, point: Point) -> Option<usize> {
        if point.x < 0 || point.y < 0 {
            return None;
        }
        let (x, y) = (point.x as usize, point.y as usize);
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    /// Convert a row-major index back into a [`Point`].
    pub(crate) fn un_linearize(&self, idx: usize) -> Point {
        Point::new((idx % self.width) as i32, (idx / self.width) as i32)
    }
}

impl Default for OceanDimensions {
    /// Construct the default ocean, a 10x10 grid.
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_sides_out_of_range() {
        assert!(OceanDimensions::new(0, 10).is_err());
        assert!(OceanDimensions::new(10, 31).is_err());
        assert!(OceanDimensions::new(1, 1).is_ok());
        assert!(OceanDimensions::new(MAX_SIDE, MAX_SIDE).is_ok());
    }

    #[test]
    fn linearize_round_trips_in_bounds() {
        let dim = OceanDimensions::new(4, 3).unwrap();
        for (idx, point) in dim.iter_points().enumerate() {
            assert_eq!(dim.try_linearize(point), Some(idx));
            assert_eq!(dim.un_linearize(idx), point);
        }
        assert_eq!(dim.try_linearize(Point::new(-1, 0)), None);
        assert_eq!(dim.try_linearize(Point::new(4, 0)), None);
        assert_eq!(dim.try_linearize(Point::new(0, 3)), None);
    }
}
