//! Defines the grid of cells shared between [`OceanSetup`] and [`Ocean`].
//!
//! [`OceanSetup`]: crate::board::OceanSetup
//! [`Ocean`]: crate::board::Ocean

use crate::{
    board::{OceanDimensions, Point},
    ships::ShipId,
};

/// Row-major grid of cells, each optionally occupied by a ship.
#[derive(Debug, Clone)]
pub(super) struct Grid {
    /// Dimensions of this grid.
    pub(super) dim: OceanDimensions,
    /// The ID of the ship occupying each cell, if any.
    pub(super) cells: Box<[Option<ShipId>]>,
}

impl Grid {
    pub(super) fn new(dim: OceanDimensions) -> Self {
        Self {
            dim,
            cells: vec![None; dim.total_size()].into_boxed_slice(),
        }
    }

    /// Get a mutable reference to the cell at the given [`Point`]. `None` if out of
    /// bounds.
    pub(super) fn get_mut(&mut self, point: Point) -> Option<&mut Option<ShipId>> {
        self.dim
            .try_linearize(point)
            .and_then(move |i| self.cells.get_mut(i))
    }

    /// The occupant of the given cell. Out of bounds cells are never occupied.
    pub(super) fn occupant(&self, point: Point) -> Option<ShipId> {
        self.dim
            .try_linearize(point)
            .and_then(|i| self.cells.get(i).copied().flatten())
    }

    /// Iterate every cell along with its point, in row-major order.
    pub(super) fn iter(&self) -> impl '_ + Iterator<Item = (Point, Option<ShipId>)> {
        let dim = self.dim;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (dim.un_linearize(i), cell))
    }

    /// Empty every cell.
    pub(super) fn clear(&mut self) {
        for cell in self.cells.iter_mut() {
            *cell = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occupants_by_point() {
        let mut grid = Grid::new(OceanDimensions::new(3, 2).unwrap());
        *grid.get_mut(Point::new(2, 1)).unwrap() = Some(ShipId::new(4));
        assert!(grid.get_mut(Point::new(3, 0)).is_none());

        assert_eq!(grid.occupant(Point::new(2, 1)), Some(ShipId::new(4)));
        assert_eq!(grid.occupant(Point::new(0, 0)), None);
        assert_eq!(grid.occupant(Point::new(-1, 1)), None);
        let occupied: Vec<_> = grid.iter().filter(|(_, cell)| cell.is_some()).collect();
        assert_eq!(occupied, vec![(Point::new(2, 1), Some(ShipId::new(4)))]);

        grid.clear();
        assert_eq!(grid.occupant(Point::new(2, 1)), None);
    }
}
