//! Types that make up the ocean the fleet is hidden in.

use crate::{
    game::FiringMode,
    ships::{HitOutcome, Ship, ShipId},
};

use self::grid::Grid;
pub use self::{
    dimensions::{OceanDimensions, MAX_SIDE},
    errors::{CannotPlaceReason, InvalidDimensions, PlaceError, PlacementError},
    point::{Direction, Neighbors, Point},
    setup::{OceanSetup, MAX_FLEET_ATTEMPTS, TRIALS_PER_CELL},
};

mod dimensions;
mod errors;
mod grid;
mod point;
pub mod setup;

/// The ocean after setup: the grid of cells and the ships that occupy them.
///
/// Ships are stored in an arena and addressed by [`ShipId`]; each grid cell holds the
/// ID of the ship covering it, if any. Ships are never removed, a sunk ship stays on
/// the grid.
#[derive(Debug, Clone)]
pub struct Ocean {
    /// Grid of cells occupied by ships.
    grid: Grid,

    /// All ships, indexed by [`ShipId`].
    ships: Vec<Ship>,
}

impl Ocean {
    /// Get the [`OceanDimensions`] of this [`Ocean`].
    pub fn dimensions(&self) -> &OceanDimensions {
        &self.grid.dim
    }

    /// Get the ID of the ship at the given point, if any. Points outside the ocean are
    /// always empty.
    pub fn ship_at(&self, point: Point) -> Option<ShipId> {
        self.grid.occupant(point)
    }

    /// Returns true if no ship covers the given point.
    pub fn is_empty(&self, point: Point) -> bool {
        self.ship_at(point).is_none()
    }

    /// Get the ship with the specified ID if it exists.
    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(id.index())
    }

    /// Get an iterator over all ships in the ocean.
    pub fn iter_ships(&self) -> impl Iterator<Item = (ShipId, &Ship)> {
        self.ships
            .iter()
            .enumerate()
            .map(|(i, ship)| (ShipId::new(i), ship))
    }

    /// Number of ships in the ocean.
    pub fn ship_count(&self) -> usize {
        self.ships.len()
    }

    /// Sum of the remaining health of every ship.
    pub fn fleet_health(&self) -> usize {
        self.ships.iter().map(Ship::health).sum()
    }

    /// Get every point covered by the given ship, in row-major order. Found by scanning
    /// the grid.
    pub fn points_occupied_by(&self, id: ShipId) -> Vec<Point> {
        self.grid
            .iter()
            .filter(|&(_, occupant)| occupant == Some(id))
            .map(|(point, _)| point)
            .collect()
    }

    /// Get an iterator over the rows of the ocean. Each row iterates the occupant of
    /// each cell.
    pub fn iter_rows<'a>(
        &'a self,
    ) -> impl 'a + Iterator<Item = impl 'a + Iterator<Item = Option<ShipId>>> {
        self.grid
            .dim
            .iter_coordinates()
            .map(move |row| row.map(move |point| self.ship_at(point)))
    }

    /// Damage the ship at the given point. Returns `None` if nothing is there.
    pub(crate) fn hit(
        &mut self,
        point: Point,
        mode: FiringMode,
    ) -> Option<(ShipId, HitOutcome)> {
        let id = self.ship_at(point)?;
        let ship = self.ships.get_mut(id.index())?;
        Some((id, ship.hit(mode)))
    }

    /// Put the given ship back to full health. Returns the health it regained.
    pub(crate) fn restore(&mut self, id: ShipId) -> usize {
        match self.ships.get_mut(id.index()) {
            Some(ship) => {
                let missing = ship.max_health() - ship.health();
                ship.restore_to_full();
                missing
            }
            None => 0,
        }
    }
}
