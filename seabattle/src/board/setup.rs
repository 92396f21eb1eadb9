//! Implements the setup phase of the ocean: manual and random ship placement.
use log::{debug, warn};
use rand::{
    distributions::{Distribution, Standard, Uniform},
    Rng,
};

use crate::{
    board::{
        CannotPlaceReason, Direction, Grid, Ocean, OceanDimensions, PlaceError, PlacementError,
        Point,
    },
    ships::{FleetCounts, Ship, ShipId, ShipKind},
};

/// Random trials per ocean cell that a single ship gets before the fleet attempt is
/// abandoned.
pub const TRIALS_PER_CELL: usize = 16;

/// Number of times the whole fleet is laid out from scratch before giving up.
pub const MAX_FLEET_ATTEMPTS: usize = 30;

/// Setup phase for an [`Ocean`]. Allows placing ships, but not shooting them.
#[derive(Debug, Clone)]
pub struct OceanSetup {
    /// Grid for placement of ships.
    grid: Grid,

    /// Ships placed so far, indexed by [`ShipId`].
    ships: Vec<Ship>,
}

impl OceanSetup {
    /// Begin setup of an empty ocean with the given [`OceanDimensions`].
    pub fn new(dim: OceanDimensions) -> Self {
        Self {
            grid: Grid::new(dim),
            ships: Vec::new(),
        }
    }

    /// Number of ships placed so far.
    pub fn placed_ships(&self) -> usize {
        self.ships.len()
    }

    /// Check if a ship of the given kind could be placed starting at `start` and
    /// extending in `dir`, without placing it.
    ///
    /// Every cell of the ship must be free. The cells beside the ship, and the three
    /// cells beyond each of its ends, must be free too, so that no two ships ever touch,
    /// not even diagonally.
    pub fn check_placement(
        &self,
        kind: ShipKind,
        start: Point,
        dir: Direction,
    ) -> Result<(), CannotPlaceReason> {
        let end = start.advance(dir, kind.len() as i32 - 1);
        if !self.grid.dim.contains(start) || !self.grid.dim.contains(end) {
            return Err(CannotPlaceReason::OutOfBounds);
        }
        if Point::range(start, end, dir).any(|point| self.is_occupied(point)) {
            return Err(CannotPlaceReason::AlreadyOccupied);
        }
        for point in Point::range(start, end, dir) {
            let beside = dir.sides().iter().any(|&side| self.is_occupied(point.step(side)));
            let behind = point == start && self.tip_occupied(point, dir.opposite());
            let ahead = point == end && self.tip_occupied(point, dir);
            if beside || behind || ahead {
                return Err(CannotPlaceReason::TooClose);
            }
        }
        Ok(())
    }

    /// Attempts to place a ship of the given kind starting at `start` and extending in
    /// `dir`. On success returns the ID of the new ship.
    pub fn place_ship(
        &mut self,
        kind: ShipKind,
        start: Point,
        dir: Direction,
    ) -> Result<ShipId, PlaceError> {
        self.check_placement(kind, start, dir)
            .map_err(|reason| PlaceError::new(reason, kind, start, dir))?;

        let id = ShipId::new(self.ships.len());
        let end = start.advance(dir, kind.len() as i32 - 1);
        for point in Point::range(start, end, dir) {
            // check_placement already confirmed every cell is in bounds.
            if let Some(cell) = self.grid.get_mut(point) {
                *cell = Some(id);
            }
        }
        self.ships.push(Ship::new(kind));
        Ok(id)
    }

    /// Try random anchors and directions until the ship fits, up to
    /// `TRIALS_PER_CELL` trials per ocean cell. Returns `None` if every trial failed.
    pub fn place_random<R: Rng + ?Sized>(
        &mut self,
        kind: ShipKind,
        rng: &mut R,
    ) -> Option<ShipId> {
        let xs = Uniform::new(0, self.grid.dim.width() as i32);
        let ys = Uniform::new(0, self.grid.dim.height() as i32);
        let trials = self.grid.dim.total_size() * TRIALS_PER_CELL;
        for _ in 0..trials {
            let start = Point::new(xs.sample(rng), ys.sample(rng));
            let dir: Direction = Standard.sample(rng);
            if let Ok(id) = self.place_ship(kind, start, dir) {
                return Some(id);
            }
        }
        None
    }

    /// Remove every ship placed so far.
    pub fn clear(&mut self) {
        self.grid.clear();
        self.ships.clear();
    }

    /// Finish setup, producing the [`Ocean`] with the current placements.
    pub fn start(self) -> Ocean {
        Ocean {
            grid: self.grid,
            ships: self.ships,
        }
    }

    /// Lay out the whole fleet at random, carriers first.
    ///
    /// When a ship runs out of trials the partial layout is discarded and the fleet
    /// starts over from the first ship, up to [`MAX_FLEET_ATTEMPTS`] times. A fleet
    /// whose total length is not smaller than the number of cells is rejected up front.
    pub fn random_fleet<R: Rng + ?Sized>(
        dim: OceanDimensions,
        fleet: &FleetCounts,
        rng: &mut R,
    ) -> Result<Ocean, PlacementError> {
        let fleet_length = fleet.total_length();
        let cells = dim.total_size();
        if fleet_length >= cells {
            return Err(PlacementError::FleetTooLarge {
                fleet_length,
                cells,
            });
        }

        let mut setup = Self::new(dim);
        for attempt in 1..=MAX_FLEET_ATTEMPTS {
            if fleet.ships().all(|kind| setup.place_random(kind, rng).is_some()) {
                debug!(
                    "placed {} ships on {}x{} ocean in {} attempt(s)",
                    setup.placed_ships(),
                    dim.width(),
                    dim.height(),
                    attempt,
                );
                return Ok(setup.start());
            }
            debug!(
                "fleet attempt {} stuck after {} ships, starting over",
                attempt,
                setup.placed_ships()
            );
            setup.clear();
        }
        warn!(
            "gave up placing {} ships on {}x{} ocean",
            fleet.ship_count(),
            dim.width(),
            dim.height()
        );
        Err(PlacementError::Exhausted {
            attempts: MAX_FLEET_ATTEMPTS,
        })
    }

    fn is_occupied(&self, point: Point) -> bool {
        self.grid.occupant(point).is_some()
    }

    /// Whether the cell straight ahead of `point` in `toward`, or either of its
    /// diagonal companions, is occupied.
    fn tip_occupied(&self, point: Point, toward: Direction) -> bool {
        let ahead = point.step(toward);
        self.is_occupied(ahead)
            || toward
                .sides()
                .iter()
                .any(|&side| self.is_occupied(ahead.step(side)))
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn setup() -> OceanSetup {
        OceanSetup::new(OceanDimensions::default())
    }

    #[test]
    fn places_ship_along_direction() {
        let mut setup = setup();
        let id = setup
            .place_ship(ShipKind::Cruiser, Point::new(5, 5), Direction::Left)
            .unwrap();
        let ocean = setup.start();
        assert_eq!(
            ocean.points_occupied_by(id),
            vec![Point::new(3, 5), Point::new(4, 5), Point::new(5, 5)]
        );
    }

    #[test]
    fn rejects_ship_off_the_edge() {
        let mut setup = setup();
        let err = setup
            .place_ship(ShipKind::Carrier, Point::new(1, 1), Direction::Up)
            .unwrap_err();
        assert_eq!(err.reason(), CannotPlaceReason::OutOfBounds);
        assert_eq!(setup.placed_ships(), 0);
    }

    #[test]
    fn rejects_overlap_and_contact() {
        let mut setup = setup();
        setup
            .place_ship(ShipKind::Submarine, Point::new(4, 4), Direction::Up)
            .unwrap();

        // Crossing the submarine.
        assert_eq!(
            setup.check_placement(ShipKind::Cruiser, Point::new(3, 4), Direction::Right),
            Err(CannotPlaceReason::AlreadyOccupied)
        );
        // Running alongside it.
        assert_eq!(
            setup.check_placement(ShipKind::Cruiser, Point::new(3, 5), Direction::Right),
            Err(CannotPlaceReason::TooClose)
        );
        // Tip touching it head on.
        assert_eq!(
            setup.check_placement(ShipKind::Destroyer, Point::new(4, 6), Direction::Up),
            Err(CannotPlaceReason::TooClose)
        );
        // Tip touching it diagonally.
        assert_eq!(
            setup.check_placement(ShipKind::Destroyer, Point::new(5, 6), Direction::Up),
            Err(CannotPlaceReason::TooClose)
        );
        // One cell of water in between is enough.
        assert_eq!(
            setup.check_placement(ShipKind::Destroyer, Point::new(4, 7), Direction::Up),
            Ok(())
        );
        assert_eq!(
            setup.check_placement(ShipKind::Cruiser, Point::new(6, 2), Direction::Down),
            Ok(())
        );
    }

    #[test]
    fn random_fleet_rejects_oversized_fleet() {
        let mut rng = StdRng::seed_from_u64(7);
        let dim = OceanDimensions::new(3, 2).unwrap();
        let result = OceanSetup::random_fleet(dim, &FleetCounts::new(0, 0, 2, 0, 0), &mut rng);
        assert_eq!(
            result.unwrap_err(),
            PlacementError::FleetTooLarge {
                fleet_length: 6,
                cells: 6
            }
        );
    }

    #[test]
    fn random_fleet_gives_up_when_ships_cannot_be_separated() {
        let mut rng = StdRng::seed_from_u64(7);
        let dim = OceanDimensions::new(2, 1).unwrap();
        let result = OceanSetup::random_fleet(dim, &FleetCounts::new(0, 0, 0, 0, 1), &mut rng);
        assert!(result.is_ok());

        // Three submarines need a gap between each, five cells in a single row.
        let dim = OceanDimensions::new(4, 1).unwrap();
        let result = OceanSetup::random_fleet(dim, &FleetCounts::new(0, 0, 0, 0, 3), &mut rng);
        assert_eq!(
            result.unwrap_err(),
            PlacementError::Exhausted {
                attempts: MAX_FLEET_ATTEMPTS
            }
        );
    }
}
