use crate::{board::Point, ships::ShipId};

/// Outcome of a single attack.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShotOutcome {
    /// The shot did not hit anything.
    Miss,
    /// The shot hit the ship with the given ID, but it still has health left.
    Hit(ShipId),
    /// The ship with the given ID has no health left. Re-attacking a sunk ship reports
    /// it as sunk again.
    Sunk(ShipId),
}

impl ShotOutcome {
    /// Get the id of the ship that was hit.
    pub fn ship(&self) -> Option<ShipId> {
        match *self {
            ShotOutcome::Miss => None,
            ShotOutcome::Hit(id) | ShotOutcome::Sunk(id) => Some(id),
        }
    }
}

/// Record of a resolved attack.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AttackReport {
    outcome: ShotOutcome,
    position: Point,
    fleet_health_remaining: usize,
    occupied_points: Option<Vec<Point>>,
}

impl AttackReport {
    pub(crate) fn miss(position: Point, fleet_health_remaining: usize) -> Self {
        Self {
            outcome: ShotOutcome::Miss,
            position,
            fleet_health_remaining,
            occupied_points: None,
        }
    }

    pub(crate) fn hit(ship: ShipId, position: Point, fleet_health_remaining: usize) -> Self {
        Self {
            outcome: ShotOutcome::Hit(ship),
            position,
            fleet_health_remaining,
            occupied_points: None,
        }
    }

    pub(crate) fn sunk(
        ship: ShipId,
        position: Point,
        fleet_health_remaining: usize,
        occupied_points: Vec<Point>,
    ) -> Self {
        Self {
            outcome: ShotOutcome::Sunk(ship),
            position,
            fleet_health_remaining,
            occupied_points: Some(occupied_points),
        }
    }

    /// Whether the shot missed, hit or sunk a ship.
    pub fn outcome(&self) -> ShotOutcome {
        self.outcome
    }

    /// The ship that was hit, if any.
    pub fn ship(&self) -> Option<ShipId> {
        self.outcome.ship()
    }

    /// The point that was attacked.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Fleet health after this attack.
    pub fn fleet_health_remaining(&self) -> usize {
        self.fleet_health_remaining
    }

    /// Every point of the sunk ship. Only present when the outcome is
    /// [`ShotOutcome::Sunk`].
    pub fn occupied_points(&self) -> Option<&[Point]> {
        self.occupied_points.as_deref()
    }
}
