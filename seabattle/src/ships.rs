//! Types used for defining ships and their health.
use std::fmt;

use crate::game::FiringMode;

pub use self::fleet::FleetCounts;

mod fleet;

/// Stable handle to a ship within one [`Ocean`][crate::board::Ocean].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ShipId(usize);

impl ShipId {
    pub(crate) const fn new(index: usize) -> Self {
        ShipId(index)
    }

    /// Position of the ship in the ocean's arena. Ships are numbered in placement order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Type of a ship. The kind determines the length of the ship, which is also its
/// maximum health.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShipKind {
    /// Carrier: length 5.
    Carrier,
    /// Battleship: length 4.
    Battleship,
    /// Cruiser: length 3.
    Cruiser,
    /// Destroyer: length 2.
    Destroyer,
    /// Submarine: length 1.
    Submarine,
}

impl ShipKind {
    /// All ship kinds, longest first. This is the order fleets are counted and placed
    /// in.
    pub const ALL: &'static [ShipKind] = &[
        ShipKind::Carrier,
        ShipKind::Battleship,
        ShipKind::Cruiser,
        ShipKind::Destroyer,
        ShipKind::Submarine,
    ];

    /// Get the length of this ship type.
    pub fn len(self) -> usize {
        match self {
            ShipKind::Carrier => 5,
            ShipKind::Battleship => 4,
            ShipKind::Cruiser => 3,
            ShipKind::Destroyer => 2,
            ShipKind::Submarine => 1,
        }
    }

    /// Full name of the ship type.
    pub fn name(self) -> &'static str {
        match self {
            ShipKind::Carrier => "Carrier",
            ShipKind::Battleship => "Battleship",
            ShipKind::Cruiser => "Cruiser",
            ShipKind::Destroyer => "Destroyer",
            ShipKind::Submarine => "Submarine",
        }
    }

    /// Two letter hull classification of the ship type.
    pub fn abbrev(self) -> &'static str {
        match self {
            ShipKind::Carrier => "cv",
            ShipKind::Battleship => "bb",
            ShipKind::Cruiser => "cl",
            ShipKind::Destroyer => "dd",
            ShipKind::Submarine => "ss",
        }
    }

    /// Position of this kind in [`ShipKind::ALL`].
    fn index(self) -> usize {
        match self {
            ShipKind::Carrier => 0,
            ShipKind::Battleship => 1,
            ShipKind::Cruiser => 2,
            ShipKind::Destroyer => 3,
            ShipKind::Submarine => 4,
        }
    }
}

impl fmt::Display for ShipKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Result of damaging a single ship.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct HitOutcome {
    /// Health left after the hit.
    pub health_remaining: usize,
    /// Health actually taken away by the hit.
    pub damage: usize,
}

/// A ship of some kind and its remaining health.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Ship {
    kind: ShipKind,
    health: usize,
}

impl Ship {
    /// Construct an undamaged ship of the given kind.
    pub fn new(kind: ShipKind) -> Self {
        Self {
            kind,
            health: kind.len(),
        }
    }

    /// Kind of this ship.
    pub fn kind(&self) -> ShipKind {
        self.kind
    }

    /// Remaining health, between 0 and the length of the ship.
    pub fn health(&self) -> usize {
        self.health
    }

    /// Health of an undamaged ship of this kind.
    pub fn max_health(&self) -> usize {
        self.kind.len()
    }

    /// Check if this ship has been sunk.
    pub fn sunk(&self) -> bool {
        self.health == 0
    }

    /// Damage the ship.
    ///
    /// A general shot takes away one point of health, or nothing if the ship is
    /// already sunk. A torpedo sinks the ship outright and deals whatever health was
    /// left.
    pub fn hit(&mut self, mode: FiringMode) -> HitOutcome {
        let damage = match mode {
            FiringMode::General => self.health.min(1),
            FiringMode::Torpedo => self.health,
        };
        self.health -= damage;
        HitOutcome {
            health_remaining: self.health,
            damage,
        }
    }

    /// Reset health to the maximum for this kind.
    pub fn restore_to_full(&mut self) {
        self.health = self.max_health();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_hits_take_one_point() {
        let mut ship = Ship::new(ShipKind::Destroyer);
        assert_eq!(
            ship.hit(FiringMode::General),
            HitOutcome {
                health_remaining: 1,
                damage: 1
            }
        );
        assert_eq!(
            ship.hit(FiringMode::General),
            HitOutcome {
                health_remaining: 0,
                damage: 1
            }
        );
        assert!(ship.sunk());
        assert_eq!(
            ship.hit(FiringMode::General),
            HitOutcome {
                health_remaining: 0,
                damage: 0
            }
        );
    }

    #[test]
    fn torpedo_sinks_outright() {
        let mut ship = Ship::new(ShipKind::Carrier);
        ship.hit(FiringMode::General);
        assert_eq!(
            ship.hit(FiringMode::Torpedo),
            HitOutcome {
                health_remaining: 0,
                damage: 4
            }
        );
        assert_eq!(ship.hit(FiringMode::Torpedo).damage, 0);
    }

    #[test]
    fn restore_resets_health() {
        let mut ship = Ship::new(ShipKind::Battleship);
        ship.hit(FiringMode::General);
        ship.hit(FiringMode::General);
        ship.restore_to_full();
        assert_eq!(ship.health(), 4);
        assert_eq!(ship.health(), ship.max_health());
    }

    #[test]
    fn kinds_are_listed_longest_first() {
        for (i, &kind) in ShipKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(kind.len(), 5 - i);
        }
    }
}
