//! Single-player Battleship.
//!
//! A fleet of ships is hidden at random on a rectangular ocean of up to 30x30 cells, and
//! the player fires at cells until every ship is sunk. Two optional rules can be
//! enabled for a [`Session`]:
//!
//! - **torpedo mode** gives the player a limited number of torpedoes, each of which
//!   sinks the ship it hits outright;
//! - **recovery mode** undoes a streak of hits on a ship when the player misses or
//!   switches target before sinking it.
//!
//! ```
//! use seabattle::{FiringMode, FleetCounts, Point, Session, ShotOutcome};
//!
//! let mut session = Session::configure(10, 10, FleetCounts::new(0, 0, 0, 0, 1)).unwrap();
//! let report = session.attack(Point::new(3, 4), FiringMode::General).unwrap();
//! match report.outcome() {
//!     ShotOutcome::Sunk(_) => assert!(session.is_over()),
//!     ShotOutcome::Miss => assert_eq!(session.fleet_health_remaining(), 1),
//!     ShotOutcome::Hit(_) => unreachable!("a submarine sinks in one hit"),
//! }
//! ```

pub mod board;
pub mod game;
pub mod ships;

pub use crate::{
    board::{
        CannotPlaceReason, Direction, InvalidDimensions, Ocean, OceanDimensions, OceanSetup,
        PlaceError, PlacementError, Point, MAX_SIDE,
    },
    game::{
        AmmoExhausted, AttackReport, ConfigError, FiringMode, GameMode, Recovery,
        RecoveryTracker, Session, ShotOutcome,
    },
    ships::{FleetCounts, HitOutcome, Ship, ShipId, ShipKind},
};
