//! Errors used by the [`Ocean`][crate::board::Ocean] and
//! [`OceanSetup`][crate::board::OceanSetup].

use std::fmt::{self, Debug};

use thiserror::Error;

use crate::{
    board::{Direction, Point},
    ships::ShipKind,
};

/// Error returned when the requested ocean size is not supported.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("cannot create an ocean of size {width}x{height}, each side must be from 1 to 30")]
pub struct InvalidDimensions {
    width: usize,
    height: usize,
}

impl InvalidDimensions {
    pub(super) fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// The requested width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The requested height.
    pub fn height(&self) -> usize {
        self.height
    }
}

/// Reason why a ship could not be placed at a given position.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum CannotPlaceReason {
    /// One of the ends of the ship falls outside the ocean.
    #[error("the ship does not fit inside the ocean")]
    OutOfBounds,
    /// One or more of the cells was already occupied by another ship.
    #[error("the requested position was already occupied")]
    AlreadyOccupied,
    /// The ship would touch another ship, orthogonally or diagonally.
    #[error("the requested position touches another ship")]
    TooClose,
}

/// Error caused when attempting to place a ship in an invalid position.
#[derive(Error)]
#[error("could not place {kind} at {start} facing {direction:?}: {reason}")]
pub struct PlaceError {
    #[source]
    reason: CannotPlaceReason,
    kind: ShipKind,
    start: Point,
    direction: Direction,
}

impl Debug for PlaceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl PlaceError {
    pub(super) fn new(
        reason: CannotPlaceReason,
        kind: ShipKind,
        start: Point,
        direction: Direction,
    ) -> Self {
        Self {
            reason,
            kind,
            start,
            direction,
        }
    }

    /// Get the reason placement was aborted.
    pub fn reason(&self) -> CannotPlaceReason {
        self.reason
    }
}

/// Error returned when a fleet cannot be laid out on the ocean.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum PlacementError {
    /// The ocean size itself was rejected.
    #[error(transparent)]
    InvalidDimensions(#[from] InvalidDimensions),

    /// The fleet needs at least as many cells as the ocean has, so no layout can keep
    /// the ships apart.
    #[error("cannot place a fleet of total length {fleet_length} on an ocean of {cells} cells")]
    FleetTooLarge { fleet_length: usize, cells: usize },

    /// Every placement attempt ran out of trials.
    #[error("cannot place ships on this ocean, gave up after {attempts} attempts")]
    Exhausted { attempts: usize },
}
