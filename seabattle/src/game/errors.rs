use thiserror::Error;

use crate::board::Point;

/// Reason why the game mode could not be set.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum ConfigError {
    /// Torpedoes were supplied but torpedo mode is off.
    #[error("torpedo mode is disabled, but {ammo} torpedoes were supplied")]
    TorpedoesWithoutTorpedoMode { ammo: usize },

    /// Torpedo mode is on but there is nothing to fire.
    #[error("torpedo mode is enabled, but no torpedoes were supplied")]
    TorpedoModeWithoutTorpedoes,

    /// The game mode can only be chosen once per session.
    #[error("the game mode was already set")]
    AlreadyConfigured,
}

/// Error returned when firing a torpedo with none left. The shot is not taken.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("no torpedoes available to fire at {point}")]
pub struct AmmoExhausted {
    point: Point,
}

impl AmmoExhausted {
    pub(super) fn new(point: Point) -> Self {
        Self { point }
    }

    /// The point the torpedo was aimed at.
    pub fn point(&self) -> Point {
        self.point
    }
}
