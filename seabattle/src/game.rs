//! Implementation of the game as a whole.
//!
//! A [`Session`] owns the [`Ocean`][crate::board::Ocean] and resolves attacks against
//! it into [`AttackReport`]s. When [`GameMode::Recovery`] is enabled, each report is
//! also fed to a [`RecoveryTracker`], which may undo a streak of hits on one ship.
use enumflags2::BitFlags;

pub use self::{
    errors::{AmmoExhausted, ConfigError},
    recovery::{Recovery, RecoveryTracker, TrackerState},
    report::{AttackReport, ShotOutcome},
    session::Session,
};

mod errors;
pub mod recovery;
mod report;
mod session;

/// Optional rules of the game.
#[derive(BitFlags, Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum GameMode {
    /// The player has a limited supply of torpedoes which sink a ship in one shot.
    Torpedo = 0b01,
    /// A streak of hits on a ship is undone if the streak is broken without sinking it.
    Recovery = 0b10,
}

impl GameMode {
    /// Build the set of modes from player options. Torpedo mode is on whenever any
    /// torpedoes are available.
    pub fn from_options(torpedo_ammo: usize, recovery: bool) -> BitFlags<GameMode> {
        let mut modes = BitFlags::empty();
        if torpedo_ammo > 0 {
            modes.insert(GameMode::Torpedo);
        }
        if recovery {
            modes.insert(GameMode::Recovery);
        }
        modes
    }
}

/// How a shot is fired.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FiringMode {
    /// Regular shot, one point of damage.
    General,
    /// Sinks whatever ship it hits. Consumes a torpedo.
    Torpedo,
}
