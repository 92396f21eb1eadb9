//! Ship recovery mode.
//!
//! The tracker watches the stream of attack reports and remembers the current streak
//! of hits on a single ship. If the streak ends with a miss, or the player switches to
//! a different target, before the ship is sunk, the streak is undone: the ship is
//! repaired and the attacked cells go back to unknown.
use log::debug;

use crate::{
    board::Point,
    game::{AttackReport, ShotOutcome},
    ships::ShipId,
};

/// Coarse state of the [`RecoveryTracker`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TrackerState {
    /// Not following a streak of hits.
    General,
    /// Following a streak of hits on one ship.
    AttackingShip,
}

impl Default for TrackerState {
    fn default() -> Self {
        TrackerState::General
    }
}

/// Undo produced when a streak of hits is broken.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Recovery {
    ship: ShipId,
    health: usize,
    points: Vec<Point>,
}

impl Recovery {
    /// The ship to repair to full health.
    pub fn ship(&self) -> ShipId {
        self.ship
    }

    /// Length of the broken streak, one for every tracked hit. Only used for
    /// diagnostics: the fleet gets back whatever health the ship regains when it is
    /// restored, which is larger if the ship also took an untracked hit.
    pub fn health(&self) -> usize {
        self.health
    }

    /// Distinct points attacked during the streak, earliest first.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub(crate) fn into_points(self) -> Vec<Point> {
        self.points
    }
}

/// A hit remembered as part of the current streak.
#[derive(Debug, Copy, Clone)]
struct TrackedHit {
    ship: ShipId,
    position: Point,
}

/// State machine that follows streaks of hits and decides when to undo them.
#[derive(Debug, Default, Clone)]
pub struct RecoveryTracker {
    state: TrackerState,
    history: Vec<TrackedHit>,
}

impl RecoveryTracker {
    /// Construct a tracker that is not following any streak.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of the tracker.
    pub fn state(&self) -> TrackerState {
        self.state
    }

    /// Number of hits in the current streak.
    pub fn streak_len(&self) -> usize {
        self.history.len()
    }

    /// Feed the next attack report to the tracker. Returns the [`Recovery`] to apply if
    /// this report broke a streak.
    ///
    /// Rules are checked in order and only the first match applies:
    /// 1. a miss while a streak is remembered undoes it;
    /// 2. while attacking a ship, any report that is not about the last ship hit
    ///    undoes the streak, even if nothing is remembered;
    /// 3. a hit extends the streak;
    /// 4. a sink forgets the streak without undoing it.
    pub fn observe(&mut self, report: &AttackReport) -> Option<Recovery> {
        if report.outcome() == ShotOutcome::Miss && !self.history.is_empty() {
            return self.undo();
        }
        if self.state == TrackerState::AttackingShip && !self.is_tracking(report.ship()) {
            return self.undo();
        }
        match report.outcome() {
            ShotOutcome::Hit(ship) => {
                self.history.push(TrackedHit {
                    ship,
                    position: report.position(),
                });
                self.state = TrackerState::AttackingShip;
            }
            ShotOutcome::Sunk(_) => self.history.clear(),
            ShotOutcome::Miss => {}
        }
        None
    }

    /// Whether `ship` is the ship of the most recent remembered hit. Never true for a
    /// miss or an empty streak.
    fn is_tracking(&self, ship: Option<ShipId>) -> bool {
        match (self.history.last(), ship) {
            (Some(last), Some(ship)) => last.ship == ship,
            _ => false,
        }
    }

    /// Forget the streak and go back to the general state. Returns `None` if there was
    /// nothing to undo.
    fn undo(&mut self) -> Option<Recovery> {
        self.state = TrackerState::General;
        let history = std::mem::take(&mut self.history);
        let ship = history.first()?.ship;

        let mut points: Vec<Point> = Vec::with_capacity(history.len());
        for hit in &history {
            if !points.contains(&hit.position) {
                points.push(hit.position);
            }
        }
        debug!(
            "streak of {} hits on ship {} broken",
            history.len(),
            ship.index()
        );
        Some(Recovery {
            ship,
            health: history.len(),
            points,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: ShipId = ShipId::new(0);
    const B: ShipId = ShipId::new(1);

    fn hit(ship: ShipId, x: i32) -> AttackReport {
        AttackReport::hit(ship, Point::new(x, 0), 10)
    }

    fn sunk(ship: ShipId, x: i32) -> AttackReport {
        AttackReport::sunk(ship, Point::new(x, 0), 10, vec![Point::new(x, 0)])
    }

    fn miss(x: i32) -> AttackReport {
        AttackReport::miss(Point::new(x, 5), 10)
    }

    #[test]
    fn miss_breaks_streak() {
        let mut tracker = RecoveryTracker::new();
        assert_eq!(tracker.observe(&hit(A, 1)), None);
        assert_eq!(tracker.observe(&hit(A, 2)), None);
        assert_eq!(tracker.state(), TrackerState::AttackingShip);

        let recovery = tracker.observe(&miss(7)).unwrap();
        assert_eq!(recovery.ship(), A);
        assert_eq!(recovery.health(), 2);
        assert_eq!(recovery.points(), &[Point::new(1, 0), Point::new(2, 0)]);
        assert_eq!(tracker.state(), TrackerState::General);
        assert_eq!(tracker.streak_len(), 0);
    }

    #[test]
    fn repeated_cell_is_listed_once() {
        let mut tracker = RecoveryTracker::new();
        tracker.observe(&hit(A, 1));
        tracker.observe(&hit(A, 1));
        tracker.observe(&hit(A, 2));
        let recovery = tracker.observe(&miss(7)).unwrap();
        assert_eq!(recovery.health(), 3);
        assert_eq!(recovery.points(), &[Point::new(1, 0), Point::new(2, 0)]);
    }

    #[test]
    fn switching_target_breaks_streak() {
        let mut tracker = RecoveryTracker::new();
        tracker.observe(&hit(A, 1));
        let recovery = tracker.observe(&hit(B, 4)).unwrap();
        assert_eq!(recovery.ship(), A);
        assert_eq!(recovery.points(), &[Point::new(1, 0)]);
        // The report that broke the streak does not start a new one.
        assert_eq!(tracker.streak_len(), 0);
        assert_eq!(tracker.state(), TrackerState::General);
    }

    #[test]
    fn sinking_is_never_undone() {
        let mut tracker = RecoveryTracker::new();
        tracker.observe(&hit(A, 1));
        assert_eq!(tracker.observe(&sunk(A, 2)), None);
        assert_eq!(tracker.observe(&miss(3)), None);
        assert_eq!(tracker.observe(&miss(4)), None);
        assert_eq!(tracker.state(), TrackerState::General);
    }

    #[test]
    fn first_report_after_sink_only_resets_state() {
        let mut tracker = RecoveryTracker::new();
        tracker.observe(&hit(A, 1));
        tracker.observe(&sunk(A, 2));
        assert_eq!(tracker.state(), TrackerState::AttackingShip);
        assert_eq!(tracker.observe(&hit(B, 5)), None);
        assert_eq!(tracker.state(), TrackerState::General);
        assert_eq!(tracker.streak_len(), 0);
    }

    #[test]
    fn misses_without_streak_do_nothing() {
        let mut tracker = RecoveryTracker::new();
        assert_eq!(tracker.observe(&miss(1)), None);
        assert_eq!(tracker.observe(&sunk(B, 2)), None);
        assert_eq!(tracker.state(), TrackerState::General);
    }
}
