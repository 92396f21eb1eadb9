use enumflags2::BitFlags;
use log::{debug, info, warn};
use rand::Rng;

use crate::{
    board::{Ocean, OceanDimensions, OceanSetup, PlacementError, Point},
    game::{
        AmmoExhausted, AttackReport, ConfigError, FiringMode, GameMode, Recovery,
        RecoveryTracker,
    },
    ships::FleetCounts,
};

/// A single game: the ocean with its hidden fleet, the remaining fleet health and the
/// optional rules in effect.
#[derive(Debug, Clone)]
pub struct Session {
    /// Ocean with the fleet being attacked.
    ocean: Ocean,

    /// Remaining health of the fleet.
    fleet_health: usize,

    /// Torpedoes left to fire.
    torpedoes: usize,

    /// Optional rules in effect.
    mode: BitFlags<GameMode>,

    /// Set once the mode has been chosen.
    mode_set: bool,

    /// Follows streaks of hits for recovery mode.
    recovery: RecoveryTracker,

    /// Points undone by recovery mode which the view still has to hide again.
    pending_recovery: Option<Vec<Point>>,

    /// Number of accepted attacks.
    shots: usize,
}

impl Session {
    /// Create a session on a `width` by `height` ocean with the fleet placed at random.
    pub fn configure(
        width: usize,
        height: usize,
        fleet: FleetCounts,
    ) -> Result<Self, PlacementError> {
        Self::configure_with_rng(width, height, fleet, &mut rand::thread_rng())
    }

    /// Create a session on a `width` by `height` ocean with the fleet placed using the
    /// given random source.
    pub fn configure_with_rng<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        fleet: FleetCounts,
        rng: &mut R,
    ) -> Result<Self, PlacementError> {
        let dim = OceanDimensions::new(width, height)?;
        let ocean = OceanSetup::random_fleet(dim, &fleet, rng)?;
        info!(
            "new {}x{} game with {} ships, fleet health {}",
            width,
            height,
            ocean.ship_count(),
            ocean.fleet_health()
        );
        Ok(Self::new(ocean))
    }

    /// Start a session on an already populated ocean. No optional rules are enabled
    /// until [`set_mode`][Session::set_mode] is called.
    pub fn new(ocean: Ocean) -> Self {
        Self {
            fleet_health: ocean.fleet_health(),
            ocean,
            torpedoes: 0,
            mode: BitFlags::empty(),
            mode_set: false,
            recovery: RecoveryTracker::new(),
            pending_recovery: None,
            shots: 0,
        }
    }

    /// Choose the optional rules. Torpedo mode needs at least one torpedo, and
    /// torpedoes may only be supplied with torpedo mode. Can only be called once.
    pub fn set_mode(
        &mut self,
        torpedo_enabled: bool,
        torpedo_ammo: usize,
        recovery_enabled: bool,
    ) -> Result<(), ConfigError> {
        if self.mode_set {
            return Err(ConfigError::AlreadyConfigured);
        }
        match (torpedo_enabled, torpedo_ammo) {
            (false, ammo) if ammo > 0 => {
                return Err(ConfigError::TorpedoesWithoutTorpedoMode { ammo });
            }
            (true, 0) => return Err(ConfigError::TorpedoModeWithoutTorpedoes),
            _ => {}
        }
        self.mode = GameMode::from_options(torpedo_ammo, recovery_enabled);
        self.torpedoes = torpedo_ammo;
        self.mode_set = true;
        info!("game mode {:?}, {} torpedoes", self.mode, self.torpedoes);
        Ok(())
    }

    /// Optional rules in effect.
    pub fn mode(&self) -> BitFlags<GameMode> {
        self.mode
    }

    /// Fire at the given point.
    ///
    /// A torpedo is used up even if it misses. Firing a torpedo with none left is
    /// rejected without changing anything. Points outside the ocean are misses.
    pub fn attack(
        &mut self,
        point: Point,
        firing: FiringMode,
    ) -> Result<AttackReport, AmmoExhausted> {
        if firing == FiringMode::Torpedo {
            if self.torpedoes == 0 {
                return Err(AmmoExhausted::new(point));
            }
            self.torpedoes -= 1;
        }
        self.shots += 1;

        let report = match self.ocean.hit(point, firing) {
            None => AttackReport::miss(point, self.fleet_health),
            Some((ship, outcome)) => {
                self.fleet_health -= outcome.damage;
                if outcome.health_remaining == 0 {
                    let points = self.ocean.points_occupied_by(ship);
                    AttackReport::sunk(ship, point, self.fleet_health, points)
                } else {
                    AttackReport::hit(ship, point, self.fleet_health)
                }
            }
        };
        debug!(
            "{:?} shot at {}: {:?}, fleet health {}",
            firing,
            point,
            report.outcome(),
            self.fleet_health
        );

        if self.mode.contains(GameMode::Recovery) {
            if let Some(recovery) = self.recovery.observe(&report) {
                self.apply_recovery(recovery);
            }
        }
        Ok(report)
    }

    /// Repair the ship of a broken streak and hand its health back to the fleet.
    ///
    /// The fleet gets back exactly what the ship regains, so fleet health always
    /// matches the ships. This differs from the streak length only when some earlier
    /// hit on the ship was never part of a streak.
    fn apply_recovery(&mut self, recovery: Recovery) {
        let regained = self.ocean.restore(recovery.ship());
        if regained != recovery.health() {
            warn!(
                "ship {} regained {} health but the broken streak had {} hits",
                recovery.ship().index(),
                regained,
                recovery.health()
            );
        }
        info!(
            "recovered ship {}, restoring {} fleet health",
            recovery.ship().index(),
            regained
        );
        self.fleet_health += regained;
        self.pending_recovery = Some(recovery.into_points());
    }

    /// Sum of the remaining health of every ship.
    pub fn fleet_health_remaining(&self) -> usize {
        self.fleet_health
    }

    /// Whether the whole fleet has been sunk.
    pub fn is_over(&self) -> bool {
        self.fleet_health == 0
    }

    /// Torpedoes left to fire.
    pub fn torpedoes_remaining(&self) -> usize {
        self.torpedoes
    }

    /// Number of attacks taken so far. Rejected torpedo shots are not counted.
    pub fn shots_fired(&self) -> usize {
        self.shots
    }

    /// The ocean being attacked.
    pub fn ocean(&self) -> &Ocean {
        &self.ocean
    }

    /// State of the recovery tracker.
    pub fn recovery_tracker(&self) -> &RecoveryTracker {
        &self.recovery
    }

    /// Points whose attacks were undone by recovery mode and should be shown as
    /// unknown again.
    pub fn points_pending_recovery(&self) -> Option<&[Point]> {
        self.pending_recovery.as_deref()
    }

    /// Forget the pending recovery points.
    pub fn clear_pending_recovery(&mut self) {
        self.pending_recovery = None;
    }

    /// Take the pending recovery points, leaving none pending.
    pub fn take_pending_recovery(&mut self) -> Option<Vec<Point>> {
        self.pending_recovery.take()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        board::Direction,
        game::ShotOutcome,
        ships::{ShipId, ShipKind},
    };

    use super::*;

    /// Cruiser across (1, 1)..=(3, 1), destroyer down (1, 5)..=(1, 6).
    fn session() -> (Session, ShipId, ShipId) {
        let mut setup = OceanSetup::new(OceanDimensions::default());
        let cruiser = setup
            .place_ship(ShipKind::Cruiser, Point::new(1, 1), Direction::Right)
            .unwrap();
        let destroyer = setup
            .place_ship(ShipKind::Destroyer, Point::new(1, 5), Direction::Down)
            .unwrap();
        (Session::new(setup.start()), cruiser, destroyer)
    }

    fn health(session: &Session, id: ShipId) -> Option<usize> {
        session.ocean().ship(id).map(|ship| ship.health())
    }

    #[test]
    fn general_shots_sink_after_full_length() {
        let (mut session, cruiser, _) = session();
        assert_eq!(session.fleet_health_remaining(), 5);

        let report = session.attack(Point::new(1, 1), FiringMode::General).unwrap();
        assert_eq!(report.outcome(), ShotOutcome::Hit(cruiser));
        assert_eq!(report.fleet_health_remaining(), 4);
        assert_eq!(report.occupied_points(), None);

        session.attack(Point::new(2, 1), FiringMode::General).unwrap();
        let report = session.attack(Point::new(3, 1), FiringMode::General).unwrap();
        assert_eq!(report.outcome(), ShotOutcome::Sunk(cruiser));
        assert_eq!(report.fleet_health_remaining(), 2);
        assert_eq!(
            report.occupied_points(),
            Some(&[Point::new(1, 1), Point::new(2, 1), Point::new(3, 1)][..])
        );
        assert_eq!(session.shots_fired(), 3);
    }

    #[test]
    fn sunk_cell_stays_sunk() {
        let (mut session, cruiser, _) = session();
        session.set_mode(true, 1, false).unwrap();
        session.attack(Point::new(2, 1), FiringMode::Torpedo).unwrap();
        for _ in 0..3 {
            let report = session.attack(Point::new(2, 1), FiringMode::General).unwrap();
            assert_eq!(report.outcome(), ShotOutcome::Sunk(cruiser));
            assert_eq!(report.fleet_health_remaining(), 2);
        }
    }

    #[test]
    fn torpedo_spent_on_miss() {
        let (mut session, _, _) = session();
        session.set_mode(true, 2, false).unwrap();
        let report = session.attack(Point::new(8, 8), FiringMode::Torpedo).unwrap();
        assert_eq!(report.outcome(), ShotOutcome::Miss);
        assert_eq!(session.torpedoes_remaining(), 1);
    }

    #[test]
    fn out_of_bounds_is_a_miss() {
        let (mut session, _, _) = session();
        for &point in [Point::new(-1, 0), Point::new(10, 3), Point::new(4, 99)].iter() {
            let report = session.attack(point, FiringMode::General).unwrap();
            assert_eq!(report.outcome(), ShotOutcome::Miss);
            assert_eq!(report.fleet_health_remaining(), 5);
        }
    }

    #[test]
    fn mode_is_validated_and_set_once() {
        let (mut session, _, _) = session();
        assert_eq!(
            session.set_mode(false, 2, false),
            Err(ConfigError::TorpedoesWithoutTorpedoMode { ammo: 2 })
        );
        assert_eq!(
            session.set_mode(true, 0, true),
            Err(ConfigError::TorpedoModeWithoutTorpedoes)
        );
        assert!(session.mode().is_empty());

        session.set_mode(false, 0, true).unwrap();
        assert_eq!(session.mode(), BitFlags::from(GameMode::Recovery));
        assert_eq!(
            session.set_mode(true, 3, true),
            Err(ConfigError::AlreadyConfigured)
        );
    }

    #[test]
    fn recovery_restores_broken_streak() {
        let (mut session, cruiser, _) = session();
        session.set_mode(false, 0, true).unwrap();

        session.attack(Point::new(1, 1), FiringMode::General).unwrap();
        session.attack(Point::new(2, 1), FiringMode::General).unwrap();
        assert_eq!(session.fleet_health_remaining(), 3);
        assert_eq!(session.points_pending_recovery(), None);

        let report = session.attack(Point::new(7, 7), FiringMode::General).unwrap();
        // The report reflects the state before recovery was applied.
        assert_eq!(report.fleet_health_remaining(), 3);
        assert_eq!(session.fleet_health_remaining(), 5);
        assert_eq!(health(&session, cruiser), Some(3));
        assert_eq!(
            session.points_pending_recovery(),
            Some(&[Point::new(1, 1), Point::new(2, 1)][..])
        );

        session.clear_pending_recovery();
        assert_eq!(session.points_pending_recovery(), None);
    }

    #[test]
    fn recovery_on_target_switch() {
        let (mut session, cruiser, destroyer) = session();
        session.set_mode(false, 0, true).unwrap();

        session.attack(Point::new(3, 1), FiringMode::General).unwrap();
        let report = session.attack(Point::new(1, 6), FiringMode::General).unwrap();
        assert_eq!(report.outcome(), ShotOutcome::Hit(destroyer));

        // Cruiser repaired, the destroyer hit stands.
        assert_eq!(health(&session, cruiser), Some(3));
        assert_eq!(health(&session, destroyer), Some(1));
        assert_eq!(session.fleet_health_remaining(), 4);
        assert_eq!(session.take_pending_recovery(), Some(vec![Point::new(3, 1)]));
        assert_eq!(session.points_pending_recovery(), None);
    }

    #[test]
    fn recovery_repairs_hits_outside_the_streak() {
        let (mut session, cruiser, destroyer) = session();
        session.set_mode(false, 0, true).unwrap();

        session.attack(Point::new(1, 5), FiringMode::General).unwrap();
        // Switching target undoes the destroyer hit, this cruiser hit is not tracked.
        session.attack(Point::new(1, 1), FiringMode::General).unwrap();
        assert_eq!(session.take_pending_recovery(), Some(vec![Point::new(1, 5)]));
        assert_eq!(session.recovery_tracker().streak_len(), 0);

        session.attack(Point::new(2, 1), FiringMode::General).unwrap();
        assert_eq!(session.recovery_tracker().streak_len(), 1);
        assert_eq!(session.fleet_health_remaining(), 3);

        // One tracked hit, but the cruiser regains two points and so does the fleet.
        session.attack(Point::new(9, 9), FiringMode::General).unwrap();
        assert_eq!(health(&session, cruiser), Some(3));
        assert_eq!(health(&session, destroyer), Some(2));
        assert_eq!(session.fleet_health_remaining(), 5);
        assert_eq!(session.take_pending_recovery(), Some(vec![Point::new(2, 1)]));
    }

    #[test]
    fn recovery_disabled_keeps_damage() {
        let (mut session, cruiser, _) = session();
        session.attack(Point::new(1, 1), FiringMode::General).unwrap();
        session.attack(Point::new(0, 0), FiringMode::General).unwrap();
        assert_eq!(session.fleet_health_remaining(), 4);
        assert_eq!(health(&session, cruiser), Some(2));
        assert_eq!(session.points_pending_recovery(), None);
    }
}
