//! Game Session Controller
//!
//! Two-state machine (idle / active) that owns the registry, the score board
//! and the random source of one player's hunt.
//!
//! ## Transitions
//!
//! - `start()` from either state: regenerate the layout, reset the score,
//!   become active.
//! - `stop()` from either state: become idle and drop the live treasures.
//!   Stopping an idle session does nothing.
//! - `collect(id)` while active: score and remove the treasure. Unknown ids,
//!   repeated ids and anything received while idle are ignored.

use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use tracing::{debug, info};

use crate::core::hash::{compute_state_hash, StateHash};
use crate::core::rng::{DeterministicRng, RandomSource};
use crate::game::events::{CollectionNotice, GameEvent};
use crate::game::placement::{generate, PlacementConfig};
use crate::game::registry::TreasureRegistry;
use crate::game::scoring::ScoreBoard;
use crate::game::treasure::{Treasure, TreasureId};

/// Lifecycle state of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// No hunt running; nothing is live
    #[default]
    Idle,
    /// Hunt in progress
    Active,
}

/// One player's treasure hunt.
pub struct GameSession<R: RandomSource = DeterministicRng> {
    status: SessionStatus,
    board: ScoreBoard,
    registry: TreasureRegistry,
    rng: R,
    placement: PlacementConfig,
    /// Incremented on every start; 0 until the first one
    generation: u32,
    next_sequence: u64,
    pending_events: Vec<GameEvent>,
    started_at: Option<DateTime<Utc>>,
}

impl<R: RandomSource> GameSession<R> {
    /// Create an idle session.
    pub fn new(placement: PlacementConfig, rng: R) -> Self {
        Self {
            status: SessionStatus::Idle,
            board: ScoreBoard::default(),
            registry: TreasureRegistry::new(),
            rng,
            placement,
            generation: 0,
            next_sequence: 0,
            pending_events: Vec::new(),
            started_at: None,
        }
    }

    /// Start (or restart in place) a hunt.
    ///
    /// Returns the number of live treasures.
    pub fn start(&mut self) -> usize {
        let treasures = generate(&self.placement, &mut self.rng);
        let count = self.registry.seed(treasures);

        self.board.reset();
        self.status = SessionStatus::Active;
        self.generation = self.generation.wrapping_add(1);
        self.started_at = Some(Utc::now());

        info!(generation = self.generation, treasures = count, "Session started");

        let event = GameEvent::session_started(self.bump_sequence(), self.generation, count as u32);
        self.push_event(event);

        count
    }

    /// Stop the hunt. Returns false if already idle.
    pub fn stop(&mut self) -> bool {
        if self.status == SessionStatus::Idle {
            return false;
        }

        let remaining = self.registry.len() as u32;
        self.registry.clear();
        self.status = SessionStatus::Idle;

        info!(
            generation = self.generation,
            score = self.board.score,
            remaining,
            "Session stopped"
        );

        let event = GameEvent::session_stopped(
            self.bump_sequence(),
            self.generation,
            self.board.score,
            remaining,
        );
        self.push_event(event);

        true
    }

    /// Stop then start with no pause in between.
    pub fn restart(&mut self) -> usize {
        self.stop();
        self.start()
    }

    /// Apply a collection event.
    ///
    /// Returns the notice when the score changed, `None` for every ignored
    /// event.
    pub fn collect(&mut self, id: TreasureId) -> Option<CollectionNotice> {
        if self.status != SessionStatus::Active {
            debug!(id = id.get(), "Collection ignored: session idle");
            return None;
        }

        let Some(treasure) = self.registry.remove(id) else {
            debug!(id = id.get(), generation = self.generation, "Collection ignored: not live");
            return None;
        };

        let points = self.board.record(treasure.kind);
        let new_score = self.board.score;

        info!(
            id = id.get(),
            kind = %treasure.kind,
            points,
            score = new_score,
            remaining = self.registry.len(),
            "Treasure collected"
        );

        let event = GameEvent::treasure_collected(
            self.bump_sequence(),
            self.generation,
            id,
            treasure.kind,
            points,
            new_score,
        );
        let notice = event.collection_notice();
        self.push_event(event);

        notice
    }

    /// Current lifecycle state.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// True while a hunt is running.
    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }

    /// Current score.
    pub fn score(&self) -> u32 {
        self.board.score
    }

    /// Full score board.
    pub fn board(&self) -> &ScoreBoard {
        &self.board
    }

    /// Live treasures in layout order.
    pub fn treasures(&self) -> impl Iterator<Item = &Treasure> + '_ {
        self.registry.all()
    }

    /// Look up one live treasure.
    pub fn find(&self, id: TreasureId) -> Option<&Treasure> {
        self.registry.find(id)
    }

    /// Number of live treasures.
    pub fn remaining(&self) -> usize {
        self.registry.len()
    }

    /// Session generation (0 before the first start).
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// When the current (or last) hunt started.
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Fingerprint of everything a renderer or HUD can observe.
    pub fn fingerprint(&self) -> StateHash {
        compute_state_hash(self.generation, |hasher| {
            hasher.update_bool(self.is_active());
            hasher.update_u32(self.board.score);
            hasher.update_u32(self.registry.len() as u32);

            for treasure in self.registry.all() {
                hasher.update_u32(treasure.id.get());
                hasher.update_u8(treasure.kind as u8);
                hasher.update_vec3(treasure.position);
            }
        })
    }

    fn bump_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        sequence
    }

    fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }
}

impl GameSession<DeterministicRng> {
    /// Default layout on a seeded generator.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(PlacementConfig::default(), DeterministicRng::new(seed))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::events::GameEventData;
    use crate::game::scoring::value_of;
    use crate::game::treasure::TreasureKind;
    use rand::{SeedableRng, seq::SliceRandom};

    /// Returns the same word forever.
    ///
    /// 99 rolls above any rare chance below 100, 0 rolls below any above 0.
    struct ConstantSource(u64);

    impl RandomSource for ConstantSource {
        fn next_u64(&mut self) -> u64 {
            self.0
        }
    }

    fn all_common() -> GameSession<ConstantSource> {
        GameSession::new(PlacementConfig::default(), ConstantSource(99))
    }

    fn all_rare() -> GameSession<ConstantSource> {
        GameSession::new(PlacementConfig::default(), ConstantSource(0))
    }

    fn live_ids<R: RandomSource>(session: &GameSession<R>) -> Vec<TreasureId> {
        session.treasures().map(|t| t.id).collect()
    }

    #[test]
    fn test_new_session_is_idle_and_empty() {
        let session = GameSession::with_seed(1);

        assert_eq!(session.status(), SessionStatus::Idle);
        assert_eq!(session.score(), 0);
        assert_eq!(session.remaining(), 0);
        assert_eq!(session.generation(), 0);
        assert!(session.started_at().is_none());
    }

    #[test]
    fn test_start_seeds_distinct_ids() {
        let mut session = GameSession::with_seed(12345);
        assert_eq!(session.start(), 20);

        assert!(session.is_active());
        let ids: Vec<u32> = session.treasures().map(|t| t.id.get()).collect();
        assert_eq!(ids, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_collect_common_scores_ten() {
        let mut session = all_common();
        session.start();

        let first = live_ids(&session)[0];
        assert_eq!(session.find(first).map(|t| t.kind), Some(TreasureKind::Common));

        let notice = session.collect(first).unwrap();
        assert_eq!(notice.points, 10);
        assert_eq!(session.score(), 10);
        assert_eq!(session.remaining(), 19);
    }

    #[test]
    fn test_collect_rare_scores_fifty() {
        let mut session = all_rare();
        session.start();
        session.collect(TreasureId::new(0));

        let before = session.score();
        let notice = session.collect(TreasureId::new(1)).unwrap();

        assert_eq!(notice.kind, TreasureKind::Rare);
        assert_eq!(session.score() - before, 50);
        assert_eq!(session.board().collected_of(TreasureKind::Rare), 2);
        assert_eq!(session.board().collected_of(TreasureKind::Common), 0);
    }

    #[test]
    fn test_collect_unknown_id_is_noop() {
        let mut session = GameSession::with_seed(7);
        session.start();
        let fingerprint = session.fingerprint();

        assert!(session.collect(TreasureId::new(9999)).is_none());
        assert_eq!(session.score(), 0);
        assert_eq!(session.remaining(), 20);
        assert_eq!(session.fingerprint(), fingerprint);
    }

    #[test]
    fn test_collect_twice_is_idempotent() {
        let mut session = GameSession::with_seed(99);
        session.start();
        let id = live_ids(&session)[5];

        assert!(session.collect(id).is_some());
        let score = session.score();
        let remaining = live_ids(&session);

        assert!(session.collect(id).is_none());
        assert_eq!(session.score(), score);
        assert_eq!(live_ids(&session), remaining);
    }

    #[test]
    fn test_collect_before_start_is_noop() {
        let mut session = GameSession::with_seed(3);

        assert!(session.collect(TreasureId::new(0)).is_none());
        assert_eq!(session.score(), 0);
        assert!(session.take_events().is_empty());
    }

    #[test]
    fn test_full_sweep_then_restart() {
        let mut session = GameSession::with_seed(4242);
        session.start();

        let mut order = live_ids(&session);
        order.shuffle(&mut rand::rngs::StdRng::seed_from_u64(11));

        let expected: u32 = session.treasures().map(|t| value_of(t.kind)).sum();
        for id in order {
            assert!(session.collect(id).is_some());
        }

        assert_eq!(session.remaining(), 0);
        assert_eq!(session.score(), expected);
        assert_eq!(session.board().collected, 20);

        session.start();
        assert_eq!(session.score(), 0);
        assert_eq!(session.generation(), 2);
        let ids: Vec<u32> = session.treasures().map(|t| t.id.get()).collect();
        assert_eq!(ids, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_collect_after_stop_is_noop() {
        let mut session = GameSession::with_seed(5);
        session.start();
        let ids = live_ids(&session);
        let id = ids[0];
        session.collect(ids[1]);
        let score = session.score();

        assert!(session.stop());
        assert!(session.collect(id).is_none());
        assert_eq!(session.score(), score);
    }

    #[test]
    fn test_stop_clears_registry_and_is_idempotent() {
        let mut session = GameSession::with_seed(5);
        session.start();

        assert!(session.stop());
        assert_eq!(session.status(), SessionStatus::Idle);
        assert_eq!(session.remaining(), 0);

        assert!(!session.stop());
    }

    #[test]
    fn test_start_while_active_reseeds() {
        let mut session = GameSession::with_seed(31);
        session.start();
        session.collect(TreasureId::new(0));
        session.collect(TreasureId::new(1));

        assert_eq!(session.start(), 20);
        assert_eq!(session.score(), 0);
        assert!(session.find(TreasureId::new(0)).is_some());
    }

    #[test]
    fn test_restart_emits_stop_then_start() {
        let mut session = GameSession::with_seed(8);
        session.start();
        session.take_events();

        session.restart();
        let events = session.take_events();

        assert!(matches!(events[0].data, GameEventData::SessionStopped { remaining: 20, .. }));
        assert!(matches!(events[1].data, GameEventData::SessionStarted { treasure_count: 20 }));
        assert_eq!(events[0].generation, 1);
        assert_eq!(events[1].generation, 2);
    }

    #[test]
    fn test_events_are_sequenced() {
        let mut session = all_common();
        session.start();
        session.collect(TreasureId::new(3));
        session.collect(TreasureId::new(3));
        session.stop();

        let events = session.take_events();
        let sequences: Vec<u64> = events.iter().map(|e| e.sequence).collect();
        assert_eq!(sequences, vec![0, 1, 2]);

        match &events[1].data {
            GameEventData::TreasureCollected { treasure_id, kind, points, new_score } => {
                assert_eq!(*treasure_id, TreasureId::new(3));
                assert_eq!(*kind, TreasureKind::Common);
                assert_eq!(*points, 10);
                assert_eq!(*new_score, 10);
            }
            other => panic!("unexpected event {other:?}"),
        }

        assert!(session.take_events().is_empty());
    }

    #[test]
    fn test_fingerprint_tracks_observable_state() {
        let mut session = GameSession::with_seed(77);
        let idle = session.fingerprint();

        session.start();
        let started = session.fingerprint();
        assert_ne!(idle, started);

        session.collect(TreasureId::new(0));
        assert_ne!(started, session.fingerprint());
    }

    #[test]
    fn test_same_seed_same_layout() {
        let mut a = GameSession::with_seed(2026);
        let mut b = GameSession::with_seed(2026);
        a.start();
        b.start();

        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_custom_placement() {
        let mut session = GameSession::new(
            PlacementConfig::with_area(5, 2.0),
            DeterministicRng::new(1),
        );

        assert_eq!(session.start(), 5);
        assert!(session.treasures().all(|t| t.position.x.abs() <= 2.0));
    }
}
