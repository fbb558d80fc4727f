//! Driver Messages
//!
//! Typed messages between the session driver and its collaborators:
//! commands in (UI buttons, renderer hit reports), notices out (audio, HUD),
//! and a read-only view for drawing.

use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};

use crate::game::events::{CollectionNotice, GameEvent, GameEventData};
use crate::game::session::{GameSession, SessionStatus};
use crate::game::treasure::{Treasure, TreasureId, TreasureKind};
use crate::core::rng::RandomSource;

// =============================================================================
// COMMANDS (collaborators -> driver)
// =============================================================================

/// Commands accepted by the session driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionCommand {
    /// Start a hunt now (cancels a pending restart).
    Start,

    /// Stop the hunt (cancels a pending restart).
    Stop,

    /// Stop now, start again after the restart delay.
    Restart,

    /// The renderer saw the player reach a treasure.
    Collect {
        /// Treasure the player reached
        treasure_id: TreasureId,
    },
}

// =============================================================================
// NOTICES (driver -> collaborators)
// =============================================================================

/// Notices broadcast by the session driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionNotice {
    /// A hunt started.
    Started {
        /// Generation of the new hunt
        generation: u32,
        /// Treasures placed
        treasure_count: u32,
    },

    /// The hunt stopped.
    Stopped {
        /// Generation that ended
        generation: u32,
        /// Score at the moment of stopping
        final_score: u32,
    },

    /// A treasure was collected (audio cue source).
    Collected(CollectionNotice),

    /// A deferred start is pending.
    RestartScheduled {
        /// Time until the next start
        delay_ms: u64,
    },

    /// A pending deferred start was dropped in favour of a newer request.
    RestartSuperseded,
}

impl From<&GameEvent> for SessionNotice {
    fn from(event: &GameEvent) -> Self {
        match &event.data {
            GameEventData::SessionStarted { treasure_count } => SessionNotice::Started {
                generation: event.generation,
                treasure_count: *treasure_count,
            },
            GameEventData::SessionStopped { final_score, .. } => SessionNotice::Stopped {
                generation: event.generation,
                final_score: *final_score,
            },
            GameEventData::TreasureCollected { treasure_id, kind, points, new_score } => {
                SessionNotice::Collected(CollectionNotice {
                    treasure_id: *treasure_id,
                    kind: *kind,
                    points: *points,
                    score: *new_score,
                })
            }
        }
    }
}

// =============================================================================
// VIEW (read-only snapshot for renderer and HUD)
// =============================================================================

/// One treasure as the renderer needs it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreasureView {
    /// Render key
    pub id: TreasureId,
    /// Selects the model
    pub kind: TreasureKind,
    /// World position [x, y, z]
    pub position: [f32; 3],
}

impl From<&Treasure> for TreasureView {
    fn from(treasure: &Treasure) -> Self {
        Self {
            id: treasure.id,
            kind: treasure.kind,
            position: treasure.position.to_array(),
        }
    }
}

/// Snapshot of everything observable about a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    /// Lifecycle state
    pub status: SessionStatus,
    /// Current score
    pub score: u32,
    /// Session generation
    pub generation: u32,
    /// Live treasures left
    pub remaining: u32,
    /// Treasures collected this hunt
    pub collected: u32,
    /// Collected count per kind, in `TreasureKind::ALL` order
    pub collected_by_kind: [u32; TreasureKind::COUNT],
    /// Start time of the current (or last) hunt
    pub started_at: Option<DateTime<Utc>>,
    /// Hex state fingerprint; unchanged means nothing to redraw
    pub fingerprint: String,
    /// Live treasures in layout order
    pub treasures: Vec<TreasureView>,
}

impl SessionView {
    /// Capture a session.
    pub fn capture<R: RandomSource>(session: &GameSession<R>) -> Self {
        let board = session.board();

        Self {
            status: session.status(),
            score: session.score(),
            generation: session.generation(),
            remaining: session.remaining() as u32,
            collected: board.collected,
            collected_by_kind: TreasureKind::ALL.map(|kind| board.collected_of(kind)),
            started_at: session.started_at(),
            fingerprint: hex::encode(session.fingerprint()),
            treasures: session.treasures().map(TreasureView::from).collect(),
        }
    }
}
