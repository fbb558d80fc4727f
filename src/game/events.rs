//! Game Events
//!
//! Events recorded by the session controller on every state transition.
//! Hosts drain them to drive audio cues, HUD updates and logs.

use serde::{Serialize, Deserialize};

use crate::game::treasure::{TreasureId, TreasureKind};

/// Game event data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEventData {
    /// A session was (re)started and seeded
    SessionStarted {
        treasure_count: u32,
    },

    /// The active session was stopped
    SessionStopped {
        final_score: u32,
        remaining: u32,
    },

    /// A live treasure was collected
    TreasureCollected {
        treasure_id: TreasureId,
        kind: TreasureKind,
        points: u32,
        new_score: u32,
    },
}

/// A game event with ordering information.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameEvent {
    /// Monotonic sequence number, never reset
    pub sequence: u64,

    /// Session generation the event belongs to
    pub generation: u32,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(sequence: u64, generation: u32, data: GameEventData) -> Self {
        Self {
            sequence,
            generation,
            data,
        }
    }

    /// Create session started event.
    pub fn session_started(sequence: u64, generation: u32, treasure_count: u32) -> Self {
        Self::new(sequence, generation, GameEventData::SessionStarted { treasure_count })
    }

    /// Create session stopped event.
    pub fn session_stopped(
        sequence: u64,
        generation: u32,
        final_score: u32,
        remaining: u32,
    ) -> Self {
        Self::new(
            sequence,
            generation,
            GameEventData::SessionStopped { final_score, remaining },
        )
    }

    /// Create treasure collected event.
    pub fn treasure_collected(
        sequence: u64,
        generation: u32,
        treasure_id: TreasureId,
        kind: TreasureKind,
        points: u32,
        new_score: u32,
    ) -> Self {
        Self::new(
            sequence,
            generation,
            GameEventData::TreasureCollected {
                treasure_id,
                kind,
                points,
                new_score,
            },
        )
    }

    /// Kind-tagged notice for audio cue selection, if this is a collection.
    pub fn collection_notice(&self) -> Option<CollectionNotice> {
        match self.data {
            GameEventData::TreasureCollected { treasure_id, kind, points, new_score } => {
                Some(CollectionNotice {
                    treasure_id,
                    kind,
                    points,
                    score: new_score,
                })
            }
            _ => None,
        }
    }
}

impl PartialEq for GameEvent {
    fn eq(&self, other: &Self) -> bool {
        self.sequence == other.sequence
    }
}

impl Eq for GameEvent {}

impl PartialOrd for GameEvent {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GameEvent {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.sequence.cmp(&other.sequence)
    }
}

/// Published once per successful collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionNotice {
    /// Treasure that was collected
    pub treasure_id: TreasureId,
    /// Its kind (selects the cue)
    pub kind: TreasureKind,
    /// Points awarded
    pub points: u32,
    /// Score after the collection
    pub score: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_ordering() {
        let started = GameEvent::session_started(1, 1, 20);
        let collected =
            GameEvent::treasure_collected(2, 1, TreasureId::new(0), TreasureKind::Common, 10, 10);
        let stopped = GameEvent::session_stopped(3, 1, 10, 19);

        let mut events = vec![stopped.clone(), started.clone(), collected.clone()];
        events.sort();

        assert_eq!(events, vec![started, collected, stopped]);
    }

    #[test]
    fn test_collection_notice() {
        let event =
            GameEvent::treasure_collected(5, 2, TreasureId::new(3), TreasureKind::Rare, 50, 70);
        let notice = event.collection_notice().unwrap();

        assert_eq!(notice.treasure_id, TreasureId::new(3));
        assert_eq!(notice.kind, TreasureKind::Rare);
        assert_eq!(notice.points, 50);
        assert_eq!(notice.score, 70);

        assert!(GameEvent::session_started(1, 1, 20).collection_notice().is_none());
    }

    #[test]
    fn test_event_json_is_tagged() {
        let event = GameEvent::session_stopped(9, 4, 120, 3);
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["data"]["type"], "session_stopped");
        assert_eq!(json["data"]["final_score"], 120);
        assert_eq!(json["generation"], 4);
    }
}
