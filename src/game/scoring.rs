//! Scoring Engine
//!
//! Fixed point table per treasure kind plus the running score board of a
//! session.

use serde::{Serialize, Deserialize};

use crate::game::treasure::TreasureKind;

/// Points for a common treasure.
pub const COMMON_POINTS: u32 = 10;

/// Points for a rare treasure.
pub const RARE_POINTS: u32 = 50;

/// Get point value for a treasure kind.
///
/// Total over the kind enumeration; adding a kind is a compile error here
/// until it gets a value.
#[inline]
pub fn value_of(kind: TreasureKind) -> u32 {
    match kind {
        TreasureKind::Common => COMMON_POINTS,
        TreasureKind::Rare => RARE_POINTS,
    }
}

/// Running totals for one session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    /// Accumulated score
    pub score: u32,

    /// Number of treasures collected
    pub collected: u32,

    /// Collected count per kind, indexed by `TreasureKind::index`
    pub by_kind: [u32; TreasureKind::COUNT],
}

impl ScoreBoard {
    /// Record one collection and return the points it was worth.
    pub fn record(&mut self, kind: TreasureKind) -> u32 {
        let points = value_of(kind);
        self.score = self.score.saturating_add(points);
        self.collected = self.collected.saturating_add(1);
        self.by_kind[kind.index()] = self.by_kind[kind.index()].saturating_add(1);
        points
    }

    /// Collected count for one kind.
    pub fn collected_of(&self, kind: TreasureKind) -> u32 {
        self.by_kind[kind.index()]
    }

    /// Zero everything.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
