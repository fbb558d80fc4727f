//! Treasure Definitions
//!
//! A treasure is created once by the placement generator and never mutated;
//! collection removes it from the registry outright.

use std::fmt;
use serde::{Serialize, Deserialize};

use crate::core::vec3::Vec3;

// =============================================================================
// TREASURE ID
// =============================================================================

/// Treasure identifier, unique within one session generation.
///
/// Ids restart at 0 on every new session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TreasureId(pub u32);

impl TreasureId {
    /// Create from a raw index.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw numeric value.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for TreasureId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for TreasureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// TREASURE KIND
// =============================================================================

/// Type of treasure collectible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum TreasureKind {
    /// Coin - the everyday find
    Common = 0,
    /// Chest - one in five
    Rare = 1,
}

impl TreasureKind {
    /// Number of kinds.
    pub const COUNT: usize = 2;

    /// All kinds in index order.
    pub const ALL: [TreasureKind; Self::COUNT] = [TreasureKind::Common, TreasureKind::Rare];

    /// Stable index for per-kind tables.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Lowercase label for logs and renderers.
    pub fn label(self) -> &'static str {
        match self {
            TreasureKind::Common => "common",
            TreasureKind::Rare => "rare",
        }
    }
}

impl fmt::Display for TreasureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// TREASURE
// =============================================================================

/// A collectible placed in the AR world.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Treasure {
    /// Identity within the current session
    pub id: TreasureId,

    /// Type of treasure
    pub kind: TreasureKind,

    /// Fixed world position (meters)
    pub position: Vec3,
}

impl Treasure {
    /// Create a new treasure.
    pub const fn new(id: TreasureId, kind: TreasureKind, position: Vec3) -> Self {
        Self { id, kind, position }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_index_matches_table() {
        for kind in TreasureKind::ALL {
            assert_eq!(TreasureKind::ALL[kind.index()], kind);
        }
    }

    #[test]
    fn test_id_ordering() {
        assert!(TreasureId::new(0) < TreasureId::new(1));
        assert_eq!(TreasureId::from(7).get(), 7);
        assert_eq!(TreasureId::new(3).to_string(), "#3");
    }

    #[test]
    fn test_treasure_serializes_flat() {
        let position = Vec3::new(1.0, 1.5, -3.0);
        let treasure = Treasure::new(TreasureId::new(4), TreasureKind::Rare, position);
        let json = serde_json::to_value(treasure).unwrap();

        assert_eq!(json["id"], 4);
        assert_eq!(json["kind"], "rare");
        assert_eq!(json["position"]["y"], 1.5);
    }
}
