//! Treasure Registry
//!
//! The live, not-yet-collected treasures of the current session, kept in
//! insertion order with an id index for lookups.

use std::collections::BTreeMap;
use tracing::warn;

use crate::game::treasure::{Treasure, TreasureId};

/// Insertion-ordered map from id to treasure.
///
/// Invariant: `index[id] == position of id in entries` for every stored id,
/// and no id appears twice.
#[derive(Clone, Debug, Default)]
pub struct TreasureRegistry {
    entries: Vec<Treasure>,
    index: BTreeMap<TreasureId, usize>,
}

impl TreasureRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole contents.
    ///
    /// A treasure whose id is already present is dropped (first one wins).
    /// Returns the number of treasures stored.
    pub fn seed<I>(&mut self, treasures: I) -> usize
    where
        I: IntoIterator<Item = Treasure>,
    {
        self.clear();

        for treasure in treasures {
            if self.contains(treasure.id) {
                warn!(id = treasure.id.get(), "Duplicate treasure id while seeding, dropped");
                continue;
            }
            self.index.insert(treasure.id, self.entries.len());
            self.entries.push(treasure);
        }

        self.entries.len()
    }

    /// Look up a live treasure.
    pub fn find(&self, id: TreasureId) -> Option<&Treasure> {
        self.index.get(&id).map(|&slot| &self.entries[slot])
    }

    /// Check whether an id is live.
    pub fn contains(&self, id: TreasureId) -> bool {
        self.index.contains_key(&id)
    }

    /// Remove a treasure. Removing an absent id is a no-op.
    pub fn remove(&mut self, id: TreasureId) -> Option<Treasure> {
        let slot = self.index.remove(&id)?;
        let removed = self.entries.remove(slot);

        // Everything after the hole moved down by one
        for treasure in &self.entries[slot..] {
            if let Some(entry) = self.index.get_mut(&treasure.id) {
                *entry -= 1;
            }
        }

        Some(removed)
    }

    /// Iterate live treasures in insertion order.
    ///
    /// Each call starts a fresh pass.
    pub fn all(&self) -> impl Iterator<Item = &Treasure> + '_ {
        self.entries.iter()
    }

    /// Number of live treasures.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is live.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }
}
