//! Core deterministic primitives.
//!
//! Everything the game layer needs that is not game logic itself:
//! seeded randomness, world-space points and state fingerprints.

pub mod vec3;
pub mod rng;
pub mod hash;

// Re-export core types
pub use vec3::Vec3;
pub use rng::{DeterministicRng, RandomSource};
pub use hash::{compute_state_hash, StateHash};
