//! Game Logic Module
//!
//! The treasure lifecycle and scoring state machine. Pure, synchronous,
//! in-memory; randomness only through `core::rng::RandomSource`.
//!
//! ## Module Structure
//!
//! - `treasure`: Treasure, id and kind types
//! - `placement`: Layout generation for a new session
//! - `registry`: Live treasures of the current session
//! - `scoring`: Point table and score board
//! - `events`: Events recorded on every transition
//! - `session`: The session controller state machine

pub mod treasure;
pub mod placement;
pub mod registry;
pub mod scoring;
pub mod events;
pub mod session;

// Re-export key types
pub use treasure::{Treasure, TreasureId, TreasureKind};
pub use placement::PlacementConfig;
pub use registry::TreasureRegistry;
pub use scoring::{value_of, ScoreBoard};
pub use events::{CollectionNotice, GameEvent, GameEventData};
pub use session::{GameSession, SessionStatus};
