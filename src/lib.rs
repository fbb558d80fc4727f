//! # Treasure Hunt Engine
//!
//! Treasure lifecycle and scoring for an AR scavenger hunt: generates
//! treasure layouts, tracks which treasures are still live, applies
//! collection events and keeps score. Camera tracking, rendering, audio and
//! HUD drawing are collaborators that talk to this crate through
//! `driver::SessionHandle`.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   TREASURE HUNT ENGINE                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── rng.rs      - Seeded Xoroshiro128+ behind RandomSource  │
//! │  ├── vec3.rs     - World-space point                         │
//! │  └── hash.rs     - State fingerprints                        │
//! │                                                              │
//! │  game/           - Game logic (pure, synchronous)            │
//! │  ├── treasure.rs - Treasure, id and kind                     │
//! │  ├── placement.rs- Layout generation                         │
//! │  ├── registry.rs - Live treasure set                         │
//! │  ├── scoring.rs  - Point table and score board               │
//! │  ├── events.rs   - Transition events                         │
//! │  └── session.rs  - Idle/active session controller            │
//! │                                                              │
//! │  driver/         - Async host (non-deterministic)            │
//! │  ├── protocol.rs - Commands, notices, views                  │
//! │  ├── restart.rs  - Cancellable deferred restart              │
//! │  └── runner.rs   - Command loop and handle                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Collection Guarantee
//!
//! A collection event scores at most once. Events for unknown ids, already
//! collected ids, or arriving while the session is idle are dropped without
//! error, so stale render frames and racing taps can never double count.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod core;
pub mod game;
pub mod driver;

// Re-export commonly used types
pub use crate::config::GameConfig;
pub use crate::core::rng::{DeterministicRng, RandomSource};
pub use crate::core::vec3::Vec3;
pub use crate::game::{GameSession, SessionStatus, Treasure, TreasureId, TreasureKind};
pub use crate::driver::{SessionCommand, SessionDriver, SessionHandle, SessionNotice, SessionView};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Treasures generated per session by default.
pub const DEFAULT_TREASURE_COUNT: u32 = 20;

/// Half side of the default spawn square (meters).
pub const DEFAULT_SPAWN_RADIUS: f32 = 10.0;

/// Pause between stop and start on restart (milliseconds).
pub const RESTART_DELAY_MS: u64 = 100;
