//! Session Driver Layer
//!
//! Async host around the synchronous game core. This layer is
//! **non-deterministic** (timers, task scheduling); all game logic runs
//! through `game/`.

pub mod protocol;
pub mod restart;
pub mod runner;

pub use protocol::{SessionCommand, SessionNotice, SessionView, TreasureView};
pub use restart::{RestartScheduler, RestartTicket, ScheduledRestart};
pub use runner::{DriverError, SessionDriver, SessionHandle, SharedSession};
