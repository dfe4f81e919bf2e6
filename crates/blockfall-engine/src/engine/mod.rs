//! Game session logic.
//!
//! This module drives the core data structures through a game of falling
//! blocks:
//!
//! - [`GameEngine`] - The session state machine (board, active piece, hold, next queue)
//! - [`PieceQueue`] - Seeded piece generation and the fixed-length next queue
//! - [`GameStats`] - Score and line-clear counters
//! - [`GravityTimer`] - Caller-owned accumulator that decides when gravity ticks
//! - [`Snapshot`] - Read-only view of a session for presentation layers
//!
//! # Game Flow
//!
//! 1. Create a [`GameEngine`] from an [`EngineConfig`](crate::EngineConfig)
//! 2. Feed player input as commands (move, rotate, hold, hard drop)
//! 3. Call [`GameEngine::tick`] whenever the [`GravityTimer`] says so
//! 4. Locking a piece clears full rows, scores and spawns the next piece
//! 5. Repeat until a spawn collides, then [`GameEngine::reset`] to play again
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use blockfall_engine::{Command, EngineConfig, GameEngine, PieceSeed};
//!
//! let config = EngineConfig::default();
//! let mut timer = config.gravity_timer();
//! let mut engine = GameEngine::with_seed(config, PieceSeed::from(7)).unwrap();
//!
//! let frame = Duration::from_millis(16);
//! for _ in 0..1200 {
//!     if timer.advance(frame) {
//!         engine.apply(Command::Tick);
//!     }
//! }
//! assert!(engine.stats().completed_pieces() > 0);
//! ```

pub use self::{game_engine::*, game_stats::*, gravity::*, piece_queue::*, snapshot::*};

pub(crate) mod game_engine;
pub(crate) mod game_stats;
pub(crate) mod gravity;
pub(crate) mod piece_queue;
pub(crate) mod snapshot;
