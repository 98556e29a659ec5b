//! Gomoku AI engine
//!
//! Plays freestyle Gomoku on a 15x15 board against a human:
//! - Five or more in a row wins
//! - A full board without a five is a draw
//! - The engine plays [`Stone::Ai`], the opponent [`Stone::Human`]
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board representation, move validation, win and draw detection
//! - [`eval`]: Pattern catalog and incremental evaluation
//! - [`search`]: Frontier, Zobrist hashing, transposition table, alpha-beta
//! - [`engine`]: Game-facing engine tying the components together
//! - [`config`]: Engine tuning, overridable from the environment
//! - [`ui`]: egui front-end
//!
//! # Quick Start
//!
//! ```
//! use gomoku::{AIEngine, EngineConfig, Outcome};
//!
//! // Shallow search keeps the doc test fast
//! let mut engine = AIEngine::with_config(EngineConfig::default().with_depth(2));
//!
//! engine.apply_human_move(7, 7).unwrap();
//! let reply = engine.propose_move().unwrap();
//! engine.apply_engine_move(reply.row.into(), reply.col.into()).unwrap();
//!
//! assert_eq!(engine.check_result(), Outcome::Ongoing);
//! println!("AI plays at ({}, {})", reply.row, reply.col);
//! ```
//!
//! # Search
//!
//! Every engine move runs a fixed-depth minimax with alpha-beta pruning:
//! 1. Candidates are the best few frontier cells by absolute score
//! 2. Each candidate is evaluated incrementally into a copy of the frontier
//! 3. The stone is tried on the shared board and undone by a drop guard
//! 4. Interior results are cached by Zobrist hash with bound flags

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod search;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, Outcome, Pos, Stone, BOARD_SIZE};
pub use config::EngineConfig;
pub use engine::{AIEngine, MoveResult};
pub use error::{ConfigError, GomokuError, Result};
