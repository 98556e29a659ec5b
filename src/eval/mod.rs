//! Evaluation module for Gomoku positions
//!
//! This module provides pattern recognition and scoring for board positions.
//! The evaluation considers:
//! - Fives, fours, threes and twos for both sides along four axes
//! - Blocking weight for the human's threats
//! - Edge and sacrifice shapes anchored on human stones

pub mod heuristic;
pub mod patterns;

pub use heuristic::{evaluate_move, score_board};
pub use patterns::{Pattern, PatternCatalog, PatternScore};
