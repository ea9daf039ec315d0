//! Quintet - a two-player 5x5 connect-and-score game engine
//!
//! This crate provides the core match logic for Quintet, including:
//! - The 5x5 board and cell occupancy model
//! - Run detection for exact-length lines of 4 and 5
//! - The match state machine with scoring, bonus turns, and the
//!   piece-removal endgame
//! - A rule-based opponent for single-player games
//!
//! # Architecture
//!
//! The engine is deterministic, synchronous, and platform-agnostic. It can
//! be compiled to:
//! - Native Rust, where it runs headlessly as the authoritative match on a
//!   game server
//! - WebAssembly for a browser client, which also hosts the built-in
//!   opponent for single-player play
//!
//! Exactly one `Match` instance is authoritative; every intent goes through
//! its single apply path and results in events plus a fresh snapshot for
//! rendering and network synchronization.
//!
//! # Modules
//!
//! - [`board`]: symbols, cells, and the 5x5 grid
//! - [`lines`]: exact-length run detection along the four axes
//! - [`game`]: the match state machine
//! - [`bot`]: the rule-based opponent strategy
//! - [`actions`]: intents and the resulting event stream

pub mod actions;
pub mod board;
pub mod bot;
pub mod game;
pub mod lines;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use actions::{MatchAction, MatchEvent};
pub use board::{Board, Cell, Coord, Symbol, GRID_SIZE};
pub use bot::Bot;
pub use game::{
    Match, MatchError, MatchSnapshot, Phase, Scores, CONNECT_4_POINTS, CONNECT_5_POINTS,
    REMOVAL_TURNS_EACH, WINNING_SCORE,
};
pub use lines::WinResult;
