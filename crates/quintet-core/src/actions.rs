//! Match intents and the events that result from them.
//!
//! Every mutation of a match flows through [`MatchAction`]; the engine
//! answers with [`MatchEvent`]s that rendering and the network sync layer
//! consume. The engine only emits discrete events - pacing and animation
//! timing belong to the presentation layer.

use crate::board::{Coord, Symbol};
use crate::game::Scores;
use serde::{Deserialize, Serialize};

/// An intent submitted to the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchAction {
    /// Place the acting player's symbol at (row, col). Valid while playing
    /// (including a bonus turn after scoring).
    Place { row: usize, col: usize },

    /// Erase an opposing piece at (row, col). Valid only during the
    /// removal phase.
    Remove { row: usize, col: usize },
}

/// Events emitted by the match as a result of accepted intents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEvent {
    /// A symbol was placed on the board
    Placed {
        player: Symbol,
        row: usize,
        col: usize,
    },

    /// A qualifying run was completed and scored. Only one of these fires
    /// per move; a 5-run is consumed before a 4-run is ever considered.
    RunScored {
        player: Symbol,
        length: usize,
        points: u32,
        /// The exact cells of the run, for the removal-highlight sequence
        cells: Vec<Coord>,
    },

    /// The scoring player keeps the move instead of alternating
    BonusTurn { player: Symbol },

    /// Play passed to the other player
    TurnChanged { next_player: Symbol },

    /// The board filled with no winner; the removal phase begins
    RemovalStarted {
        /// Total removal actions across both sides
        turns_left: u8,
        /// X always opens the removal phase
        first: Symbol,
    },

    /// An opposing piece was erased during the removal phase
    PieceRemoved {
        player: Symbol,
        row: usize,
        col: usize,
    },

    /// The removal phase ended and normal play resumes
    RemovalEnded { next_player: Symbol },

    /// A player reached the winning score
    GameWon { winner: Symbol, scores: Scores },
}
