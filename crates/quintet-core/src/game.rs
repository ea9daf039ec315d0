//! Core match state machine.
//!
//! This module contains the main [`Match`] struct and all rule enforcement:
//! turn order, scoring, the bonus turn, the removal endgame, and the win
//! condition. The match is the single source of truth; every intent -
//! human or bot - is serialized through one apply path.

use crate::actions::{MatchAction, MatchEvent};
use crate::board::{Board, Cell, Coord, Symbol};
use crate::bot::Bot;
use crate::lines::{scan_run, WinResult};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Score needed to win the match
pub const WINNING_SCORE: u32 = 5;

/// Points awarded for a run of exactly 5
pub const CONNECT_5_POINTS: u32 = 2;

/// Points awarded for a run of exactly 4
pub const CONNECT_4_POINTS: u32 = 1;

/// Removal actions granted to each side when the board fills
pub const REMOVAL_TURNS_EACH: u8 = 3;

/// Match phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Normal alternating play (including bonus turns after scoring)
    Playing,

    /// Board filled with no winner; players alternately erase opposing
    /// pieces, X first
    Removal,

    /// Terminal; every further intent is rejected
    GameOver { winner: Symbol },
}

/// Errors produced when an intent is rejected.
///
/// All of these are local and non-fatal: the match state is left unchanged
/// and the intent is never retried by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum MatchError {
    #[error("Coordinates are off the board")]
    OutOfBounds,

    #[error("Cell is already occupied")]
    CellOccupied,

    #[error("Invalid intent for the current phase")]
    IllegalMove,

    #[error("Not your turn")]
    NotYourTurn,

    #[error("Game is already over")]
    GameAlreadyOver,

    #[error("No legal move available")]
    NoLegalMove,
}

/// Running score for both players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scores {
    pub x: u32,
    pub o: u32,
}

impl Scores {
    pub fn get(&self, symbol: Symbol) -> u32 {
        match symbol {
            Symbol::X => self.x,
            Symbol::O => self.o,
        }
    }

    fn add(&mut self, symbol: Symbol, points: u32) {
        match symbol {
            Symbol::X => self.x += points,
            Symbol::O => self.o += points,
        }
    }
}

/// A read-only view of the match, consumed by rendering and by the network
/// sync layer. The authoritative side serializes this verbatim after every
/// accepted intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub board: Board,
    pub current_player: Symbol,
    pub scores: Scores,
    pub phase: Phase,
    pub removal_turns_left: u8,
    pub game_over: bool,
    /// Most recent qualifying run, if the last accepted move scored.
    /// Drives the highlight-then-clear sequence externally.
    pub last_win: Option<WinResult>,
}

/// The authoritative match state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    board: Board,
    current_player: Symbol,
    scores: Scores,
    phase: Phase,
    removal_turns_left: u8,
    /// Who made the move that filled the board; after the removal phase the
    /// *other* player resumes play
    player_before_board_full: Option<Symbol>,
    last_win: Option<WinResult>,
}

impl Match {
    /// Create a fresh match: empty board, zeroed scores, X to move
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Symbol::X,
            scores: Scores::default(),
            phase: Phase::Playing,
            removal_turns_left: 0,
            player_before_board_full: None,
            last_win: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Symbol {
        self.current_player
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn removal_turns_left(&self) -> u8 {
        self.removal_turns_left
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver { .. })
    }

    pub fn winner(&self) -> Option<Symbol> {
        match self.phase {
            Phase::GameOver { winner } => Some(winner),
            _ => None,
        }
    }

    /// Build the snapshot consumed by rendering and the sync layer
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            board: self.board.clone(),
            current_player: self.current_player,
            scores: self.scores,
            phase: self.phase,
            removal_turns_left: self.removal_turns_left,
            game_over: self.is_over(),
            last_win: self.last_win.clone(),
        }
    }

    /// Submit a placement for `player`; returns the updated snapshot
    pub fn submit_move(
        &mut self,
        player: Symbol,
        row: usize,
        col: usize,
    ) -> Result<MatchSnapshot, MatchError> {
        self.apply(player, MatchAction::Place { row, col })?;
        Ok(self.snapshot())
    }

    /// Submit a removal for `player`; returns the updated snapshot
    pub fn submit_removal(
        &mut self,
        player: Symbol,
        row: usize,
        col: usize,
    ) -> Result<MatchSnapshot, MatchError> {
        self.apply(player, MatchAction::Remove { row, col })?;
        Ok(self.snapshot())
    }

    /// Discard the current match and start over. Reset always reconstructs
    /// a fresh board and zeroed scores, never a partial in-place mutation.
    pub fn reset(&mut self) -> MatchSnapshot {
        *self = Match::new();
        self.snapshot()
    }

    /// Apply an intent to the match. This is the single apply path for
    /// every actor; a rejected intent leaves the state untouched.
    pub fn apply(
        &mut self,
        player: Symbol,
        action: MatchAction,
    ) -> Result<Vec<MatchEvent>, MatchError> {
        if self.is_over() {
            return Err(MatchError::GameAlreadyOver);
        }

        match action {
            MatchAction::Place { row, col } => self.apply_place(player, row, col),
            MatchAction::Remove { row, col } => self.apply_remove(player, row, col),
        }
    }

    fn apply_place(
        &mut self,
        player: Symbol,
        row: usize,
        col: usize,
    ) -> Result<Vec<MatchEvent>, MatchError> {
        if self.phase != Phase::Playing {
            return Err(MatchError::IllegalMove);
        }
        if player != self.current_player {
            return Err(MatchError::NotYourTurn);
        }
        if !Board::in_bounds(row, col) {
            return Err(MatchError::OutOfBounds);
        }
        if !self.board.get(row, col).is_empty() {
            return Err(MatchError::CellOccupied);
        }

        self.board.put(Coord::new(row, col), Cell::Taken(player));

        let mut events = vec![MatchEvent::Placed { player, row, col }];

        // A 5-run is evaluated and consumed before a 4-run ever is; the
        // bonus differs and only one scoring event fires per move.
        let scored = scan_run(&self.board, row, col, 5)
            .map(|win| (win, CONNECT_5_POINTS))
            .or_else(|| scan_run(&self.board, row, col, 4).map(|win| (win, CONNECT_4_POINTS)));

        if let Some((win, points)) = scored {
            let length = win.cells.len();
            self.scores.add(player, points);
            self.last_win = Some(win.clone());

            events.push(MatchEvent::RunScored {
                player,
                length,
                points,
                cells: win.cells.clone(),
            });

            if self.scores.get(player) >= WINNING_SCORE {
                // Terminal: the final board keeps the winning run intact.
                self.phase = Phase::GameOver { winner: player };
                events.push(MatchEvent::GameWon {
                    winner: player,
                    scores: self.scores,
                });
            } else {
                // Erase the run and grant the scorer another turn.
                self.board.clear_cells(&win.cells);
                events.push(MatchEvent::BonusTurn { player });
            }

            return Ok(events);
        }

        self.last_win = None;

        if self.board.is_full() {
            self.phase = Phase::Removal;
            self.player_before_board_full = Some(player);
            self.current_player = Symbol::X;
            self.removal_turns_left = REMOVAL_TURNS_EACH * 2;

            events.push(MatchEvent::RemovalStarted {
                turns_left: self.removal_turns_left,
                first: Symbol::X,
            });
        } else {
            self.current_player = player.opposite();
            events.push(MatchEvent::TurnChanged {
                next_player: self.current_player,
            });
        }

        Ok(events)
    }

    fn apply_remove(
        &mut self,
        player: Symbol,
        row: usize,
        col: usize,
    ) -> Result<Vec<MatchEvent>, MatchError> {
        if self.phase != Phase::Removal {
            return Err(MatchError::IllegalMove);
        }
        if player != self.current_player {
            return Err(MatchError::NotYourTurn);
        }
        if !Board::in_bounds(row, col) {
            return Err(MatchError::OutOfBounds);
        }
        // The target must hold the opponent's symbol; an empty cell or the
        // player's own piece consumes no turn.
        if self.board.get(row, col).symbol() != Some(player.opposite()) {
            return Err(MatchError::IllegalMove);
        }

        self.board.put(Coord::new(row, col), Cell::Empty);
        self.removal_turns_left -= 1;

        let mut events = vec![MatchEvent::PieceRemoved { player, row, col }];

        if self.removal_turns_left == 0 {
            let filler = self
                .player_before_board_full
                .take()
                .expect("removal phase without a recorded board-filling player");

            // The player who did not fill the board resumes play.
            self.phase = Phase::Playing;
            self.current_player = filler.opposite();

            events.push(MatchEvent::RemovalEnded {
                next_player: self.current_player,
            });
        } else {
            self.current_player = player.opposite();
            events.push(MatchEvent::TurnChanged {
                next_player: self.current_player,
            });
        }

        Ok(events)
    }

    /// Ask the opponent strategy for its intent and feed it through the
    /// same apply path as any other actor. Thinking delays are scheduling
    /// artifacts of the presentation layer, never engine state.
    pub fn play_bot_turn(&mut self, bot: &mut Bot) -> Result<Vec<MatchEvent>, MatchError> {
        let action = match self.phase {
            Phase::GameOver { .. } => return Err(MatchError::GameAlreadyOver),
            Phase::Playing => {
                let coord = bot.choose_move(&self.board)?;
                MatchAction::Place {
                    row: coord.row,
                    col: coord.col,
                }
            }
            Phase::Removal => {
                let coord = bot.choose_removal(&self.board).ok_or(MatchError::NoLegalMove)?;
                MatchAction::Remove {
                    row: coord.row,
                    col: coord.col,
                }
            }
        };

        self.apply(bot.symbol, action)
    }
}

impl Default for Match {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::GRID_SIZE;
    use pretty_assertions::assert_eq;

    fn place(m: &mut Match, player: Symbol, row: usize, col: usize) -> Vec<MatchEvent> {
        m.apply(player, MatchAction::Place { row, col })
            .unwrap_or_else(|e| panic!("place {player} at ({row},{col}) failed: {e}"))
    }

    #[test]
    fn test_new_match_state() {
        let m = Match::new();
        assert_eq!(m.current_player(), Symbol::X);
        assert_eq!(m.phase(), Phase::Playing);
        assert_eq!(m.scores(), Scores::default());
        assert!(!m.is_over());
    }

    #[test]
    fn test_turns_alternate() {
        let mut m = Match::new();
        place(&mut m, Symbol::X, 2, 2);
        assert_eq!(m.current_player(), Symbol::O);
        assert_eq!(m.phase(), Phase::Playing);

        // O places three non-scoring moves with X answering in between;
        // after each O move the turn passes back to X.
        for (r, c) in [(2, 3), (2, 4), (2, 1)] {
            place(&mut m, Symbol::O, r, c);
            assert_eq!(m.current_player(), Symbol::X);
            // X answers far away to keep the board quiet.
            let spot = m
                .board()
                .empty_cells()
                .into_iter()
                .find(|c| c.row == 4)
                .unwrap();
            place(&mut m, Symbol::X, spot.row, spot.col);
            assert_eq!(m.current_player(), Symbol::O);
        }
    }

    #[test]
    fn test_not_your_turn_rejected() {
        let mut m = Match::new();
        let err = m.apply(Symbol::O, MatchAction::Place { row: 0, col: 0 });
        assert_eq!(err, Err(MatchError::NotYourTurn));
        assert_eq!(m.board().empty_cells().len(), GRID_SIZE * GRID_SIZE);
    }

    #[test]
    fn test_occupied_cell_rejected() {
        let mut m = Match::new();
        place(&mut m, Symbol::X, 1, 1);
        let err = m.apply(Symbol::O, MatchAction::Place { row: 1, col: 1 });
        assert_eq!(err, Err(MatchError::CellOccupied));
        // No turn consumed.
        assert_eq!(m.current_player(), Symbol::O);
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let mut m = Match::new();
        let err = m.apply(Symbol::X, MatchAction::Place { row: 5, col: 0 });
        assert_eq!(err, Err(MatchError::OutOfBounds));
    }

    #[test]
    fn test_removal_intent_while_playing_rejected() {
        let mut m = Match::new();
        let err = m.apply(Symbol::X, MatchAction::Remove { row: 0, col: 0 });
        assert_eq!(err, Err(MatchError::IllegalMove));
    }

    /// Seed the board directly and set the mover, leaving the final
    /// placement to go through the real apply path.
    fn seeded(x: &[(usize, usize)], o: &[(usize, usize)], to_move: Symbol) -> Match {
        let mut m = Match::new();
        for &(r, c) in x {
            m.board.put(Coord::new(r, c), Cell::Taken(Symbol::X));
        }
        for &(r, c) in o {
            m.board.put(Coord::new(r, c), Cell::Taken(Symbol::O));
        }
        m.current_player = to_move;
        m
    }

    #[test]
    fn test_five_run_scores_two_and_grants_bonus_turn() {
        // X holds (0,0),(0,1),(0,3),(0,4); placing (0,2) closes the 5-run.
        let mut m = seeded(
            &[(0, 0), (0, 1), (0, 3), (0, 4)],
            &[(4, 0), (4, 1), (3, 0), (3, 1)],
            Symbol::X,
        );

        let events = place(&mut m, Symbol::X, 0, 2);

        assert!(events.iter().any(|e| matches!(
            e,
            MatchEvent::RunScored {
                player: Symbol::X,
                length: 5,
                points: CONNECT_5_POINTS,
                ..
            }
        )));
        assert_eq!(m.scores().x, 2);

        // The run is erased and X keeps the move.
        for c in 0..GRID_SIZE {
            assert_eq!(m.board().get(0, c), Cell::Empty);
        }
        assert_eq!(m.current_player(), Symbol::X);
        assert_eq!(m.phase(), Phase::Playing);
        assert!(events
            .iter()
            .any(|e| matches!(e, MatchEvent::BonusTurn { player: Symbol::X })));
    }

    #[test]
    fn test_four_run_scores_one_point() {
        let mut m = Match::new();
        for (i, c) in [0, 1, 2].iter().enumerate() {
            place(&mut m, Symbol::X, 0, *c);
            place(&mut m, Symbol::O, 4, i);
        }

        let events = place(&mut m, Symbol::X, 0, 3);

        assert!(events.iter().any(|e| matches!(
            e,
            MatchEvent::RunScored {
                length: 4,
                points: CONNECT_4_POINTS,
                ..
            }
        )));
        assert_eq!(m.scores().x, 1);
        assert_eq!(m.current_player(), Symbol::X);
    }

    #[test]
    fn test_simultaneous_four_and_five_scores_only_the_five() {
        // (0,2) completes a horizontal 5 AND a vertical 4 at once.
        let mut m = seeded(
            &[(0, 0), (0, 1), (0, 3), (0, 4), (1, 2), (2, 2), (3, 2)],
            &[(4, 0), (4, 1), (3, 0), (3, 1)],
            Symbol::X,
        );
        let events = place(&mut m, Symbol::X, 0, 2);

        let scoring: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, MatchEvent::RunScored { .. }))
            .collect();
        assert_eq!(scoring.len(), 1);
        assert!(matches!(
            scoring[0],
            MatchEvent::RunScored {
                length: 5,
                points: CONNECT_5_POINTS,
                ..
            }
        ));
        // The 5-run wins the precedence: 2 points, not 1, not 3.
        assert_eq!(m.scores().x, 2);
        // Only the 5-run's cells are erased; the vertical arm survives.
        assert_eq!(m.board().get(1, 2), Cell::Taken(Symbol::X));
        assert_eq!(m.board().get(2, 2), Cell::Taken(Symbol::X));
    }

    #[test]
    fn test_snapshot_carries_last_win_then_clears_it() {
        let mut m = Match::new();
        for (i, c) in [0, 1, 2].iter().enumerate() {
            place(&mut m, Symbol::X, 0, *c);
            place(&mut m, Symbol::O, 4, i);
        }
        place(&mut m, Symbol::X, 0, 3);

        let snap = m.snapshot();
        let win = snap.last_win.expect("snapshot should carry the run");
        assert_eq!(win.player, Symbol::X);
        assert_eq!(win.cells.len(), 4);

        // A following non-scoring move clears it.
        place(&mut m, Symbol::X, 2, 0);
        assert_eq!(m.snapshot().last_win, None);
    }

    #[test]
    fn test_reaching_winning_score_ends_game() {
        // X sits at 4 points; one more 4-run reaches exactly 5.
        let mut m = seeded(
            &[(1, 2), (2, 2), (3, 2)],
            &[(4, 0), (4, 1), (3, 0), (3, 1)],
            Symbol::X,
        );
        m.scores = Scores { x: 4, o: 0 };

        let events = place(&mut m, Symbol::X, 0, 2);

        assert_eq!(m.scores().x, 5);
        assert!(m.is_over());
        assert_eq!(m.winner(), Some(Symbol::X));
        assert!(events
            .iter()
            .any(|e| matches!(e, MatchEvent::GameWon { winner: Symbol::X, .. })));

        // The winning run stays on the final board.
        assert_eq!(m.board().get(0, 2), Cell::Taken(Symbol::X));
        assert_eq!(m.board().get(3, 2), Cell::Taken(Symbol::X));

        // Everything afterwards is rejected.
        assert_eq!(
            m.apply(Symbol::O, MatchAction::Place { row: 4, col: 4 }),
            Err(MatchError::GameAlreadyOver)
        );
        assert_eq!(
            m.apply(Symbol::O, MatchAction::Remove { row: 3, col: 2 }),
            Err(MatchError::GameAlreadyOver)
        );
    }

    #[test]
    fn test_board_full_starts_removal_phase() {
        let m = removal_phase_match();
        assert_eq!(m.phase(), Phase::Removal);
        assert_eq!(m.removal_turns_left(), REMOVAL_TURNS_EACH * 2);
        assert_eq!(m.current_player(), Symbol::X);
        assert_eq!(m.scores(), Scores::default());
        assert!(m.board().is_full());
    }

    #[test]
    fn test_removal_phase_full_cycle() {
        let mut m = removal_phase_match();
        assert_eq!(m.phase(), Phase::Removal);
        assert_eq!(m.removal_turns_left(), 6);
        assert_eq!(m.current_player(), Symbol::X);

        let filler = Symbol::O; // O made the board-filling move below

        // Six alternating removals, X first.
        for turn in 0..6u8 {
            let actor = if turn % 2 == 0 { Symbol::X } else { Symbol::O };
            assert_eq!(m.current_player(), actor);

            let target = m.board().cells_of(actor.opposite())[0];
            m.apply(
                actor,
                MatchAction::Remove {
                    row: target.row,
                    col: target.col,
                },
            )
            .unwrap();
        }

        assert_eq!(m.phase(), Phase::Playing);
        assert_eq!(m.removal_turns_left(), 0);
        // The player who did NOT fill the board resumes.
        assert_eq!(m.current_player(), filler.opposite());
    }

    #[test]
    fn test_invalid_removal_target_consumes_no_turn() {
        let mut m = removal_phase_match();
        assert_eq!(m.current_player(), Symbol::X);
        let turns = m.removal_turns_left();

        // Own piece.
        let own = m.board().cells_of(Symbol::X)[0];
        assert_eq!(
            m.apply(
                Symbol::X,
                MatchAction::Remove {
                    row: own.row,
                    col: own.col
                }
            ),
            Err(MatchError::IllegalMove)
        );

        // Placement intents are also rejected during removal.
        assert_eq!(
            m.apply(Symbol::X, MatchAction::Place { row: 0, col: 0 }),
            Err(MatchError::IllegalMove)
        );

        assert_eq!(m.removal_turns_left(), turns);
        assert_eq!(m.current_player(), Symbol::X);
    }

    #[test]
    fn test_removal_then_empty_cell_rejected() {
        let mut m = removal_phase_match();
        let target = m.board().cells_of(Symbol::O)[0];
        m.apply(
            Symbol::X,
            MatchAction::Remove {
                row: target.row,
                col: target.col,
            },
        )
        .unwrap();

        // O now aims at the freshly emptied cell.
        assert_eq!(
            m.apply(
                Symbol::O,
                MatchAction::Remove {
                    row: target.row,
                    col: target.col
                }
            ),
            Err(MatchError::IllegalMove)
        );
        assert_eq!(m.removal_turns_left(), 5);
        assert_eq!(m.current_player(), Symbol::O);
    }

    #[test]
    fn test_reset_reconstructs_everything() {
        let mut m = Match::new();
        place(&mut m, Symbol::X, 2, 2);
        place(&mut m, Symbol::O, 1, 1);

        let snap = m.reset();
        assert_eq!(snap.current_player, Symbol::X);
        assert_eq!(snap.scores, Scores::default());
        assert_eq!(snap.phase, Phase::Playing);
        assert!(!snap.game_over);
        assert_eq!(snap.last_win, None);
        assert_eq!(snap.board.empty_cells().len(), GRID_SIZE * GRID_SIZE);
    }

    #[test]
    fn test_cell_counts_never_exceed_grid() {
        let m = removal_phase_match();
        let b = m.board();
        assert!(b.count(Symbol::X) + b.count(Symbol::O) <= GRID_SIZE * GRID_SIZE);
    }

    #[test]
    fn test_snapshot_round_trips_through_json() {
        let mut m = Match::new();
        place(&mut m, Symbol::X, 2, 2);
        let snap = m.snapshot();
        let json = serde_json::to_string(&snap).unwrap();
        let back: MatchSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snap, back);
    }

    /// Build a match sitting at the start of the removal phase. The board
    /// below holds no run of 4 or 5 in any direction once O fills the last
    /// cell at (4,4) through the real apply path:
    ///
    /// ```text
    ///   X X O X X
    ///   O X X O O
    ///   X X O X X
    ///   O O X O O
    ///   X X O X O   <- (4,4) is O's filling move
    /// ```
    fn removal_phase_match() -> Match {
        let pattern = [
            ['X', 'X', 'O', 'X', 'X'],
            ['O', 'X', 'X', 'O', 'O'],
            ['X', 'X', 'O', 'X', 'X'],
            ['O', 'O', 'X', 'O', 'O'],
            ['X', 'X', 'O', 'X', '.'],
        ];

        let mut m = Match::new();
        for (r, row) in pattern.iter().enumerate() {
            for (c, ch) in row.iter().enumerate() {
                let s = match ch {
                    'X' => Symbol::X,
                    'O' => Symbol::O,
                    _ => continue,
                };
                m.board.put(Coord::new(r, c), Cell::Taken(s));
            }
        }
        m.current_player = Symbol::O;

        m.apply(Symbol::O, MatchAction::Place { row: 4, col: 4 })
            .expect("filling move should be accepted");

        assert_eq!(m.phase(), Phase::Removal);
        m
    }
}
