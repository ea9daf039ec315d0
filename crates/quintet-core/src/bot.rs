//! The built-in rule-based opponent.
//!
//! The strategy is a strict priority ladder: finish an own run, block the
//! opponent's, then fall back to center-first positional play. Candidate
//! probing happens on a scratch copy of the board, so the live board is
//! never touched and probes are invisible to every observer.

use crate::board::{Board, Cell, Coord, Symbol};
use crate::game::MatchError;
use crate::lines::{max_run_through, scan_run};
use rand::prelude::*;

/// Center-outward placement preference for positional play
const CENTER_PRIORITY: [(usize, usize); 9] = [
    (2, 2),
    (1, 2),
    (2, 1),
    (2, 3),
    (3, 2),
    (1, 1),
    (1, 3),
    (3, 1),
    (3, 3),
];

/// A rule-based opponent for one symbol.
///
/// Priorities 1-4 (finish / block) are deterministic: candidates are probed
/// in row-major order and the first hit wins. Only the positional fallback
/// tiers draw from the RNG, so a seeded bot replays identically.
pub struct Bot {
    pub symbol: Symbol,
    rng: StdRng,
}

impl Bot {
    pub fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(symbol: Symbol, seed: u64) -> Self {
        Self {
            symbol,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Choose a placement for the playing phase.
    ///
    /// Priority order, first non-empty result wins:
    /// 1. complete an own 5-run
    /// 2. complete an own 4-run
    /// 3. block an opponent 5-run
    /// 4. block an opponent 4-run
    /// 5. first safe cell on the center-outward list
    /// 6. random safe empty cell, else random empty cell
    ///
    /// `NoLegalMove` is returned only when no empty cell exists at all.
    pub fn choose_move(&mut self, board: &Board) -> Result<Coord, MatchError> {
        let me = self.symbol;
        let them = me.opposite();

        for (who, length) in [(me, 5), (me, 4), (them, 5), (them, 4)] {
            if let Some(coord) = completing_move(board, who, length) {
                return Ok(coord);
            }
        }

        let empty = board.empty_cells();
        if empty.is_empty() {
            return Err(MatchError::NoLegalMove);
        }

        for &(row, col) in &CENTER_PRIORITY {
            let coord = Coord::new(row, col);
            if board.get(row, col).is_empty() && is_safe(board, me, coord) {
                return Ok(coord);
            }
        }

        let safe: Vec<Coord> = empty
            .iter()
            .copied()
            .filter(|&c| is_safe(board, me, c))
            .collect();

        if let Some(&coord) = safe.choose(&mut self.rng) {
            return Ok(coord);
        }

        // Every cell hands the opponent a finishing move; take any.
        Ok(empty[self.rng.gen_range(0..empty.len())])
    }

    /// Choose an opposing piece to erase during the removal phase.
    ///
    /// Targets the piece sitting on the longest current opposing run (first
    /// in row-major order on ties) when that run is at least 2; otherwise a
    /// uniformly random opposing piece. `None` only if the opponent has no
    /// pieces left.
    pub fn choose_removal(&mut self, board: &Board) -> Option<Coord> {
        let targets = board.cells_of(self.symbol.opposite());
        if targets.is_empty() {
            return None;
        }

        let mut best: Option<(Coord, usize)> = None;
        for &coord in &targets {
            let run = max_run_through(board, coord.row, coord.col);
            if best.map_or(true, |(_, len)| run > len) {
                best = Some((coord, run));
            }
        }

        match best {
            Some((coord, len)) if len >= 2 => Some(coord),
            _ => targets.choose(&mut self.rng).copied(),
        }
    }
}

/// Find a cell where placing `player` completes a run of exactly `length`.
///
/// Probes speculatively on a scratch copy: the caller's board is left
/// byte-for-byte untouched. Candidates are scanned in row-major order, so
/// the result is deterministic for a given board.
fn completing_move(board: &Board, player: Symbol, length: usize) -> Option<Coord> {
    let mut scratch = board.clone();
    for coord in board.empty_cells() {
        scratch.put(coord, Cell::Taken(player));
        let hit = scan_run(&scratch, coord.row, coord.col, length).is_some();
        scratch.put(coord, Cell::Empty);
        if hit {
            return Some(coord);
        }
    }
    None
}

/// Whether placing `player` at `coord` avoids handing the opponent an
/// immediate 4- or 5-run completion on their next turn.
fn is_safe(board: &Board, player: Symbol, coord: Coord) -> bool {
    let opponent = player.opposite();
    let mut scratch = board.clone();
    scratch.put(coord, Cell::Taken(player));

    completing_move(&scratch, opponent, 5).is_none()
        && completing_move(&scratch, opponent, 4).is_none()
}
