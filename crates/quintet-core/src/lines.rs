//! Run detection along the four board axes.
//!
//! A run is a maximal contiguous sequence of same-symbol cells along one of
//! the four direction vectors. Scans always originate from a just-occupied
//! cell, so the whole board never needs to be swept.

use crate::board::{Board, Coord, Symbol};
use serde::{Deserialize, Serialize};

/// The four scan axes: horizontal, vertical, and both diagonals
pub const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// A qualifying run: its owner and the exact cells forming it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinResult {
    /// Who owns the run
    pub player: Symbol,
    /// Every cell in the run, starting from the scanned cell
    pub cells: Vec<Coord>,
}

/// Scan from (row, col) for a run of exactly `length`.
///
/// The total contiguous count through the cell must equal `length` - not
/// "at least". A run of 5 does not qualify as a run of 4; a caller wanting
/// both lengths scans both, consuming length 5 first because only one
/// scoring event fires per move.
pub fn scan_run(board: &Board, row: usize, col: usize, length: usize) -> Option<WinResult> {
    let player = board.get(row, col).symbol()?;

    for &(dr, dc) in &DIRECTIONS {
        let mut cells = vec![Coord::new(row, col)];
        extend(board, player, row, col, dr, dc, &mut cells);
        extend(board, player, row, col, -dr, -dc, &mut cells);

        if cells.len() == length {
            return Some(WinResult { player, cells });
        }
    }

    None
}

/// Length of the longest contiguous same-symbol run through (row, col),
/// in any direction, on the current board. Returns 0 for an empty cell.
pub fn max_run_through(board: &Board, row: usize, col: usize) -> usize {
    let player = match board.get(row, col).symbol() {
        Some(p) => p,
        None => return 0,
    };

    let mut max_len = 0;
    for &(dr, dc) in &DIRECTIONS {
        let mut cells = vec![Coord::new(row, col)];
        extend(board, player, row, col, dr, dc, &mut cells);
        extend(board, player, row, col, -dr, -dc, &mut cells);
        max_len = max_len.max(cells.len());
    }
    max_len
}

/// Walk from (row, col) in direction (dr, dc), collecting contiguous cells
/// owned by `player`. The starting cell itself is not re-collected.
fn extend(
    board: &Board,
    player: Symbol,
    row: usize,
    col: usize,
    dr: isize,
    dc: isize,
    cells: &mut Vec<Coord>,
) {
    let mut r = row as isize + dr;
    let mut c = col as isize + dc;

    while r >= 0 && c >= 0 && Board::in_bounds(r as usize, c as usize) {
        if board.get(r as usize, c as usize).symbol() != Some(player) {
            break;
        }
        cells.push(Coord::new(r as usize, c as usize));
        r += dr;
        c += dc;
    }
}
