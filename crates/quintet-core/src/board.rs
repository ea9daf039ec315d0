//! Game board representation.
//!
//! This module contains:
//! - Player symbols (X and O)
//! - Cell occupancy values
//! - The 5x5 board grid with bounds-checked mutation and occupancy queries
//!
//! The board is pure data: it never enforces turn order or phase rules.
//! Those live in [`crate::game::Match`], which is the only writer.

use crate::game::MatchError;
use serde::{Deserialize, Serialize};

/// Width and height of the board
pub const GRID_SIZE: usize = 5;

/// A player symbol. X always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    X,
    O,
}

impl Symbol {
    /// The opposing symbol
    pub fn opposite(self) -> Symbol {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::X => write!(f, "X"),
            Symbol::O => write!(f, "O"),
        }
    }
}

/// What occupies a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Cell {
    /// Nothing placed here
    #[default]
    Empty,
    /// Occupied by a player's symbol
    Taken(Symbol),
}

impl Cell {
    /// Get the occupying symbol, if any
    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            Cell::Empty => None,
            Cell::Taken(s) => Some(*s),
        }
    }

    /// Whether the cell is unoccupied
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl From<Symbol> for Cell {
    fn from(symbol: Symbol) -> Self {
        Cell::Taken(symbol)
    }
}

/// A 0-indexed board coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// The 5x5 game board.
///
/// Owned exclusively by the match; every other consumer reads snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; GRID_SIZE]; GRID_SIZE],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; GRID_SIZE]; GRID_SIZE],
        }
    }

    /// Whether (row, col) lies on the board
    pub fn in_bounds(row: usize, col: usize) -> bool {
        row < GRID_SIZE && col < GRID_SIZE
    }

    /// Get the cell at (row, col).
    ///
    /// Panics on an out-of-range index; callers validate bounds first and
    /// an unchecked access here is a programming error.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Set the cell at (row, col), rejecting out-of-range coordinates
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<(), MatchError> {
        if !Self::in_bounds(row, col) {
            return Err(MatchError::OutOfBounds);
        }
        self.cells[row][col] = cell;
        Ok(())
    }

    /// Write a cell at a coordinate known to be in bounds
    pub(crate) fn put(&mut self, coord: Coord, cell: Cell) {
        self.cells[coord.row][coord.col] = cell;
    }

    /// True iff no cell is empty
    pub fn is_full(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|c| !c.is_empty()))
    }

    /// All empty cells in row-major order
    pub fn empty_cells(&self) -> Vec<Coord> {
        self.coords_where(|c| c.is_empty())
    }

    /// All cells holding `symbol`, in row-major order
    pub fn cells_of(&self, symbol: Symbol) -> Vec<Coord> {
        self.coords_where(|c| c.symbol() == Some(symbol))
    }

    /// Number of cells holding `symbol`
    pub fn count(&self, symbol: Symbol) -> usize {
        self.cells_of(symbol).len()
    }

    /// Return the listed cells to `Empty` (used when a scored run is erased)
    pub fn clear_cells(&mut self, cells: &[Coord]) {
        for &coord in cells {
            self.put(coord, Cell::Empty);
        }
    }

    fn coords_where<F>(&self, pred: F) -> Vec<Coord>
    where
        F: Fn(Cell) -> bool,
    {
        let mut out = Vec::new();
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                if pred(self.cells[row][col]) {
                    out.push(Coord::new(row, col));
                }
            }
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
