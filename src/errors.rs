//! Error types of the crate
use crate::board::{col, row, Candidate};

#[cfg(doc)]
use crate::{chaining::ChainingOptions, Grid};

/// Error for [`Grid::from_bytes`]
#[derive(Debug, thiserror::Error)]
#[error("byte array contains entries >9")]
pub struct FromBytesError(pub(crate) ());

/// An invalid entry encountered while reading a grid line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct InvalidEntry {
    /// Cell number goes from 0..=80, 0..=8 for first line, 9..=17 for 2nd and so on
    pub cell: u8,
    /// The parsed invalid char
    pub ch: char,
}

impl InvalidEntry {
    /// Row index from 0..=8, topmost row is 0
    #[inline]
    pub fn row(self) -> u8 {
        row(self.cell)
    }
    /// Column index from 0..=8, leftmost col is 0
    #[inline]
    pub fn col(self) -> u8 {
        col(self.cell)
    }
}

/// Error for [`Grid::from_str_line`]
#[derive(Clone, Debug, Eq, Hash, PartialEq, thiserror::Error)]
pub enum LineParseError {
    /// Accepted values are numbers 1...9 and '0', '.' or '_' for empty cells
    #[error("cell {} contains invalid character '{}'", .0.cell, .0.ch)]
    InvalidEntry(InvalidEntry),
    /// Returns number of cells supplied
    #[error("sudoku contains {0} cells instead of required 81")]
    NotEnoughCells(u8),
    /// Returned if >=82 valid cell positions are supplied
    #[error("sudoku contains more than 81 cells or is missing comment delimiter")]
    TooManyCells,
}

/// Failure of the search started from a single seed
#[derive(Clone, Debug, Eq, Hash, PartialEq, thiserror::Error)]
pub enum ChainingError {
    /// The search created more nodes than [`ChainingOptions::max_nodes_per_seed`] allows
    #[error("search from {seed} created more than {limit} nodes")]
    CapacityExceeded {
        /// Candidate the search started from
        seed: Candidate,
        /// Configured node limit
        limit: usize,
    },
}
