use crate::board::{Block, Cell, Col, Digit, Row};
use crate::consts::N_CANDIDATES;
use std::fmt;

/// Represents a digit in a specific cell
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub struct Candidate {
    pub cell: Cell,
    pub digit: Digit,
}

impl Candidate {
    /// Constructs a new candidate.
    ///
    /// # Panics
    ///
    /// panics if `cell >= 81` or `!(1..=9).contains(num)`
    #[inline]
    pub fn new(cell: u8, digit: u8) -> Candidate {
        assert!(cell < 81);
        assert!(0 < digit && digit < 10);

        Candidate {
            cell: Cell::new(cell),
            digit: Digit::new(digit),
        }
    }

    /// Returns the dense index of this candidate, `cell * 9 + digit - 1`.
    #[inline]
    pub fn index(self) -> usize {
        self.cell.as_index() * 9 + self.digit.as_index()
    }

    /// Inverse of [`Candidate::index`].
    ///
    /// # Panics
    ///
    /// panics if `index >= 729`
    #[inline]
    pub fn from_index(index: usize) -> Candidate {
        assert!(index < N_CANDIDATES);
        Candidate {
            cell: Cell::new((index / 9) as u8),
            digit: Digit::from_index((index % 9) as u8),
        }
    }

    /// Returns the row of this candidate's cell
    #[inline]
    pub fn row(self) -> Row {
        self.cell.row()
    }

    /// Returns the column of this candidate's cell
    #[inline]
    pub fn col(self) -> Col {
        self.cell.col()
    }

    /// Returns the block (also called box or field) of this candidate's cell
    #[inline]
    pub fn block(self) -> Block {
        self.cell.block()
    }

    /// Checks whether both candidates can't be true at the same time,
    /// i.e. they share a cell or are the same digit in cells that see each other.
    pub fn excludes(self, other: Candidate) -> bool {
        match (self.cell == other.cell, self.digit == other.digit) {
            (true, same_digit) => !same_digit,
            (false, true) => self.cell.sees(other.cell),
            (false, false) => false,
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "r{}c{}({})",
            self.row().get() + 1,
            self.col().get() + 1,
            self.digit.get()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excludes() {
        let candidate = Candidate::new(0, 1);
        assert!(candidate.excludes(Candidate::new(0, 2)));
        // same digit in row, column and block
        assert!(candidate.excludes(Candidate::new(8, 1)));
        assert!(candidate.excludes(Candidate::new(72, 1)));
        assert!(candidate.excludes(Candidate::new(20, 1)));
        assert!(!candidate.excludes(Candidate::new(40, 1)));
        assert!(!candidate.excludes(Candidate::new(8, 2)));
        assert!(!candidate.excludes(candidate));
    }
}
