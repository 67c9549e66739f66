//! Placements and eliminations derived from chains
use crate::board::{Candidate, CellStatus, Grid};
use std::fmt;

/// A deduction that can be applied to a [`Grid`]
///
/// Ordered so that assignments come before eliminations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Conclusion {
    /// The candidate is the digit of its cell
    Assignment(Candidate),
    /// The candidate can be removed from its cell
    Elimination(Candidate),
}

impl Conclusion {
    /// The candidate this conclusion is about
    pub fn candidate(self) -> Candidate {
        match self {
            Conclusion::Assignment(candidate) | Conclusion::Elimination(candidate) => candidate,
        }
    }

    /// Whether applying this conclusion would change `grid`.
    pub fn is_applicable(self, grid: &Grid) -> bool {
        let candidate = self.candidate();
        match self {
            Conclusion::Assignment(_) => grid.status(candidate.cell) == CellStatus::Empty,
            Conclusion::Elimination(_) => grid.contains(candidate),
        }
    }

    /// Whether this conclusion agrees with a solved grid.
    pub fn is_consistent_with(self, solution: &Grid) -> bool {
        let candidate = self.candidate();
        let solved_digit = solution.digit(candidate.cell);
        match self {
            Conclusion::Assignment(_) => solved_digit == Some(candidate.digit),
            Conclusion::Elimination(_) => solved_digit != Some(candidate.digit),
        }
    }
}

impl fmt::Display for Conclusion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Conclusion::Assignment(candidate) => {
                write!(f, "r{}c{} = {}", candidate.row().get() + 1, candidate.col().get() + 1, candidate.digit.get())
            }
            Conclusion::Elimination(candidate) => {
                write!(f, "r{}c{} <> {}", candidate.row().get() + 1, candidate.col().get() + 1, candidate.digit.get())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, Digit};

    #[test]
    fn applicability() {
        let mut grid = Grid::empty();
        grid.set_digit(Cell::new(0), Digit::new(1));
        let placed = Candidate::new(0, 1);
        let peer = Candidate::new(1, 1);
        let free = Candidate::new(1, 2);

        assert!(!Conclusion::Assignment(placed).is_applicable(&grid));
        assert!(!Conclusion::Elimination(peer).is_applicable(&grid));
        assert!(Conclusion::Elimination(free).is_applicable(&grid));
        assert!(Conclusion::Assignment(free).is_applicable(&grid));

        grid.apply(Conclusion::Elimination(free));
        assert!(!grid.contains(free));
        assert!(Conclusion::Assignment(placed) < Conclusion::Elimination(placed));
        assert_eq!(Conclusion::Elimination(free).to_string(), "r1c2 <> 2");
    }
}
