/// Whether a cell holds a digit, and where that digit came from
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum CellStatus {
    /// No digit yet, only candidates
    Empty,
    /// Digit entered while solving
    Modifiable,
    /// Digit that is part of the puzzle
    Given,
}
