use crate::bitset::{CandidateSet, Set};
use crate::board::{solver, Candidate, Cell, CellStatus, Digit, House};
use crate::conclusion::Conclusion;
use crate::errors::{FromBytesError, InvalidEntry, LineParseError};
use crate::helper::{CellArray, DigitArray};
use std::fmt;

const CANDIDATES: u16 = 0o777;
const EMPTY: u16 = 1 << 9;
const MODIFIABLE: u16 = 1 << 10;
const GIVEN: u16 = 1 << 11;

/// Candidate state of a sudoku.
///
/// Every cell is a packed mask: the cell status in bits 9..12 and the
/// candidate digits in bits 0..9. A filled cell has exactly one candidate bit,
/// its digit. Writing a digit removes it from the candidates of all peers.
/// All other views are computed from the masks on demand.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Grid(CellArray<u16>);

impl Grid {
    /// Creates a grid without digits where every cell holds all candidates.
    pub fn empty() -> Grid {
        Grid(CellArray([EMPTY | CANDIDATES; 81]))
    }

    /// Creates a grid from its givens, `0` for empty cells.
    /// The candidates of empty cells are derived from their peers.
    pub fn from_bytes(bytes: [u8; 81]) -> Result<Grid, FromBytesError> {
        if bytes.iter().any(|&byte| byte > 9) {
            return Err(FromBytesError(()));
        }
        Ok(Grid::from_givens(&bytes))
    }

    /// Reads a grid from a line of 81 cells. Accepted values are numbers 1...9
    /// for givens and '0', '.' or '_' for empty cells. Anything after the 81st
    /// cell must be separated by a space or tab.
    pub fn from_str_line(line: &str) -> Result<Grid, LineParseError> {
        let mut bytes = [0; 81];
        let mut chars = line.chars();
        for (cell, byte) in bytes.iter_mut().enumerate() {
            let ch = chars
                .next()
                .ok_or(LineParseError::NotEnoughCells(cell as u8))?;
            *byte = match ch {
                '1'..='9' => ch as u8 - b'0',
                '.' | '0' | '_' => 0,
                _ => {
                    return Err(LineParseError::InvalidEntry(InvalidEntry {
                        cell: cell as u8,
                        ch,
                    }))
                }
            };
        }
        match chars.next() {
            None | Some(' ') | Some('\t') | Some('\r') | Some('\n') => Ok(Grid::from_givens(&bytes)),
            Some(_) => Err(LineParseError::TooManyCells),
        }
    }

    fn from_givens(bytes: &[u8; 81]) -> Grid {
        let mut grid = Grid::empty();
        for (cell, &byte) in Cell::all().zip(bytes.iter()) {
            if let Some(digit) = Digit::new_checked(byte) {
                grid.place(cell, digit, GIVEN);
            }
        }
        grid
    }

    /// Returns the digits of all cells, `0` for empty cells.
    pub fn to_bytes(&self) -> [u8; 81] {
        let mut bytes = [0; 81];
        for (cell, byte) in Cell::all().zip(bytes.iter_mut()) {
            *byte = self.digit(cell).map_or(0, Digit::get);
        }
        bytes
    }

    fn place(&mut self, cell: Cell, digit: Digit, status: u16) {
        let digit_bit = digit.as_set().bits();
        self.0[cell] = status | digit_bit;
        for peer in cell.neighbors() {
            let mask = &mut self.0[peer];
            if *mask & EMPTY != 0 {
                *mask &= !digit_bit;
            }
        }
    }

    /// Enters `digit` into `cell` as a modifiable digit and removes it
    /// from the candidates of all peers.
    pub fn set_digit(&mut self, cell: Cell, digit: Digit) {
        debug_assert!(self.status(cell) != CellStatus::Given);
        self.place(cell, digit, MODIFIABLE);
    }

    /// Removes a candidate from an empty cell. Returns whether it was present.
    pub fn eliminate(&mut self, candidate: Candidate) -> bool {
        if !self.contains(candidate) {
            return false;
        }
        self.0[candidate.cell] &= !candidate.digit.as_set().bits();
        true
    }

    /// Applies an assignment or elimination.
    pub fn apply(&mut self, conclusion: Conclusion) {
        match conclusion {
            Conclusion::Assignment(Candidate { cell, digit }) => self.set_digit(cell, digit),
            Conclusion::Elimination(candidate) => {
                self.eliminate(candidate);
            }
        }
    }

    /// Returns the status of `cell`.
    pub fn status(&self, cell: Cell) -> CellStatus {
        let mask = self.0[cell];
        if mask & EMPTY != 0 {
            CellStatus::Empty
        } else if mask & MODIFIABLE != 0 {
            CellStatus::Modifiable
        } else {
            debug_assert!(mask & GIVEN != 0);
            CellStatus::Given
        }
    }

    /// Returns the digit in `cell`, if it is filled.
    pub fn digit(&self, cell: Cell) -> Option<Digit> {
        let mask = self.0[cell];
        if mask & EMPTY != 0 {
            return None;
        }
        Set::<Digit>::from_bits(mask & CANDIDATES).unique().unwrap_or(None)
    }

    /// Returns the candidates of `cell`. Filled cells have no candidates.
    pub fn candidates(&self, cell: Cell) -> Set<Digit> {
        let mask = self.0[cell];
        match mask & EMPTY != 0 {
            true => Set::from_bits(mask & CANDIDATES),
            false => Set::NONE,
        }
    }

    /// Checks whether `candidate` is a candidate of an empty cell.
    pub fn contains(&self, candidate: Candidate) -> bool {
        self.candidates(candidate.cell).contains(candidate.digit)
    }

    /// Returns all cells without a digit.
    pub fn empty_cells(&self) -> Set<Cell> {
        Cell::all()
            .filter(|&cell| self.0[cell] & EMPTY != 0)
            .collect()
    }

    /// Returns all empty cells with exactly two candidates.
    pub fn bivalue_cells(&self) -> Set<Cell> {
        Cell::all()
            .filter(|&cell| self.candidates(cell).len() == 2)
            .collect()
    }

    /// Returns all empty cells that have `digit` as a candidate.
    pub fn candidates_map(&self, digit: Digit) -> Set<Cell> {
        Cell::all()
            .filter(|&cell| self.candidates(cell).contains(digit))
            .collect()
    }

    /// Returns [`Grid::candidates_map`] for every digit at once.
    pub(crate) fn candidate_maps(&self) -> DigitArray<Set<Cell>> {
        let mut maps = DigitArray([Set::NONE; 9]);
        for cell in Cell::all() {
            for digit in self.candidates(cell) {
                maps[digit] |= cell;
            }
        }
        maps
    }

    /// Returns the empty cells of `house` that have `digit` as a candidate.
    pub fn house_candidates(&self, house: House, digit: Digit) -> Set<Cell> {
        house
            .cells()
            .into_iter()
            .filter(|&cell| self.candidates(cell).contains(digit))
            .collect()
    }

    /// Returns all cells filled with `digit`.
    pub fn values_map(&self, digit: Digit) -> Set<Cell> {
        Cell::all()
            .filter(|&cell| self.digit(cell) == Some(digit))
            .collect()
    }

    /// Returns every candidate of every empty cell.
    pub fn all_candidates(&self) -> CandidateSet {
        Cell::all()
            .flat_map(|cell| {
                self.candidates(cell)
                    .into_iter()
                    .map(move |digit| Candidate { cell, digit })
            })
            .collect()
    }

    /// Checks whether every cell is filled.
    pub fn is_solved(&self) -> bool {
        self.empty_cells().is_empty()
    }

    /// Solves the grid from its digits, ignoring eliminated candidates.
    /// Returns `None` if there is no solution or more than one.
    /// Givens stay givens, all other digits of the solution are modifiable.
    pub fn solution(&self) -> Option<Grid> {
        let mut solutions = solver::solve_at_most(&self.to_bytes(), 2);
        if solutions.len() != 1 {
            return None;
        }
        let digits = solutions.pop()?;
        let mut solution = *self;
        for (cell, &digit) in Cell::all().zip(digits.iter()) {
            if self.status(cell) == CellStatus::Empty {
                solution.place(cell, Digit::new(digit), MODIFIABLE);
            }
        }
        Some(solution)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Grid::empty()
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for cell in Cell::all() {
            match self.digit(cell) {
                Some(digit) => write!(f, "{}", digit.get())?,
                None => f.write_str(".")?,
            }
        }
        Ok(())
    }
}
