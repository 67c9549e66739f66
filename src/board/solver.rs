// Backtracking solver used to find the solution of a grid.
//
// Digits in use are tracked per row, column and block as 9 bit masks.
// Guesses are always made in the empty cell with the fewest candidates,
// a cell with no candidates left ends the branch.
use crate::board::{block, col, row};

#[derive(Clone, Copy)]
struct SolverState {
    cells: [u8; 81],
    rows: [u16; 9],
    cols: [u16; 9],
    blocks: [u16; 9],
}

impl SolverState {
    fn from_digits(digits: &[u8; 81]) -> Option<Self> {
        let mut state = SolverState {
            cells: [0; 81],
            rows: [0; 9],
            cols: [0; 9],
            blocks: [0; 9],
        };
        for (cell, &digit) in (0..81u8).zip(digits.iter()) {
            if digit != 0 {
                if state.possibilities(cell) & 1 << (digit - 1) == 0 {
                    return None;
                }
                state.insert(cell, digit);
            }
        }
        Some(state)
    }

    #[inline]
    fn possibilities(&self, cell: u8) -> u16 {
        let used = self.rows[row(cell) as usize]
            | self.cols[col(cell) as usize]
            | self.blocks[block(cell) as usize];
        !used & 0o777
    }

    #[inline]
    fn insert(&mut self, cell: u8, digit: u8) {
        let bit = 1 << (digit - 1);
        self.cells[cell as usize] = digit;
        self.rows[row(cell) as usize] |= bit;
        self.cols[col(cell) as usize] |= bit;
        self.blocks[block(cell) as usize] |= bit;
    }

    // empty cell with the fewest possibilities
    // or None, if all cells are filled
    fn guess_location(&self) -> Option<(u8, u16)> {
        let mut best: Option<(u8, u16)> = None;
        for cell in (0..81u8).filter(|&cell| self.cells[cell as usize] == 0) {
            let possibilities = self.possibilities(cell);
            let n_poss = possibilities.count_ones();
            if best.map_or(true, |(_, poss)| n_poss < poss.count_ones()) {
                best = Some((cell, possibilities));
                if n_poss <= 1 {
                    break;
                }
            }
        }
        best
    }

    fn solve(&self, solutions: &mut Vec<[u8; 81]>, limit: usize) {
        let (cell, mut possibilities) = match self.guess_location() {
            Some(location) => location,
            None => {
                solutions.push(self.cells);
                return;
            }
        };
        while possibilities != 0 && solutions.len() < limit {
            let lowest_bit = possibilities & (!possibilities + 1);
            possibilities ^= lowest_bit;
            let digit = lowest_bit.trailing_zeros() as u8 + 1;

            let mut state = *self;
            state.insert(cell, digit);
            state.solve(solutions, limit);
        }
    }
}

/// Finds up to `limit` solutions for the given digits, `0` for empty cells.
pub(crate) fn solve_at_most(digits: &[u8; 81], limit: usize) -> Vec<[u8; 81]> {
    let mut solutions = vec![];
    if let Some(state) = SolverState::from_digits(digits) {
        if limit > 0 {
            state.solve(&mut solutions, limit);
        }
    }
    solutions
}
