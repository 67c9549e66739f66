use super::prelude::*;

/// Weak links that avoid a deadly rectangle of modifiable digits.
///
/// The rectangle spans two rows, two columns and exactly two blocks. If two
/// of its cells were filled while solving, completing the other two so that
/// the four cells hold only two digits would allow swapping them, and the
/// sudoku would have two solutions. The two candidates completing it can't
/// both be true.
#[derive(Copy, Clone, Debug, Default)]
pub struct AvoidableRectangles;

// corners are ordered r1c1, r1c2, r2c1, r2c2
// pairs of filled corners and the corners opposite of them
const SIDES: [((usize, usize), (usize, usize)); 4] = [
    ((0, 1), (2, 3)),
    ((2, 3), (0, 1)),
    ((0, 2), (1, 3)),
    ((1, 3), (0, 2)),
];
const DIAGONALS: [((usize, usize), (usize, usize)); 2] = [((0, 3), (1, 2)), ((1, 2), (0, 3))];

fn modifiable_digit(grid: &Grid, cell: Cell) -> Option<Digit> {
    match grid.status(cell) {
        CellStatus::Modifiable => grid.digit(cell),
        _ => None,
    }
}

impl ChainingRule for AvoidableRectangles {
    fn collect_weak_links(&self, grid: &Grid, links: &mut LinkDictionary) {
        let cell = |row: u8, col: u8| Cell::new(row * 9 + col);
        for row1 in 0..8 {
            for row2 in row1 + 1..9 {
                let rows_in_same_chute = row1 / 3 == row2 / 3;
                for col1 in 0..8 {
                    for col2 in col1 + 1..9 {
                        let cols_in_same_chute = col1 / 3 == col2 / 3;
                        if !(rows_in_same_chute ^ cols_in_same_chute) {
                            continue;
                        }
                        let corners = [cell(row1, col1), cell(row1, col2), cell(row2, col1), cell(row2, col2)];
                        collect_rectangle(grid, corners, links);
                    }
                }
            }
        }
    }
}

fn collect_rectangle(grid: &Grid, corners: [Cell; 4], links: &mut LinkDictionary) {
    let cells: Set<Cell> = corners.iter().cloned().collect();
    let pattern = Some(LinkPattern::AvoidableRectangle { cells });
    let empty = |corner: usize| grid.status(corners[corner]) == CellStatus::Empty;
    let candidate = |corner: usize, digit: Digit| Candidate {
        cell: corners[corner],
        digit,
    };

    // the same digit on one diagonal, the other diagonal empty
    for &((a1, a2), (b1, b2)) in DIAGONALS.iter() {
        match (modifiable_digit(grid, corners[a1]), modifiable_digit(grid, corners[a2])) {
            (Some(first), Some(second)) if first == second => (),
            _ => continue,
        }
        if !empty(b1) || !empty(b2) {
            continue;
        }
        let shared = grid.candidates(corners[b1]) & grid.candidates(corners[b2]);
        for other in shared {
            links.insert(
                CandidateSet::from_candidate(candidate(b1, other)),
                CandidateSet::from_candidate(candidate(b2, other)),
                pattern,
            );
        }
    }

    // two different digits on one side, the opposite side empty
    for &((a1, a2), (b1, b2)) in SIDES.iter() {
        let (first, second) = match (modifiable_digit(grid, corners[a1]), modifiable_digit(grid, corners[a2])) {
            (Some(first), Some(second)) => (first, second),
            _ => continue,
        };
        if !empty(b1) || !empty(b2) {
            continue;
        }
        // b1 is opposite of a1 and would take a2's digit
        let completing = (candidate(b1, second), candidate(b2, first));
        if grid.contains(completing.0) && grid.contains(completing.1) {
            links.insert(
                CandidateSet::from_candidate(completing.0),
                CandidateSet::from_candidate(completing.1),
                pattern,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(cell: u8, digit: u8) -> CandidateSet {
        CandidateSet::from_candidate(Candidate::new(cell, digit))
    }

    #[test]
    fn diagonal_rectangle() {
        // r1c1 and r2c4 hold a modifiable 1, r1c4 and r2c1 are empty
        let mut grid = Grid::empty();
        grid.set_digit(Cell::new(0), Digit::new(1));
        grid.set_digit(Cell::new(12), Digit::new(1));
        let mut weak = LinkDictionary::new();
        AvoidableRectangles.collect_weak_links(&grid, &mut weak);
        assert!(weak.contains(&map(3, 2), &map(9, 2)));
        assert!(weak.contains(&map(3, 9), &map(9, 9)));
        assert!(!weak.contains(&map(3, 1), &map(9, 1)));
    }

    #[test]
    fn side_rectangle() {
        // r1c1 = 1 and r1c4 = 2, both modifiable
        let mut grid = Grid::empty();
        grid.set_digit(Cell::new(0), Digit::new(1));
        grid.set_digit(Cell::new(3), Digit::new(2));
        let mut weak = LinkDictionary::new();
        AvoidableRectangles.collect_weak_links(&grid, &mut weak);
        // r2c1 = 2 and r2c4 = 1 would complete the rectangle
        assert!(weak.contains(&map(9, 2), &map(12, 1)));
        // rows 1 and 4 span four blocks
        assert!(!weak.contains(&map(27, 2), &map(30, 1)));
        assert!(weak.neighbors(&map(9, 1)).iter().all(|neighbor| neighbor.map != map(12, 2)));
    }

    #[test]
    fn givens_are_ignored() {
        let mut line = ['.'; 81];
        line[0] = '1';
        line[12] = '1';
        let line: String = line.iter().collect();
        let grid = Grid::from_str_line(&line).unwrap();
        let mut weak = LinkDictionary::new();
        AvoidableRectangles.collect_weak_links(&grid, &mut weak);
        assert!(weak.is_empty());
    }
}
