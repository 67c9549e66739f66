use super::prelude::*;
use std::collections::HashSet;

/// Links through almost locked sets: `n` cells of a house holding `n + 1` digits.
///
/// If one digit of the set is missing, the remaining digits are locked into the
/// cells. For digits `a` and `b` of the set, the positions of `a` in the set and
/// the positions of `b` are therefore strongly linked. The positions of `a`
/// are weakly linked to `a` in every cell outside the set that sees all of them.
#[derive(Copy, Clone, Debug)]
pub struct AlmostLockedSets {
    /// Largest number of cells in a set
    pub max_cells: u8,
}

impl Default for AlmostLockedSets {
    fn default() -> Self {
        AlmostLockedSets { max_cells: 4 }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct AlmostLockedSet {
    cells: Set<Cell>,
    digits: Set<Digit>,
}

impl AlmostLockedSet {
    fn pattern(self) -> LinkPattern {
        LinkPattern::AlmostLockedSet {
            cells: self.cells,
            digits: self.digits,
        }
    }

    // positions of `digit` inside the set
    fn positions(self, grid: &Grid, digit: Digit) -> Set<Cell> {
        self.cells
            .into_iter()
            .filter(|&cell| grid.candidates(cell).contains(digit))
            .collect()
    }
}

impl AlmostLockedSets {
    fn find(&self, grid: &Grid) -> Vec<AlmostLockedSet> {
        let mut found = HashSet::new();
        let mut sets = vec![];
        for house in House::all() {
            let cells = house.cells() & grid.empty_cells();
            self.walk_combinations(grid, cells.into_iter(), Set::NONE, Set::NONE, &mut |set| {
                if found.insert(set.cells) {
                    sets.push(set);
                }
            });
        }
        sets
    }

    fn walk_combinations(
        &self,
        grid: &Grid,
        mut cells: SetIter<Cell>,
        cell_set: Set<Cell>,
        digits: Set<Digit>,
        on_set: &mut impl FnMut(AlmostLockedSet),
    ) {
        while let Some(cell) = cells.next() {
            let new_cell_set = cell_set | cell;
            let new_digits = digits | grid.candidates(cell);
            // more digits than cells + 1 can't shrink again
            if new_digits.len() > self.max_cells + 1 {
                continue;
            }
            if new_cell_set.len() >= 2 && new_digits.len() == new_cell_set.len() + 1 {
                on_set(AlmostLockedSet {
                    cells: new_cell_set,
                    digits: new_digits,
                });
            }
            if new_cell_set.len() < self.max_cells {
                self.walk_combinations(grid, cells.clone(), new_cell_set, new_digits, on_set);
            }
        }
    }
}

impl ChainingRule for AlmostLockedSets {
    fn collect_strong_links(&self, grid: &Grid, links: &mut LinkDictionary) {
        for set in self.find(grid) {
            let nodes: Vec<CandidateSet> = set
                .digits
                .into_iter()
                .map(|digit| CandidateSet::from_cells(set.positions(grid, digit), digit))
                .collect();
            for (i, &first) in nodes.iter().enumerate() {
                for &second in &nodes[i + 1..] {
                    links.insert(first, second, Some(set.pattern()));
                }
            }
        }
    }

    fn collect_weak_links(&self, grid: &Grid, links: &mut LinkDictionary) {
        let maps = grid.candidate_maps();
        for set in self.find(grid) {
            for digit in set.digits {
                let positions = set.positions(grid, digit);
                let node = CandidateSet::from_cells(positions, digit);
                let outside = (positions.peer_intersection() & maps[digit]).without(set.cells);
                for cell in outside {
                    links.insert(
                        node,
                        CandidateSet::from_candidate(Candidate { cell, digit }),
                        Some(set.pattern()),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restrict(grid: &mut Grid, cell: u8, digits: &[u8]) {
        for digit in Digit::all() {
            if !digits.contains(&digit.get()) {
                grid.eliminate(Candidate {
                    cell: Cell::new(cell),
                    digit,
                });
            }
        }
    }

    // r1c1 = {1,2}, r1c2 = {2,3}: 2 cells with 3 digits
    fn grid() -> Grid {
        let mut grid = Grid::empty();
        restrict(&mut grid, 0, &[1, 2]);
        restrict(&mut grid, 1, &[2, 3]);
        grid
    }

    fn map(cells: &[u8], digit: u8) -> CandidateSet {
        cells.iter().map(|&cell| Candidate::new(cell, digit)).collect()
    }

    #[test]
    fn finds_pair_with_three_digits() {
        let sets = AlmostLockedSets::default().find(&grid());
        let pair = Cell::new(0).as_set() | Cell::new(1);
        assert!(sets.iter().any(|set| set.cells == pair));
        assert!(sets.iter().all(|set| set.digits.len() == set.cells.len() + 1));
        // found in row 1 and block 1, kept once
        assert_eq!(sets.iter().filter(|set| set.cells == pair).count(), 1);
    }

    #[test]
    fn links_through_pair() {
        let rule = AlmostLockedSets::default();
        let grid = grid();

        let mut strong = LinkDictionary::new();
        rule.collect_strong_links(&grid, &mut strong);
        assert!(strong.contains(&map(&[0], 1), &map(&[0, 1], 2)));
        assert!(strong.contains(&map(&[0], 1), &map(&[1], 3)));
        assert!(strong.contains(&map(&[0, 1], 2), &map(&[1], 3)));

        let mut weak = LinkDictionary::new();
        rule.collect_weak_links(&grid, &mut weak);
        // r1c3 and r2c1 see both positions of 2, r4c1 only sees r1c1
        assert!(weak.contains(&map(&[0, 1], 2), &map(&[2], 2)));
        assert!(weak.contains(&map(&[0, 1], 2), &map(&[9], 2)));
        assert!(!weak.contains(&map(&[0, 1], 2), &map(&[27], 2)));
        assert!(weak.contains(&map(&[1], 3), &map(&[28], 3)));
    }
}
