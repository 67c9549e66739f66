use super::prelude::*;

/// Links through almost hidden sets: `n` digits confined to `n + 1` cells of a house.
///
/// If one of the cells holds none of the digits, the digits are hidden in the
/// remaining cells. The digits' candidates in any two cells of the set are
/// therefore strongly linked. Each of those cell nodes is weakly linked to the
/// other candidates of its cell.
#[derive(Copy, Clone, Debug)]
pub struct AlmostHiddenSets {
    /// Largest number of digits in a set
    pub max_digits: u8,
}

impl Default for AlmostHiddenSets {
    fn default() -> Self {
        AlmostHiddenSets { max_digits: 3 }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct AlmostHiddenSet {
    house: House,
    cells: Set<Cell>,
    digits: Set<Digit>,
}

impl AlmostHiddenSet {
    fn pattern(self) -> LinkPattern {
        LinkPattern::AlmostHiddenSet {
            house: self.house,
            cells: self.cells,
            digits: self.digits,
        }
    }

    // the set's digits in `cell`
    fn cell_node(self, grid: &Grid, cell: Cell) -> CandidateSet {
        (grid.candidates(cell) & self.digits)
            .into_iter()
            .map(|digit| Candidate { cell, digit })
            .collect()
    }
}

impl AlmostHiddenSets {
    fn find(&self, grid: &Grid) -> Vec<AlmostHiddenSet> {
        let maps = grid.candidate_maps();
        let mut sets = vec![];
        for house in House::all() {
            let house_cells = house.cells();
            let digits: Set<Digit> = Digit::all()
                .filter(|&digit| !(maps[digit] & house_cells).is_empty())
                .collect();
            self.walk_combinations(
                house,
                &|digit| maps[digit] & house_cells,
                digits.into_iter(),
                Set::NONE,
                Set::NONE,
                &mut sets,
            );
        }
        sets
    }

    fn walk_combinations(
        &self,
        house: House,
        positions: &impl Fn(Digit) -> Set<Cell>,
        mut digits: SetIter<Digit>,
        digit_set: Set<Digit>,
        cells: Set<Cell>,
        sets: &mut Vec<AlmostHiddenSet>,
    ) {
        while let Some(digit) = digits.next() {
            let new_digit_set = digit_set | digit;
            let new_cells = cells | positions(digit);
            if new_cells.len() > self.max_digits + 1 {
                continue;
            }
            if new_digit_set.len() >= 2 && new_cells.len() == new_digit_set.len() + 1 {
                sets.push(AlmostHiddenSet {
                    house,
                    cells: new_cells,
                    digits: new_digit_set,
                });
            }
            if new_digit_set.len() < self.max_digits {
                self.walk_combinations(house, positions, digits.clone(), new_digit_set, new_cells, sets);
            }
        }
    }
}

impl ChainingRule for AlmostHiddenSets {
    fn collect_strong_links(&self, grid: &Grid, links: &mut LinkDictionary) {
        for set in self.find(grid) {
            let nodes: Vec<CandidateSet> = set
                .cells
                .into_iter()
                .map(|cell| set.cell_node(grid, cell))
                .collect();
            for (i, &first) in nodes.iter().enumerate() {
                for &second in &nodes[i + 1..] {
                    links.insert(first, second, Some(set.pattern()));
                }
            }
        }
    }

    fn collect_weak_links(&self, grid: &Grid, links: &mut LinkDictionary) {
        for set in self.find(grid) {
            for cell in set.cells {
                let node = set.cell_node(grid, cell);
                for digit in grid.candidates(cell).without(set.digits) {
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
