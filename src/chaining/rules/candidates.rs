use super::prelude::*;

/// Links between single candidates.
///
/// Strong: the two candidates of a bivalue cell and the two positions of a
/// digit in a house. Weak: any two candidates of a cell and any two positions
/// of a digit in a house.
#[derive(Copy, Clone, Debug, Default)]
pub struct Candidates;

impl ChainingRule for Candidates {
    fn collect_strong_links(&self, grid: &Grid, links: &mut LinkDictionary) {
        for cell in grid.bivalue_cells() {
            let mut digits = grid.candidates(cell).into_iter();
            if let (Some(first), Some(second)) = (digits.next(), digits.next()) {
                links.insert(
                    CandidateSet::from_candidate(Candidate { cell, digit: first }),
                    CandidateSet::from_candidate(Candidate { cell, digit: second }),
                    None,
                );
            }
        }

        let maps = grid.candidate_maps();
        for digit in Digit::all() {
            for house in House::all() {
                let positions = maps[digit] & house.cells();
                if positions.len() != 2 {
                    continue;
                }
                let mut cells = positions.into_iter();
                if let (Some(first), Some(second)) = (cells.next(), cells.next()) {
                    links.insert(
                        CandidateSet::from_candidate(Candidate { cell: first, digit }),
                        CandidateSet::from_candidate(Candidate { cell: second, digit }),
                        None,
                    );
                }
            }
        }
    }

    fn collect_weak_links(&self, grid: &Grid, links: &mut LinkDictionary) {
        let maps = grid.candidate_maps();
        for first in grid.all_candidates() {
            let Candidate { cell, digit } = first;
            let in_cell = grid.candidates(cell).into_iter().map(|digit| Candidate { cell, digit });
            let in_peers = (cell.peers() & maps[digit]).into_iter().map(|cell| Candidate { cell, digit });
            for second in in_cell.chain(in_peers).filter(|&second| second > first && first.excludes(second)) {
                links.insert(
                    CandidateSet::from_candidate(first),
                    CandidateSet::from_candidate(second),
                    None,
                );
            }
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
    fn bivalue_and_bilocal() {
        let mut grid = Grid::empty();
        for digit in 3..=9 {
            grid.eliminate(Candidate::new(0, digit));
        }
        // digit 5 only in r1c2 and r1c3 of row 1
        for cell in 3..9 {
            grid.eliminate(Candidate::new(cell, 5));
        }

        let mut strong = LinkDictionary::new();
        Candidates.collect_strong_links(&grid, &mut strong);
        assert!(strong.contains(&map(0, 1), &map(0, 2)));
        assert!(strong.contains(&map(2, 5), &map(1, 5)));
        assert_eq!(strong.len(), 2);

        let mut weak = LinkDictionary::new();
        Candidates.collect_weak_links(&grid, &mut weak);
        assert!(weak.contains(&map(0, 1), &map(0, 2)));
        assert!(weak.contains(&map(1, 1), &map(73, 1)));
        assert!(!weak.contains(&map(1, 1), &map(80, 1)));
        assert!(!weak.contains(&map(0, 3), &map(1, 3)));
    }

    #[test]
    fn empty_grid_link_counts() {
        let grid = Grid::empty();
        let mut strong = LinkDictionary::new();
        let mut weak = LinkDictionary::new();
        Candidates.collect_strong_links(&grid, &mut strong);
        Candidates.collect_weak_links(&grid, &mut weak);
        assert!(strong.is_empty());
        // 36 digit pairs per cell, 20 peers per cell and digit counted from both sides
        assert_eq!(weak.len(), 81 * 36 + 9 * 81 * 20 / 2);
    }
}
