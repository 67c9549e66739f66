use super::prelude::*;

/// Links involving grouped nodes: the positions of a digit in one miniline.
///
/// Strong: a house whose positions fall into exactly two minilines
/// (or one miniline and a single cell). Weak: a group and any other
/// position or disjoint group in its line and its block.
#[derive(Copy, Clone, Debug, Default)]
pub struct LockedCandidates;

// the ways a house splits into minilines
// lines split by block, blocks split by row and by column
fn partitions(house: House) -> Vec<Vec<MiniLine>> {
    let minilines: Vec<MiniLine> = MiniLine::in_house(house).collect();
    match house.is_line() {
        true => vec![minilines],
        false => {
            let (mini_rows, mini_cols): (Vec<_>, Vec<_>) =
                minilines.into_iter().partition(|miniline| miniline.is_row());
            vec![mini_rows, mini_cols]
        }
    }
}

impl ChainingRule for LockedCandidates {
    fn collect_strong_links(&self, grid: &Grid, links: &mut LinkDictionary) {
        let maps = grid.candidate_maps();
        for digit in Digit::all() {
            for house in House::all() {
                let positions = maps[digit] & house.cells();
                if positions.len() < 3 {
                    continue;
                }
                for partition in partitions(house) {
                    let parts: Vec<Set<Cell>> = partition
                        .iter()
                        .map(|miniline| miniline.cells() & positions)
                        .filter(|part| !part.is_empty())
                        .collect();
                    if parts.len() == 2 {
                        links.insert(
                            CandidateSet::from_cells(parts[0], digit),
                            CandidateSet::from_cells(parts[1], digit),
                            None,
                        );
                    }
                }
            }
        }
    }

    fn collect_weak_links(&self, grid: &Grid, links: &mut LinkDictionary) {
        let maps = grid.candidate_maps();
        for digit in Digit::all() {
            for house in House::all() {
                let positions = maps[digit] & house.cells();
                let groups: Vec<Set<Cell>> = MiniLine::in_house(house)
                    .map(|miniline| miniline.cells() & positions)
                    .filter(|group| group.len() >= 2)
                    .collect();

                for (i, &group) in groups.iter().enumerate() {
                    let group_map = CandidateSet::from_cells(group, digit);
                    for cell in positions.without(group) {
                        links.insert(
                            group_map,
                            CandidateSet::from_candidate(Candidate { cell, digit }),
                            None,
                        );
                    }
                    for &other in groups[i + 1..].iter().filter(|other| !other.overlaps(group)) {
                        links.insert(group_map, CandidateSet::from_cells(other, digit), None);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(cells: &[u8]) -> Set<Cell> {
        cells.iter().map(|&cell| Cell::new(cell)).collect()
    }

    fn group(positions: &[u8]) -> CandidateSet {
        CandidateSet::from_cells(cells(positions), Digit::new(1))
    }

    // digit 1 in row 1 only in r1c1, r1c2 and r1c7
    fn grid() -> Grid {
        let mut grid = Grid::empty();
        for cell in [2, 3, 4, 5, 7, 8].iter() {
            grid.eliminate(Candidate::new(*cell, 1));
        }
        grid
    }

    #[test]
    fn group_and_single_in_line() {
        let mut strong = LinkDictionary::new();
        LockedCandidates.collect_strong_links(&grid(), &mut strong);
        assert!(strong.contains(&group(&[0, 1]), &group(&[6])));
        assert!(strong.maps().all(|map| map.digits() == Digit::new(1).as_set()));
    }

    #[test]
    fn groups_see_line_and_block() {
        let mut weak = LinkDictionary::new();
        LockedCandidates.collect_weak_links(&grid(), &mut weak);
        let row_group = group(&[0, 1]);
        assert!(weak.contains(&row_group, &group(&[6])));
        assert!(weak.contains(&row_group, &group(&[9])));
        assert!(weak.contains(&row_group, &group(&[9, 10, 11])));
        assert!(weak.contains(&row_group, &group(&[18, 19, 20])));
        // the mini column r1c1-r3c1 shares r1c1 with the row group
        assert!(!weak.contains(&row_group, &group(&[0, 9, 18])));
        assert!(!weak.contains(&group(&[11, 20]), &group(&[9, 10, 11])));
        assert!(weak.contains(&group(&[11, 20]), &group(&[0, 9, 18])));
    }
}
