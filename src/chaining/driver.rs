use super::search::{Arena, Slot};
use super::{ChainPattern, ChainingOptions, ChainingRule, ChainingRuleKind, LinkDictionary, LinkGraph, Loop, Node};
use crate::board::{Candidate, Grid};
use crate::errors::ChainingError;
use log::{debug, trace, warn};
use std::collections::{BTreeSet, VecDeque};

// a continuous loop needs at least 2 strong and 2 weak links
const MIN_LOOP_LINKS: u32 = 4;

// how often a map was enqueued in one search
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Visit {
    Unseen,
    // reached straight from the seed, may be enqueued once more to close a loop
    Direct,
    Done,
}

/// Builds the link graph of a grid from its rules and searches it for chains.
#[derive(Debug)]
pub struct ChainingDriver {
    rules: Vec<Box<dyn ChainingRule>>,
    options: ChainingOptions,
}

impl Default for ChainingDriver {
    fn default() -> Self {
        ChainingDriver::from_kinds(ChainingRuleKind::ALL)
    }
}

impl ChainingDriver {
    /// Creates a driver that collects links with `rules`, in the given order.
    pub fn new(rules: Vec<Box<dyn ChainingRule>>) -> Self {
        ChainingDriver {
            rules,
            options: ChainingOptions::default(),
        }
    }

    /// Creates a driver from built-in rules with their default settings.
    pub fn from_kinds(kinds: &[ChainingRuleKind]) -> Self {
        ChainingDriver::new(kinds.iter().map(|kind| kind.rule()).collect())
    }

    /// Replaces the search limits.
    pub fn with_options(mut self, options: ChainingOptions) -> Self {
        self.options = options;
        self
    }

    /// The search limits
    pub fn options(&self) -> ChainingOptions {
        self.options
    }

    /// The rules links are collected with
    pub fn rules(&self) -> &[Box<dyn ChainingRule>] {
        &self.rules
    }

    /// Lets every rule add its strong and weak links.
    pub fn collect_links(&self, grid: &Grid) -> (LinkDictionary, LinkDictionary) {
        let mut strong = LinkDictionary::new();
        let mut weak = LinkDictionary::new();
        for rule in &self.rules {
            rule.collect_strong_links(grid, &mut strong);
            rule.collect_weak_links(grid, &mut weak);
        }
        (strong, weak)
    }

    /// Collects all links and compiles them for searching.
    pub fn build_link_graph(&self, grid: &Grid) -> LinkGraph {
        let (strong, weak) = self.collect_links(grid);
        let graph = LinkGraph::compile(&strong, &weak);
        debug!(
            target: "chaining",
            "link graph: {} nodes, {} strong links, {} weak links",
            graph.node_count(),
            graph.strong_link_count(),
            graph.weak_link_count()
        );
        graph
    }

    /// Finds all discontinuous and continuous nice loops with at least one
    /// applicable conclusion, sorted and without duplicates.
    ///
    /// Every candidate of every empty cell is tried as a seed, assumed true and
    /// assumed false. If `solution` is given, the candidates it confirms are not
    /// tried. A seed whose search fails is skipped.
    pub fn collect_chains(&self, grid: &Grid, solution: Option<&Grid>) -> Vec<ChainPattern> {
        let graph = self.build_link_graph(grid);
        let mut found = BTreeSet::new();
        let mut n_seeds = 0;

        for cell in grid.empty_cells() {
            let solved_digit = solution.and_then(|solution| solution.digit(cell));
            for digit in grid.candidates(cell) {
                if solved_digit == Some(digit) {
                    continue;
                }
                let candidate = Candidate { cell, digit };
                for &is_on in &[true, false] {
                    n_seeds += 1;
                    match self.chains_from_seed(grid, &graph, Node::from_candidate(candidate, is_on)) {
                        Ok(patterns) => found.extend(patterns.into_iter().filter(|pattern| {
                            pattern
                                .conclusions()
                                .iter()
                                .any(|conclusion| conclusion.is_applicable(grid))
                        })),
                        Err(err) => warn!(target: "chaining", "skipping seed: {}", err),
                    }
                }
            }
        }

        debug!(target: "chaining", "searched {} seeds, kept {} chains", n_seeds, found.len());
        found.into_iter().collect()
    }

    /// Searches breadth first from `seed` and returns every loop closing on it,
    /// whether or not it concludes anything.
    ///
    /// From an on-node the search follows weak links to off-nodes, from an
    /// off-node strong links to on-nodes. Reaching the seed's map in the
    /// opposite state closes a discontinuous loop, reaching it in the same
    /// state after at least 4 links closes a continuous one.
    ///
    /// Each map is enqueued once, in whichever state reaches it first. The
    /// only exception are maps reached straight from the seed: they are the
    /// last node of every continuous loop as well, so they may be enqueued a
    /// second time, from a path that doesn't already contain them.
    ///
    /// # Panics
    ///
    /// panics if `seed` is a grouped node
    pub fn chains_from_seed(
        &self,
        grid: &Grid,
        graph: &LinkGraph,
        seed: Node,
    ) -> Result<Vec<ChainPattern>, ChainingError> {
        self.search_from_seed(grid, graph, seed).map(|(patterns, _)| patterns)
    }

    fn search_from_seed(
        &self,
        grid: &Grid,
        graph: &LinkGraph,
        seed: Node,
    ) -> Result<(Vec<ChainPattern>, Arena), ChainingError> {
        let candidate = match seed.candidate() {
            Some(candidate) => candidate,
            None => panic!("grouped seed {}", seed),
        };
        let mut arena = Arena::new(candidate, self.options.max_nodes_per_seed);
        let seed_id = match graph.id(seed.map()) {
            Some(id) => id,
            None => return Ok((vec![], arena)),
        };

        let root = arena.push(Slot::root(seed_id, seed.is_on()))?;
        let mut visits = vec![Visit::Unseen; graph.node_count()];
        visits[seed_id as usize] = Visit::Done;
        let mut queue = VecDeque::new();
        queue.push_back(root);
        let mut patterns = vec![];

        while let Some(index) = queue.pop_front() {
            let slot = arena.slot(index);
            for &edge in graph.edges_from(slot.id, slot.is_on) {
                let next = arena.child(index, edge);
                if next.id == seed_id {
                    if next.is_on != seed.is_on() {
                        let chain = arena.chain(graph, index, Some(next));
                        trace!(target: "chaining", "discontinuous loop of {} links from {}", chain.len(), seed);
                        patterns.push(ChainPattern::Chain(chain));
                    } else if next.depth >= MIN_LOOP_LINKS {
                        let chain = arena.chain(graph, index, Some(next));
                        trace!(target: "chaining", "continuous loop of {} links from {}", chain.len(), seed);
                        patterns.push(ChainPattern::Loop(Loop::new(chain, grid)));
                    }
                    continue;
                }
                let visit = &mut visits[next.id as usize];
                match *visit {
                    Visit::Unseen if next.depth == 1 => *visit = Visit::Direct,
                    Visit::Unseen => *visit = Visit::Done,
                    Visit::Direct if next.depth > 1 && !arena.is_ancestor(index, next.id) => *visit = Visit::Done,
                    _ => continue,
                }
                queue.push_back(arena.push(next)?);
            }
        }
        Ok((patterns, arena))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitset::CandidateSet;
    use crate::board::{Cell, Digit};
    use crate::chaining::rules::Candidates;

    // digit 1 restricted to an x-wing in rows 1 and 5, columns 1 and 5,
    // plus r9c5 and the cells outside those rows and columns
    fn x_wing_grid() -> Grid {
        let mut grid = Grid::empty();
        let digit = Digit::new(1);
        for cell in Cell::all() {
            let row = cell.row().get();
            let col = cell.col().get();
            let in_base = row == 0 || row == 4 || col == 0 || col == 4;
            let kept = [0, 4, 36, 40, 76].contains(&cell.get());
            if in_base && !kept {
                grid.eliminate(Candidate { cell, digit });
            }
        }
        grid
    }

    #[test]
    fn x_wing_loop() {
        let grid = x_wing_grid();
        let driver = ChainingDriver::new(vec![Box::new(Candidates)]);
        let patterns = driver.collect_chains(&grid, None);
        let loops: Vec<_> = patterns
            .iter()
            .filter_map(|pattern| match pattern {
                ChainPattern::Loop(nice_loop) => Some(nice_loop),
                _ => None,
            })
            .collect();
        assert_eq!(loops.len(), 1);
        assert_eq!(
            loops[0].conclusions(),
            &[crate::Conclusion::Elimination(Candidate::new(76, 1))]
        );
        assert_eq!(loops[0].len(), 4);
    }

    #[test]
    fn maps_are_enqueued_once() {
        let line = "4.....8.5.3..........7......2.....6.....8.4......1.......6.3.7.5..2.....1.4......";
        let grid = Grid::from_str_line(line).unwrap();
        let driver = ChainingDriver::from_kinds(&[ChainingRuleKind::Candidates, ChainingRuleKind::LockedCandidates]);
        let graph = driver.build_link_graph(&grid);
        let mut n_loops = 0;

        for cell in grid.empty_cells() {
            for digit in grid.candidates(cell) {
                for &is_on in &[true, false] {
                    let seed = Node::from_candidate(Candidate { cell, digit }, is_on);
                    let (patterns, arena) = driver.search_from_seed(&grid, &graph, seed).unwrap();
                    n_loops += patterns.len();

                    let mut counts = vec![0; graph.node_count()];
                    let mut direct = vec![false; graph.node_count()];
                    for slot in arena.slots() {
                        counts[slot.id as usize] += 1;
                        direct[slot.id as usize] |= slot.depth == 1;
                    }
                    for (index, slot) in arena.slots().iter().enumerate() {
                        let id = slot.id as usize;
                        match direct[id] {
                            true => assert!(counts[id] <= 2, "{:?} from {}", graph.map(slot.id), seed),
                            false => assert_eq!(counts[id], 1, "{:?} from {}", graph.map(slot.id), seed),
                        }
                        // no map twice on one path
                        if let Some(parent) = slot.parent {
                            assert!(!arena.is_ancestor(parent, slot.id), "slot {} from {}", index, seed);
                        }
                    }
                }
            }
        }
        assert!(n_loops > 0);
    }

    #[test]
    #[should_panic]
    fn grouped_seed_panics() {
        let grid = Grid::empty();
        let driver = ChainingDriver::new(vec![Box::new(Candidates)]);
        let graph = driver.build_link_graph(&grid);
        let map: CandidateSet = vec![Candidate::new(0, 1), Candidate::new(1, 1)].into_iter().collect();
        let _ = driver.chains_from_seed(&grid, &graph, Node::new(map, true));
    }

    #[test]
    fn capacity_is_isolated_per_seed() {
        let grid = x_wing_grid();
        let driver = ChainingDriver::new(vec![Box::new(Candidates)]).with_options(ChainingOptions {
            max_nodes_per_seed: 3,
        });
        let graph = driver.build_link_graph(&grid);
        let seed = Candidate::new(0, 1);
        let err = driver
            .chains_from_seed(&grid, &graph, Node::from_candidate(seed, true))
            .unwrap_err();
        assert_eq!(err, ChainingError::CapacityExceeded { seed, limit: 3 });
        // every seed fails, the search itself still returns
        assert!(driver.collect_chains(&grid, None).is_empty());
    }
}
