use super::graph::{LinkGraph, NodeId};
use super::search::{Arena, Slot};
use super::{Chain, ChainingDriver, ForcingSource, MultipleForcingChains, Node};
use crate::board::{Candidate, Digit, Grid, House};
use crate::conclusion::Conclusion;
use crate::errors::ChainingError;
use log::{debug, trace, warn};
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

/// Every node a single candidate forces when it is assumed true.
///
/// Each node is reached at most once in each state, over a shortest path.
/// Queries take the [`LinkGraph`] the reach was computed on.
#[derive(Clone, Debug)]
pub struct Reach {
    seed: Candidate,
    arena: Arena,
    on: Vec<Option<u32>>,
    off: Vec<Option<u32>>,
    is_contradictory: bool,
}

impl Reach {
    /// The candidate that was assumed true
    pub fn seed(&self) -> Candidate {
        self.seed
    }

    /// Whether some map was reached both on and off. The search stops there.
    pub fn is_contradictory(&self) -> bool {
        self.is_contradictory
    }

    /// Number of nodes the search created
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Checks whether the seed forces `node`.
    pub fn reaches(&self, graph: &LinkGraph, node: &Node) -> bool {
        self.slot_index(graph, node).is_some()
    }

    /// The chain from the seed to `node`, if the seed forces it.
    /// The seed itself has no chain.
    pub fn chain_to(&self, graph: &LinkGraph, node: &Node) -> Option<Chain> {
        let index = self.slot_index(graph, node)?;
        if self.arena.slot(index).parent.is_none() {
            return None;
        }
        Some(self.arena.chain(graph, index, None))
    }

    /// Ids of the maps reached in the given state, ascending
    pub(crate) fn ids(&self, is_on: bool) -> Vec<NodeId> {
        let slots = if is_on { &self.on } else { &self.off };
        slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(id, _)| id as NodeId)
            .collect()
    }

    fn slot_index(&self, graph: &LinkGraph, node: &Node) -> Option<u32> {
        let id = graph.id(node.map())?;
        let slots = if node.is_on() { &self.on } else { &self.off };
        slots.get(id as usize).cloned().flatten()
    }
}

// what a seed reaches, kept between sources sharing the seed
struct Reached {
    on: Vec<NodeId>,
    off: Vec<NodeId>,
}

impl ChainingDriver {
    /// Assumes `seed` true and follows every link breadth first, recording
    /// each map in each state the first time it is reached.
    pub fn reach_from_seed(&self, graph: &LinkGraph, seed: Candidate) -> Result<Reach, ChainingError> {
        let mut reach = Reach {
            seed,
            arena: Arena::new(seed, self.options().max_nodes_per_seed),
            on: vec![None; graph.node_count()],
            off: vec![None; graph.node_count()],
            is_contradictory: false,
        };
        let seed_id = match graph.candidate_id(seed) {
            Some(id) => id,
            None => return Ok(reach),
        };
        let root = reach.arena.push(Slot::root(seed_id, true))?;
        reach.on[seed_id as usize] = Some(root);
        let mut queue = VecDeque::new();
        queue.push_back(root);

        'search: while let Some(index) = queue.pop_front() {
            let slot = reach.arena.slot(index);
            for &edge in graph.edges_from(slot.id, slot.is_on) {
                let next = reach.arena.child(index, edge);
                let (same, opposite) = match next.is_on {
                    true => (&reach.on, &reach.off),
                    false => (&reach.off, &reach.on),
                };
                if same[next.id as usize].is_some() {
                    continue;
                }
                if opposite[next.id as usize].is_some() {
                    trace!(target: "chaining", "{} forces {:?} both on and off", seed, graph.map(next.id));
                    reach.is_contradictory = true;
                    break 'search;
                }
                let pushed = reach.arena.push(next)?;
                match next.is_on {
                    true => reach.on[next.id as usize] = Some(pushed),
                    false => reach.off[next.id as usize] = Some(pushed),
                }
                queue.push_back(pushed);
            }
        }
        Ok(reach)
    }

    /// Finds all multiple forcing chains with an applicable conclusion,
    /// sorted and without duplicates.
    pub fn collect_multiple_forcing_chains(&self, grid: &Grid) -> Vec<MultipleForcingChains> {
        let graph = self.build_link_graph(grid);
        self.multiple_forcing_chains_in(grid, &graph)
    }

    /// Like [`ChainingDriver::collect_multiple_forcing_chains`], on an already built graph.
    ///
    /// Every empty cell with more than 2 candidates and every digit with more
    /// than 2 positions in a house is a source. Each alternative of a source
    /// is assumed true in turn, and single candidates every alternative forces
    /// into the same state are concluded. A source with an alternative that
    /// fails or contradicts itself is skipped.
    pub fn multiple_forcing_chains_in(&self, grid: &Grid, graph: &LinkGraph) -> Vec<MultipleForcingChains> {
        let sources = forcing_sources(grid);
        let mut reached: HashMap<Candidate, Option<Reached>> = HashMap::new();
        let mut found = BTreeSet::new();

        for (source, seeds) in &sources {
            for &seed in seeds {
                reached
                    .entry(seed)
                    .or_insert_with(|| self.compact_reach(graph, seed));
            }
            let branches: Option<Vec<&Reached>> = seeds.iter().map(|seed| reached[seed].as_ref()).collect();
            let branches = match branches {
                Some(branches) => branches,
                None => continue,
            };

            let on = common_ids(branches.iter().map(|reach| &reach.on[..]));
            let off = common_ids(branches.iter().map(|reach| &reach.off[..]));
            let mut conclusions = vec![];
            let targets = on.into_iter().map(|id| (id, true)).chain(off.into_iter().map(|id| (id, false)));
            for (id, is_on) in targets {
                let candidate = match graph.map(id).single() {
                    Some(candidate) => candidate,
                    None => continue,
                };
                if seeds.contains(&candidate) {
                    continue;
                }
                let conclusion = match is_on {
                    true => Conclusion::Assignment(candidate),
                    false => Conclusion::Elimination(candidate),
                };
                if conclusion.is_applicable(grid) {
                    conclusions.push(Node::from_candidate(candidate, is_on));
                }
            }
            if conclusions.is_empty() {
                continue;
            }
            trace!(target: "chaining", "{:?} forces {} nodes", source, conclusions.len());

            let reaches = match seeds
                .iter()
                .map(|&seed| self.reach_from_seed(graph, seed))
                .collect::<Result<Vec<_>, _>>()
            {
                Ok(reaches) => reaches,
                Err(err) => {
                    warn!(target: "chaining", "skipping seed: {}", err);
                    continue;
                }
            };
            for node in conclusions {
                let branches: Option<BTreeMap<Candidate, Chain>> = reaches
                    .iter()
                    .map(|reach| reach.chain_to(graph, &node).map(|chain| (reach.seed(), chain)))
                    .collect();
                if let Some(branches) = branches {
                    found.insert(MultipleForcingChains::new(*source, node, branches));
                }
            }
        }

        debug!(
            target: "chaining",
            "searched {} forcing sources, kept {} forcing chains",
            sources.len(),
            found.len()
        );
        found.into_iter().collect()
    }

    fn compact_reach(&self, graph: &LinkGraph, seed: Candidate) -> Option<Reached> {
        match self.reach_from_seed(graph, seed) {
            Ok(reach) if reach.is_contradictory() => None,
            Ok(reach) => Some(Reached {
                on: reach.ids(true),
                off: reach.ids(false),
            }),
            Err(err) => {
                warn!(target: "chaining", "skipping seed: {}", err);
                None
            }
        }
    }
}

fn forcing_sources(grid: &Grid) -> Vec<(ForcingSource, Vec<Candidate>)> {
    let mut sources = vec![];
    for cell in grid.empty_cells() {
        let digits = grid.candidates(cell);
        if digits.len() > 2 {
            let seeds = digits.into_iter().map(|digit| Candidate { cell, digit }).collect();
            sources.push((ForcingSource::Cell(cell), seeds));
        }
    }
    for house in House::all() {
        for digit in Digit::all() {
            let cells = grid.house_candidates(house, digit);
            if cells.len() > 2 {
                let seeds = cells.into_iter().map(|cell| Candidate { cell, digit }).collect();
                sources.push((ForcingSource::House(house, digit), seeds));
            }
        }
    }
    sources
}

// ids in every list, all lists sorted ascending
fn common_ids<'a>(mut lists: impl Iterator<Item = &'a [NodeId]>) -> Vec<NodeId> {
    let mut common = match lists.next() {
        Some(first) => first.to_vec(),
        None => return vec![],
    };
    for list in lists {
        common.retain(|id| list.binary_search(id).is_ok());
    }
    common
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitset::CandidateSet;
    use crate::board::Cell;
    use crate::chaining::LinkDictionary;

    fn map(cell: u8, digit: u8) -> CandidateSet {
        CandidateSet::from_candidate(Candidate::new(cell, digit))
    }

    // r1c1 limited to 1, 2 and 3
    fn grid() -> Grid {
        let mut grid = Grid::empty();
        for digit in 4..=9 {
            grid.eliminate(Candidate::new(0, digit));
        }
        grid
    }

    // every digit of r1c1 turns off one candidate that is strongly linked to r5c5 = 7
    fn converging_links(branches: u8) -> (LinkDictionary, LinkDictionary) {
        let mut strong = LinkDictionary::new();
        let mut weak = LinkDictionary::new();
        let target = map(40, 7);
        for (digit, &cell) in (1..=3).zip([10, 20, 30].iter()) {
            weak.insert(map(0, digit), map(cell, digit + 3), None);
            if digit <= branches {
                strong.insert(map(cell, digit + 3), target, None);
            }
        }
        (strong, weak)
    }

    #[test]
    fn branches_converge() {
        let (strong, weak) = converging_links(3);
        let graph = LinkGraph::compile(&strong, &weak);
        let found = ChainingDriver::default().multiple_forcing_chains_in(&grid(), &graph);
        assert_eq!(found.len(), 1);
        let forcing = &found[0];
        assert_eq!(forcing.source(), ForcingSource::Cell(Cell::new(0)));
        assert_eq!(forcing.conclusions(), vec![Conclusion::Assignment(Candidate::new(40, 7))]);
        assert_eq!(forcing.branches().len(), 3);
        assert!(forcing.branches().values().all(|branch| branch.len() == 2));
        assert_eq!(forcing.len(), 6);
    }

    #[test]
    fn missing_branch_concludes_nothing() {
        let (strong, weak) = converging_links(2);
        let graph = LinkGraph::compile(&strong, &weak);
        assert!(ChainingDriver::default().multiple_forcing_chains_in(&grid(), &graph).is_empty());
    }

    #[test]
    fn contradictory_branch_skips_source() {
        let (mut strong, mut weak) = converging_links(3);
        // r1c1 = 3 turns off both r6c6 = 8 and r7c7 = 8, which are strongly linked
        weak.insert(map(0, 3), map(50, 8), None);
        weak.insert(map(0, 3), map(60, 8), None);
        strong.insert(map(60, 8), map(50, 8), None);
        let graph = LinkGraph::compile(&strong, &weak);
        let driver = ChainingDriver::default();

        let reach = driver.reach_from_seed(&graph, Candidate::new(0, 3)).unwrap();
        assert!(reach.is_contradictory());
        assert!(driver.multiple_forcing_chains_in(&grid(), &graph).is_empty());
    }

    #[test]
    fn reach_builds_shortest_chains() {
        let (strong, weak) = converging_links(3);
        let graph = LinkGraph::compile(&strong, &weak);
        let driver = ChainingDriver::default();
        let seed = Candidate::new(0, 1);
        let reach = driver.reach_from_seed(&graph, seed).unwrap();
        assert!(!reach.is_contradictory());
        assert_eq!(reach.node_count(), 3);

        let target = Node::from_candidate(Candidate::new(40, 7), true);
        assert!(reach.reaches(&graph, &target));
        assert!(!reach.reaches(&graph, &target.negated()));
        let chain = reach.chain_to(&graph, &target).unwrap();
        assert_eq!(chain.first(), &Node::from_candidate(seed, true));
        assert_eq!(chain.nodes()[1], Node::from_candidate(Candidate::new(10, 4), false));
        assert!(reach.chain_to(&graph, &Node::from_candidate(seed, true)).is_none());
    }

    #[test]
    fn reach_respects_capacity() {
        let (strong, weak) = converging_links(3);
        let graph = LinkGraph::compile(&strong, &weak);
        let driver = ChainingDriver::default().with_options(crate::chaining::ChainingOptions {
            max_nodes_per_seed: 2,
        });
        let seed = Candidate::new(0, 1);
        assert_eq!(
            driver.reach_from_seed(&graph, seed).unwrap_err(),
            ChainingError::CapacityExceeded { seed, limit: 2 }
        );
        // every seed of r1c1 fails, so the source is skipped
        assert!(driver.multiple_forcing_chains_in(&grid(), &graph).is_empty());
    }
}
