use super::node::NodeKey;
use super::{Link, LinkPattern, Node, NodeComparison};
use crate::bitset::{CandidateSet, Set};
use crate::board::{Candidate, Cell, Grid};
use crate::conclusion::Conclusion;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// How chains are compared with each other
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChainComparison {
    /// Chains are equal only if traversed in the same direction
    Directed,
    /// A chain equals its reversal, loops also equal their rotations
    Undirected,
}

/// An alternating path of nodes.
///
/// Consecutive nodes are joined by a weak link when leaving an on-node and
/// by a strong link when leaving an off-node, so the states alternate.
/// If the first and last node share their map with opposite states,
/// the chain is a discontinuous nice loop.
///
/// Equality, hashing and ordering use [`NodeComparison::IgnoreIsOn`] and
/// [`ChainComparison::Undirected`].
#[derive(Clone, Debug)]
pub struct Chain {
    nodes: Vec<Node>,
    patterns: Vec<Option<LinkPattern>>,
}

impl Chain {
    /// Creates a chain from its nodes and the patterns of the links between them.
    ///
    /// # Panics
    ///
    /// panics if there are fewer than 2 nodes, if the number of patterns
    /// doesn't match the number of links or if the states don't alternate
    pub fn new(nodes: Vec<Node>, patterns: Vec<Option<LinkPattern>>) -> Chain {
        assert!(nodes.len() >= 2, "chain needs at least 2 nodes");
        assert_eq!(nodes.len(), patterns.len() + 1);
        assert!(
            nodes.windows(2).all(|pair| pair[0].is_on() != pair[1].is_on()),
            "chain states don't alternate"
        );
        Chain { nodes, patterns }
    }

    /// All nodes from start to end
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The node the chain starts from
    pub fn first(&self) -> &Node {
        &self.nodes[0]
    }

    /// The node the chain ends in
    pub fn last(&self) -> &Node {
        &self.nodes[self.nodes.len() - 1]
    }

    /// Number of links
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Chains always hold at least one link
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The links between consecutive nodes
    pub fn links(&self) -> Vec<Link> {
        self.nodes
            .windows(2)
            .zip(self.patterns.iter())
            .map(|(pair, &pattern)| Link::new(pair[0], pair[1], !pair[0].is_on(), pattern))
            .collect()
    }

    /// Whether any node was reached through a pattern link
    pub fn is_advanced(&self) -> bool {
        self.nodes.iter().any(Node::is_advanced)
    }

    /// Whether first and last node share a map with opposite states
    pub fn is_discontinuous_loop(&self) -> bool {
        self.first().map_eq(self.last()) && self.first().is_on() != self.last().is_on()
    }

    /// The deductions of a discontinuous nice loop: the seed is eliminated if
    /// assuming it leads to its negation, and placed in the opposite case.
    /// Open chains conclude nothing by themselves.
    pub fn conclusions(&self) -> Vec<Conclusion> {
        if !self.is_discontinuous_loop() {
            return vec![];
        }
        let candidate = match self.first().candidate() {
            Some(candidate) => candidate,
            None => return vec![],
        };
        match self.first().is_on() {
            true => vec![Conclusion::Elimination(candidate)],
            false => vec![Conclusion::Assignment(candidate)],
        }
    }

    /// The chain traversed from the other end. The states flip, because the
    /// roles of strong and weak links swap in the reversed direction.
    pub fn reversed(&self) -> Chain {
        Chain {
            nodes: self.nodes.iter().rev().map(Node::negated).collect(),
            patterns: self.patterns.iter().rev().cloned().collect(),
        }
    }

    pub(crate) fn key(&self, nodes: NodeComparison, chains: ChainComparison) -> Vec<NodeKey> {
        let forward: Vec<_> = self.nodes.iter().map(|node| node.key(nodes)).collect();
        match chains {
            ChainComparison::Directed => forward,
            ChainComparison::Undirected => {
                let backward = self
                    .nodes
                    .iter()
                    .rev()
                    .map(|node| node.negated().key(nodes))
                    .collect();
                std::cmp::min(forward, backward)
            }
        }
    }

    /// Compares two chains under the given modes.
    pub fn eq_by(&self, other: &Chain, nodes: NodeComparison, chains: ChainComparison) -> bool {
        self.len() == other.len() && self.key(nodes, chains) == other.key(nodes, chains)
    }

    /// Orders two chains under the given modes: shorter chains first.
    pub fn cmp_by(&self, other: &Chain, nodes: NodeComparison, chains: ChainComparison) -> Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| self.key(nodes, chains).cmp(&other.key(nodes, chains)))
    }

    /// Hashes the chain consistently with [`Chain::eq_by`].
    pub fn hash_by<H: Hasher>(&self, state: &mut H, nodes: NodeComparison, chains: ChainComparison) {
        self.key(nodes, chains).hash(state);
    }
}

impl PartialEq for Chain {
    fn eq(&self, other: &Chain) -> bool {
        self.eq_by(other, NodeComparison::IgnoreIsOn, ChainComparison::Undirected)
    }
}

impl Eq for Chain {}

impl PartialOrd for Chain {
    fn partial_cmp(&self, other: &Chain) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Chain {
    fn cmp(&self, other: &Chain) -> Ordering {
        self.cmp_by(other, NodeComparison::IgnoreIsOn, ChainComparison::Undirected)
    }
}

impl Hash for Chain {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_by(state, NodeComparison::IgnoreIsOn, ChainComparison::Undirected)
    }
}

/// A continuous nice loop: an alternating chain whose last node is its first.
///
/// Every link of the loop has exactly one true node, so every weak link
/// acts as a strong one. Its eliminations are computed once, against the
/// grid the loop was found in.
#[derive(Clone, Debug)]
pub struct Loop {
    chain: Chain,
    conclusions: Vec<Conclusion>,
}

impl Loop {
    /// Closes `chain` into a loop and derives its eliminations from `grid`.
    ///
    /// # Panics
    ///
    /// panics if the chain doesn't end in its first node
    pub fn new(chain: Chain, grid: &Grid) -> Loop {
        assert!(chain.first() == chain.last(), "loop doesn't close");
        let conclusions = loop_eliminations(&chain, grid);
        Loop { chain, conclusions }
    }

    /// The loop as a chain, starting and ending in the same node
    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    /// All nodes, the closing node included twice
    pub fn nodes(&self) -> &[Node] {
        self.chain.nodes()
    }

    /// Number of links
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Loops always hold at least one link
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The eliminations of the loop
    pub fn conclusions(&self) -> &[Conclusion] {
        &self.conclusions
    }

    pub(crate) fn key(&self, nodes: NodeComparison, chains: ChainComparison) -> Vec<NodeKey> {
        let open = &self.chain.nodes()[1..];
        let rotations = |sequence: Vec<NodeKey>| {
            (0..sequence.len()).map(move |start| {
                let mut rotated = sequence[start..].to_vec();
                rotated.extend_from_slice(&sequence[..start]);
                rotated
            })
        };
        let forward: Vec<_> = open.iter().map(|node| node.key(nodes)).collect();
        let best = rotations(forward).min();
        let best = match chains {
            ChainComparison::Directed => best,
            ChainComparison::Undirected => {
                let backward = open
                    .iter()
                    .rev()
                    .map(|node| node.negated().key(nodes))
                    .collect();
                std::cmp::min(best, rotations(backward).min())
            }
        };
        best.unwrap_or_default()
    }

    /// Compares two loops under the given modes.
    pub fn eq_by(&self, other: &Loop, nodes: NodeComparison, chains: ChainComparison) -> bool {
        self.len() == other.len() && self.key(nodes, chains) == other.key(nodes, chains)
    }

    /// Orders two loops under the given modes: shorter loops first.
    pub fn cmp_by(&self, other: &Loop, nodes: NodeComparison, chains: ChainComparison) -> Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| self.key(nodes, chains).cmp(&other.key(nodes, chains)))
    }

    /// Hashes the loop consistently with [`Loop::eq_by`].
    pub fn hash_by<H: Hasher>(&self, state: &mut H, nodes: NodeComparison, chains: ChainComparison) {
        self.key(nodes, chains).hash(state);
    }
}

// A weak link inside the loop has exactly one true node.
// Same digit: every cell seeing all cells of both nodes loses the digit.
// Same cell: the cell loses every other candidate.
fn loop_eliminations(chain: &Chain, grid: &Grid) -> Vec<Conclusion> {
    let mut eliminations = CandidateSet::EMPTY;
    for pair in chain.nodes().windows(2).filter(|pair| pair[0].is_on()) {
        let union = *pair[0].map() | *pair[1].map();
        if let Ok(Some(digit)) = union.digits().unique() {
            let seeing = union.cells().peer_intersection() & grid.candidates_map(digit);
            eliminations |= CandidateSet::from_cells(seeing, digit);
        }
        if let Ok(Some(cell)) = union.cells().unique() {
            let others = grid.candidates(cell).without(union.digits());
            eliminations.extend(others.into_iter().map(|digit| Candidate { cell, digit }));
        }
    }
    eliminations
        .into_iter()
        .map(Conclusion::Elimination)
        .filter(|conclusion| conclusion.is_applicable(grid))
        .collect()
}

/// Result of the single chain search
///
/// Ordered by length first, then discontinuous before continuous loops.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChainPattern {
    /// A discontinuous nice loop
    Chain(Chain),
    /// A continuous nice loop
    Loop(Loop),
}

impl ChainPattern {
    /// All nodes of the pattern
    pub fn nodes(&self) -> &[Node] {
        match self {
            ChainPattern::Chain(chain) => chain.nodes(),
            ChainPattern::Loop(nice_loop) => nice_loop.nodes(),
        }
    }

    /// Number of links
    pub fn len(&self) -> usize {
        match self {
            ChainPattern::Chain(chain) => chain.len(),
            ChainPattern::Loop(nice_loop) => nice_loop.len(),
        }
    }

    /// Patterns always hold at least one link
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The links between consecutive nodes
    pub fn links(&self) -> Vec<Link> {
        match self {
            ChainPattern::Chain(chain) => chain.links(),
            ChainPattern::Loop(nice_loop) => nice_loop.chain().links(),
        }
    }

    /// The deductions of the pattern
    pub fn conclusions(&self) -> Vec<Conclusion> {
        match self {
            ChainPattern::Chain(chain) => chain.conclusions(),
            ChainPattern::Loop(nice_loop) => nice_loop.conclusions().to_vec(),
        }
    }

    /// Cells of all nodes
    pub fn cells(&self) -> Set<Cell> {
        self.nodes()
            .iter()
            .fold(Set::NONE, |cells, node| cells | node.cells())
    }
}

impl PartialOrd for ChainPattern {
    fn partial_cmp(&self, other: &ChainPattern) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ChainPattern {
    fn cmp(&self, other: &ChainPattern) -> Ordering {
        use self::ChainPattern::*;
        self.len().cmp(&other.len()).then_with(|| match (self, other) {
            (Chain(a), Chain(b)) => a.cmp(b),
            (Loop(a), Loop(b)) => a.cmp(b),
            (Chain(_), Loop(_)) => Ordering::Less,
            (Loop(_), Chain(_)) => Ordering::Greater,
        })
    }
}

impl PartialEq for Loop {
    fn eq(&self, other: &Loop) -> bool {
        self.eq_by(other, NodeComparison::IgnoreIsOn, ChainComparison::Undirected)
    }
}

impl Eq for Loop {}

impl PartialOrd for Loop {
    fn partial_cmp(&self, other: &Loop) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Loop {
    fn cmp(&self, other: &Loop) -> Ordering {
        self.cmp_by(other, NodeComparison::IgnoreIsOn, ChainComparison::Undirected)
    }
}

impl Hash for Loop {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_by(state, NodeComparison::IgnoreIsOn, ChainComparison::Undirected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Digit;

    fn node(cell: u8, digit: u8, is_on: bool) -> Node {
        Node::from_candidate(Candidate::new(cell, digit), is_on)
    }

    fn chain(nodes: Vec<Node>) -> Chain {
        let patterns = vec![None; nodes.len() - 1];
        Chain::new(nodes, patterns)
    }

    // r1c1(1) on => r1c2(1) off => r1c2(2) on => r1c1(2) off ...
    fn discontinuous() -> Chain {
        chain(vec![
            node(0, 1, true),
            node(1, 1, false),
            node(1, 2, true),
            node(10, 2, false),
            node(10, 1, true),
            node(0, 1, false),
        ])
    }

    #[test]
    fn discontinuous_loop_eliminates_seed() {
        let chain = discontinuous();
        assert!(chain.is_discontinuous_loop());
        assert_eq!(chain.conclusions(), vec![Conclusion::Elimination(Candidate::new(0, 1))]);
        let links = chain.links();
        assert_eq!(links.len(), 5);
        assert!(links.windows(2).all(|pair| pair[0].is_strong() != pair[1].is_strong()));
        assert!(!links[0].is_strong());

        let reversed = chain.reversed();
        assert!(reversed.first().is_on());
        assert_eq!(reversed.conclusions(), chain.conclusions());
    }

    #[test]
    fn undirected_equality() {
        let chain = discontinuous();
        let reversed = chain.reversed();
        assert_eq!(chain, reversed);
        assert!(chain.eq_by(&reversed, NodeComparison::IncludeIsOn, ChainComparison::Undirected));
        assert!(!chain.eq_by(&reversed, NodeComparison::IgnoreIsOn, ChainComparison::Directed));
        assert_eq!(chain.cmp(&reversed), Ordering::Equal);
    }

    #[test]
    #[should_panic]
    fn states_must_alternate() {
        chain(vec![node(0, 1, true), node(1, 1, true)]);
    }

    fn x_wing_grid() -> Grid {
        // digit 1 only in columns 1 and 5 of rows 1 and 5, plus one extra cell
        let mut grid = Grid::empty();
        let digit = Digit::new(1);
        let kept = [0, 4, 36, 40, 76];
        for cell in Cell::all() {
            let in_free_area = cell.row().get() % 4 != 0 && cell.col().get() % 4 != 0;
            if !in_free_area && !kept.contains(&cell.get()) {
                grid.eliminate(Candidate { cell, digit });
            }
        }
        grid
    }

    #[test]
    fn loop_eliminations_from_weak_links() {
        let grid = x_wing_grid();
        // r1c1 = r1c5 - r5c5 = r5c1 - r1c1
        let nodes = vec![
            node(0, 1, false),
            node(4, 1, true),
            node(40, 1, false),
            node(36, 1, true),
            node(0, 1, false),
        ];
        let nice_loop = Loop::new(chain(nodes), &grid);
        assert_eq!(
            nice_loop.conclusions(),
            &[Conclusion::Elimination(Candidate::new(76, 1))]
        );
    }

    #[test]
    fn loops_equal_their_rotations() {
        let grid = x_wing_grid();
        let first = Loop::new(
            chain(vec![
                node(0, 1, false),
                node(4, 1, true),
                node(40, 1, false),
                node(36, 1, true),
                node(0, 1, false),
            ]),
            &grid,
        );
        let rotated = Loop::new(
            chain(vec![
                node(40, 1, false),
                node(36, 1, true),
                node(0, 1, false),
                node(4, 1, true),
                node(40, 1, false),
            ]),
            &grid,
        );
        let backwards = Loop::new(
            chain(vec![
                node(4, 1, false),
                node(0, 1, true),
                node(36, 1, false),
                node(40, 1, true),
                node(4, 1, false),
            ]),
            &grid,
        );
        assert_eq!(first, rotated);
        assert_eq!(first, backwards);
        assert!(first.eq_by(&backwards, NodeComparison::IncludeIsOn, ChainComparison::Undirected));
        assert!(!first.eq_by(&backwards, NodeComparison::IncludeIsOn, ChainComparison::Directed));
        assert!(first.eq_by(&rotated, NodeComparison::IncludeIsOn, ChainComparison::Directed));
    }
}
