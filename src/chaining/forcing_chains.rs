use super::node::NodeKey;
use super::{Chain, ChainComparison, Node, NodeComparison};
use crate::board::{Candidate, Cell, Digit, House};
use crate::conclusion::Conclusion;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

/// The alternatives a forcing chain branches on
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ForcingSource {
    /// Every candidate of a cell
    Cell(Cell),
    /// Every position of a digit in a house
    House(House, Digit),
}

/// Branches from every alternative of a source that all force the same node.
///
/// Each branch starts with its candidate on and ends in the conclusion node.
/// Equality, hashing and ordering use [`NodeComparison::IgnoreIsOn`] and
/// [`ChainComparison::Undirected`] for the branches.
#[derive(Clone, Debug)]
pub struct MultipleForcingChains {
    source: ForcingSource,
    conclusion: Node,
    branches: BTreeMap<Candidate, Chain>,
}

impl MultipleForcingChains {
    /// Combines the branches of `source` that force `conclusion`.
    ///
    /// # Panics
    ///
    /// panics if a branch doesn't start in its candidate or doesn't end in `conclusion`
    pub fn new(source: ForcingSource, conclusion: Node, branches: BTreeMap<Candidate, Chain>) -> Self {
        for (&candidate, branch) in &branches {
            assert!(branch.first() == &Node::from_candidate(candidate, true));
            assert!(branch.last() == &conclusion);
        }
        MultipleForcingChains {
            source,
            conclusion,
            branches,
        }
    }

    /// The cell or house the branches start from
    pub fn source(&self) -> ForcingSource {
        self.source
    }

    /// The node every branch ends in
    pub fn conclusion_node(&self) -> &Node {
        &self.conclusion
    }

    /// One chain per alternative of the source
    pub fn branches(&self) -> &BTreeMap<Candidate, Chain> {
        &self.branches
    }

    /// The deduction: the conclusion node is placed if it is on, eliminated otherwise.
    pub fn conclusions(&self) -> Vec<Conclusion> {
        match self.conclusion.candidate() {
            Some(candidate) if self.conclusion.is_on() => vec![Conclusion::Assignment(candidate)],
            Some(candidate) => vec![Conclusion::Elimination(candidate)],
            None => vec![],
        }
    }

    /// Total number of links over all branches
    pub fn len(&self) -> usize {
        self.branches.values().map(Chain::len).sum()
    }

    /// Forcing chains always have branches
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    fn key(&self, nodes: NodeComparison, chains: ChainComparison) -> (ForcingSource, NodeKey, Vec<Vec<NodeKey>>) {
        let branches = self.branches.values().map(|branch| branch.key(nodes, chains)).collect();
        (self.source, self.conclusion.key(nodes), branches)
    }

    /// Compares two forcing chains under the given modes.
    pub fn eq_by(&self, other: &Self, nodes: NodeComparison, chains: ChainComparison) -> bool {
        self.len() == other.len() && self.key(nodes, chains) == other.key(nodes, chains)
    }

    /// Orders two forcing chains under the given modes: fewer links first.
    pub fn cmp_by(&self, other: &Self, nodes: NodeComparison, chains: ChainComparison) -> Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| self.key(nodes, chains).cmp(&other.key(nodes, chains)))
    }

    /// Hashes consistently with [`MultipleForcingChains::eq_by`].
    pub fn hash_by<H: Hasher>(&self, state: &mut H, nodes: NodeComparison, chains: ChainComparison) {
        self.key(nodes, chains).hash(state);
    }
}

impl PartialEq for MultipleForcingChains {
    fn eq(&self, other: &Self) -> bool {
        self.eq_by(other, NodeComparison::IgnoreIsOn, ChainComparison::Undirected)
    }
}

impl Eq for MultipleForcingChains {}

impl PartialOrd for MultipleForcingChains {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MultipleForcingChains {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_by(other, NodeComparison::IgnoreIsOn, ChainComparison::Undirected)
    }
}

impl Hash for MultipleForcingChains {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_by(state, NodeComparison::IgnoreIsOn, ChainComparison::Undirected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch(seed: Candidate, conclusion: Node) -> Chain {
        let mut nodes = vec![Node::from_candidate(seed, true)];
        if conclusion.is_on() {
            let middle = Candidate { digit: Digit::new(9), ..seed };
            nodes.push(Node::from_candidate(middle, false));
        }
        nodes.push(conclusion);
        let patterns = vec![None; nodes.len() - 1];
        Chain::new(nodes, patterns)
    }

    #[test]
    fn conclusion_follows_state() {
        let target = Candidate::new(40, 7);
        let seeds = [Candidate::new(0, 1), Candidate::new(0, 2)];
        let forcing = |is_on: bool| {
            let conclusion = Node::from_candidate(target, is_on);
            let branches = seeds.iter().map(|&seed| (seed, branch(seed, conclusion))).collect();
            MultipleForcingChains::new(ForcingSource::Cell(Cell::new(0)), conclusion, branches)
        };
        let on = forcing(true);
        assert_eq!(on.conclusions(), vec![Conclusion::Assignment(target)]);
        assert_eq!(on.len(), 4);
        assert_eq!(on.branches().len(), 2);

        let off = forcing(false);
        assert_eq!(off.conclusions(), vec![Conclusion::Elimination(target)]);
        assert_eq!(off.len(), 2);
        assert_ne!(on, off);
        assert_eq!(on, forcing(true));
        assert!(off < on);
    }
}
