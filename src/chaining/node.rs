use crate::bitset::{CandidateSet, Set};
use crate::board::{Candidate, Cell, Digit};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A proposition in the inference graph: at least one candidate of `map` is
/// the digit of its cell (`on`), or none of them is (`off`).
///
/// Nodes with more than one candidate are grouped nodes. They either share a
/// digit over several cells (locked candidates, almost locked sets) or a cell
/// over several digits (almost hidden sets).
///
/// Equality and hashing compare the map and the on/off state, never
/// `is_advanced`. Use [`NodeComparison`] to ignore the state as well.
#[derive(Copy, Clone)]
pub struct Node {
    map: CandidateSet,
    is_on: bool,
    is_advanced: bool,
}

/// How [`Node`]s are compared inside chains
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeComparison {
    /// Only the candidate maps are compared
    IgnoreIsOn,
    /// Maps and on/off states are compared
    IncludeIsOn,
}

/// Comparison key of a single node under some [`NodeComparison`]
pub(crate) type NodeKey = (CandidateSet, Option<bool>);

impl Node {
    /// Creates a node from a candidate map.
    ///
    /// # Panics
    ///
    /// panics if `map` is empty
    pub fn new(map: CandidateSet, is_on: bool) -> Node {
        assert!(!map.is_empty(), "node without candidates");
        Node {
            map,
            is_on,
            is_advanced: false,
        }
    }

    /// Creates a node for a single candidate.
    pub fn from_candidate(candidate: Candidate, is_on: bool) -> Node {
        Node::new(CandidateSet::from_candidate(candidate), is_on)
    }

    pub(crate) fn with_advanced(mut self, is_advanced: bool) -> Node {
        self.is_advanced = is_advanced;
        self
    }

    /// The candidates of this node
    pub fn map(&self) -> &CandidateSet {
        &self.map
    }

    /// Whether the node is asserted true
    pub fn is_on(&self) -> bool {
        self.is_on
    }

    /// Whether the node was reached through a link justified by a pattern
    /// other than plain candidates
    pub fn is_advanced(&self) -> bool {
        self.is_advanced
    }

    /// Whether this node holds more than one candidate
    pub fn is_grouped(&self) -> bool {
        self.map.len() > 1
    }

    /// The only candidate of this node, if it isn't grouped.
    pub fn candidate(&self) -> Option<Candidate> {
        self.map.single()
    }

    /// The cells of all candidates
    pub fn cells(&self) -> Set<Cell> {
        self.map.cells()
    }

    /// The shared digit of all candidates, if there is one.
    pub fn digit(&self) -> Option<Digit> {
        self.map.digits().unique().unwrap_or(None)
    }

    /// The same map with the opposite state
    pub fn negated(&self) -> Node {
        Node {
            is_on: !self.is_on,
            ..*self
        }
    }

    /// Compares only the candidate maps.
    pub fn map_eq(&self, other: &Node) -> bool {
        self.map == other.map
    }

    /// Compares the nodes under `comparison`.
    pub fn eq_by(&self, other: &Node, comparison: NodeComparison) -> bool {
        self.key(comparison) == other.key(comparison)
    }

    pub(crate) fn key(&self, comparison: NodeComparison) -> NodeKey {
        match comparison {
            NodeComparison::IgnoreIsOn => (self.map, None),
            NodeComparison::IncludeIsOn => (self.map, Some(self.is_on)),
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Node) -> bool {
        self.map == other.map && self.is_on == other.is_on
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.map.hash(state);
        self.is_on.hash(state);
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if !self.is_on {
            f.write_str("!")?;
        }
        let mut first = true;
        for candidate in self.map.iter() {
            if !first {
                f.write_str("|")?;
            }
            first = false;
            write!(f, "{}", candidate)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_modes() {
        let candidate = Candidate::new(10, 4);
        let on = Node::from_candidate(candidate, true);
        let off = on.negated();
        assert!(on.map_eq(&off));
        assert_ne!(on, off);
        assert!(on.eq_by(&off, NodeComparison::IgnoreIsOn));
        assert!(!on.eq_by(&off, NodeComparison::IncludeIsOn));
        assert_eq!(on, on.with_advanced(true));
        assert_eq!(on.candidate(), Some(candidate));
        assert_eq!(on.to_string(), "r2c2(4)");
        assert_eq!(off.to_string(), "!r2c2(4)");
    }

    #[test]
    fn grouped_nodes() {
        let cells = Cell::new(0).as_set() | Cell::new(1);
        let group = Node::new(CandidateSet::from_cells(cells, Digit::new(3)), false);
        assert!(group.is_grouped());
        assert_eq!(group.candidate(), None);
        assert_eq!(group.digit(), Some(Digit::new(3)));
        assert_eq!(group.cells(), cells);

        let in_cell: CandidateSet = vec![Candidate::new(0, 1), Candidate::new(0, 2)]
            .into_iter()
            .collect();
        let in_cell = Node::new(in_cell, true);
        assert_eq!(in_cell.digit(), None);
        assert_eq!(in_cell.cells(), Cell::new(0).as_set());
    }
}
