use super::Node;
use crate::bitset::{CandidateSet, Set};
use crate::board::{Cell, Digit, House};
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// Structure that justifies a link beyond plain candidates.
///
/// Carried for explanation only, the search never looks at it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LinkPattern {
    /// `cells` hold one more digit than cells
    AlmostLockedSet {
        #[allow(missing_docs)]
        cells: Set<Cell>,
        #[allow(missing_docs)]
        digits: Set<Digit>,
    },
    /// `digits` appear in one more cell of `house` than there are digits
    AlmostHiddenSet {
        #[allow(missing_docs)]
        house: House,
        #[allow(missing_docs)]
        cells: Set<Cell>,
        #[allow(missing_docs)]
        digits: Set<Digit>,
    },
    /// Filling the rectangle would allow swapping two modifiable digits
    AvoidableRectangle {
        #[allow(missing_docs)]
        cells: Set<Cell>,
    },
}

/// An edge of the inference graph.
///
/// Links are symmetric relations. Equality and hashing ignore the order
/// of the nodes, their states and the pattern.
#[derive(Copy, Clone, Debug)]
pub struct Link {
    first: Node,
    second: Node,
    is_strong: bool,
    pattern: Option<LinkPattern>,
}

impl Link {
    /// Creates a link between two nodes.
    pub fn new(first: Node, second: Node, is_strong: bool, pattern: Option<LinkPattern>) -> Link {
        Link {
            first,
            second,
            is_strong,
            pattern,
        }
    }

    /// The node the link starts from
    pub fn first(&self) -> &Node {
        &self.first
    }

    /// The node the link leads to
    pub fn second(&self) -> &Node {
        &self.second
    }

    /// Whether this is a strong link (at least one node is true)
    /// or a weak one (at most one is true)
    pub fn is_strong(&self) -> bool {
        self.is_strong
    }

    /// The structure justifying the link, `None` for plain candidates.
    pub fn pattern(&self) -> Option<&LinkPattern> {
        self.pattern.as_ref()
    }

    fn ordered_maps(&self) -> (&CandidateSet, &CandidateSet) {
        let (a, b) = (self.first.map(), self.second.map());
        match a <= b {
            true => (a, b),
            false => (b, a),
        }
    }
}

impl PartialEq for Link {
    fn eq(&self, other: &Link) -> bool {
        self.is_strong == other.is_strong && self.ordered_maps() == other.ordered_maps()
    }
}

impl Eq for Link {}

impl Hash for Link {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.is_strong.hash(state);
        self.ordered_maps().hash(state);
    }
}

/// A node linked to the key of a [`LinkDictionary`] entry
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Neighbor {
    /// Candidates of the linked node
    pub map: CandidateSet,
    /// Structure that justifies the link
    pub pattern: Option<LinkPattern>,
}

/// Adjacency of all links of one strength, keyed by node map.
///
/// Links are stored in both directions. Inserting a link that already
/// exists keeps the first pattern. Neighbors are listed in insertion order.
#[derive(Clone, Debug, Default)]
pub struct LinkDictionary {
    entries: HashMap<CandidateSet, Vec<Neighbor>>,
    n_links: usize,
}

impl LinkDictionary {
    /// Creates an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the symmetric link `a - b`. Returns whether it was new.
    ///
    /// Links between overlapping maps are never valid and are ignored.
    pub fn insert(&mut self, a: CandidateSet, b: CandidateSet, pattern: Option<LinkPattern>) -> bool {
        debug_assert!(!a.is_empty() && !b.is_empty());
        if a.overlaps(&b) || self.contains(&a, &b) {
            return false;
        }
        self.entries.entry(a).or_default().push(Neighbor { map: b, pattern });
        self.entries.entry(b).or_default().push(Neighbor { map: a, pattern });
        self.n_links += 1;
        true
    }

    /// Checks whether `a` and `b` are linked.
    pub fn contains(&self, a: &CandidateSet, b: &CandidateSet) -> bool {
        self.neighbors(a).iter().any(|neighbor| neighbor.map == *b)
    }

    /// All nodes linked to `map`
    pub fn neighbors(&self, map: &CandidateSet) -> &[Neighbor] {
        self.entries.get(map).map_or(&[], |neighbors| &neighbors[..])
    }

    /// All maps with at least one link, in no particular order
    pub fn maps(&self) -> impl Iterator<Item = &CandidateSet> + '_ {
        self.entries.keys()
    }

    /// Number of links, each direction counted once
    pub fn len(&self) -> usize {
        self.n_links
    }

    /// Whether no link was inserted
    pub fn is_empty(&self) -> bool {
        self.n_links == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Candidate;

    fn map(cell: u8, digit: u8) -> CandidateSet {
        CandidateSet::from_candidate(Candidate::new(cell, digit))
    }

    #[test]
    fn links_are_symmetric() {
        let mut links = LinkDictionary::new();
        assert!(links.insert(map(0, 1), map(1, 1), None));
        assert!(!links.insert(map(1, 1), map(0, 1), None));
        assert!(links.contains(&map(1, 1), &map(0, 1)));
        assert_eq!(links.len(), 1);
        assert_eq!(links.neighbors(&map(0, 1)).len(), 1);
        assert!(links.neighbors(&map(2, 1)).is_empty());
    }

    #[test]
    fn first_pattern_is_kept() {
        let mut links = LinkDictionary::new();
        let pattern = LinkPattern::AvoidableRectangle {
            cells: Cell::new(0).as_set(),
        };
        links.insert(map(0, 1), map(0, 2), Some(pattern));
        links.insert(map(0, 2), map(0, 1), None);
        assert_eq!(links.neighbors(&map(0, 1))[0].pattern, Some(pattern));
        assert!(!links.insert(map(0, 1) | map(0, 2), map(0, 2), None));
    }

    #[test]
    fn link_equality_is_undirected() {
        let a = Node::new(map(0, 1), true);
        let b = Node::new(map(1, 1), false);
        let forward = Link::new(a, b, false, None);
        let backward = Link::new(b.negated(), a.negated(), false, None);
        assert_eq!(forward, backward);
        assert_ne!(forward, Link::new(a, b, true, None));
    }
}
