use super::{LinkDictionary, LinkPattern};
use crate::bitset::CandidateSet;
use crate::board::Candidate;
use std::collections::HashMap;

/// Index of a node map in a [`LinkGraph`]
pub(crate) type NodeId = u32;

#[derive(Copy, Clone, Debug)]
pub(crate) struct Edge {
    pub to: NodeId,
    pub pattern: Option<u32>,
}

/// The strong and weak [`LinkDictionary`] compiled into integer adjacency lists.
///
/// Node ids follow the order of the maps, so compiling the same dictionaries
/// always yields the same graph.
#[derive(Clone, Debug)]
pub struct LinkGraph {
    maps: Vec<CandidateSet>,
    ids: HashMap<CandidateSet, NodeId>,
    strong: Vec<Vec<Edge>>,
    weak: Vec<Vec<Edge>>,
    patterns: Vec<LinkPattern>,
    n_strong_links: usize,
    n_weak_links: usize,
}

impl LinkGraph {
    /// Compiles both dictionaries into one graph.
    pub fn compile(strong: &LinkDictionary, weak: &LinkDictionary) -> LinkGraph {
        let mut maps: Vec<CandidateSet> = strong.maps().chain(weak.maps()).cloned().collect();
        maps.sort();
        maps.dedup();
        let ids: HashMap<_, _> = maps
            .iter()
            .enumerate()
            .map(|(id, &map)| (map, id as NodeId))
            .collect();

        let mut patterns = vec![];
        let mut pattern_ids = HashMap::new();
        let mut adjacency = |links: &LinkDictionary| -> Vec<Vec<Edge>> {
            maps.iter()
                .map(|map| {
                    links
                        .neighbors(map)
                        .iter()
                        .map(|neighbor| Edge {
                            to: ids[&neighbor.map],
                            pattern: neighbor.pattern.map(|pattern| {
                                *pattern_ids.entry(pattern).or_insert_with(|| {
                                    patterns.push(pattern);
                                    patterns.len() as u32 - 1
                                })
                            }),
                        })
                        .collect()
                })
                .collect()
        };
        let strong_edges = adjacency(strong);
        let weak_edges = adjacency(weak);

        LinkGraph {
            maps,
            ids,
            strong: strong_edges,
            weak: weak_edges,
            patterns,
            n_strong_links: strong.len(),
            n_weak_links: weak.len(),
        }
    }

    /// Number of distinct node maps
    pub fn node_count(&self) -> usize {
        self.maps.len()
    }

    /// Number of strong links
    pub fn strong_link_count(&self) -> usize {
        self.n_strong_links
    }

    /// Number of weak links
    pub fn weak_link_count(&self) -> usize {
        self.n_weak_links
    }

    /// Checks whether `map` takes part in any link.
    pub fn contains(&self, map: &CandidateSet) -> bool {
        self.ids.contains_key(map)
    }

    pub(crate) fn id(&self, map: &CandidateSet) -> Option<NodeId> {
        self.ids.get(map).cloned()
    }

    pub(crate) fn candidate_id(&self, candidate: Candidate) -> Option<NodeId> {
        self.id(&CandidateSet::from_candidate(candidate))
    }

    pub(crate) fn map(&self, id: NodeId) -> &CandidateSet {
        &self.maps[id as usize]
    }

    pub(crate) fn strong(&self, id: NodeId) -> &[Edge] {
        &self.strong[id as usize]
    }

    pub(crate) fn weak(&self, id: NodeId) -> &[Edge] {
        &self.weak[id as usize]
    }

    /// Edges leaving a node in the given state: weak from on, strong from off.
    pub(crate) fn edges_from(&self, id: NodeId, is_on: bool) -> &[Edge] {
        match is_on {
            true => self.weak(id),
            false => self.strong(id),
        }
    }

    pub(crate) fn pattern(&self, pattern: Option<u32>) -> Option<LinkPattern> {
        pattern.map(|index| self.patterns[index as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(cell: u8, digit: u8) -> CandidateSet {
        CandidateSet::from_candidate(Candidate::new(cell, digit))
    }

    #[test]
    fn compiles_both_strengths() {
        let mut strong = LinkDictionary::new();
        let mut weak = LinkDictionary::new();
        strong.insert(map(0, 1), map(0, 2), None);
        weak.insert(map(0, 1), map(0, 2), None);
        weak.insert(map(0, 1), map(1, 1), None);

        let graph = LinkGraph::compile(&strong, &weak);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.strong_link_count(), 1);
        assert_eq!(graph.weak_link_count(), 2);

        let id = graph.id(&map(0, 1)).unwrap();
        assert_eq!(graph.strong(id).len(), 1);
        assert_eq!(graph.weak(id).len(), 2);
        let other = graph.id(&map(1, 1)).unwrap();
        assert!(graph.strong(other).is_empty());
        assert_eq!(*graph.map(graph.weak(other)[0].to), map(0, 1));
        assert!(!graph.contains(&map(2, 1)));
    }

    #[test]
    fn ids_are_stable() {
        let mut first = LinkDictionary::new();
        first.insert(map(5, 1), map(6, 1), None);
        first.insert(map(1, 1), map(2, 1), None);
        let mut second = LinkDictionary::new();
        second.insert(map(2, 1), map(1, 1), None);
        second.insert(map(6, 1), map(5, 1), None);

        let empty = LinkDictionary::new();
        let a = LinkGraph::compile(&first, &empty);
        let b = LinkGraph::compile(&second, &empty);
        assert_eq!(a.maps, b.maps);
        assert_eq!(a.id(&map(1, 1)), Some(0));
    }
}
