//! Chain search over strong and weak links between candidates
//!
//! A [`ChainingDriver`] lets its [`ChainingRule`]s fill two [`LinkDictionary`]s,
//! compiles them into a [`LinkGraph`] and searches it breadth first:
//!
//! - from single candidates, assumed true or false, for discontinuous
//!   and continuous nice loops ([`ChainPattern`])
//! - from every candidate of a cell or every position of a digit in a house
//!   for nodes they all force ([`MultipleForcingChains`])
mod chain;
mod driver;
mod forcing;
mod forcing_chains;
mod graph;
mod link;
mod node;
pub mod rules;
mod search;

pub use self::{
    chain::{Chain, ChainComparison, ChainPattern, Loop},
    driver::ChainingDriver,
    forcing::Reach,
    forcing_chains::{ForcingSource, MultipleForcingChains},
    graph::LinkGraph,
    link::{Link, LinkDictionary, LinkPattern, Neighbor},
    node::{Node, NodeComparison},
    rules::ChainingRule,
};

/// The built-in technique families that provide links
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum ChainingRuleKind {
    /// Bivalue cells, bilocal digits and candidates sharing a cell or house
    Candidates,
    /// Positions of a digit in one miniline as a grouped node
    LockedCandidates,
    /// `n` cells with `n + 1` digits
    AlmostLockedSets,
    /// `n` digits in `n + 1` cells of a house
    AlmostHiddenSets,
    /// Rectangles of modifiable digits that would allow a second solution
    AvoidableRectangles,
}

impl ChainingRuleKind {
    /// All built-in rules, simplest first
    pub const ALL: &'static [ChainingRuleKind] = &[
        ChainingRuleKind::Candidates,
        ChainingRuleKind::LockedCandidates,
        ChainingRuleKind::AlmostLockedSets,
        ChainingRuleKind::AlmostHiddenSets,
        ChainingRuleKind::AvoidableRectangles,
    ];

    /// The rule with default settings
    pub fn rule(self) -> Box<dyn ChainingRule> {
        use self::ChainingRuleKind::*;
        match self {
            Candidates => Box::new(rules::Candidates),
            LockedCandidates => Box::new(rules::LockedCandidates),
            AlmostLockedSets => Box::new(rules::AlmostLockedSets::default()),
            AlmostHiddenSets => Box::new(rules::AlmostHiddenSets::default()),
            AvoidableRectangles => Box::new(rules::AvoidableRectangles),
        }
    }
}

/// Limits of a [`ChainingDriver`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChainingOptions {
    /// Largest number of nodes a single seed's search may create
    /// before it is abandoned with [`ChainingError::CapacityExceeded`]
    ///
    /// [`ChainingError::CapacityExceeded`]: crate::errors::ChainingError::CapacityExceeded
    pub max_nodes_per_seed: usize,
}

impl Default for ChainingOptions {
    fn default() -> Self {
        ChainingOptions {
            max_nodes_per_seed: 200_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Grid;
    use strum::IntoEnumIterator;

    #[test]
    fn all_kinds_listed() {
        assert_eq!(ChainingRuleKind::iter().count(), ChainingRuleKind::ALL.len());
        for kind in ChainingRuleKind::iter() {
            assert!(ChainingRuleKind::ALL.contains(&kind));
        }
    }

    #[test]
    fn rules_only_add_links() {
        let grid = Grid::from_str_line(
            "...2...633....54.1..1..398........9....538....3........263..5..5.37....847...1...",
        )
        .unwrap();
        for kind in ChainingRuleKind::iter() {
            let rule = kind.rule();
            let mut strong = LinkDictionary::new();
            let mut weak = LinkDictionary::new();
            rule.collect_strong_links(&grid, &mut strong);
            rule.collect_weak_links(&grid, &mut weak);
            let all_candidates = grid.all_candidates();
            for map in strong.maps().chain(weak.maps()) {
                assert!(map.is_subset(&all_candidates), "{:?} linked a removed candidate", kind);
            }
        }
    }
}
