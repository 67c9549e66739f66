//! Producers of strong and weak links
//!
//! Every rule scans the grid for one kind of structure and inserts a link
//! for every instance it finds. Rules only add links, so they can run in any
//! order. A rule that finds nothing leaves the dictionaries untouched.
mod almost_hidden_sets;
mod almost_locked_sets;
mod avoidable_rectangles;
mod candidates;
mod locked_candidates;
mod prelude;

pub use self::{
    almost_hidden_sets::AlmostHiddenSets, almost_locked_sets::AlmostLockedSets,
    avoidable_rectangles::AvoidableRectangles, candidates::Candidates,
    locked_candidates::LockedCandidates,
};

use super::LinkDictionary;
use crate::board::Grid;
use std::fmt;

/// A technique family that contributes links to the inference graph
pub trait ChainingRule: fmt::Debug {
    /// Inserts every link where at least one of both nodes must be true.
    fn collect_strong_links(&self, _grid: &Grid, _links: &mut LinkDictionary) {}

    /// Inserts every link where at most one of both nodes can be true.
    fn collect_weak_links(&self, _grid: &Grid, _links: &mut LinkDictionary) {}
}
