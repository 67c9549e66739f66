#![warn(missing_docs)]
#![cfg_attr(feature = "cargo-clippy", allow(inline_always, match_bool, needless_pass_by_value, wrong_self_convention))]
//! Chain deductions for sudokus
//!
//! ## Overview
//!
//! This library finds placements and eliminations the way an expert solves by
//! hand: by following alternating chains of strong and weak links between
//! candidates. Links come from pluggable [`ChainingRule`]s, the search finds
//!
//! - discontinuous nice loops, which start and end in the same candidate with
//!   opposite assumptions
//! - continuous nice loops, which close on themselves and eliminate along
//!   each of their weak links
//! - multiple forcing chains, where every candidate of a cell or every
//!   position of a digit in a house forces the same conclusion
//!
//! ## Example
//!
//! ```
//! use sudoku_chains::{ChainingDriver, ChainingRuleKind, Grid};
//!
//! let line = "...2...633....54.1..1..398........9....538....3........263..5..5.37....847...1...";
//! let grid = Grid::from_str_line(line).unwrap();
//! let solution = grid.solution().unwrap();
//!
//! let driver = ChainingDriver::from_kinds(&[ChainingRuleKind::Candidates, ChainingRuleKind::LockedCandidates]);
//! for chain in driver.collect_chains(&grid, Some(&solution)) {
//!     for conclusion in chain.conclusions() {
//!         assert!(conclusion.is_consistent_with(&solution));
//!     }
//! }
//! ```
//!
//! [`ChainingRule`]: chaining::ChainingRule

pub mod bitset;
pub mod board;
pub mod chaining;
mod conclusion;
mod consts;
pub mod errors;
mod helper;

pub use crate::board::{Candidate, Cell, CellStatus, Digit, Grid, House};
pub use crate::chaining::{ChainPattern, ChainingDriver, ChainingOptions, ChainingRuleKind, MultipleForcingChains};
pub use crate::conclusion::Conclusion;
