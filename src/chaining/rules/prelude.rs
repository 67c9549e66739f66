pub(crate) use super::ChainingRule;
pub(crate) use crate::bitset::{CandidateSet, Iter as SetIter, Set};
pub(crate) use crate::chaining::{LinkDictionary, LinkPattern};
#[rustfmt::skip]
pub(crate) use crate::board::{
    Candidate,
    CellStatus,
    Digit,
    Grid,
    positions::{
        Cell,
        House,
        MiniLine,
    },
};
