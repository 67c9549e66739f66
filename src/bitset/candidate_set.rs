use crate::bitset::Set;
use crate::board::{Candidate, Cell, Digit};
use crate::consts::N_CANDIDATES;
use crunchy::unroll;
use std::fmt;
use std::iter::FromIterator;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

const WORDS: usize = 12;
// 729 = 11 * 64 + 25
const LAST_WORD_MASK: u64 = (1 << (N_CANDIDATES - 64 * (WORDS - 1))) - 1;

/// Fixed-size bitset over all 729 candidates of a grid.
///
/// Candidates are numbered `cell * 9 + digit - 1`. The number of elements is
/// kept alongside the bits, so `len` never needs to count.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CandidateSet {
    words: [u64; WORDS],
    count: u16,
}

/// Iterator over the candidates of a [`CandidateSet`] in ascending order
#[derive(Clone, Debug)]
pub struct Iter {
    words: [u64; WORDS],
    word: usize,
}

#[inline(always)]
fn position(candidate: Candidate) -> (usize, u64) {
    let index = candidate.index();
    (index / 64, 1 << (index % 64))
}

impl CandidateSet {
    /// The empty set
    pub const EMPTY: CandidateSet = CandidateSet {
        words: [0; WORDS],
        count: 0,
    };

    /// Set containing every candidate
    #[rustfmt::skip]
    pub const ALL: CandidateSet = CandidateSet {
        words: [
            !0, !0, !0, !0, !0, !0,
            !0, !0, !0, !0, !0, LAST_WORD_MASK,
        ],
        count: N_CANDIDATES as u16,
    };

    /// Creates an empty set.
    pub fn new() -> Self {
        Self::EMPTY
    }

    /// Creates a set holding exactly one candidate.
    pub fn from_candidate(candidate: Candidate) -> Self {
        let mut set = Self::EMPTY;
        set.insert(candidate);
        set
    }

    /// Creates the set of `digit` in every cell of `cells`.
    pub fn from_cells(cells: Set<Cell>, digit: Digit) -> Self {
        cells
            .into_iter()
            .map(|cell| Candidate { cell, digit })
            .collect()
    }

    fn from_words(words: [u64; WORDS]) -> Self {
        let count = words.iter().map(|word| word.count_ones() as u16).sum();
        CandidateSet { words, count }
    }

    /// Returns the number of candidates in this set.
    #[inline]
    pub fn len(&self) -> usize {
        self.count as usize
    }

    /// Checks whether this set contains no candidate.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Checks whether `candidate` is part of this set.
    #[inline]
    pub fn contains(&self, candidate: Candidate) -> bool {
        let (word, bit) = position(candidate);
        self.words[word] & bit != 0
    }

    /// Adds `candidate`. Returns whether it was absent before.
    #[inline]
    pub fn insert(&mut self, candidate: Candidate) -> bool {
        let (word, bit) = position(candidate);
        let absent = self.words[word] & bit == 0;
        if absent {
            self.words[word] |= bit;
            self.count += 1;
        }
        absent
    }

    /// Removes `candidate`. Returns whether it was present before.
    #[inline]
    pub fn remove(&mut self, candidate: Candidate) -> bool {
        let (word, bit) = position(candidate);
        let present = self.words[word] & bit != 0;
        if present {
            self.words[word] &= !bit;
            self.count -= 1;
        }
        present
    }

    /// Returns the candidates in this set that aren't present in `other`.
    pub fn without(self, other: Self) -> Self {
        let mut words = self.words;
        unroll! {
            for i in 0..12 {
                words[i] &= !other.words[i];
            }
        }
        Self::from_words(words)
    }

    /// Checks if `self` and `other` contain any common candidate.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.words
            .iter()
            .zip(other.words.iter())
            .any(|(a, b)| a & b != 0)
    }

    /// Checks if every candidate of `self` is also in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        self.words
            .iter()
            .zip(other.words.iter())
            .all(|(a, b)| a & !b == 0)
    }

    /// Returns the only candidate in this set, iff it holds exactly one.
    pub fn single(&self) -> Option<Candidate> {
        match self.count {
            1 => self.iter().next(),
            _ => None,
        }
    }

    /// Returns the cells that hold at least one candidate of this set.
    pub fn cells(&self) -> Set<Cell> {
        self.iter().map(|candidate| candidate.cell).collect()
    }

    /// Returns the digits that appear in at least one candidate of this set.
    pub fn digits(&self) -> Set<Digit> {
        self.iter().map(|candidate| candidate.digit).collect()
    }

    /// Iterates over the candidates in ascending index order.
    pub fn iter(&self) -> Iter {
        Iter {
            words: self.words,
            word: 0,
        }
    }
}

impl Default for CandidateSet {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Iterator for Iter {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        while self.word < WORDS {
            let bits = self.words[self.word];
            if bits == 0 {
                self.word += 1;
                continue;
            }
            let lowest_bit = bits & (!bits + 1);
            self.words[self.word] ^= lowest_bit;
            let index = self.word * 64 + lowest_bit.trailing_zeros() as usize;
            return Some(Candidate::from_index(index));
        }
        None
    }
}

impl IntoIterator for CandidateSet {
    type Item = Candidate;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a CandidateSet {
    type Item = Candidate;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        self.iter()
    }
}

impl FromIterator<Candidate> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = Candidate>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        set.extend(iter);
        set
    }
}

impl Extend<Candidate> for CandidateSet {
    fn extend<I: IntoIterator<Item = Candidate>>(&mut self, iter: I) {
        for candidate in iter {
            self.insert(candidate);
        }
    }
}

impl From<Candidate> for CandidateSet {
    fn from(candidate: Candidate) -> Self {
        Self::from_candidate(candidate)
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////
//                                  Bitops
///////////////////////////////////////////////////////////////////////////////////////////////

macro_rules! impl_bitops {
    ( $( $trait:ident, $fn_name:ident, $assign_trait:ident, $assign_fn:ident, $op:tt );* $(;)* ) => {
        $(
            impl $trait for CandidateSet {
                type Output = Self;

                #[inline]
                fn $fn_name(self, other: Self) -> Self {
                    let mut words = self.words;
                    unroll! {
                        for i in 0..12 {
                            words[i] = words[i] $op other.words[i];
                        }
                    }
                    CandidateSet::from_words(words)
                }
            }

            impl $assign_trait for CandidateSet {
                #[inline]
                fn $assign_fn(&mut self, other: Self) {
                    *self = $trait::$fn_name(*self, other);
                }
            }
        )*
    };
}

impl_bitops!(
    BitAnd, bitand, BitAndAssign, bitand_assign, &;
    BitOr, bitor, BitOrAssign, bitor_assign, |;
    BitXor, bitxor, BitXorAssign, bitxor_assign, ^;
);

impl Not for CandidateSet {
    type Output = Self;

    fn not(self) -> Self {
        Self::ALL.without(self)
    }
}

impl fmt::Debug for CandidateSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_candidate(rng: &mut StdRng) -> Candidate {
        Candidate::from_index(rng.gen_range(0..N_CANDIDATES))
    }

    #[test]
    fn count_follows_insert_and_remove() {
        let mut rng = StdRng::seed_from_u64(729);
        let mut set = CandidateSet::EMPTY;
        let mut reference = std::collections::BTreeSet::new();
        for _ in 0..2000 {
            let candidate = random_candidate(&mut rng);
            let len_before = set.len();
            if rng.gen_bool(0.6) {
                let absent = set.insert(candidate);
                assert_eq!(absent, reference.insert(candidate));
                assert!(set.contains(candidate));
                assert_eq!(set.len(), len_before + absent as usize);
            } else {
                let present = set.remove(candidate);
                assert_eq!(present, reference.remove(&candidate));
                assert!(!set.contains(candidate));
                assert_eq!(set.len(), len_before - present as usize);
            }
            assert_eq!(set.len(), reference.len());
        }
        assert!(set.iter().eq(reference.iter().cloned()));
    }

    #[test]
    fn complement_masks_unused_bits() {
        let last = Candidate::from_index(N_CANDIDATES - 1);
        let set = CandidateSet::from_candidate(last);
        let complement = !set;
        assert_eq!(complement.len(), N_CANDIDATES - 1);
        assert!(!complement.contains(last));
        assert_eq!(!complement, set);
        assert_eq!(!CandidateSet::EMPTY, CandidateSet::ALL);
        assert_eq!(!CandidateSet::ALL, CandidateSet::EMPTY);
        assert_eq!(CandidateSet::ALL.iter().count(), N_CANDIDATES);
    }

    #[test]
    fn set_algebra_keeps_count() {
        let mut rng = StdRng::seed_from_u64(9);
        let a: CandidateSet = (0..100).map(|_| random_candidate(&mut rng)).collect();
        let b: CandidateSet = (0..100).map(|_| random_candidate(&mut rng)).collect();

        let union = a | b;
        let intersection = a & b;
        let difference = a ^ b;
        assert_eq!(union.len(), union.iter().count());
        assert_eq!(intersection.len(), intersection.iter().count());
        assert_eq!(union.len(), intersection.len() + difference.len());
        assert!(intersection.is_subset(&a));
        assert!(a.is_subset(&union));
        assert_eq!(a.without(b), a & !b);
        assert_eq!(a.overlaps(&b), !intersection.is_empty());
    }

    #[test]
    fn empty_is_canonical() {
        let mut set = CandidateSet::new();
        let candidate = Candidate::new(40, 5);
        set.insert(candidate);
        set.remove(candidate);
        assert_eq!(set, CandidateSet::EMPTY);
        assert_eq!(set.single(), None);
    }

    #[test]
    fn cells_and_digits() {
        let cells = Cell::new(0).as_set() | Cell::new(1) | Cell::new(2);
        let set = CandidateSet::from_cells(cells, Digit::new(7));
        assert_eq!(set.len(), 3);
        assert_eq!(set.cells(), cells);
        assert_eq!(set.digits(), Digit::new(7).as_set());
        assert_eq!(
            CandidateSet::from_candidate(Candidate::new(80, 9)).single(),
            Some(Candidate::new(80, 9))
        );
    }
}
