//! Partial word statistics and their merge

use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Word statistics for one chunk, or any merged set of chunks
///
/// Merging is plain integer addition, so it is associative and commutative
/// and [`PartialCounts::default`] is its identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartialCounts {
    /// Number of words
    pub total_words: u64,
    /// Words whose first character is a vowel
    pub starting_with_vowel: u64,
    /// Words whose last character is a consonant
    pub ending_with_consonant: u64,
}

impl PartialCounts {
    /// Create counts from raw values
    pub const fn new(
        total_words: u64,
        starting_with_vowel: u64,
        ending_with_consonant: u64,
    ) -> Self {
        Self {
            total_words,
            starting_with_vowel,
            ending_with_consonant,
        }
    }

    /// Combine two partial results
    pub const fn merge(self, other: Self) -> Self {
        Self {
            total_words: self.total_words + other.total_words,
            starting_with_vowel: self.starting_with_vowel + other.starting_with_vowel,
            ending_with_consonant: self.ending_with_consonant + other.ending_with_consonant,
        }
    }

    /// True when no word was seen
    pub const fn is_empty(&self) -> bool {
        self.total_words == 0
    }
}

impl Add for PartialCounts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.merge(rhs)
    }
}

impl AddAssign for PartialCounts {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.merge(rhs);
    }
}

impl Sum for PartialCounts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Self::merge)
    }
}
