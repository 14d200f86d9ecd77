//! Streaming word-boundary automaton
//!
//! The classifier walks a chunk one character at a time and keeps just two
//! bits of state: whether it is inside a word, and whether the last word
//! character seen was a consonant. A word's ending is only recorded when a
//! delimiter closes it, so a word still open when the input stops counts
//! towards `total_words` but never towards `ending_with_consonant`.

use crate::{
    category::CategoryTag,
    counts::PartialCounts,
    decode::{decode, Utf8Scanner},
};

/// Automaton state local to one chunk scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WordCounterState {
    /// Inside a word
    pub in_word: bool,
    /// The last word character was a consonant
    pub last_was_consonant: bool,
}

/// Counts words, vowel-initial words and consonant-final words
#[derive(Debug, Clone, Default)]
pub struct WordClassifier {
    state: WordCounterState,
    counts: PartialCounts,
}

impl WordClassifier {
    /// Create a classifier in the outside-word state
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the automaton by one categorised character
    pub fn step(&mut self, tag: CategoryTag) {
        use CategoryTag::*;

        let state = &mut self.state;
        let counts = &mut self.counts;

        if state.in_word {
            match tag {
                Consonant => state.last_was_consonant = true,
                Vowel | Digit | Underscore | Apostrophe => state.last_was_consonant = false,
                Whitespace | Separator | Punctuation => {
                    state.in_word = false;
                    if state.last_was_consonant {
                        counts.ending_with_consonant += 1;
                    }
                    state.last_was_consonant = false;
                }
                Other => {}
            }
        } else {
            match tag {
                Whitespace | Separator | Punctuation | Apostrophe => {
                    state.last_was_consonant = false
                }
                Vowel => {
                    state.in_word = true;
                    counts.total_words += 1;
                    counts.starting_with_vowel += 1;
                }
                Consonant => {
                    state.in_word = true;
                    counts.total_words += 1;
                    state.last_was_consonant = true;
                }
                Digit | Underscore => {
                    state.in_word = true;
                    counts.total_words += 1;
                }
                Other => {}
            }
        }
    }

    /// Feed a span of whole characters
    ///
    /// The span must not end in the middle of a character; chunk boundaries
    /// never do.
    pub fn feed(&mut self, bytes: &[u8]) {
        for (_, decoded) in Utf8Scanner::new(bytes) {
            self.step(CategoryTag::of_decoded(decoded));
        }
    }

    /// Feed a single character
    pub fn feed_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        let encoded = ch.encode_utf8(&mut buf);
        if let Some(decoded) = decode(encoded.as_bytes()) {
            self.step(CategoryTag::of_decoded(decoded));
        }
    }

    /// Current automaton state
    pub fn state(&self) -> WordCounterState {
        self.state
    }

    /// Counts accumulated so far
    pub fn counts(&self) -> PartialCounts {
        self.counts
    }

    /// Consume the classifier and return its counts
    pub fn finish(self) -> PartialCounts {
        self.counts
    }
}

/// Classify a whole chunk
pub fn count_words(bytes: &[u8]) -> PartialCounts {
    let mut classifier = WordClassifier::new();
    classifier.feed(bytes);
    classifier.finish()
}
