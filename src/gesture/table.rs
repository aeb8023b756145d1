//! Static gesture tables: finger pattern → letter, finger pattern → word.
//!
//! Lookup is **first registered wins**.  The default letter table maps
//! several letters onto the same coarse pattern (B and E are both `01111`);
//! only the first entry is reachable and the later ones are kept so the table
//! documents the intended alphabet.  Entries whose pattern is claimed by a
//! control gesture (F, T, U) are likewise unreachable.

use serde::{Deserialize, Serialize};

use crate::hand::FingerStates;

/// A letter bound to a finger pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterRule {
    pub pattern: FingerStates,
    pub letter: char,
}

/// A word gesture bound to a finger pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRule {
    pub pattern: FingerStates,
    /// Uppercase word key, e.g. `"HELLO"` for the token `WORD:HELLO`.
    pub key: String,
}

// Bits are thumb, index, middle, ring, pinky.
const DEFAULT_LETTERS: [(&str, char); 25] = [
    ("10000", 'A'),
    ("01111", 'B'),
    ("01000", 'D'),
    ("01100", 'F'),
    ("01110", 'W'),
    ("00100", 'M'),
    ("00010", 'R'),
    ("00001", 'I'),
    ("11000", 'L'),
    ("10001", 'Y'),
    ("01111", 'E'),
    ("11100", 'T'),
    ("11111", 'U'),
    ("01010", 'K'),
    ("00110", 'N'),
    ("10100", 'C'),
    ("11110", 'S'),
    ("01001", 'P'),
    ("11001", 'Q'),
    ("10101", 'Z'),
    ("01101", 'X'),
    ("10010", 'G'),
    ("10110", 'H'),
    ("11010", 'O'),
    ("11101", 'J'),
];

const DEFAULT_WORDS: [(&str, &str); 3] = [
    ("01110", "HELLO"),
    ("11001", "LOVE"),
    ("01101", "THANKYOU"),
];

fn pattern(bits: &str) -> FingerStates {
    bits.parse()
        .unwrap_or_else(|e| panic!("built-in pattern {bits:?} is invalid: {e}"))
}

/// The built-in letter table, in registration order.
pub fn default_letters() -> Vec<LetterRule> {
    DEFAULT_LETTERS
        .iter()
        .map(|&(bits, letter)| LetterRule {
            pattern: pattern(bits),
            letter,
        })
        .collect()
}

/// The built-in word predicates, in evaluation order.
pub fn default_words() -> Vec<WordRule> {
    DEFAULT_WORDS
        .iter()
        .map(|&(bits, key)| WordRule {
            pattern: pattern(bits),
            key: key.to_string(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// GestureTable
// ---------------------------------------------------------------------------

/// Ordered letter and word tables consulted by the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GestureTable {
    letters: Vec<LetterRule>,
    words: Vec<WordRule>,
}

impl GestureTable {
    pub fn new(letters: Vec<LetterRule>, words: Vec<WordRule>) -> Self {
        Self { letters, words }
    }

    /// First letter registered for `states`.
    pub fn lookup_letter(&self, states: FingerStates) -> Option<char> {
        self.letters
            .iter()
            .find(|rule| rule.pattern == states)
            .map(|rule| rule.letter)
    }

    /// First word key registered for `states`.
    pub fn lookup_word(&self, states: FingerStates) -> Option<&str> {
        self.words
            .iter()
            .find(|rule| rule.pattern == states)
            .map(|rule| rule.key.as_str())
    }

    pub fn letters(&self) -> &[LetterRule] {
        &self.letters
    }

    pub fn words(&self) -> &[WordRule] {
        &self.words
    }

    /// Letters that can never be produced because an earlier entry uses the
    /// same pattern.
    pub fn shadowed_letters(&self) -> Vec<char> {
        self.letters
            .iter()
            .enumerate()
            .filter(|(i, rule)| {
                self.letters[..*i]
                    .iter()
                    .any(|earlier| earlier.pattern == rule.pattern)
            })
            .map(|(_, rule)| rule.letter)
            .collect()
    }
}

impl Default for GestureTable {
    fn default() -> Self {
        Self::new(default_letters(), default_words())
    }
}
