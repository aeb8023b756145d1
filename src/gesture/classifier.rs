//! Rule-based gesture classifier.
//!
//! Evaluation order for a finger-state vector:
//!
//! ```text
//! 1. all folded                          → SPACE
//! 2. all extended                        → SPEAK
//! 3. index+middle up, ring+pinky down    → DELETE   (thumb ignored)
//! 4. letter table, exact match           → letter
//! 5. word table, exact match             → WORD:<KEY>
//! 6.                                     → none
//! ```
//!
//! The classifier is pure: no state, no I/O, and the same vector always
//! yields the same token.

use crate::config::GestureConfig;
use crate::hand::{Finger, FingerStates, HandObservation};

use super::symbol::SymbolToken;
use super::table::GestureTable;

/// Maps hand observations to [`SymbolToken`]s using a [`GestureTable`].
///
/// ```
/// use sign_to_voice::gesture::{GestureClassifier, SymbolToken};
/// use sign_to_voice::hand::FingerStates;
///
/// let classifier = GestureClassifier::default();
/// let thumb_only: FingerStates = "10000".parse().unwrap();
/// assert_eq!(classifier.classify_states(thumb_only), Some(SymbolToken::Letter('A')));
/// ```
#[derive(Debug, Clone, Default)]
pub struct GestureClassifier {
    table: GestureTable,
}

impl GestureClassifier {
    pub fn new(table: GestureTable) -> Self {
        Self { table }
    }

    /// Build a classifier from the `[gestures]` section of the config.
    pub fn from_config(config: &GestureConfig) -> Self {
        Self::new(GestureTable::new(
            config.letters.clone(),
            config.words.clone(),
        ))
    }

    pub fn table(&self) -> &GestureTable {
        &self.table
    }

    /// Classify one detected hand.
    pub fn classify(&self, hand: &HandObservation) -> Option<SymbolToken> {
        self.classify_states(FingerStates::from_hand(hand))
    }

    /// Classify a finger-state vector.
    pub fn classify_states(&self, states: FingerStates) -> Option<SymbolToken> {
        if states.all_folded() {
            return Some(SymbolToken::Space);
        }
        if states.all_extended() {
            return Some(SymbolToken::Speak);
        }
        if is_delete_pose(states) {
            return Some(SymbolToken::Delete);
        }

        if let Some(token) = self.table.lookup_letter(states).and_then(SymbolToken::letter) {
            return Some(token);
        }

        self.table.lookup_word(states).map(SymbolToken::word)
    }
}

fn is_delete_pose(states: FingerStates) -> bool {
    states.is_extended(Finger::Index)
        && states.is_extended(Finger::Middle)
        && !states.is_extended(Finger::Ring)
        && !states.is_extended(Finger::Pinky)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::table::{default_letters, default_words, LetterRule};
    use crate::hand::fingers::tests::hand_with;

    fn fs(bits: &str) -> FingerStates {
        bits.parse().unwrap()
    }

    fn classify(bits: &str) -> Option<SymbolToken> {
        GestureClassifier::default().classify_states(fs(bits))
    }

    #[test]
    fn control_gestures_take_priority() {
        assert_eq!(classify("00000"), Some(SymbolToken::Space));
        assert_eq!(classify("11111"), Some(SymbolToken::Speak));
        assert_eq!(classify("01100"), Some(SymbolToken::Delete));
        assert_eq!(classify("11100"), Some(SymbolToken::Delete));
    }

    #[test]
    fn letters_from_default_table() {
        assert_eq!(classify("10000"), Some(SymbolToken::Letter('A')));
        assert_eq!(classify("01000"), Some(SymbolToken::Letter('D')));
        assert_eq!(classify("00001"), Some(SymbolToken::Letter('I')));
        assert_eq!(classify("11000"), Some(SymbolToken::Letter('L')));
        assert_eq!(classify("10110"), Some(SymbolToken::Letter('H')));
        assert_eq!(classify("11010"), Some(SymbolToken::Letter('O')));
        assert_eq!(classify("01110"), Some(SymbolToken::Letter('W')));
    }

    #[test]
    fn colliding_letters_keep_first_registration() {
        // B and E share a pattern; B is registered first.
        assert_eq!(classify("01111"), Some(SymbolToken::Letter('B')));
    }

    #[test]
    fn unmatched_patterns_yield_none() {
        assert_eq!(classify("00011"), None);
        assert_eq!(classify("00101"), None);
        assert_eq!(classify("00111"), None);
    }

    #[test]
    fn default_words_are_shadowed_by_letters() {
        // W, Q and X claim the HELLO, LOVE and THANKYOU patterns first.
        assert_eq!(classify("01110"), Some(SymbolToken::Letter('W')));
        assert_eq!(classify("11001"), Some(SymbolToken::Letter('Q')));
        assert_eq!(classify("01101"), Some(SymbolToken::Letter('X')));
    }

    #[test]
    fn words_apply_when_no_letter_matches() {
        let letters: Vec<LetterRule> = default_letters()
            .into_iter()
            .filter(|r| r.letter != 'W')
            .collect();
        let classifier = GestureClassifier::new(GestureTable::new(letters, default_words()));

        assert_eq!(
            classifier.classify_states(fs("01110")),
            Some(SymbolToken::word("HELLO"))
        );
    }

    #[test]
    fn invalid_letter_falls_through_to_words() {
        let letters = vec![LetterRule {
            pattern: fs("01110"),
            letter: '1',
        }];
        let classifier = GestureClassifier::new(GestureTable::new(letters, default_words()));
        assert_eq!(
            classifier.classify_states(fs("01110")),
            Some(SymbolToken::word("HELLO"))
        );
        assert_eq!(classifier.classify_states(fs("10000")), None);
    }

    #[test]
    fn classify_is_total_and_deterministic() {
        let classifier = GestureClassifier::default();
        for v in FingerStates::all() {
            let first = classifier.classify_states(v);
            let second = classifier.classify_states(v);
            assert_eq!(first, second, "pattern {v}");
        }
    }

    #[test]
    fn classify_hand_observation() {
        let classifier = GestureClassifier::default();
        let fist = hand_with([false; 5]);
        let thumb = hand_with([true, false, false, false, false]);
        let peace = hand_with([false, true, true, false, false]);

        assert_eq!(classifier.classify(&fist), Some(SymbolToken::Space));
        assert_eq!(classifier.classify(&thumb), Some(SymbolToken::Letter('A')));
        assert_eq!(classifier.classify(&peace), Some(SymbolToken::Delete));
    }

    #[test]
    fn empty_observation_is_a_fist() {
        let classifier = GestureClassifier::default();
        assert_eq!(
            classifier.classify(&HandObservation::new()),
            Some(SymbolToken::Space)
        );
    }

    #[test]
    fn from_config_uses_configured_tables() {
        let mut config = GestureConfig::default();
        config.letters = vec![LetterRule {
            pattern: fs("00011"),
            letter: 'V',
        }];
        let classifier = GestureClassifier::from_config(&config);
        assert_eq!(
            classifier.classify_states(fs("00011")),
            Some(SymbolToken::Letter('V'))
        );
        assert_eq!(classifier.classify_states(fs("10000")), None);
    }
}
