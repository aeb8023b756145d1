//! Gesture classification: finger states → symbol token.
//!
//! * [`GestureClassifier`]: pure, table-driven rule evaluation.
//! * [`GestureTable`] / [`LetterRule`] / [`WordRule`]: ordered lookup tables.
//! * [`SymbolToken`]: the classifier's output alphabet.

pub mod classifier;
pub mod symbol;
pub mod table;

pub use classifier::GestureClassifier;
pub use symbol::{SymbolCategory, SymbolToken, UnknownToken, WORD_PREFIX};
pub use table::{default_letters, default_words, GestureTable, LetterRule, WordRule};
