//! Sign-language fingerspelling to speech.
//!
//! Hand keypoints are classified into symbol tokens by a table-driven
//! [`gesture::GestureClassifier`]; a [`engine::ConfirmationEngine`] debounces
//! the per-frame stream and commits letters, words, spaces and deletions to a
//! text buffer, asking for speech on an open palm or after an idle pause.

pub mod config;
pub mod engine;
pub mod gesture;
pub mod hand;
pub mod pipeline;
pub mod speech;
