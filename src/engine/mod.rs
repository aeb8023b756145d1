//! Temporal confirmation: token history, hold-to-commit and the text buffer.

pub mod confirm;
pub mod history;
pub mod text;

pub use confirm::{Action, ConfirmationEngine, EngineSettings, FrameInput, HoldThresholds};
pub use history::History;
pub use text::TextBuffer;
