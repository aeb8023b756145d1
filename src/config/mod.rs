//! Configuration module for Sign-to-Voice.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for recognition,
//! gesture tables and speech, `AppPaths` for cross-platform config
//! directories, and TOML persistence via `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, DeleteMode, GestureConfig, RecognitionConfig, SpeechConfig};
