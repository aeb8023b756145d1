//! Speech output.
//!
//! * [`SpeechBackend`]: async trait implemented by every TTS provider.
//! * [`CommandBackend`]: shells out to `espeak` / `say` / any compatible CLI.
//! * [`NullBackend`]: logs and drops; used when speech is disabled.
//! * [`SpeechDispatcher`]: fire-and-forget front end with a single-utterance
//!   busy flag so the recognition loop never waits on audio.

pub mod command;
pub mod dispatcher;

use async_trait::async_trait;
use thiserror::Error;

pub use command::{CommandBackend, NullBackend};
pub use dispatcher::SpeechDispatcher;

// ---------------------------------------------------------------------------
// SpeechError
// ---------------------------------------------------------------------------

/// Errors a speech backend can report.
#[derive(Debug, Error)]
pub enum SpeechError {
    /// The configured TTS program could not be found.
    #[error("speech program `{0}` is not available")]
    Unavailable(String),

    /// The TTS program ran but reported failure.
    #[error("speech failed: {0}")]
    Failed(String),

    #[error("speech I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// SpeechBackend trait
// ---------------------------------------------------------------------------

/// Speaks one utterance, returning once playback has finished.
///
/// Implementors must be `Send + Sync` so they can be shared as
/// `Arc<dyn SpeechBackend>`.
#[async_trait]
pub trait SpeechBackend: Send + Sync {
    async fn say(&self, text: &str) -> Result<(), SpeechError>;
}

/// Collapse runs of whitespace and trim, the form handed to backends.
///
/// ```
/// use sign_to_voice::speech::normalize_utterance;
///
/// assert_eq!(normalize_utterance("  HELLO   world "), "HELLO world");
/// assert_eq!(normalize_utterance("   "), "");
/// ```
pub fn normalize_utterance(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
