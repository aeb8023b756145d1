//! Session orchestration.
//!
//! This module wires pose frames → classifier → confirmation engine → speech
//! and exposes the shared state a front end reads after every frame.
//!
//! # Architecture
//!
//! ```text
//! PoseProvider (camera / replay)
//!        │ SessionEvent (mpsc)
//!        ▼
//! SessionRunner::run()  ← async tokio task
//!        │
//!        ├─ Frame → GestureClassifier → ConfirmationEngine
//!        │            └─ SPEAK_NOW / AUTO_SPEAK → SpeechDispatcher (spawned)
//!        └─ Clear → ConfirmationEngine::clear
//!
//! SharedState (Arc<Mutex<SessionState>>) ←─── read by the front end
//! ```

pub mod runner;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use runner::{Frame, SessionEvent, SessionRunner};
pub use state::{new_shared_state, SessionState, SessionStats, SharedState};
