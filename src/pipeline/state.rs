//! Shared session state.
//!
//! [`SessionState`] is what a front end (overlay, status line, summary
//! printer) needs to render the session: the text, the current candidate,
//! the hold progress and some running statistics.
//!
//! [`SharedState`] is a type alias for `Arc<Mutex<SessionState>>`, cheap to
//! clone and safe to share across threads.

use std::sync::{Arc, Mutex};

use crate::engine::Action;

// ---------------------------------------------------------------------------
// SessionStats
// ---------------------------------------------------------------------------

/// Running frame counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Frames processed.
    pub frames: u64,
    /// Frames in which at least one hand was detected.
    pub hand_frames: u64,
    /// Frames whose hand matched a symbol.
    pub recognized_frames: u64,
    /// Actions committed.
    pub actions: u64,
    /// Utterances handed to speech.
    pub utterances: u64,
}

impl SessionStats {
    /// Share of frames with a detected hand, in percent.
    ///
    /// ```
    /// use sign_to_voice::pipeline::SessionStats;
    ///
    /// let stats = SessionStats { frames: 8, hand_frames: 6, ..Default::default() };
    /// assert_eq!(stats.detection_rate(), 75.0);
    /// assert_eq!(SessionStats::default().detection_rate(), 0.0);
    /// ```
    pub fn detection_rate(&self) -> f64 {
        if self.frames == 0 {
            return 0.0;
        }
        self.hand_frames as f64 * 100.0 / self.frames as f64
    }
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// Snapshot of one signing session, refreshed after every frame.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Accumulated text.
    pub text: String,
    /// Display label of the current candidate; empty when none.
    pub candidate_label: String,
    /// Hold progress of the candidate, `0.0 ..= 1.0`.
    pub hold_progress: f32,
    /// A hand was seen in the latest frame.
    pub hand_detected: bool,
    /// Most recent action, if any.
    pub last_action: Option<Action>,
    /// Most recent utterance handed to speech.
    pub last_spoken: Option<String>,
    pub stats: SessionStats,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }
}

// ---------------------------------------------------------------------------
// SharedState
// ---------------------------------------------------------------------------

/// Thread-safe handle to [`SessionState`].
///
/// Lock for a short critical section; do **not** hold the lock across
/// `.await` points.
pub type SharedState = Arc<Mutex<SessionState>>;

/// Construct a new [`SharedState`] wrapping an empty [`SessionState`].
pub fn new_shared_state() -> SharedState {
    Arc::new(Mutex::new(SessionState::new()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_empty() {
        let state = SessionState::new();
        assert!(state.text.is_empty());
        assert!(state.candidate_label.is_empty());
        assert!(state.last_action.is_none());
        assert!(!state.hand_detected);
        assert_eq!(state.stats, SessionStats::default());
    }

    #[test]
    fn detection_rate_is_a_percentage() {
        let stats = SessionStats {
            frames: 3,
            hand_frames: 1,
            ..Default::default()
        };
        assert!((stats.detection_rate() - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn shared_state_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SharedState>();
    }

    #[test]
    fn shared_state_can_be_cloned_and_mutated() {
        let state = new_shared_state();
        let state2 = Arc::clone(&state);

        state.lock().unwrap().last_action = Some(Action::SpaceAdded);
        assert_eq!(state2.lock().unwrap().last_action, Some(Action::SpaceAdded));
    }
}
