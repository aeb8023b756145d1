//! Session runner: drives pose frames through classifier, engine and speech.
//!
//! [`SessionRunner`] owns the [`GestureClassifier`], the
//! [`ConfirmationEngine`] and a handle to the [`SpeechDispatcher`], and
//! responds to [`SessionEvent`]s received over a `tokio::sync::mpsc` channel.
//!
//! # Flow
//!
//! ```text
//! SessionEvent::Frame { hands, at }
//!   └─▶ first hand → classify → FrameInput
//!         └─▶ engine.on_frame(input, at)
//!               ├─ SPEAK_NOW / AUTO_SPEAK → dispatcher.speak(text) → clear
//!               └─ other actions          → text already updated
//!   └─▶ refresh SharedState
//!
//! SessionEvent::Clear
//!   └─▶ engine.clear(), refresh SharedState
//! ```
//!
//! Speech runs on its own task, so a frame never waits for audio.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::engine::{Action, ConfirmationEngine, FrameInput};
use crate::gesture::GestureClassifier;
use crate::hand::HandObservation;
use crate::speech::SpeechDispatcher;

use super::state::SharedState;

// ---------------------------------------------------------------------------
// SessionEvent
// ---------------------------------------------------------------------------

/// One frame of pose-provider output.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Detected hands; only the first one is used.
    pub hands: Vec<HandObservation>,
    /// Capture time of the frame.
    pub at: Instant,
}

/// Input accepted by [`SessionRunner::run`].
#[derive(Debug, Clone)]
pub enum SessionEvent {
    Frame(Frame),
    /// Discard the text and any pending hold.
    Clear,
}

// ---------------------------------------------------------------------------
// SessionRunner
// ---------------------------------------------------------------------------

/// Drives one signing session.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use std::time::Instant;
/// use sign_to_voice::config::AppConfig;
/// use sign_to_voice::pipeline::{new_shared_state, Frame, SessionEvent, SessionRunner};
/// use sign_to_voice::speech::SpeechDispatcher;
///
/// # async fn example() {
/// let config = AppConfig::default();
/// let state = new_shared_state();
/// let speech = Arc::new(SpeechDispatcher::from_config(&config.speech));
/// let runner = SessionRunner::from_config(state.clone(), &config, speech);
///
/// let (tx, rx) = tokio::sync::mpsc::channel(64);
/// let task = tokio::spawn(runner.run(rx));
/// tx.send(SessionEvent::Frame(Frame { hands: Vec::new(), at: Instant::now() }))
///     .await
///     .unwrap();
/// drop(tx);
/// task.await.unwrap();
/// # }
/// ```
pub struct SessionRunner {
    state: SharedState,
    classifier: GestureClassifier,
    engine: ConfirmationEngine,
    speech: Arc<SpeechDispatcher>,
    clear_after_speak: bool,
}

impl SessionRunner {
    pub fn new(
        state: SharedState,
        classifier: GestureClassifier,
        engine: ConfirmationEngine,
        speech: Arc<SpeechDispatcher>,
        clear_after_speak: bool,
    ) -> Self {
        Self {
            state,
            classifier,
            engine,
            speech,
            clear_after_speak,
        }
    }

    pub fn from_config(
        state: SharedState,
        config: &AppConfig,
        speech: Arc<SpeechDispatcher>,
    ) -> Self {
        Self::new(
            state,
            GestureClassifier::from_config(&config.gestures),
            ConfirmationEngine::from_config(config),
            speech,
            config.speech.clear_after_speak,
        )
    }

    pub fn engine(&self) -> &ConfirmationEngine {
        &self.engine
    }

    // -----------------------------------------------------------------------
    // Main async loop
    // -----------------------------------------------------------------------

    /// Process events until `rx` is closed.
    pub async fn run(mut self, mut rx: mpsc::Receiver<SessionEvent>) {
        while let Some(event) = rx.recv().await {
            match event {
                SessionEvent::Frame(frame) => {
                    self.handle_frame(&frame.hands, frame.at);
                }
                SessionEvent::Clear => self.clear(),
            }
        }

        log::info!("session: event channel closed, runner shutting down");
    }

    // -----------------------------------------------------------------------
    // Event handlers
    // -----------------------------------------------------------------------

    /// Run one frame through the classifier and engine.
    pub fn handle_frame(&mut self, hands: &[HandObservation], at: Instant) -> Option<Action> {
        let input = match hands.first() {
            None => FrameInput::NoHand,
            Some(hand) => match self.classifier.classify(hand) {
                Some(token) => FrameInput::Symbol(token),
                None => FrameInput::Unrecognized,
            },
        };
        let hand_detected = !matches!(input, FrameInput::NoHand);
        let recognized = matches!(input, FrameInput::Symbol(_));

        let action = self.engine.on_frame(input, at);
        let spoken = match action {
            Some(a) if a.requests_speech() => self.flush_to_speech(a),
            _ => None,
        };

        if let Ok(mut st) = self.state.lock() {
            st.stats.frames += 1;
            if hand_detected {
                st.stats.hand_frames += 1;
            }
            if recognized {
                st.stats.recognized_frames += 1;
            }
            if let Some(a) = action {
                st.stats.actions += 1;
                st.last_action = Some(a);
            }
            if let Some(text) = spoken {
                st.stats.utterances += 1;
                st.last_spoken = Some(text);
            }
            st.hand_detected = hand_detected;
        }
        self.publish(at);

        action
    }

    /// Hand the text to speech, then clear the session when configured to.
    fn flush_to_speech(&mut self, action: Action) -> Option<String> {
        let text = self.engine.text().trim().to_string();
        if text.is_empty() {
            return None;
        }

        log::info!("session: {action} → speaking {:?}", text);
        if !self.speech.speak(&text) {
            log::warn!("session: speech busy, {:?} was not spoken", text);
        }
        if self.clear_after_speak {
            self.engine.clear();
        }
        Some(text)
    }

    /// Discard the text and any pending hold.
    pub fn clear(&mut self) {
        log::info!("session: cleared");
        self.engine.clear();
        self.publish(Instant::now());
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn publish(&self, now: Instant) {
        if let Ok(mut st) = self.state.lock() {
            st.text = self.engine.text().to_string();
            st.candidate_label = self.engine.candidate_label();
            st.hold_progress = self.engine.hold_progress(now);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
