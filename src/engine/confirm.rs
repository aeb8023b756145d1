//! Temporal confirmation engine.
//!
//! Turns the per-frame token stream into committed text-editing actions.
//!
//! ```text
//!              ┌──────────── fewer than min_votes tokens ───────────┐
//!              ▼                                                    │
//!  Tracking ──majority differs──▶ Candidate(since = now) ──hold ≥ threshold──▶ commit
//!      ▲                              │   ▲                                     │
//!      │                              │   └──── same majority, confirmed ◀──────┘
//!      └──── clear() / re-arm ────────┘
//!
//!  no-hand frames ──▶ idle timer ──≥ idle_timeout, text not blank──▶ AUTO_SPEAK (once)
//! ```
//!
//! Time is always supplied by the caller, which keeps the engine
//! deterministic under test.

use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, Instant};

use crate::config::settings::secs;
use crate::config::{AppConfig, DeleteMode, RecognitionConfig};
use crate::gesture::{SymbolCategory, SymbolToken};

use super::history::History;
use super::text::TextBuffer;

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// Outcome of a frame that changed the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    SpaceAdded,
    /// The open palm was held; the caller should speak and flush the text.
    SpeakNow,
    /// No hand for the idle timeout with pending text.
    AutoSpeak,
    Deleted,
    WordAdded,
    LetterAdded,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SpaceAdded => "SPACE_ADDED",
            Self::SpeakNow => "SPEAK_NOW",
            Self::AutoSpeak => "AUTO_SPEAK",
            Self::Deleted => "DELETED",
            Self::WordAdded => "WORD_ADDED",
            Self::LetterAdded => "LETTER_ADDED",
        }
    }

    /// `true` for the two actions that ask the caller to dispatch speech.
    pub fn requests_speech(&self) -> bool {
        matches!(self, Self::SpeakNow | Self::AutoSpeak)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FrameInput
// ---------------------------------------------------------------------------

/// What the classifier saw in one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameInput {
    /// No hand detected.
    NoHand,
    /// A hand was detected but its pose matched no symbol.
    Unrecognized,
    /// A hand was detected and classified.
    Symbol(SymbolToken),
}

impl From<SymbolToken> for FrameInput {
    fn from(token: SymbolToken) -> Self {
        Self::Symbol(token)
    }
}

/// `None` is treated as "no hand".
impl From<Option<SymbolToken>> for FrameInput {
    fn from(token: Option<SymbolToken>) -> Self {
        match token {
            Some(token) => Self::Symbol(token),
            None => Self::NoHand,
        }
    }
}

// ---------------------------------------------------------------------------
// EngineSettings
// ---------------------------------------------------------------------------

/// Category hold durations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoldThresholds {
    pub letter: Duration,
    pub word: Duration,
    pub space: Duration,
    pub speak: Duration,
    pub delete: Duration,
}

impl HoldThresholds {
    pub fn for_category(&self, category: SymbolCategory) -> Duration {
        match category {
            SymbolCategory::Letter => self.letter,
            SymbolCategory::Word => self.word,
            SymbolCategory::Space => self.space,
            SymbolCategory::Speak => self.speak,
            SymbolCategory::Delete => self.delete,
        }
    }
}

/// Resolved engine parameters.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub history_capacity: usize,
    pub min_votes: usize,
    pub holds: HoldThresholds,
    pub idle_timeout: Duration,
    pub rearm_gap: Duration,
    pub delete_mode: DeleteMode,
    pub phrases: BTreeMap<String, String>,
}

impl EngineSettings {
    /// Resolve settings from the config sections.  Capacity is at least 1 and
    /// `min_votes` is clamped into `1..=capacity`.
    pub fn from_recognition(
        recognition: &RecognitionConfig,
        phrases: BTreeMap<String, String>,
    ) -> Self {
        let history_capacity = recognition.history_capacity.max(1);
        Self {
            history_capacity,
            min_votes: recognition.min_votes.clamp(1, history_capacity),
            holds: HoldThresholds {
                letter: secs(recognition.letter_hold_secs),
                word: secs(recognition.word_hold_secs),
                space: secs(recognition.space_hold_secs),
                speak: secs(recognition.speak_hold_secs),
                delete: secs(recognition.delete_hold_secs),
            },
            idle_timeout: secs(recognition.idle_timeout_secs),
            rearm_gap: secs(recognition.rearm_gap_secs),
            delete_mode: recognition.delete_mode,
            phrases,
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        let config = AppConfig::default();
        Self::from_recognition(&config.recognition, config.gestures.phrases)
    }
}

// ---------------------------------------------------------------------------
// ConfirmationEngine
// ---------------------------------------------------------------------------

/// Stateful debounce + hold-to-commit engine for one signing session.
///
/// ```
/// use std::time::{Duration, Instant};
/// use sign_to_voice::engine::{Action, ConfirmationEngine};
/// use sign_to_voice::gesture::SymbolToken;
///
/// let mut engine = ConfirmationEngine::default();
/// let t0 = Instant::now();
/// let mut fired = Vec::new();
/// // Hold "A" for two seconds at 10 fps.
/// for i in 0..=20 {
///     let now = t0 + Duration::from_millis(100 * i);
///     if let Some(action) = engine.on_frame(SymbolToken::Letter('A'), now) {
///         fired.push(action);
///     }
/// }
/// assert_eq!(fired, vec![Action::LetterAdded]);
/// assert_eq!(engine.text(), "A");
/// ```
#[derive(Debug, Clone)]
pub struct ConfirmationEngine {
    settings: EngineSettings,
    history: History<SymbolToken>,
    candidate: Option<SymbolToken>,
    candidate_since: Option<Instant>,
    confirmed: bool,
    text: TextBuffer,
    /// Start of the current no-hand episode.
    idle_since: Option<Instant>,
    /// AUTO_SPEAK already fired in the current episode.
    idle_fired: bool,
}

impl Default for ConfirmationEngine {
    fn default() -> Self {
        Self::new(EngineSettings::default())
    }
}

impl ConfirmationEngine {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            history: History::new(settings.history_capacity),
            settings,
            candidate: None,
            candidate_since: None,
            confirmed: false,
            text: TextBuffer::new(),
            idle_since: None,
            idle_fired: false,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(EngineSettings::from_recognition(
            &config.recognition,
            config.gestures.phrases.clone(),
        ))
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    // -----------------------------------------------------------------------
    // Per-frame entry point
    // -----------------------------------------------------------------------

    /// Feed one frame's classification at time `now`.
    ///
    /// Returns the action committed by this frame, if any.  At most one
    /// action fires per frame.
    pub fn on_frame(&mut self, input: impl Into<FrameInput>, now: Instant) -> Option<Action> {
        match input.into() {
            FrameInput::NoHand => self.on_no_hand(now),
            FrameInput::Unrecognized => {
                self.on_hand_returned(now);
                None
            }
            FrameInput::Symbol(token) => {
                self.on_hand_returned(now);
                self.on_symbol(token, now)
            }
        }
    }

    fn on_symbol(&mut self, token: SymbolToken, now: Instant) -> Option<Action> {
        log::debug!("engine: token {token}");
        self.history.push(token);

        if self.history.len() < self.settings.min_votes {
            return None;
        }

        let majority = self.history.majority()?.clone();

        if self.candidate.as_ref() != Some(&majority) {
            log::debug!("engine: candidate → {majority}");
            self.candidate = Some(majority);
            self.candidate_since = Some(now);
            self.confirmed = false;
            return None;
        }

        if self.confirmed {
            return None;
        }

        let since = self.candidate_since?;
        let threshold = self.settings.holds.for_category(majority.category());
        if now.saturating_duration_since(since) < threshold {
            return None;
        }

        let action = self.commit(&majority);
        self.confirmed = true;
        log::info!("engine: {action} ({majority}) → {:?}", self.text.as_str());
        Some(action)
    }

    fn commit(&mut self, token: &SymbolToken) -> Action {
        match token {
            SymbolToken::Space => {
                self.text.push_space();
                Action::SpaceAdded
            }
            SymbolToken::Speak => Action::SpeakNow,
            SymbolToken::Delete => {
                self.text.delete(self.settings.delete_mode);
                Action::Deleted
            }
            SymbolToken::Word(key) => {
                let phrase = self.phrase_for(key);
                self.text.push_str(&phrase);
                self.text.push_char(' ');
                Action::WordAdded
            }
            SymbolToken::Letter(c) => {
                self.text.push_char(*c);
                Action::LetterAdded
            }
        }
    }

    fn on_no_hand(&mut self, now: Instant) -> Option<Action> {
        let started = *self.idle_since.get_or_insert(now);

        if self.idle_fired || self.text.is_blank() {
            return None;
        }

        if now.saturating_duration_since(started) >= self.settings.idle_timeout {
            self.idle_fired = true;
            log::info!(
                "engine: no hand for {:?}, auto-speaking {:?}",
                self.settings.idle_timeout,
                self.text.as_str()
            );
            return Some(Action::AutoSpeak);
        }
        None
    }

    /// A hand is visible again: end the idle episode and, after a long enough
    /// gap, start a fresh hold.
    fn on_hand_returned(&mut self, now: Instant) {
        let Some(started) = self.idle_since.take() else {
            return;
        };
        self.idle_fired = false;

        if now.saturating_duration_since(started) >= self.settings.rearm_gap {
            self.reset_hold();
        }
    }

    fn reset_hold(&mut self) {
        self.history.clear();
        self.candidate = None;
        self.candidate_since = None;
        self.confirmed = false;
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// The accumulated text.
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// The current stable candidate, if any.
    pub fn current_candidate(&self) -> Option<&SymbolToken> {
        self.candidate.as_ref()
    }

    /// Display form of the candidate: word gestures show their phrase in
    /// uppercase, everything else its token text.  Empty when there is no
    /// candidate.
    pub fn candidate_label(&self) -> String {
        match &self.candidate {
            Some(SymbolToken::Word(key)) => self.phrase_for(key).to_uppercase(),
            Some(token) => token.to_string(),
            None => String::new(),
        }
    }

    /// Fraction of the hold completed for the current candidate, in
    /// `[0, 1]`.  Zero when there is no candidate or it has already fired.
    pub fn hold_progress(&self, now: Instant) -> f32 {
        let (Some(token), Some(since)) = (&self.candidate, self.candidate_since) else {
            return 0.0;
        };
        if self.confirmed {
            return 0.0;
        }
        let threshold = self.settings.holds.for_category(token.category());
        if threshold.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(since);
        (elapsed.as_secs_f32() / threshold.as_secs_f32()).min(1.0)
    }

    /// `true` once the current candidate's action has fired.
    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    /// Number of tokens currently in the history.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// `true` while a no-hand episode is in progress.
    pub fn is_idle(&self) -> bool {
        self.idle_since.is_some()
    }

    fn phrase_for(&self, key: &str) -> String {
        self.settings
            .phrases
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_lowercase())
    }

    // -----------------------------------------------------------------------
    // Reset
    // -----------------------------------------------------------------------

    /// Empty the text, the history and the candidate, and end any idle
    /// episode.  Idempotent.
    pub fn clear(&mut self) {
        self.text.clear();
        self.reset_hold();
        self.idle_since = None;
        self.idle_fired = false;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
