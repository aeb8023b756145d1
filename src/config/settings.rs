//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use super::AppPaths;
use crate::gesture::{default_letters, default_words, LetterRule, WordRule};

// ---------------------------------------------------------------------------
// DeleteMode
// ---------------------------------------------------------------------------

/// What a confirmed DELETE gesture removes from the accumulated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeleteMode {
    /// Remove the last character.
    Character,
    /// Remove a trailing space if present, otherwise the last word.
    Word,
}

impl Default for DeleteMode {
    fn default() -> Self {
        Self::Word
    }
}

// ---------------------------------------------------------------------------
// RecognitionConfig
// ---------------------------------------------------------------------------

/// Debounce and hold-duration settings for the confirmation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionConfig {
    /// Number of recent tokens kept for majority voting.
    pub history_capacity: usize,
    /// Minimum history length before a majority is declared.
    pub min_votes: usize,
    /// Seconds a letter must stay the majority before it is typed.
    pub letter_hold_secs: f32,
    /// Seconds a word gesture must be held.
    pub word_hold_secs: f32,
    /// Seconds the fist (SPACE) must be held.
    pub space_hold_secs: f32,
    /// Seconds the open palm (SPEAK) must be held.
    pub speak_hold_secs: f32,
    /// Seconds the DELETE gesture must be held.
    pub delete_hold_secs: f32,
    /// Seconds without any hand before pending text is spoken automatically.
    pub idle_timeout_secs: f32,
    /// Minimum no-hand gap, in seconds, after which a reappearing hand starts
    /// a fresh hold (so the same letter can be typed twice).
    pub rearm_gap_secs: f32,
    /// Behaviour of the DELETE gesture.
    pub delete_mode: DeleteMode,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            history_capacity: 10,
            min_votes: 5,
            letter_hold_secs: 1.2,
            word_hold_secs: 1.5,
            space_hold_secs: 1.8,
            speak_hold_secs: 1.8,
            delete_hold_secs: 1.2,
            idle_timeout_secs: 3.0,
            rearm_gap_secs: 0.25,
            delete_mode: DeleteMode::default(),
        }
    }
}

/// Convert a seconds setting into a `Duration`.  Negative and NaN values
/// clamp to zero; values too large for a `Duration` (including infinity)
/// saturate to `Duration::MAX`.
pub(crate) fn secs(value: f32) -> Duration {
    if value.is_nan() || value <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f32(value).unwrap_or(Duration::MAX)
}

// ---------------------------------------------------------------------------
// GestureConfig
// ---------------------------------------------------------------------------

/// Gesture tables and the phrases typed for word gestures.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Letter table, first match wins.
    pub letters: Vec<LetterRule>,
    /// Word predicates, consulted only when no letter matches.
    pub words: Vec<WordRule>,
    /// Phrase typed for each word key.  Keys without an entry type the
    /// lowercased key.
    pub phrases: BTreeMap<String, String>,
}

const DEFAULT_PHRASES: [(&str, &str); 35] = [
    ("YES", "yes"),
    ("NO", "no"),
    ("HELLO", "hello"),
    ("LOVE", "love"),
    ("THANKYOU", "thank you"),
    ("PLEASE", "please"),
    ("SORRY", "sorry"),
    ("HELP", "help"),
    ("STOP", "stop"),
    ("GOOD", "good"),
    ("BAD", "bad"),
    ("FRIEND", "friend"),
    ("FOOD", "food"),
    ("WATER", "water"),
    ("WHERE", "where"),
    ("WHO", "who"),
    ("WHAT", "what"),
    ("WHEN", "when"),
    ("WHY", "why"),
    ("HOW", "how"),
    ("MOM", "mom"),
    ("DAD", "dad"),
    ("FAMILY", "family"),
    ("SCHOOL", "school"),
    ("HOME", "home"),
    ("WORK", "work"),
    ("PLAY", "play"),
    ("MORE", "more"),
    ("FINISH", "finish"),
    ("THANK", "thank"),
    ("EXCUSE", "excuse"),
    ("DEAF", "deaf"),
    ("HEARING", "hearing"),
    ("TEACHER", "teacher"),
    ("STUDENT", "student"),
];

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            letters: default_letters(),
            words: default_words(),
            phrases: DEFAULT_PHRASES
                .iter()
                .map(|&(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl GestureConfig {
    /// Reject letters outside `A`–`Z` and empty word keys.
    pub fn validate(&self) -> Result<()> {
        for rule in &self.letters {
            if !rule.letter.is_ascii_uppercase() {
                bail!(
                    "letter rule {} maps to {:?}; letters must be A-Z",
                    rule.pattern,
                    rule.letter
                );
            }
        }
        for rule in &self.words {
            if rule.key.trim().is_empty() {
                bail!("word rule {} has an empty key", rule.pattern);
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SpeechConfig
// ---------------------------------------------------------------------------

/// Text-to-speech output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// When `false` speech requests are logged and dropped.
    pub enabled: bool,
    /// TTS program to run (`"espeak"`, `"espeak-ng"`, `"say"`, …).
    pub program: String,
    /// Speaking rate in words per minute.
    pub rate: u32,
    /// Volume, 0.0 – 1.0.
    pub volume: f32,
    /// Voice name passed to the TTS program; `None` uses its default.
    pub voice: Option<String>,
    /// Clear the accumulated text once it has been handed to speech.
    pub clear_after_speak: bool,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            program: default_program().into(),
            rate: 140,
            volume: 1.0,
            voice: None,
            clear_after_speak: true,
        }
    }
}

fn default_program() -> &'static str {
    if cfg!(target_os = "macos") {
        "say"
    } else {
        "espeak"
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use sign_to_voice::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Debounce / hold settings.
    pub recognition: RecognitionConfig,
    /// Speech output settings.
    pub speech: SpeechConfig,
    /// Letter / word tables.
    pub gestures: GestureConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.gestures.validate()?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Verify that a default `AppConfig` can be serialised to TOML and
    /// deserialised back without any data loss.
    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");

        // RecognitionConfig
        let (o, l) = (&original.recognition, &loaded.recognition);
        assert_eq!(o.history_capacity, l.history_capacity);
        assert_eq!(o.min_votes, l.min_votes);
        assert_eq!(o.letter_hold_secs, l.letter_hold_secs);
        assert_eq!(o.space_hold_secs, l.space_hold_secs);
        assert_eq!(o.idle_timeout_secs, l.idle_timeout_secs);
        assert_eq!(o.delete_mode, l.delete_mode);

        // SpeechConfig
        assert_eq!(original.speech.program, loaded.speech.program);
        assert_eq!(original.speech.rate, loaded.speech.rate);
        assert_eq!(original.speech.voice, loaded.speech.voice);

        // GestureConfig
        assert_eq!(original.gestures.letters, loaded.gestures.letters);
        assert_eq!(original.gestures.words, loaded.gestures.words);
        assert_eq!(original.gestures.phrases, loaded.gestures.phrases);
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        assert_eq!(config.recognition.history_capacity, 10);
        assert_eq!(config.gestures.letters.len(), 25);
    }

    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.recognition.history_capacity, 10);
        assert_eq!(cfg.recognition.min_votes, 5);
        assert_eq!(cfg.recognition.letter_hold_secs, 1.2);
        assert_eq!(cfg.recognition.word_hold_secs, 1.5);
        assert_eq!(cfg.recognition.space_hold_secs, 1.8);
        assert_eq!(cfg.recognition.speak_hold_secs, 1.8);
        assert_eq!(cfg.recognition.delete_hold_secs, 1.2);
        assert_eq!(cfg.recognition.idle_timeout_secs, 3.0);
        assert_eq!(cfg.recognition.rearm_gap_secs, 0.25);
        assert_eq!(cfg.recognition.delete_mode, DeleteMode::Word);
        assert_eq!(cfg.speech.rate, 140);
        assert!(cfg.speech.clear_after_speak);
        assert_eq!(cfg.gestures.phrases.len(), 35);
        assert_eq!(
            cfg.gestures.phrases.get("THANKYOU").map(String::as_str),
            Some("thank you")
        );
    }

    #[test]
    fn modified_values_survive_round_trip() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.recognition.letter_hold_secs = 0.8;
        cfg.recognition.delete_mode = DeleteMode::Character;
        cfg.speech.voice = Some("hazel".into());
        cfg.speech.program = "espeak-ng".into();
        cfg.gestures.phrases.insert("BYE".into(), "goodbye".into());

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.recognition.letter_hold_secs, 0.8);
        assert_eq!(loaded.recognition.delete_mode, DeleteMode::Character);
        assert_eq!(loaded.speech.voice.as_deref(), Some("hazel"));
        assert_eq!(loaded.speech.program, "espeak-ng");
        assert_eq!(
            loaded.gestures.phrases.get("BYE").map(String::as_str),
            Some("goodbye")
        );
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("bad.toml");

        let mut text = toml::to_string_pretty(&AppConfig::default()).expect("serialise");
        text = text.replacen("\"10000\"", "\"1000x\"", 1);
        std::fs::write(&path, text).expect("write");

        assert!(AppConfig::load_from(&path).is_err());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "[recognition]\nidle_timeout_secs = 5.0\n").expect("write");

        let cfg = AppConfig::load_from(&path).expect("load");
        assert_eq!(cfg.recognition.idle_timeout_secs, 5.0);
        assert_eq!(cfg.recognition.min_votes, 5);
        assert_eq!(cfg.speech.rate, 140);
        assert_eq!(cfg.gestures.letters.len(), 25);
    }

    #[test]
    fn lowercase_letter_is_rejected() {
        let mut cfg = GestureConfig::default();
        cfg.letters[0].letter = 'a';
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn secs_clamps_invalid_values() {
        assert_eq!(secs(-1.0), Duration::ZERO);
        assert_eq!(secs(f32::NAN), Duration::ZERO);
        assert_eq!(secs(1.5), Duration::from_millis(1500));
        assert_eq!(secs(1e30), Duration::MAX);
        assert_eq!(secs(f32::INFINITY), Duration::MAX);
        assert_eq!(secs(f32::NEG_INFINITY), Duration::ZERO);
    }
}
