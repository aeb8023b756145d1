//! Replay of recorded landmark streams.
//!
//! A recording is a JSON-lines file.  Each line is one frame:
//!
//! ```text
//! {"t_ms": 0,  "hands": [[[0, 300, 400], [1, 270, 380], …, [20, 350, 220]]]}
//! {"t_ms": 33, "hands": []}
//! ```
//!
//! Each hand is a list of `[id, x, y]` landmark triples in pixel
//! coordinates.  Blank lines and lines starting with `#` are skipped.
//! [`ReplayProvider`] plays a [`Recording`] back through the
//! [`PoseProvider`] interface so the rest of the pipeline cannot tell it from
//! a live camera.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use super::{HandObservation, PoseProvider};

// ---------------------------------------------------------------------------
// ReplayError
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("cannot read recording: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: invalid frame JSON: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("line {line}: keypoint id {id} is out of range (0-20)")]
    Keypoint { line: usize, id: u8 },

    #[error("line {line}: timestamp {t_ms} ms goes backwards (previous {previous} ms)")]
    Timestamp { line: usize, t_ms: u64, previous: u64 },

    #[error("line {line}: timestamp {t_ms} ms is beyond the {max} ms limit", max = MAX_OFFSET_MS)]
    TimestampRange { line: usize, t_ms: u64 },
}

/// Largest frame offset a recording may use (24 hours).
pub const MAX_OFFSET_MS: u64 = 24 * 60 * 60 * 1000;

// ---------------------------------------------------------------------------
// Recording
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawFrame {
    t_ms: u64,
    #[serde(default)]
    hands: Vec<Vec<(u8, i32, i32)>>,
}

/// One recorded frame: its offset from the start of the recording and the
/// hands the pose provider reported.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedFrame {
    pub offset: Duration,
    pub hands: Vec<HandObservation>,
}

/// An in-memory landmark recording, frames in timestamp order.
#[derive(Debug, Clone, Default)]
pub struct Recording {
    frames: Vec<RecordedFrame>,
}

impl Recording {
    /// Load a JSON-lines recording from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse a JSON-lines recording from a string.
    ///
    /// ```
    /// use sign_to_voice::hand::Recording;
    ///
    /// let rec = Recording::parse(r#"
    /// {"t_ms": 0, "hands": [[[0, 300, 400], [8, 260, 220], [6, 260, 280]]]}
    /// {"t_ms": 33, "hands": []}
    /// "#).unwrap();
    /// assert_eq!(rec.len(), 2);
    /// assert_eq!(rec.frames()[0].hands[0].len(), 3);
    /// ```
    pub fn parse(content: &str) -> Result<Self, ReplayError> {
        let mut frames = Vec::new();
        let mut previous: Option<u64> = None;

        for (idx, raw_line) in content.lines().enumerate() {
            let line = idx + 1;
            let trimmed = raw_line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let raw: RawFrame = serde_json::from_str(trimmed)
                .map_err(|source| ReplayError::Json { line, source })?;

            if raw.t_ms > MAX_OFFSET_MS {
                return Err(ReplayError::TimestampRange {
                    line,
                    t_ms: raw.t_ms,
                });
            }
            if let Some(prev) = previous {
                if raw.t_ms < prev {
                    return Err(ReplayError::Timestamp {
                        line,
                        t_ms: raw.t_ms,
                        previous: prev,
                    });
                }
            }
            previous = Some(raw.t_ms);

            let mut hands = Vec::with_capacity(raw.hands.len());
            for triples in raw.hands {
                if let Some(&(id, _, _)) = triples.iter().find(|(id, _, _)| *id > 20) {
                    return Err(ReplayError::Keypoint { line, id });
                }
                hands.push(HandObservation::from_triples(triples));
            }

            frames.push(RecordedFrame {
                offset: Duration::from_millis(raw.t_ms),
                hands,
            });
        }

        Ok(Self { frames })
    }

    pub fn frames(&self) -> &[RecordedFrame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Offset of the last frame, or zero for an empty recording.
    pub fn duration(&self) -> Duration {
        self.frames.last().map(|f| f.offset).unwrap_or_default()
    }

    pub fn into_frames(self) -> Vec<RecordedFrame> {
        self.frames
    }
}

// ---------------------------------------------------------------------------
// ReplayProvider
// ---------------------------------------------------------------------------

/// [`PoseProvider`] whose "frames" are recorded frames: detection simply
/// returns the hands that were recorded.
#[derive(Debug, Default)]
pub struct ReplayProvider {
    frames_seen: usize,
    hands_seen: usize,
}

impl ReplayProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames passed through [`detect`](PoseProvider::detect) so far.
    pub fn frames_seen(&self) -> usize {
        self.frames_seen
    }

    /// Frames in which at least one hand was present.
    pub fn hands_seen(&self) -> usize {
        self.hands_seen
    }
}

impl PoseProvider for ReplayProvider {
    type Frame = RecordedFrame;

    fn detect(&mut self, frame: &RecordedFrame) -> Vec<HandObservation> {
        self.frames_seen += 1;
        if !frame.hands.is_empty() {
            self.hands_seen += 1;
        }
        frame.hands.clone()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
