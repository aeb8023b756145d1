//! Hand observations as delivered by a pose provider.
//!
//! A [`HandObservation`] holds up to 21 keypoints in image-pixel coordinates,
//! indexed by the MediaPipe hand-landmark ids.  Observations are produced
//! fresh for every frame and never persisted.
//!
//! ```text
//!            8   12  16  20      tips
//!            7   11  15  19
//!    4       6   10  14  18      PIP joints
//!     3      5    9  13  17
//!      2
//!       1
//!            0                   wrist
//! ```

pub mod fingers;
pub mod replay;

pub use fingers::{Finger, FingerStates, PatternError};
pub use replay::{RecordedFrame, Recording, ReplayError, ReplayProvider, MAX_OFFSET_MS};

/// Number of keypoints a pose provider supplies for each detected hand.
pub const KEYPOINT_COUNT: usize = 21;

// ---------------------------------------------------------------------------
// Keypoint
// ---------------------------------------------------------------------------

/// The 21 anatomical hand keypoints, in landmark-id order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Keypoint {
    Wrist = 0,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexMcp,
    IndexPip,
    IndexDip,
    IndexTip,
    MiddleMcp,
    MiddlePip,
    MiddleDip,
    MiddleTip,
    RingMcp,
    RingPip,
    RingDip,
    RingTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

impl Keypoint {
    /// All keypoints in id order.
    pub const ALL: [Keypoint; KEYPOINT_COUNT] = [
        Self::Wrist,
        Self::ThumbCmc,
        Self::ThumbMcp,
        Self::ThumbIp,
        Self::ThumbTip,
        Self::IndexMcp,
        Self::IndexPip,
        Self::IndexDip,
        Self::IndexTip,
        Self::MiddleMcp,
        Self::MiddlePip,
        Self::MiddleDip,
        Self::MiddleTip,
        Self::RingMcp,
        Self::RingPip,
        Self::RingDip,
        Self::RingTip,
        Self::PinkyMcp,
        Self::PinkyPip,
        Self::PinkyDip,
        Self::PinkyTip,
    ];

    /// Landmark id (0–20).
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Look up a keypoint by landmark id.  Returns `None` for ids above 20.
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(usize::from(id)).copied()
    }
}

// ---------------------------------------------------------------------------
// Point / HandObservation
// ---------------------------------------------------------------------------

/// A 2-D position in image pixels.  `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Keypoints of one detected hand for one frame.
///
/// Missing keypoints are allowed; the finger tests in [`fingers`] treat a
/// finger with missing keypoints as folded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandObservation {
    points: [Option<Point>; KEYPOINT_COUNT],
}

impl HandObservation {
    /// An observation with no keypoints set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an observation from `(id, x, y)` triples.
    ///
    /// Ids outside `0..=20` are ignored.  When an id appears twice the last
    /// value wins.
    ///
    /// ```
    /// use sign_to_voice::hand::{HandObservation, Keypoint, Point};
    ///
    /// let hand = HandObservation::from_triples([(0, 100, 400), (4, 60, 300), (99, 1, 1)]);
    /// assert_eq!(hand.get(Keypoint::ThumbTip), Some(Point::new(60, 300)));
    /// assert_eq!(hand.len(), 2);
    /// ```
    pub fn from_triples<I>(triples: I) -> Self
    where
        I: IntoIterator<Item = (u8, i32, i32)>,
    {
        let mut hand = Self::new();
        for (id, x, y) in triples {
            match Keypoint::from_id(id) {
                Some(kp) => hand.set(kp, Point::new(x, y)),
                None => log::debug!("hand: ignoring out-of-range keypoint id {id}"),
            }
        }
        hand
    }

    pub fn set(&mut self, keypoint: Keypoint, point: Point) {
        self.points[usize::from(keypoint.id())] = Some(point);
    }

    pub fn get(&self, keypoint: Keypoint) -> Option<Point> {
        self.points[usize::from(keypoint.id())]
    }

    /// Number of keypoints present.
    pub fn len(&self) -> usize {
        self.points.iter().filter(|p| p.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` when all 21 keypoints are present.
    pub fn is_complete(&self) -> bool {
        self.len() == KEYPOINT_COUNT
    }
}

// ---------------------------------------------------------------------------
// PoseProvider
// ---------------------------------------------------------------------------

/// Source of per-frame hand observations (camera + landmark model, replay
/// file, …).
///
/// An empty `Vec` means no hand was detected in the frame; that is a normal
/// result, never an error.
pub trait PoseProvider {
    /// The frame type this provider consumes.
    type Frame;

    /// Detect all hands visible in `frame`.
    fn detect(&mut self, frame: &Self::Frame) -> Vec<HandObservation>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keypoint_ids_round_trip() {
        for (i, kp) in Keypoint::ALL.iter().enumerate() {
            assert_eq!(usize::from(kp.id()), i);
            assert_eq!(Keypoint::from_id(kp.id()), Some(*kp));
        }
        assert_eq!(Keypoint::from_id(21), None);
    }

    #[test]
    fn anatomical_ids_match_landmark_convention() {
        assert_eq!(Keypoint::Wrist.id(), 0);
        assert_eq!(Keypoint::ThumbIp.id(), 3);
        assert_eq!(Keypoint::ThumbTip.id(), 4);
        assert_eq!(Keypoint::IndexPip.id(), 6);
        assert_eq!(Keypoint::IndexTip.id(), 8);
        assert_eq!(Keypoint::MiddleTip.id(), 12);
        assert_eq!(Keypoint::RingTip.id(), 16);
        assert_eq!(Keypoint::PinkyPip.id(), 18);
        assert_eq!(Keypoint::PinkyTip.id(), 20);
    }

    #[test]
    fn duplicate_ids_keep_last_value() {
        let hand = HandObservation::from_triples([(8, 1, 1), (8, 2, 2)]);
        assert_eq!(hand.get(Keypoint::IndexTip), Some(Point::new(2, 2)));
        assert_eq!(hand.len(), 1);
    }

    #[test]
    fn complete_hand() {
        let hand = HandObservation::from_triples((0..21u8).map(|i| (i, i32::from(i), 0)));
        assert!(hand.is_complete());
        assert!(!HandObservation::new().is_complete());
        assert!(HandObservation::new().is_empty());
    }
}
