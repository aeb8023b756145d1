//! Finger-state extraction: hand keypoints → 5 extended/folded booleans.
//!
//! * Thumb: extended when the tip is further from the wrist along the x axis
//!   than the IP joint (`|tip.x − wrist.x| > |ip.x − wrist.x|`).
//! * Index … pinky: extended when the tip is above the PIP joint
//!   (`tip.y < pip.y`, image y grows downwards).
//!
//! A finger whose required keypoints are missing is folded.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{HandObservation, Keypoint};

/// The five fingers, in vector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Self::Thumb,
        Self::Index,
        Self::Middle,
        Self::Ring,
        Self::Pinky,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Tip and reference joint used by the extension test.
    fn joints(self) -> (Keypoint, Keypoint) {
        match self {
            Self::Thumb => (Keypoint::ThumbTip, Keypoint::ThumbIp),
            Self::Index => (Keypoint::IndexTip, Keypoint::IndexPip),
            Self::Middle => (Keypoint::MiddleTip, Keypoint::MiddlePip),
            Self::Ring => (Keypoint::RingTip, Keypoint::RingPip),
            Self::Pinky => (Keypoint::PinkyTip, Keypoint::PinkyPip),
        }
    }
}

// ---------------------------------------------------------------------------
// PatternError
// ---------------------------------------------------------------------------

/// Errors from parsing a finger pattern string such as `"01110"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("finger pattern must have 5 characters, got {0}")]
    Length(usize),

    #[error("invalid character {0:?} in finger pattern (expected '0' or '1')")]
    Character(char),
}

// ---------------------------------------------------------------------------
// FingerStates
// ---------------------------------------------------------------------------

/// Extended/folded state of `[thumb, index, middle, ring, pinky]`.
///
/// Also used as the key of the gesture tables.  It serialises as a 5-char
/// bit string, thumb first:
///
/// ```
/// use sign_to_voice::hand::{Finger, FingerStates};
///
/// let v: FingerStates = "01100".parse().unwrap();
/// assert!(v.is_extended(Finger::Index));
/// assert!(!v.is_extended(Finger::Thumb));
/// assert_eq!(v.to_string(), "01100");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FingerStates([bool; 5]);

impl FingerStates {
    pub const fn new(states: [bool; 5]) -> Self {
        Self(states)
    }

    /// Derive the finger states of `hand`.  Never fails.
    pub fn from_hand(hand: &HandObservation) -> Self {
        let mut states = [false; 5];
        for finger in Finger::ALL {
            states[finger.index()] = finger_extended(hand, finger);
        }
        Self(states)
    }

    pub fn is_extended(&self, finger: Finger) -> bool {
        self.0[finger.index()]
    }

    pub fn extended_count(&self) -> usize {
        self.0.iter().filter(|&&up| up).count()
    }

    pub fn all_folded(&self) -> bool {
        self.extended_count() == 0
    }

    pub fn all_extended(&self) -> bool {
        self.extended_count() == 5
    }

    pub fn as_array(&self) -> [bool; 5] {
        self.0
    }

    /// Every one of the 32 possible vectors, `00000` first.
    pub fn all() -> impl Iterator<Item = FingerStates> {
        (0u8..32).map(|bits| {
            let mut states = [false; 5];
            for (i, slot) in states.iter_mut().enumerate() {
                *slot = bits & (1 << (4 - i)) != 0;
            }
            FingerStates(states)
        })
    }
}

fn finger_extended(hand: &HandObservation, finger: Finger) -> bool {
    let (tip_kp, joint_kp) = finger.joints();
    let (Some(tip), Some(joint)) = (hand.get(tip_kp), hand.get(joint_kp)) else {
        return false;
    };

    match finger {
        Finger::Thumb => match hand.get(Keypoint::Wrist) {
            Some(wrist) => tip.x.abs_diff(wrist.x) > joint.x.abs_diff(wrist.x),
            None => false,
        },
        _ => tip.y < joint.y,
    }
}

impl fmt::Display for FingerStates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for up in self.0 {
            f.write_str(if up { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for FingerStates {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.trim().chars().collect();
        if chars.len() != 5 {
            return Err(PatternError::Length(chars.len()));
        }
        let mut states = [false; 5];
        for (slot, c) in states.iter_mut().zip(chars) {
            *slot = match c {
                '1' => true,
                '0' => false,
                other => return Err(PatternError::Character(other)),
            };
        }
        Ok(Self(states))
    }
}

impl TryFrom<String> for FingerStates {
    type Error = PatternError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FingerStates> for String {
    fn from(value: FingerStates) -> Self {
        value.to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
