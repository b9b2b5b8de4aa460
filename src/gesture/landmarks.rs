//! Hand landmarks and per-finger extension state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// HAND LANDMARK INDICES
// ============================================================================

pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Joint chains from base to tip, one per finger, in [`Finger`] order.
const FINGER_CHAINS: [[usize; 4]; 5] = [
    [THUMB_CMC, THUMB_MCP, THUMB_IP, THUMB_TIP],
    [INDEX_MCP, INDEX_PIP, INDEX_DIP, INDEX_TIP],
    [MIDDLE_MCP, MIDDLE_PIP, MIDDLE_DIP, MIDDLE_TIP],
    [RING_MCP, RING_PIP, RING_DIP, RING_TIP],
    [PINKY_MCP, PINKY_PIP, PINKY_DIP, PINKY_TIP],
];

/// Straightness ratio at or below which a finger counts as fully curled.
const CURLED_RATIO: f32 = 0.55;
/// Straightness ratio at or above which a finger counts as fully extended.
const STRAIGHT_RATIO: f32 = 0.95;

/// One landmark position in frame pixel/depth space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 3]", into = "[f32; 3]")]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance in the image plane (depth ignored).
    pub fn distance_2d(&self, other: &Landmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<[f32; 3]> for Landmark {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Landmark> for [f32; 3] {
    fn from(l: Landmark) -> Self {
        [l.x, l.y, l.z]
    }
}

/// Errors produced when building a landmark set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LandmarkError {
    #[error("expected {LANDMARK_COUNT} landmarks, got {0}")]
    WrongCount(usize),
    #[error("landmark {0} has a non-finite coordinate")]
    NonFinite(usize),
}

/// The 21 landmarks of one detected hand, indexed by the constants above.
#[derive(Debug, Clone, PartialEq)]
pub struct HandLandmarks {
    points: [Landmark; LANDMARK_COUNT],
}

impl HandLandmarks {
    pub fn new(points: [Landmark; LANDMARK_COUNT]) -> Result<Self, LandmarkError> {
        if let Some(idx) = points
            .iter()
            .position(|p| !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()))
        {
            return Err(LandmarkError::NonFinite(idx));
        }
        Ok(Self { points })
    }

    /// Builds a landmark set from a slice, which must hold exactly 21 points.
    pub fn from_slice(points: &[Landmark]) -> Result<Self, LandmarkError> {
        let points: [Landmark; LANDMARK_COUNT] = points
            .try_into()
            .map_err(|_| LandmarkError::WrongCount(points.len()))?;
        Self::new(points)
    }

    pub fn get(&self, index: usize) -> Landmark {
        self.points[index]
    }

    pub fn points(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.points
    }

    /// Index fingertip, used as the drawing and pointing position.
    pub fn index_tip(&self) -> Landmark {
        self.points[INDEX_TIP]
    }

    /// Reference length for scale-invariant distances: wrist to middle-finger base.
    pub fn hand_scale(&self) -> f32 {
        self.points[WRIST]
            .distance_2d(&self.points[MIDDLE_MCP])
            .max(1e-3)
    }

    /// Distance between thumb tip and index tip relative to [`hand_scale`](Self::hand_scale).
    pub fn pinch_distance(&self) -> f32 {
        self.points[THUMB_TIP].distance_2d(&self.points[INDEX_TIP]) / self.hand_scale()
    }

    /// How extended a finger is, from 0.0 (curled) to 1.0 (straight).
    ///
    /// Compares the wrist-to-tip distance with the length of the joint chain; a
    /// straight finger makes the two equal, a curled one folds the tip back
    /// toward the palm.
    pub fn extension(&self, finger: Finger) -> f32 {
        let chain = FINGER_CHAINS[finger as usize];
        let wrist = self.points[WRIST];
        let mut path = wrist.distance_2d(&self.points[chain[0]]);
        for pair in chain.windows(2) {
            path += self.points[pair[0]].distance_2d(&self.points[pair[1]]);
        }
        if path <= f32::EPSILON {
            return 0.0;
        }
        let ratio = wrist.distance_2d(&self.points[chain[3]]) / path;
        ((ratio - CURLED_RATIO) / (STRAIGHT_RATIO - CURLED_RATIO)).clamp(0.0, 1.0)
    }
}

/// Fingers in landmark order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb = 0,
    Index = 1,
    Middle = 2,
    Ring = 3,
    Pinky = 4,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];
}

/// Up/down state of the five fingers (thumb, index, middle, ring, pinky).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[bool; 5]", into = "[bool; 5]")]
pub struct FingerState(pub [bool; 5]);

impl FingerState {
    pub const FIST: FingerState = FingerState([false; 5]);
    pub const OPEN: FingerState = FingerState([true; 5]);

    /// Derives the finger state from landmark geometry.
    pub fn from_landmarks(hand: &HandLandmarks) -> Self {
        let mut up = [false; 5];
        for finger in Finger::ALL {
            up[finger as usize] = hand.extension(finger) >= 0.5;
        }
        Self(up)
    }

    pub fn count_up(&self) -> usize {
        self.0.iter().filter(|up| **up).count()
    }
}

impl From<[bool; 5]> for FingerState {
    fn from(up: [bool; 5]) -> Self {
        Self(up)
    }
}

impl From<FingerState> for [bool; 5] {
    fn from(state: FingerState) -> Self {
        state.0
    }
}

impl std::fmt::Display for FingerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for up in self.0 {
            f.write_str(if up { "1" } else { "0" })?;
        }
        Ok(())
    }
}
