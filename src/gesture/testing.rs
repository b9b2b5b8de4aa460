//! Synthetic hands for recognizer and app tests.

use super::landmarks::{
    Finger, HandLandmarks, INDEX_TIP, LANDMARK_COUNT, Landmark, THUMB_CMC, THUMB_IP, THUMB_MCP,
    THUMB_TIP, WRIST,
};
use super::signature::GestureType;

/// Horizontal offset of each non-thumb finger's base (index, middle, ring, pinky).
const FINGER_X: [f32; 4] = [20.0, 0.0, -20.0, -40.0];

/// Builds an upright right hand with the wrist at the origin and fingers pointing up (negative y).
#[derive(Debug, Clone)]
pub(crate) struct HandBuilder {
    up: [bool; 5],
    pinch: bool,
    scale: f32,
    offset: (f32, f32),
}

impl HandBuilder {
    pub(crate) fn new() -> Self {
        Self {
            up: [false; 5],
            pinch: false,
            scale: 1.0,
            offset: (0.0, 0.0),
        }
    }

    /// Hand posed to match `gesture`'s signature.
    pub(crate) fn pose(gesture: GestureType) -> Self {
        let builder = Self::new();
        match gesture {
            GestureType::None => builder
                .finger(Finger::Thumb, true)
                .finger(Finger::Middle, true),
            GestureType::Draw => builder.finger(Finger::Index, true),
            GestureType::Select => builder
                .finger(Finger::Middle, true)
                .finger(Finger::Ring, true)
                .finger(Finger::Pinky, true)
                .pinch(),
            GestureType::Clear => builder,
            GestureType::Undo => builder
                .finger(Finger::Index, true)
                .finger(Finger::Middle, true),
            GestureType::Redo => builder
                .finger(Finger::Index, true)
                .finger(Finger::Middle, true)
                .finger(Finger::Ring, true),
            GestureType::Save => Self {
                up: [true; 5],
                ..builder
            },
            GestureType::ToolChange => builder
                .finger(Finger::Thumb, true)
                .finger(Finger::Pinky, true),
        }
    }

    pub(crate) fn finger(mut self, finger: Finger, up: bool) -> Self {
        self.up[finger as usize] = up;
        self
    }

    /// Moves the thumb tip onto the index tip.
    pub(crate) fn pinch(mut self) -> Self {
        self.pinch = true;
        self
    }

    pub(crate) fn scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Translates the whole hand so the wrist sits at `(x, y)`.
    pub(crate) fn at(mut self, x: f32, y: f32) -> Self {
        self.offset = (x, y);
        self
    }

    pub(crate) fn build(&self) -> HandLandmarks {
        let mut points = [Landmark::default(); LANDMARK_COUNT];
        points[WRIST] = Landmark::new(0.0, 0.0, 0.0);

        points[THUMB_CMC] = Landmark::new(40.0, -30.0, 0.0);
        let thumb = if self.up[0] {
            [(70.0, -50.0), (95.0, -65.0), (120.0, -80.0)]
        } else {
            [(60.0, -50.0), (40.0, -65.0), (15.0, -70.0)]
        };
        for (idx, (x, y)) in [THUMB_MCP, THUMB_IP, THUMB_TIP].into_iter().zip(thumb) {
            points[idx] = Landmark::new(x, y, 0.0);
        }

        for (finger, x) in FINGER_X.iter().enumerate() {
            let base = 5 + finger * 4;
            let ys = if self.up[finger + 1] {
                [-100.0, -140.0, -170.0, -195.0]
            } else {
                [-100.0, -140.0, -110.0, -85.0]
            };
            for (joint, y) in ys.into_iter().enumerate() {
                points[base + joint] = Landmark::new(*x, y, 0.0);
            }
        }

        if self.pinch {
            let tip = points[INDEX_TIP];
            points[THUMB_TIP] = Landmark::new(tip.x + 2.0, tip.y, 0.0);
        }

        for point in &mut points {
            point.x = point.x * self.scale + self.offset.0;
            point.y = point.y * self.scale + self.offset.1;
        }

        match HandLandmarks::new(points) {
            Ok(hand) => hand,
            Err(err) => panic!("synthetic hand is invalid: {err}"),
        }
    }
}
