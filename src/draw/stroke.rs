//! Stroke types: the in-progress stroke and its sealed, committed form.

use crate::util::Rect;

/// One sampled point of a stroke, in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokePoint {
    pub x: f32,
    pub y: f32,
    pub pressure: f32,
}

/// Stroke currently being drawn.
///
/// Owned by the canvas' active-drawing slot; the only way out is [`ActiveStroke::seal`].
#[derive(Debug)]
pub(crate) struct ActiveStroke {
    points: Vec<StrokePoint>,
    /// Union of all regions touched so far
    dirty: Option<Rect>,
}

impl ActiveStroke {
    pub(crate) fn new() -> Self {
        Self {
            points: Vec::new(),
            dirty: None,
        }
    }

    pub(crate) fn last_point(&self) -> Option<StrokePoint> {
        self.points.last().copied()
    }

    pub(crate) fn push(&mut self, point: StrokePoint) {
        self.points.push(point);
    }

    pub(crate) fn mark_dirty(&mut self, rect: Rect) {
        self.dirty = Some(match self.dirty {
            Some(existing) => existing.union(rect),
            None => rect,
        });
    }

    pub(crate) fn dirty(&self) -> Option<Rect> {
        self.dirty
    }

    /// Freezes the stroke.
    pub(crate) fn seal(self) -> Stroke {
        Stroke {
            points: self.points,
        }
    }
}

/// A finished stroke. Immutable once sealed.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    points: Vec<StrokePoint>,
}

impl Stroke {
    /// Points in the order they were drawn.
    pub fn points(&self) -> &[StrokePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
