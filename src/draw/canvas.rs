//! The canvas engine: raster, brush configuration, live strokes, and history.

use super::brush::{self, BrushSettings, BrushType, StampContext};
use super::color::Rgb;
use super::history::{Edit, History, HistoryEntry};
use super::raster::{Raster, RasterPatch};
use super::stroke::{ActiveStroke, Stroke, StrokePoint};
use super::transform::ViewTransform;
use crate::capture::{self, FileSaver, ImageSaver, SaveError};
use crate::util::Rect;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Smallest brush diameter in pixels.
pub const MIN_BRUSH_SIZE: u32 = 1;
/// Largest brush diameter in pixels.
pub const MAX_BRUSH_SIZE: u32 = 200;
/// Valid range for the pressure multiplier.
pub const PRESSURE_SCALE_RANGE: (f32, f32) = (0.1, 4.0);
/// Per-point pressure is clamped into this range; non-finite pressure reads as 1.0.
pub const PRESSURE_RANGE: (f32, f32) = (0.0, 1.0);

/// Construction parameters for a [`CanvasEngine`].
#[derive(Debug, Clone)]
pub struct CanvasOptions {
    pub width: u32,
    pub height: u32,
    pub background: Rgb,
    /// Maximum history entries (0 = unlimited)
    pub max_history: usize,
    pub brush: BrushSettings,
}

impl Default for CanvasOptions {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            background: super::color::WHITE,
            max_history: 20,
            brush: BrushSettings {
                brush: BrushType::Standard,
                size: 15,
                opacity: 1.0,
                hardness: 0.5,
                flow: 1.0,
                pressure_scale: 1.0,
                color: super::color::BLACK,
            },
        }
    }
}

/// Rolling draw timing, in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DrawMetrics {
    pub last_draw_ms: f64,
    pub avg_draw_ms: f64,
    pub draw_count: u64,
}

impl DrawMetrics {
    fn record(&mut self, elapsed_ms: f64) {
        self.draw_count += 1;
        self.last_draw_ms = elapsed_ms;
        self.avg_draw_ms += (elapsed_ms - self.avg_draw_ms) / self.draw_count as f64;
    }
}

/// In-progress stroke plus the raster as it was when the stroke began.
#[derive(Debug)]
struct LiveStroke {
    stroke: ActiveStroke,
    base: Raster,
}

/// Authoritative canvas state.
///
/// All raster mutation goes through these methods. Drawing renders each segment
/// immediately as a live preview; the stroke only enters history when it is
/// sealed by a pen-up.
#[derive(Debug)]
pub struct CanvasEngine {
    raster: Raster,
    background: Rgb,
    brush: BrushSettings,
    live: Option<LiveStroke>,
    history: History,
    view: ViewTransform,
    metrics: DrawMetrics,
}

impl Default for CanvasEngine {
    fn default() -> Self {
        Self::new(CanvasOptions::default())
    }
}

impl CanvasEngine {
    /// Creates a canvas filled with the background color.
    ///
    /// Brush values in `options` go through the same clamping as the setters.
    pub fn new(options: CanvasOptions) -> Self {
        let mut engine = Self {
            raster: Raster::new(options.width, options.height, options.background),
            background: options.background,
            brush: options.brush,
            live: None,
            history: History::new(options.max_history),
            view: ViewTransform::IDENTITY,
            metrics: DrawMetrics::default(),
        };
        engine.set_brush_size(options.brush.size as i64);
        engine.set_opacity(options.brush.opacity);
        engine.set_hardness(options.brush.hardness);
        engine.set_flow(options.brush.flow);
        engine.set_pressure_scale(options.brush.pressure_scale);
        engine
    }

    // ------------------------------------------------------------------------
    // Drawing
    // ------------------------------------------------------------------------

    /// Feeds one stroke sample.
    ///
    /// - `Some(point)` with `is_drawing`: extends the active stroke (starting one if
    ///   needed) and renders the new segment.
    /// - `Some(point)` without `is_drawing`: renders the point as the final sample,
    ///   then seals the stroke.
    /// - `None`: pen-up; seals and commits the active stroke, if any.
    ///
    /// `pressure` is clamped into [`PRESSURE_RANGE`].
    ///
    /// Returns the stroke that was committed by this call, if any.
    pub fn draw(
        &mut self,
        point: Option<(f32, f32)>,
        pressure: f32,
        is_drawing: bool,
    ) -> Option<&Stroke> {
        let Some((x, y)) = point else {
            return self.commit_stroke();
        };
        if !x.is_finite() || !y.is_finite() {
            log::warn!("Ignoring non-finite draw point ({}, {})", x, y);
            return None;
        }

        let started = Instant::now();
        let pressure = if pressure.is_finite() {
            pressure.clamp(PRESSURE_RANGE.0, PRESSURE_RANGE.1)
        } else {
            1.0
        };
        let sample = StrokePoint { x, y, pressure };

        let live = self.live.get_or_insert_with(|| LiveStroke {
            stroke: ActiveStroke::new(),
            base: self.raster.clone(),
        });
        let previous = live.stroke.last_point();
        live.stroke.push(sample);

        if let Some(dirty) = self.render_segment(previous, sample)
            && let Some(live) = self.live.as_mut()
        {
            live.stroke.mark_dirty(dirty);
        }
        self.metrics.record(started.elapsed().as_secs_f64() * 1000.0);

        if is_drawing {
            None
        } else {
            self.commit_stroke()
        }
    }

    /// Whether a stroke is currently being drawn.
    pub fn is_drawing(&self) -> bool {
        self.live.is_some()
    }

    /// Stamps from `from` (exclusive) to `to` (inclusive) with the current brush.
    fn render_segment(&mut self, from: Option<StrokePoint>, to: StrokePoint) -> Option<Rect> {
        let settings = self.brush;
        let tip = settings.brush.tip();
        let alpha = settings.opacity * settings.flow;
        let to = self.clamp_point(to);

        let Some(from) = from.map(|p| self.clamp_point(p)) else {
            let ctx = self.stamp_context(&settings, to, None);
            return brush::stamp(&mut self.raster, tip, &ctx, alpha);
        };

        let (dx, dy) = (to.x - from.x, to.y - from.y);
        let distance = (dx * dx + dy * dy).sqrt();
        let direction = (distance > 0.0).then(|| dy.atan2(dx));
        let diameter = settings.effective_diameter(from.pressure.max(to.pressure));
        let spacing = (diameter / 4.0).max(1.0);
        let steps = ((distance / spacing).ceil() as usize).max(1);

        let mut dirty: Option<Rect> = None;
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            let point = StrokePoint {
                x: from.x + dx * t,
                y: from.y + dy * t,
                pressure: from.pressure + (to.pressure - from.pressure) * t,
            };
            let ctx = self.stamp_context(&settings, point, direction);
            if let Some(rect) = brush::stamp(&mut self.raster, tip, &ctx, alpha) {
                dirty = Some(dirty.map_or(rect, |d| d.union(rect)));
            }
        }
        dirty
    }

    fn stamp_context(
        &self,
        settings: &BrushSettings,
        point: StrokePoint,
        direction: Option<f32>,
    ) -> StampContext {
        StampContext {
            cx: point.x,
            cy: point.y,
            radius: settings.effective_diameter(point.pressure) / 2.0,
            hardness: settings.hardness,
            color: settings.color,
            background: self.background,
            direction,
        }
    }

    /// Keeps a sample inside the canvas.
    fn clamp_point(&self, point: StrokePoint) -> StrokePoint {
        let max_x = self.raster.width().saturating_sub(1) as f32;
        let max_y = self.raster.height().saturating_sub(1) as f32;
        StrokePoint {
            x: point.x.clamp(0.0, max_x),
            y: point.y.clamp(0.0, max_y),
            pressure: point.pressure,
        }
    }

    /// Seals the active stroke and records it in history.
    fn commit_stroke(&mut self) -> Option<&Stroke> {
        let LiveStroke { stroke, base } = self.live.take()?;
        let dirty = stroke.dirty();
        let stroke = stroke.seal();

        let patches =
            dirty.and_then(|rect| Some((base.capture(rect)?, self.raster.capture(rect)?)));
        let (before, after) = patches.unwrap_or_else(|| {
            log::debug!("Stroke left the canvas unchanged; recording an empty edit");
            (RasterPatch::empty(), RasterPatch::empty())
        });

        log::debug!("Committing stroke with {} points", stroke.len());
        self.history
            .push(HistoryEntry::new(Edit::Stroke(stroke), before, after));
        self.last_stroke()
    }

    /// The most recent applied stroke in history.
    pub fn last_stroke(&self) -> Option<&Stroke> {
        self.history.applied().rev().find_map(|edit| match edit {
            Edit::Stroke(stroke) => Some(stroke),
            Edit::Clear => None,
        })
    }

    // ------------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------------

    /// Clears the canvas to the background color as one undoable edit.
    pub fn clear(&mut self) {
        self.commit_stroke();
        let Some(rect) = self.raster.bounds() else {
            return;
        };
        let Some(before) = self.raster.capture(rect) else {
            return;
        };
        self.raster.fill(self.background);
        let Some(after) = self.raster.capture(rect) else {
            return;
        };
        self.history.push(HistoryEntry::new(Edit::Clear, before, after));
        log::debug!("Canvas cleared");
    }

    /// Steps back one edit. Returns `false` at the start of history.
    pub fn undo(&mut self) -> bool {
        self.commit_stroke();
        if !self.history.can_undo() {
            log::debug!(
                "Nothing to undo (cursor {}/{})",
                self.history.cursor(),
                self.history.len()
            );
            return false;
        }
        let undone = self.history.undo(&mut self.raster).is_some();
        log::debug!(
            "Undo applied (cursor {}/{})",
            self.history.cursor(),
            self.history.len()
        );
        undone
    }

    /// Re-applies the next undone edit. Returns `false` when nothing is redoable.
    pub fn redo(&mut self) -> bool {
        self.commit_stroke();
        if !self.history.can_redo() {
            log::debug!(
                "Nothing to redo (cursor {}/{})",
                self.history.cursor(),
                self.history.len()
            );
            return false;
        }
        let redone = self.history.redo(&mut self.raster).is_some();
        log::debug!(
            "Redo applied (cursor {}/{})",
            self.history.cursor(),
            self.history.len()
        );
        redone
    }

    /// Encodes the raster as PNG and writes it to `path`.
    pub fn save(&self, path: &Path) -> Result<PathBuf, SaveError> {
        self.save_with(&FileSaver, path)
    }

    /// Like [`save`](Self::save) but through a caller-provided saver.
    pub fn save_with(&self, saver: &dyn ImageSaver, path: &Path) -> Result<PathBuf, SaveError> {
        let png = capture::encode_png(&self.raster)?;
        saver.save(&png, path)
    }

    // ------------------------------------------------------------------------
    // Brush configuration
    // ------------------------------------------------------------------------

    pub fn set_brush(&mut self, brush: BrushType) {
        self.brush.brush = brush;
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.brush.color = color;
    }

    /// Sets the brush diameter, clamped to `MIN_BRUSH_SIZE..=MAX_BRUSH_SIZE`.
    pub fn set_brush_size(&mut self, size: i64) {
        self.brush.size = size.clamp(MIN_BRUSH_SIZE as i64, MAX_BRUSH_SIZE as i64) as u32;
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.brush.opacity = clamp_unit("opacity", opacity, self.brush.opacity);
    }

    pub fn set_hardness(&mut self, hardness: f32) {
        self.brush.hardness = clamp_unit("hardness", hardness, self.brush.hardness);
    }

    pub fn set_flow(&mut self, flow: f32) {
        self.brush.flow = clamp_unit("flow", flow, self.brush.flow);
    }

    pub fn set_pressure_scale(&mut self, scale: f32) {
        if !scale.is_finite() {
            log::warn!("Ignoring non-finite pressure scale {}", scale);
            return;
        }
        self.brush.pressure_scale = scale.clamp(PRESSURE_SCALE_RANGE.0, PRESSURE_SCALE_RANGE.1);
    }

    /// Advances to the next brush type and returns it.
    pub fn cycle_brush(&mut self) -> BrushType {
        self.brush.brush = self.brush.brush.next();
        self.brush.brush
    }

    pub fn brush(&self) -> &BrushSettings {
        &self.brush
    }

    // ------------------------------------------------------------------------
    // View
    // ------------------------------------------------------------------------

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.view.set_zoom(zoom);
    }

    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.view.pan_by(dx, dy);
    }

    pub fn reset_view(&mut self) {
        self.view.reset();
    }

    /// The raster as presented through the current pan/zoom.
    pub fn get_transformed_canvas(&self) -> Raster {
        self.view.apply(&self.raster, self.background)
    }

    // ------------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------------

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn metrics(&self) -> DrawMetrics {
        self.metrics
    }
}

/// Clamps a `0.0..=1.0` property, keeping `current` for non-finite input.
fn clamp_unit(name: &str, value: f32, current: f32) -> f32 {
    if !value.is_finite() {
        log::warn!("Ignoring non-finite {} {}", name, value);
        return current;
    }
    value.clamp(0.0, 1.0)
}
