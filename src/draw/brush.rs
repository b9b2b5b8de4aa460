//! Brush model: brush types, their footprints, and stamp rasterization.
//!
//! Every brush shares one contract: a stamp at a point covers some pixels with a
//! coverage value in `0.0..=1.0`, and each covered pixel is alpha-over blended with
//! `opacity × flow × coverage × tip alpha`. Brush types differ only in footprint
//! shape, falloff, and the color they lay down.

use super::canvas::{MAX_BRUSH_SIZE, PRESSURE_SCALE_RANGE};
use super::color::Rgb;
use super::raster::Raster;
use crate::util::Rect;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Largest stamp a brush can produce, whatever the pressure.
pub const MAX_STAMP_DIAMETER: f32 = MAX_BRUSH_SIZE as f32 * PRESSURE_SCALE_RANGE.1;

/// Available brush types, in tool-cycling order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum BrushType {
    /// Round brush with hardness-controlled edge
    #[default]
    Standard,
    /// Soft three-ring spray
    Airbrush,
    /// Flat elliptical nib that follows the stroke direction
    Calligraphy,
    /// Hard round tip capped at 70% alpha
    Marker,
    /// Round tip with paper grain that grows as hardness drops
    Pencil,
    /// Wide soft wash with slight color variation
    Watercolor,
    /// Glowing tip that brightens toward the center
    Neon,
    /// Grid-snapped square cells
    Pixel,
    /// Paints the background color back
    Eraser,
}

impl BrushType {
    /// All brush types in cycling order.
    pub const ALL: [BrushType; 9] = [
        BrushType::Standard,
        BrushType::Airbrush,
        BrushType::Calligraphy,
        BrushType::Marker,
        BrushType::Pencil,
        BrushType::Watercolor,
        BrushType::Neon,
        BrushType::Pixel,
        BrushType::Eraser,
    ];

    /// Lowercase name used in UI commands and config files.
    pub fn name(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Airbrush => "airbrush",
            Self::Calligraphy => "calligraphy",
            Self::Marker => "marker",
            Self::Pencil => "pencil",
            Self::Watercolor => "watercolor",
            Self::Neon => "neon",
            Self::Pixel => "pixel",
            Self::Eraser => "eraser",
        }
    }

    /// The next brush in cycling order, wrapping at the end.
    pub fn next(self) -> BrushType {
        let idx = Self::ALL.iter().position(|b| *b == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Footprint implementation for this brush type.
    pub fn tip(self) -> &'static dyn BrushTip {
        match self {
            Self::Standard => &RoundTip,
            Self::Airbrush => &AirbrushTip,
            Self::Calligraphy => &CalligraphyTip,
            Self::Marker => &MarkerTip,
            Self::Pencil => &PencilTip,
            Self::Watercolor => &WatercolorTip,
            Self::Neon => &NeonTip,
            Self::Pixel => &PixelTip,
            Self::Eraser => &EraserTip,
        }
    }
}

impl fmt::Display for BrushType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a brush name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown brush '{0}'")]
pub struct UnknownBrush(pub String);

impl FromStr for BrushType {
    type Err = UnknownBrush;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|b| b.name() == wanted)
            .ok_or_else(|| UnknownBrush(s.to_string()))
    }
}

/// Current brush configuration. Values are kept within their valid ranges by
/// the setters on [`CanvasEngine`](super::CanvasEngine).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushSettings {
    pub brush: BrushType,
    /// Nominal diameter in pixels (>= 1)
    pub size: u32,
    pub opacity: f32,
    pub hardness: f32,
    pub flow: f32,
    /// Multiplier applied to per-point pressure
    pub pressure_scale: f32,
    pub color: Rgb,
}

impl BrushSettings {
    /// Stamp diameter for a given pressure, kept within `1..=MAX_STAMP_DIAMETER`.
    pub fn effective_diameter(&self, pressure: f32) -> f32 {
        (self.size as f32 * pressure * self.pressure_scale).clamp(1.0, MAX_STAMP_DIAMETER)
    }
}

/// Per-stamp inputs handed to a [`BrushTip`].
#[derive(Debug, Clone, Copy)]
pub struct StampContext {
    pub cx: f32,
    pub cy: f32,
    pub radius: f32,
    pub hardness: f32,
    pub color: Rgb,
    pub background: Rgb,
    /// Direction of travel in radians, when known
    pub direction: Option<f32>,
}

/// Footprint of a brush type.
pub trait BrushTip: Sync {
    /// Pixel bounds touched by the stamp as (min_x, min_y, max_x, max_y), max exclusive.
    fn bounds(&self, ctx: &StampContext) -> (i32, i32, i32, i32) {
        circle_bounds(ctx, self.reach(ctx.radius))
    }

    /// Distance from the center beyond which coverage is zero.
    fn reach(&self, radius: f32) -> f32 {
        radius
    }

    /// Coverage at pixel `(px, py)` in `0.0..=1.0`.
    fn coverage(&self, px: i32, py: i32, ctx: &StampContext) -> f32;

    /// Upper bound applied to the stamp alpha.
    fn alpha_scale(&self) -> f32 {
        1.0
    }

    /// Color laid down at pixel `(px, py)`.
    fn paint(&self, _px: i32, _py: i32, ctx: &StampContext) -> Rgb {
        ctx.color
    }
}

/// Hardness-controlled radial falloff.
///
/// `t` is the normalized distance from the center (1.0 = edge). Hardness 1.0
/// gives a solid disk; lower hardness starts a Gaussian-like decay earlier.
pub fn falloff(t: f32, hardness: f32) -> f32 {
    if t >= 1.0 {
        return 0.0;
    }
    let h = hardness.clamp(0.0, 1.0);
    if t <= h {
        return 1.0;
    }
    let s = (t - h) / (1.0 - h);
    (-(s * s) * 4.0).exp() * (1.0 - s)
}

/// Deterministic per-pixel noise in `0.0..1.0`.
fn grain(x: i32, y: i32) -> f32 {
    let mut h = (x as u32).wrapping_mul(374_761_393) ^ (y as u32).wrapping_mul(668_265_263);
    h = (h ^ (h >> 13)).wrapping_mul(1_274_126_177);
    h ^= h >> 16;
    (h & 0xffff) as f32 / 65_536.0
}

fn circle_bounds(ctx: &StampContext, reach: f32) -> (i32, i32, i32, i32) {
    (
        (ctx.cx - reach).floor() as i32,
        (ctx.cy - reach).floor() as i32,
        ((ctx.cx + reach).ceil() as i32).saturating_add(1),
        ((ctx.cy + reach).ceil() as i32).saturating_add(1),
    )
}

fn radial(px: i32, py: i32, ctx: &StampContext, reach: f32) -> f32 {
    let dx = px as f32 - ctx.cx;
    let dy = py as f32 - ctx.cy;
    (dx * dx + dy * dy).sqrt() / reach.max(0.5)
}

struct RoundTip;

impl BrushTip for RoundTip {
    fn coverage(&self, px: i32, py: i32, ctx: &StampContext) -> f32 {
        falloff(radial(px, py, ctx, ctx.radius), ctx.hardness)
    }
}

struct AirbrushTip;

impl BrushTip for AirbrushTip {
    fn reach(&self, radius: f32) -> f32 {
        radius * 1.5
    }

    fn coverage(&self, px: i32, py: i32, ctx: &StampContext) -> f32 {
        let t = radial(px, py, ctx, self.reach(ctx.radius));
        let ring = if t <= 1.0 / 3.0 {
            1.0
        } else if t <= 2.0 / 3.0 {
            2.0 / 3.0
        } else {
            1.0 / 3.0
        };
        ring * falloff(t, ctx.hardness * 0.5)
    }

    fn alpha_scale(&self) -> f32 {
        0.5
    }
}

struct CalligraphyTip;

impl CalligraphyTip {
    const DEFAULT_ANGLE: f32 = std::f32::consts::FRAC_PI_4;
}

impl BrushTip for CalligraphyTip {
    fn coverage(&self, px: i32, py: i32, ctx: &StampContext) -> f32 {
        let angle = ctx.direction.unwrap_or(Self::DEFAULT_ANGLE);
        let (sin, cos) = angle.sin_cos();
        let dx = px as f32 - ctx.cx;
        let dy = py as f32 - ctx.cy;
        let along = dx * cos + dy * sin;
        let across = -dx * sin + dy * cos;
        let major = ctx.radius.max(0.5);
        let minor = (ctx.radius / 3.0).max(0.5);
        let t = ((along / major).powi(2) + (across / minor).powi(2)).sqrt();
        falloff(t, ctx.hardness)
    }
}

struct MarkerTip;

impl BrushTip for MarkerTip {
    fn coverage(&self, px: i32, py: i32, ctx: &StampContext) -> f32 {
        falloff(radial(px, py, ctx, ctx.radius), ctx.hardness.max(0.8))
    }

    fn alpha_scale(&self) -> f32 {
        0.7
    }
}

struct PencilTip;

impl BrushTip for PencilTip {
    fn coverage(&self, px: i32, py: i32, ctx: &StampContext) -> f32 {
        let base = falloff(radial(px, py, ctx, ctx.radius), ctx.hardness);
        let roughness = (1.0 - ctx.hardness) * 0.2;
        base * (1.0 - roughness * grain(px, py))
    }
}

struct WatercolorTip;

impl BrushTip for WatercolorTip {
    fn reach(&self, radius: f32) -> f32 {
        radius * 1.5
    }

    fn coverage(&self, px: i32, py: i32, ctx: &StampContext) -> f32 {
        falloff(radial(px, py, ctx, self.reach(ctx.radius)), ctx.hardness * 0.3)
    }

    fn alpha_scale(&self) -> f32 {
        0.7
    }

    fn paint(&self, px: i32, py: i32, ctx: &StampContext) -> Rgb {
        ctx.color.scale(0.9 + grain(py, px) * 0.2)
    }
}

struct NeonTip;

impl BrushTip for NeonTip {
    fn coverage(&self, px: i32, py: i32, ctx: &StampContext) -> f32 {
        falloff(radial(px, py, ctx, ctx.radius), ctx.hardness)
    }

    fn paint(&self, px: i32, py: i32, ctx: &StampContext) -> Rgb {
        let t = radial(px, py, ctx, ctx.radius).min(1.0);
        ctx.color.brighten(((1.0 - t) * 150.0) as u8)
    }
}

struct PixelTip;

impl PixelTip {
    fn cell(ctx: &StampContext) -> (i32, i32, i32) {
        let size = ((ctx.radius * 2.0 / 3.0).round() as i32).max(1);
        let x = (ctx.cx.floor() as i32).div_euclid(size) * size;
        let y = (ctx.cy.floor() as i32).div_euclid(size) * size;
        (x, y, size)
    }
}

impl BrushTip for PixelTip {
    fn bounds(&self, ctx: &StampContext) -> (i32, i32, i32, i32) {
        let (x, y, size) = Self::cell(ctx);
        (x, y, x + size, y + size)
    }

    fn coverage(&self, px: i32, py: i32, ctx: &StampContext) -> f32 {
        let (x, y, size) = Self::cell(ctx);
        if (x..x + size).contains(&px) && (y..y + size).contains(&py) {
            1.0
        } else {
            0.0
        }
    }
}

struct EraserTip;

impl BrushTip for EraserTip {
    fn coverage(&self, px: i32, py: i32, ctx: &StampContext) -> f32 {
        falloff(radial(px, py, ctx, ctx.radius), ctx.hardness)
    }

    fn paint(&self, _px: i32, _py: i32, ctx: &StampContext) -> Rgb {
        ctx.background
    }
}

/// Applies one stamp of `tip` to the raster with base alpha `alpha`.
///
/// Returns the touched region clipped to the raster, if any.
pub fn stamp(
    raster: &mut Raster,
    tip: &dyn BrushTip,
    ctx: &StampContext,
    alpha: f32,
) -> Option<Rect> {
    let alpha = alpha * tip.alpha_scale();
    let (min_x, min_y, max_x, max_y) = tip.bounds(ctx);
    let touched = Rect::from_min_max(min_x, min_y, max_x, max_y)?
        .clamp_to_bounds(raster.width() as i32, raster.height() as i32)?;
    if alpha <= 0.0 {
        return None;
    }

    for py in touched.y..touched.y + touched.height {
        for px in touched.x..touched.x + touched.width {
            let coverage = tip.coverage(px, py, ctx);
            if coverage > 0.0 {
                raster.blend(px, py, tip.paint(px, py, ctx), alpha * coverage);
            }
        }
    }

    Some(touched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLACK, RED, WHITE};

    fn ctx(radius: f32, hardness: f32) -> StampContext {
        StampContext {
            cx: 10.0,
            cy: 10.0,
            radius,
            hardness,
            color: RED,
            background: WHITE,
            direction: None,
        }
    }

    #[test]
    fn falloff_hard_edge_is_a_disk() {
        assert_eq!(falloff(0.0, 1.0), 1.0);
        assert_eq!(falloff(0.99, 1.0), 1.0);
        assert_eq!(falloff(1.0, 1.0), 0.0);
    }

    #[test]
    fn falloff_soft_edge_decays_monotonically() {
        let samples: Vec<f32> = (0..10).map(|i| falloff(i as f32 / 10.0, 0.0)).collect();
        assert_eq!(samples[0], 1.0);
        assert!(samples.windows(2).all(|w| w[0] >= w[1]));
        assert!(samples[9] < 0.1);
    }

    #[test]
    fn diameter_is_capped_for_extreme_pressure() {
        let settings = BrushSettings {
            brush: BrushType::Standard,
            size: MAX_BRUSH_SIZE,
            opacity: 1.0,
            hardness: 1.0,
            flow: 1.0,
            pressure_scale: PRESSURE_SCALE_RANGE.1,
            color: BLACK,
        };
        assert_eq!(settings.effective_diameter(1.0e30), MAX_STAMP_DIAMETER);
        assert_eq!(settings.effective_diameter(0.0), 1.0);
    }

    #[test]
    fn bounds_saturate_instead_of_overflowing() {
        let mut far = ctx(1.0e30, 1.0);
        far.cx = 1.0e30;
        let (_, _, max_x, max_y) = circle_bounds(&far, far.radius);
        assert_eq!(max_x, i32::MAX);
        assert_eq!(max_y, i32::MAX);
    }

    #[test]
    fn brush_names_parse_case_insensitively() {
        assert_eq!("Marker".parse::<BrushType>().unwrap(), BrushType::Marker);
        assert_eq!(" eraser ".parse::<BrushType>().unwrap(), BrushType::Eraser);
        assert!("crayon".parse::<BrushType>().is_err());
    }

    #[test]
    fn brush_cycle_wraps() {
        assert_eq!(BrushType::Standard.next(), BrushType::Airbrush);
        assert_eq!(BrushType::Eraser.next(), BrushType::Standard);
    }

    #[test]
    fn hard_round_stamp_paints_center_not_corners() {
        let mut raster = Raster::new(21, 21, WHITE);
        let touched = stamp(&mut raster, BrushType::Standard.tip(), &ctx(4.0, 1.0), 1.0);
        assert!(touched.is_some());
        assert_eq!(raster.get(10, 10), Some(RED));
        assert_eq!(raster.get(0, 0), Some(WHITE));
        assert_eq!(raster.get(10, 16), Some(WHITE));
    }

    #[test]
    fn marker_never_reaches_full_opacity() {
        let mut raster = Raster::new(21, 21, WHITE);
        stamp(&mut raster, BrushType::Marker.tip(), &ctx(4.0, 1.0), 1.0);
        let center = raster.get(10, 10).unwrap();
        assert_eq!(center.r, 255);
        assert!(center.g > 0 && center.g < 255);
    }

    #[test]
    fn eraser_paints_background() {
        let mut raster = Raster::new(21, 21, BLACK);
        let mut eraser = ctx(4.0, 1.0);
        eraser.background = WHITE;
        stamp(&mut raster, BrushType::Eraser.tip(), &eraser, 1.0);
        assert_eq!(raster.get(10, 10), Some(WHITE));
    }

    #[test]
    fn pixel_stamp_fills_snapped_cell() {
        let mut raster = Raster::new(32, 32, WHITE);
        // radius 6 -> 4px cells; (10, 10) snaps to (8, 8)
        let touched = stamp(&mut raster, BrushType::Pixel.tip(), &ctx(6.0, 1.0), 1.0).unwrap();
        assert_eq!(touched, Rect::new(8, 8, 4, 4).unwrap());
        assert_eq!(raster.get(8, 8), Some(RED));
        assert_eq!(raster.get(11, 11), Some(RED));
        assert_eq!(raster.get(12, 12), Some(WHITE));
    }

    #[test]
    fn zero_alpha_leaves_raster_untouched() {
        let mut raster = Raster::new(21, 21, WHITE);
        assert!(stamp(&mut raster, BrushType::Standard.tip(), &ctx(4.0, 1.0), 0.0).is_none());
        assert!(raster.pixels().iter().all(|p| *p == WHITE));
    }

    #[test]
    fn stamp_outside_raster_is_ignored() {
        let mut raster = Raster::new(8, 8, WHITE);
        let mut far = ctx(2.0, 1.0);
        far.cx = 100.0;
        far.cy = 100.0;
        assert!(stamp(&mut raster, BrushType::Standard.tip(), &far, 1.0).is_none());
    }
}
