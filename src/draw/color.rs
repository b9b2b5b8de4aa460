//! RGB color type and predefined color constants.

use serde::{Deserialize, Serialize};

/// An opaque 8-bit RGB color.
///
/// Serialized as a `[r, g, b]` array so UI commands and config files can
/// spell colors the same way.
///
/// # Examples
///
/// ```
/// use fingerpaint::draw::Rgb;
/// let orange = Rgb::new(255, 128, 0);
/// assert_eq!(orange.g, 128);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Creates a color from its three 8-bit channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Alpha-over blend of `self` on top of `base` with weight `alpha` (0.0-1.0).
    ///
    /// Rounds to the nearest channel value so repeated blends stay deterministic.
    pub fn over(self, base: Rgb, alpha: f32) -> Rgb {
        let a = alpha.clamp(0.0, 1.0);
        let mix = |top: u8, bottom: u8| -> u8 {
            let value = top as f32 * a + bottom as f32 * (1.0 - a);
            value.round().clamp(0.0, 255.0) as u8
        };
        Rgb {
            r: mix(self.r, base.r),
            g: mix(self.g, base.g),
            b: mix(self.b, base.b),
        }
    }

    /// Moves each channel toward white by `amount` (saturating).
    pub fn brighten(self, amount: u8) -> Rgb {
        Rgb {
            r: self.r.saturating_add(amount),
            g: self.g.saturating_add(amount),
            b: self.b.saturating_add(amount),
        }
    }

    /// Scales each channel by `factor`, clamping to the valid range.
    pub fn scale(self, factor: f32) -> Rgb {
        let apply = |c: u8| (c as f32 * factor).round().clamp(0.0, 255.0) as u8;
        Rgb {
            r: apply(self.r),
            g: apply(self.g),
            b: apply(self.b),
        }
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(color: Rgb) -> Self {
        [color.r, color.g, color.b]
    }
}

// ============================================================================
// Predefined Color Constants
// ============================================================================

pub const RED: Rgb = Rgb::new(255, 0, 0);
pub const GREEN: Rgb = Rgb::new(0, 255, 0);
pub const BLUE: Rgb = Rgb::new(0, 0, 255);
pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
pub const ORANGE: Rgb = Rgb::new(255, 128, 0);
pub const PINK: Rgb = Rgb::new(255, 0, 255);
pub const WHITE: Rgb = Rgb::new(255, 255, 255);
pub const BLACK: Rgb = Rgb::new(0, 0, 0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn over_full_alpha_replaces_base() {
        assert_eq!(RED.over(WHITE, 1.0), RED);
        assert_eq!(RED.over(WHITE, 0.0), WHITE);
    }

    #[test]
    fn over_half_alpha_mixes_channels() {
        let mixed = BLACK.over(WHITE, 0.5);
        assert_eq!(mixed, Rgb::new(128, 128, 128));
    }

    #[test]
    fn serializes_as_array() {
        let json = serde_json::to_string(&ORANGE).unwrap();
        assert_eq!(json, "[255,128,0]");
        let back: Rgb = serde_json::from_str("[1,2,3]").unwrap();
        assert_eq!(back, Rgb::new(1, 2, 3));
    }
}
