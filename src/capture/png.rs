//! PNG encoding of the canvas raster via Cairo.

use super::types::SaveError;
use crate::draw::Raster;

/// Encodes a raster as PNG bytes.
///
/// Pixels are copied into an RGB24 Cairo image surface, which stores each pixel
/// as a native-endian `0x00RRGGBB` word.
pub fn encode_png(raster: &Raster) -> Result<Vec<u8>, SaveError> {
    let (width, height) = (raster.width(), raster.height());
    if width == 0 || height == 0 {
        return Err(SaveError::EmptyCanvas { width, height });
    }

    let mut surface =
        cairo::ImageSurface::create(cairo::Format::Rgb24, width as i32, height as i32)
            .map_err(|e| SaveError::Encode(e.to_string()))?;
    let stride = surface.stride() as usize;

    {
        let mut data = surface
            .data()
            .map_err(|e| SaveError::Encode(e.to_string()))?;
        for (row, pixels) in raster.pixels().chunks(width as usize).enumerate() {
            let line = &mut data[row * stride..row * stride + width as usize * 4];
            for (dst, px) in line.chunks_exact_mut(4).zip(pixels) {
                let word = (px.r as u32) << 16 | (px.g as u32) << 8 | px.b as u32;
                dst.copy_from_slice(&word.to_ne_bytes());
            }
        }
    }

    let mut buffer = Vec::new();
    surface
        .write_to_png(&mut buffer)
        .map_err(|e| SaveError::Encode(e.to_string()))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{RED, WHITE};

    #[test]
    fn encodes_png_signature() {
        let mut raster = Raster::new(16, 8, WHITE);
        raster.set(3, 3, RED);
        let png = encode_png(&raster).unwrap();
        assert_eq!(&png[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    }

    #[test]
    fn empty_raster_is_rejected() {
        let raster = Raster::new(0, 10, WHITE);
        assert!(matches!(
            encode_png(&raster),
            Err(SaveError::EmptyCanvas { .. })
        ));
    }
}
