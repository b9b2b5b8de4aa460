//! Blending the canvas over the live camera frame for display.

use super::raster::Raster;

/// Weighted blend of a camera frame and the canvas.
///
/// The output has the canvas' dimensions; a camera frame of a different size is
/// resampled with nearest-neighbour lookup. `camera_weight` is clamped to
/// `0.0..=1.0` and the canvas gets the remaining weight.
pub fn compose(camera: &Raster, canvas: &Raster, camera_weight: f32) -> Raster {
    let weight = camera_weight.clamp(0.0, 1.0);
    let mut out = canvas.clone();
    if camera.width() == 0 || camera.height() == 0 {
        return out;
    }

    let (w, h) = (canvas.width() as i32, canvas.height() as i32);
    for y in 0..h {
        let cam_y = (y as i64 * camera.height() as i64 / h.max(1) as i64) as i32;
        for x in 0..w {
            let cam_x = (x as i64 * camera.width() as i64 / w.max(1) as i64) as i32;
            if let (Some(cam), Some(paint)) = (camera.get(cam_x, cam_y), canvas.get(x, y)) {
                out.set(x, y, cam.over(paint, weight));
            }
        }
    }
    out
}
