//! Two-pass chamfer distance transform.

use crate::raster::{BinaryMask, DistanceField};

const DIAGONAL: f32 = std::f32::consts::SQRT_2;

/// Distance from every pixel to the nearest set pixel in `mask`, via a
/// forward (top-left to bottom-right) then backward (bottom-right to
/// top-left) chamfer pass.
pub fn distance_transform(mask: &BinaryMask) -> DistanceField {
    let (w, h) = (mask.width as i32, mask.height as i32);
    let mut field = DistanceField::new(mask.width, mask.height);

    for y in 0..h {
        for x in 0..w {
            let d = if mask.is_set(x, y) { 0.0 } else { f32::INFINITY };
            field.set(x as u32, y as u32, d);
        }
    }

    for y in 0..h {
        for x in 0..w {
            let mut d = field.get(x, y);
            d = d.min(field.get(x, y - 1) + 1.0);
            d = d.min(field.get(x - 1, y) + 1.0);
            d = d.min(field.get(x - 1, y - 1) + DIAGONAL);
            d = d.min(field.get(x + 1, y - 1) + DIAGONAL);
            field.set(x as u32, y as u32, d);
        }
    }

    for y in (0..h).rev() {
        for x in (0..w).rev() {
            let mut d = field.get(x, y);
            d = d.min(field.get(x, y + 1) + 1.0);
            d = d.min(field.get(x + 1, y) + 1.0);
            d = d.min(field.get(x + 1, y + 1) + DIAGONAL);
            d = d.min(field.get(x - 1, y + 1) + DIAGONAL);
            field.set(x as u32, y as u32, d);
        }
    }

    field
}
