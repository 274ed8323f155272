//! Background color detection from border pixels.

use crate::geometry::Color;
use crate::raster::RasterImage;

/// Collect the colors of all border pixels, quantize each RGB channel by
/// integer division into 16 bins, and return the center-of-bin
/// representative of the most common bin whose alpha is at least 128.
pub fn detect_background(image: &RasterImage) -> Color {
    let mut histogram: std::collections::HashMap<(u8, u8, u8), (u32, Color)> =
        std::collections::HashMap::new();

    let mut visit = |x: i32, y: i32| {
        let px = image.get(x, y);
        if px[3] < 128 {
            return;
        }
        let bin = (px[0] / 16, px[1] / 16, px[2] / 16);
        let entry = histogram.entry(bin).or_insert((0, Color::rgb(0, 0, 0)));
        entry.0 += 1;
        entry.1 = Color::rgb(bin.0 * 16 + 8, bin.1 * 16 + 8, bin.2 * 16 + 8);
    };

    for x in 0..image.width as i32 {
        visit(x, 0);
        visit(x, image.height as i32 - 1);
    }
    for y in 0..image.height as i32 {
        visit(0, y);
        visit(image.width as i32 - 1, y);
    }

    histogram
        .values()
        .max_by_key(|(count, _)| *count)
        .map(|(_, color)| *color)
        .unwrap_or(Color::rgb(255, 255, 255))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::RasterImage;

    #[test]
    fn detects_white_border_as_background() {
        let mut data = vec![255u8; (20 * 20 * 4) as usize];
        for y in 5..15 {
            for x in 5..15 {
                let idx = ((y * 20 + x) * 4) as usize;
                data[idx] = 0;
                data[idx + 1] = 0;
                data[idx + 2] = 0;
            }
        }
        let image = RasterImage::new(20, 20, data).unwrap();
        let bg = detect_background(&image);
        assert!(bg.r > 200 && bg.g > 200 && bg.b > 200);
    }
}
