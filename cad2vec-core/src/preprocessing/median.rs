//! 3x3 median filter for noise reduction.

use crate::raster::RasterImage;

/// Apply a 3x3 median filter to each color channel independently; alpha
/// passes through unfiltered.
pub fn median_filter_3x3(image: &RasterImage) -> RasterImage {
    let (w, h) = (image.width as i32, image.height as i32);
    let mut out = image.pixels.clone();

    for y in 0..h {
        for x in 0..w {
            for channel in 0..3 {
                let mut window = [0u8; 9];
                let mut n = 0;
                for dy in -1..=1 {
                    for dx in -1..=1 {
                        let px = image.get(x + dx, y + dy);
                        window[n] = px[channel];
                        n += 1;
                    }
                }
                window.sort_unstable();
                let idx = ((y * w + x) * 4 + channel as i32) as usize;
                out[idx] = window[4];
            }
        }
    }

    RasterImage {
        width: image.width,
        height: image.height,
        pixels: out,
    }
}
