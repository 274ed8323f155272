//! Grayscale reduction and channel inversion.

use crate::raster::{GrayBuffer, RasterImage};

/// Reduce an RGBA image to luminance using the standard perceptual weights,
/// rounding to the nearest integer.
pub fn to_grayscale(image: &RasterImage) -> GrayBuffer {
    let mut out = GrayBuffer::new(image.width, image.height);
    for (i, px) in image.pixels.chunks(4).enumerate() {
        let lum = 0.299 * px[0] as f32 + 0.587 * px[1] as f32 + 0.114 * px[2] as f32;
        out.data[i] = lum.round().clamp(0.0, 255.0) as u8;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pure_gray_round_trips_through_luminance() {
        // property: luminance(r,g,b) == v when r == g == b == v
        for v in [0u8, 1, 17, 128, 200, 255] {
            let img = RasterImage::new(1, 1, vec![v, v, v, 255]).unwrap();
            let gray = to_grayscale(&img);
            assert_eq!(gray.data[0], v, "luminance mismatch for gray value {v}");
        }
    }

    #[test]
    fn black_and_white_extremes() {
        let img = RasterImage::new(2, 1, vec![0, 0, 0, 255, 255, 255, 255, 255]).unwrap();
        let gray = to_grayscale(&img);
        assert_eq!(gray.data, vec![0, 255]);
    }
}
