//! Grid buffer types that flow between pipeline stages.
//!
//! All grids index as `y * width + x`; out-of-range reads return a
//! background/zero value rather than panicking, per the data-model
//! invariant this crate relies on throughout.

use crate::error::PipelineError;

/// Row-major 8-bit-per-channel RGBA image.
#[derive(Debug, Clone)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>, // len == width * height * 4
}

impl RasterImage {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> StageResultImage {
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 {
            return Err(PipelineError::invalid_image(
                "raster_image",
                format!("degenerate dimensions {width}x{height}"),
            ));
        }
        if pixels.len() != expected {
            return Err(PipelineError::invalid_image(
                "raster_image",
                format!(
                    "buffer length {} does not match expected {} for {width}x{height}",
                    pixels.len(),
                    expected
                ),
            ));
        }
        Ok(RasterImage {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32) -> [u8; 4] {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return [0, 0, 0, 0];
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    /// Invert each color channel (`255 - x`); alpha is preserved.
    pub fn inverted(&self) -> RasterImage {
        let mut out = self.pixels.clone();
        for px in out.chunks_mut(4) {
            px[0] = 255 - px[0];
            px[1] = 255 - px[1];
            px[2] = 255 - px[2];
        }
        RasterImage {
            width: self.width,
            height: self.height,
            pixels: out,
        }
    }
}

type StageResultImage = Result<RasterImage, PipelineError>;

/// Single-channel 8-bit luminance buffer.
#[derive(Debug, Clone)]
pub struct GrayBuffer {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl GrayBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32) -> u8 {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return 0;
        }
        self.data[y as usize * self.width as usize + x as usize]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, v: u8) {
        let idx = y as usize * self.width as usize + x as usize;
        self.data[idx] = v;
    }
}

/// Binary mask: every cell is exactly 0 or 255.
#[derive(Debug, Clone)]
pub struct BinaryMask {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl BinaryMask {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32) -> u8 {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return 0;
        }
        self.data[y as usize * self.width as usize + x as usize]
    }

    #[inline]
    pub fn is_set(&self, x: i32, y: i32) -> bool {
        self.get(x, y) > 0
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, v: u8) {
        let idx = y as usize * self.width as usize + x as usize;
        self.data[idx] = v;
    }

    pub fn count_set(&self) -> usize {
        self.data.iter().filter(|&&v| v > 0).count()
    }

    /// Count of 8-connected foreground neighbors around (x, y).
    pub fn neighbor_count(&self, x: i32, y: i32) -> u32 {
        let mut n = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                if self.is_set(x + dx, y + dy) {
                    n += 1;
                }
            }
        }
        n
    }
}

/// Sobel/Prewitt-style gradient field: magnitude and direction (radians).
#[derive(Debug, Clone)]
pub struct Gradient {
    pub width: u32,
    pub height: u32,
    pub magnitude: Vec<f32>,
    pub direction: Vec<f32>,
}

impl Gradient {
    pub fn new(width: u32, height: u32) -> Self {
        let n = width as usize * height as usize;
        Self {
            width,
            height,
            magnitude: vec![0.0; n],
            direction: vec![0.0; n],
        }
    }

    #[inline]
    pub fn mag(&self, x: i32, y: i32) -> f32 {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return 0.0;
        }
        self.magnitude[y as usize * self.width as usize + x as usize]
    }
}

/// Chamfer distance field: non-negative distance to the nearest set pixel
/// in a reference mask; zero marks a source pixel.
#[derive(Debug, Clone)]
pub struct DistanceField {
    pub width: u32,
    pub height: u32,
    pub data: Vec<f32>,
}

impl DistanceField {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![f32::INFINITY; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32) -> f32 {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return f32::INFINITY;
        }
        self.data[y as usize * self.width as usize + x as usize]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, v: f32) {
        let idx = y as usize * self.width as usize + x as usize;
        self.data[idx] = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_reads_return_background() {
        let buf = GrayBuffer::new(4, 4);
        assert_eq!(buf.get(-1, 0), 0);
        assert_eq!(buf.get(0, -1), 0);
        assert_eq!(buf.get(10, 10), 0);
    }

    #[test]
    fn raster_image_rejects_mismatched_length() {
        let err = RasterImage::new(2, 2, vec![0u8; 4]).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidImage { .. }));
    }

    #[test]
    fn raster_image_rejects_zero_dimensions() {
        let err = RasterImage::new(0, 4, vec![]).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidImage { .. }));
    }

    #[test]
    fn inversion_preserves_alpha() {
        let img = RasterImage::new(1, 1, vec![10, 20, 30, 40]).unwrap();
        let inv = img.inverted();
        assert_eq!(inv.pixels, vec![245, 235, 225, 40]);
    }
}
