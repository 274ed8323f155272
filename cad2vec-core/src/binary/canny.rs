//! Mode B: Canny edge detection (Sobel gradient, non-max suppression,
//! dual-threshold hysteresis).

use crate::preprocessing::blur::blur_gray;
use crate::raster::{BinaryMask, GrayBuffer, Gradient};

const STRONG: u8 = 255;
const WEAK: u8 = 50;

fn sobel(gray: &GrayBuffer) -> Gradient {
    let (w, h) = (gray.width as i32, gray.height as i32);
    let mut grad = Gradient::new(gray.width, gray.height);

    let gx_kernel = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
    let gy_kernel = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

    for y in 0..h {
        for x in 0..w {
            let mut gx = 0.0f32;
            let mut gy = 0.0f32;
            for (ky, row) in gx_kernel.iter().enumerate() {
                for (kx, &weight) in row.iter().enumerate() {
                    let sx = x + kx as i32 - 1;
                    let sy = y + ky as i32 - 1;
                    let v = gray.get(sx, sy) as f32;
                    gx += weight * v;
                    gy += gy_kernel[ky][kx] * v;
                }
            }
            let idx = (y * w + x) as usize;
            grad.magnitude[idx] = (gx * gx + gy * gy).sqrt();
            grad.direction[idx] = gy.atan2(gx);
        }
    }
    grad
}

/// Quantize direction to one of four sectors and keep the magnitude only
/// if it's a local maximum along that sector.
fn non_max_suppression(grad: &Gradient) -> Vec<f32> {
    let (w, h) = (grad.width as i32, grad.height as i32);
    let mut out = vec![0.0f32; grad.magnitude.len()];

    for y in 0..h {
        for x in 0..w {
            let idx = (y * w + x) as usize;
            let mag = grad.magnitude[idx];
            if mag == 0.0 {
                continue;
            }
            let mut angle = grad.direction[idx].to_degrees();
            if angle < 0.0 {
                angle += 180.0;
            }

            let (dx1, dy1, dx2, dy2) = if !(22.5..157.5).contains(&angle) {
                (1, 0, -1, 0) // horizontal
            } else if angle < 67.5 {
                (1, -1, -1, 1) // /-diagonal
            } else if angle < 112.5 {
                (0, 1, 0, -1) // vertical
            } else {
                (1, 1, -1, -1) // \-diagonal
            };

            let n1 = grad.mag(x + dx1, y + dy1);
            let n2 = grad.mag(x + dx2, y + dy2);
            if mag >= n1 && mag >= n2 {
                out[idx] = mag;
            }
        }
    }
    out
}

fn dual_threshold(suppressed: &[f32], low: f32, high: f32) -> Vec<u8> {
    suppressed
        .iter()
        .map(|&m| {
            if m >= high {
                STRONG
            } else if m >= low {
                WEAK
            } else {
                0
            }
        })
        .collect()
}

fn hysteresis(mut data: Vec<u8>, width: u32, height: u32) -> Vec<u8> {
    let w = width as i32;
    let h = height as i32;
    let mut changed = true;
    while changed {
        changed = false;
        for y in 0..h {
            for x in 0..w {
                let idx = (y * w + x) as usize;
                if data[idx] != WEAK {
                    continue;
                }
                let mut adjacent_strong = false;
                'search: for dy in -1..=1 {
                    for dx in -1..=1 {
                        if dx == 0 && dy == 0 {
                            continue;
                        }
                        let (sx, sy) = (x + dx, y + dy);
                        if sx < 0 || sy < 0 || sx >= w || sy >= h {
                            continue;
                        }
                        if data[(sy * w + sx) as usize] == STRONG {
                            adjacent_strong = true;
                            break 'search;
                        }
                    }
                }
                if adjacent_strong {
                    data[idx] = STRONG;
                    changed = true;
                }
            }
        }
    }
    for v in data.iter_mut() {
        if *v == WEAK {
            *v = 0;
        }
    }
    data
}

/// Run the full Canny pipeline: blur, Sobel, non-max suppression, dual
/// threshold, hysteresis.
pub fn canny(gray: &GrayBuffer, sigma: f32, low: u8, high: u8) -> BinaryMask {
    let blurred = blur_gray(gray, sigma);
    let grad = sobel(&blurred);
    let suppressed = non_max_suppression(&grad);
    let thresholded = dual_threshold(&suppressed, low as f32, high as f32);
    let final_data = hysteresis(thresholded, gray.width, gray.height);
    BinaryMask {
        width: gray.width,
        height: gray.height,
        data: final_data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertical_edge(width: u32, height: u32) -> GrayBuffer {
        let mut data = vec![255u8; (width * height) as usize];
        for y in 0..height {
            for x in (width / 2)..width {
                data[(y * width + x) as usize] = 0;
            }
        }
        GrayBuffer {
            width,
            height,
            data,
        }
    }

    #[test]
    fn detects_a_clean_vertical_edge() {
        let gray = vertical_edge(20, 20);
        let mask = canny(&gray, 0.5, 50, 150);
        assert!(mask.count_set() > 0);
        // edge pixels should cluster near the midline
        let mid = 10i32;
        let near_mid = (0..mask.width as i32)
            .filter(|&x| (x - mid).abs() <= 2)
            .filter(|&x| (0..mask.height as i32).any(|y| mask.is_set(x, y)))
            .count();
        assert!(near_mid > 0);
    }

    #[test]
    fn flat_image_has_no_edges() {
        let gray = GrayBuffer {
            width: 10,
            height: 10,
            data: vec![128u8; 100],
        };
        let mask = canny(&gray, 1.0, 50, 150);
        assert_eq!(mask.count_set(), 0);
    }
}
