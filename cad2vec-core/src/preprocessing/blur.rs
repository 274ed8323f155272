//! Separable Gaussian blur.
//!
//! Implemented as two 1-D passes (horizontal then vertical) through a
//! `f32` scratch buffer rather than a full 2-D kernel: the refiner and the
//! Canny stage share this exact numeric path, so reimplementations must
//! match it to within one grayscale level after rounding.

use crate::raster::{GrayBuffer, RasterImage};

fn gaussian_kernel(sigma: f32) -> Vec<f32> {
    let radius = (3.0 * sigma).ceil().max(0.0) as i32;
    let mut kernel = Vec::with_capacity((2 * radius + 1) as usize);
    let two_sigma_sq = 2.0 * sigma * sigma;
    let mut sum = 0.0f32;
    for i in -radius..=radius {
        let v = if sigma <= 0.0 {
            if i == 0 {
                1.0
            } else {
                0.0
            }
        } else {
            (-((i * i) as f32) / two_sigma_sq).exp()
        };
        kernel.push(v);
        sum += v;
    }
    if sum > 0.0 {
        for v in kernel.iter_mut() {
            *v /= sum;
        }
    }
    kernel
}

#[inline]
fn mirror_clamp(i: i32, len: i32) -> i32 {
    if len <= 1 {
        return 0;
    }
    if i < 0 {
        -i
    } else if i >= len {
        2 * (len - 1) - i
    } else {
        i
    }
    .clamp(0, len - 1)
}

/// Separable Gaussian convolution over a single-channel `f32` grid.
fn convolve_separable(src: &[f32], width: u32, height: u32, sigma: f32) -> Vec<f32> {
    if sigma <= 0.0 {
        return src.to_vec();
    }
    let kernel = gaussian_kernel(sigma);
    let radius = (kernel.len() / 2) as i32;
    let (w, h) = (width as i32, height as i32);

    let mut scratch = vec![0.0f32; src.len()];
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0f32;
            for (k, &weight) in kernel.iter().enumerate() {
                let dx = k as i32 - radius;
                let sx = mirror_clamp(x + dx, w);
                acc += weight * src[(y * w + sx) as usize];
            }
            scratch[(y * w + x) as usize] = acc;
        }
    }

    let mut out = vec![0.0f32; src.len()];
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0f32;
            for (k, &weight) in kernel.iter().enumerate() {
                let dy = k as i32 - radius;
                let sy = mirror_clamp(y + dy, h);
                acc += weight * scratch[(sy * w + x) as usize];
            }
            out[(y * w + x) as usize] = acc;
        }
    }
    out
}

/// Gaussian blur of a grayscale buffer.
pub fn blur_gray(buf: &GrayBuffer, sigma: f32) -> GrayBuffer {
    if sigma <= 0.0 {
        return buf.clone();
    }
    let src: Vec<f32> = buf.data.iter().map(|&v| v as f32).collect();
    let blurred = convolve_separable(&src, buf.width, buf.height, sigma);
    GrayBuffer {
        width: buf.width,
        height: buf.height,
        data: blurred
            .into_iter()
            .map(|v| v.round().clamp(0.0, 255.0) as u8)
            .collect(),
    }
}

/// Gaussian blur applied independently to each RGB channel; alpha passes
/// through unblurred.
pub fn blur_image(image: &RasterImage, sigma: f32) -> RasterImage {
    if sigma <= 0.0 {
        return image.clone();
    }
    let n = image.width as usize * image.height as usize;
    let mut channels = [vec![0.0f32; n], vec![0.0f32; n], vec![0.0f32; n]];
    for (i, px) in image.pixels.chunks(4).enumerate() {
        channels[0][i] = px[0] as f32;
        channels[1][i] = px[1] as f32;
        channels[2][i] = px[2] as f32;
    }
    let blurred: Vec<Vec<f32>> = channels
        .iter()
        .map(|c| convolve_separable(c, image.width, image.height, sigma))
        .collect();

    let mut out = image.pixels.clone();
    for i in 0..n {
        out[i * 4] = blurred[0][i].round().clamp(0.0, 255.0) as u8;
        out[i * 4 + 1] = blurred[1][i].round().clamp(0.0, 255.0) as u8;
        out[i * 4 + 2] = blurred[2][i].round().clamp(0.0, 255.0) as u8;
    }
    RasterImage {
        width: image.width,
        height: image.height,
        pixels: out,
    }
}
