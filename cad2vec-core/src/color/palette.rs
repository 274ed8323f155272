//! Candidate line-color palette extraction.

use crate::geometry::Color;
use crate::raster::RasterImage;
use std::collections::HashMap;

fn dist_sq(a: (u8, u8, u8), b: (u8, u8, u8)) -> f32 {
    let dr = a.0 as f32 - b.0 as f32;
    let dg = a.1 as f32 - b.1 as f32;
    let db = a.2 as f32 - b.2 as f32;
    dr * dr + dg * dg + db * db
}

fn is_light(c: Color) -> bool {
    (c.r as u32 + c.g as u32 + c.b as u32) / 3 > 200
}

/// Bin qualifying pixels (non-transparent, far enough from `background`)
/// by 8-per-channel quantization, keeping bins occupying more than
/// `min_percentage`% of the image, sorted by descending count.
fn qualifying_bins(image: &RasterImage, background: Color, min_percentage: f32) -> Vec<(Color, u32)> {
    let bg_rgb = (background.r, background.g, background.b);
    let bg_light = is_light(background);

    let mut histogram: HashMap<(u8, u8, u8), u32> = HashMap::new();
    let total_pixels = (image.width as u64 * image.height as u64).max(1);

    for y in 0..image.height as i32 {
        for x in 0..image.width as i32 {
            let px = image.get(x, y);
            if px[3] < 128 {
                continue;
            }
            let rgb = (px[0], px[1], px[2]);
            if dist_sq(rgb, bg_rgb) <= 30.0 * 30.0 {
                continue;
            }
            if bg_light && is_light(Color::rgb(rgb.0, rgb.1, rgb.2)) {
                continue;
            }
            let bin = (rgb.0 / 32, rgb.1 / 32, rgb.2 / 32);
            *histogram.entry(bin).or_insert(0) += 1;
        }
    }

    let threshold = (min_percentage / 100.0 * total_pixels as f32).ceil() as u32;
    let mut bins: Vec<(Color, u32)> = histogram
        .into_iter()
        .filter(|(_, count)| *count >= threshold.max(1))
        .map(|(bin, count)| (Color::rgb(bin.0 * 32 + 16, bin.1 * 32 + 16, bin.2 * 32 + 16), count))
        .collect();
    bins.sort_by(|a, b| b.1.cmp(&a.1));
    bins
}

/// Scan all non-transparent pixels sufficiently far from `background`,
/// bin by 8-per-channel quantization, keep bins occupying more than
/// `min_percentage`%, sorted by count and capped at `max_colors`.
pub fn extract_palette(
    image: &RasterImage,
    background: Color,
    max_colors: usize,
    min_percentage: f32,
) -> Vec<Color> {
    let mut bins = qualifying_bins(image, background, min_percentage);
    bins.truncate(max_colors);

    if bins.is_empty() {
        return vec![Color::BLACK];
    }
    bins.into_iter().map(|(color, _)| color).collect()
}

/// Same qualification pass as `extract_palette`, but reduces the surviving
/// bins with median-cut quantization instead of a plain top-N truncation
/// (used when `ColorExtractionConfig::quantize` is set).
pub fn extract_palette_quantized(
    image: &RasterImage,
    background: Color,
    max_colors: usize,
    min_percentage: f32,
) -> Vec<Color> {
    let bins = qualifying_bins(image, background, min_percentage);
    if bins.is_empty() {
        return vec![Color::BLACK];
    }
    let samples: Vec<Color> = bins
        .into_iter()
        .flat_map(|(color, count)| std::iter::repeat(color).take(count.min(64) as usize))
        .collect();
    super::median_cut::quantize(&samples, max_colors)
}
