//! Precision/recall/F1 scoring between a rendered mask and a reference
//! mask, via their respective distance transforms.

use super::distance_transform::distance_transform;
use crate::geometry::RefinementScore;
use crate::raster::BinaryMask;

/// Score `rendered` (S) against `reference` (R) with match tolerance `tau`.
pub fn score(reference: &BinaryMask, rendered: &BinaryMask, tau: f32) -> RefinementScore {
    let dist_to_reference = distance_transform(reference);
    let dist_to_rendered = distance_transform(rendered);

    let (w, h) = (reference.width as i32, reference.height as i32);

    let mut svg_matched = 0usize;
    let mut total_svg = 0usize;
    let mut sum_distance_error = 0.0f64;
    for y in 0..h {
        for x in 0..w {
            if rendered.is_set(x, y) {
                total_svg += 1;
                let d = dist_to_reference.get(x, y);
                sum_distance_error += d as f64;
                if d <= tau {
                    svg_matched += 1;
                }
            }
        }
    }

    let mut ref_matched = 0usize;
    let mut total_ref = 0usize;
    for y in 0..h {
        for x in 0..w {
            if reference.is_set(x, y) {
                total_ref += 1;
                if dist_to_rendered.get(x, y) <= tau {
                    ref_matched += 1;
                }
            }
        }
    }

    let precision = if total_svg == 0 {
        0.0
    } else {
        svg_matched as f64 / total_svg as f64
    };
    let recall = if total_ref == 0 {
        0.0
    } else {
        ref_matched as f64 / total_ref as f64
    };
    let f1 = if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    };
    let mean_distance_error = if total_svg == 0 {
        0.0
    } else {
        sum_distance_error / total_svg as f64
    };

    RefinementScore {
        precision,
        recall,
        f1,
        mean_distance_error,
        svg_matched,
        ref_matched,
        total_svg_pixels: total_svg,
        total_ref_pixels: total_ref,
    }
}
