//! Contour tracer: walks a binary mask into ordered point sequences
//! into ordered point sequences.

pub mod edge_chain;
pub mod marching_squares;
pub mod moore;
pub mod suzuki;

use crate::config::ContourDetectionConfig;
use crate::config::ContourMethod;
use crate::geometry::Contour;
use crate::raster::{BinaryMask, GrayBuffer};

/// Run the selected tracer mode, then filter by area.
pub fn trace(
    mask: &BinaryMask,
    gray_for_marching_squares: Option<&GrayBuffer>,
    cfg: &ContourDetectionConfig,
) -> Vec<Contour> {
    let contours = match cfg.method {
        ContourMethod::EdgeChain => edge_chain::trace(mask),
        ContourMethod::Moore => moore::trace(mask),
        ContourMethod::Suzuki => suzuki::trace(mask)
            .into_iter()
            .map(|sc| sc.contour)
            .collect(),
        ContourMethod::MarchingSquares => {
            let gray = gray_for_marching_squares.expect(
                "marching-squares tracing requires the pre-binarization grayscale buffer",
            );
            marching_squares::trace(gray, 127.0)
                .into_iter()
                .map(|points| Contour::closed_loop(points, false))
                .collect()
        }
    };

    log::debug!(
        "tracer: method={:?} raw_contours={} area_range=[{}, {}]",
        cfg.method,
        contours.len(),
        cfg.min_area,
        cfg.max_area
    );

    filter_by_area(contours, cfg.min_area, cfg.max_area)
}

fn filter_by_area(contours: Vec<Contour>, min_area: f64, max_area: f64) -> Vec<Contour> {
    contours
        .into_iter()
        .filter(|c| {
            if !c.closed {
                // open polylines (edge-chain) aren't meaningfully filtered
                // by enclosed area; keep them all.
                return true;
            }
            let area = c.area();
            area >= min_area && area <= max_area
        })
        .collect()
}
