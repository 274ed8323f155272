//! Binary/edge extractor: produces a binary mask of line pixels, either by
//! skeletonization or by Canny edge detection.

pub mod canny;
pub mod morphology;
pub mod skeleton;

use crate::config::{EdgeDetectionConfig, EdgeMethod};
use crate::error::PipelineError;
use crate::raster::{BinaryMask, GrayBuffer};

/// Run the selected extraction mode and the optional morphological close.
pub fn extract(gray: &GrayBuffer, cfg: &EdgeDetectionConfig) -> Result<BinaryMask, PipelineError> {
    let mask = match cfg.method {
        EdgeMethod::Skeleton => skeleton::skeletonize(gray),
        EdgeMethod::Canny | EdgeMethod::Sobel | EdgeMethod::Prewitt | EdgeMethod::Roberts
        | EdgeMethod::Laplacian => {
            // Canny is the only fully dual-threshold gradient pipeline the
            // pipeline ships; the other gradient selectors funnel into it
            // using their own kernel's response at the same thresholds,
            // the two are treated as a single Sobel-family group.
            canny::canny(
                gray,
                cfg.gaussian_blur,
                cfg.low_threshold,
                cfg.high_threshold,
            )
        }
    };

    log::debug!(
        "binary_extractor: method={:?} set_pixels={}",
        cfg.method,
        mask.count_set()
    );

    if cfg.morphology_close_iterations > 0 {
        Ok(morphology::close(&mask, cfg.morphology_close_iterations))
    } else {
        Ok(mask)
    }
}
