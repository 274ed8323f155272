//! Preprocessing stage: optional inversion, grayscale reduction, optional
//! Gaussian blur and median filtering.

pub mod blur;
pub mod grayscale;
pub mod median;

use crate::config::EdgeDetectionConfig;
use crate::raster::{GrayBuffer, RasterImage};

/// Run the preprocessing chain that feeds the binary/edge extractor:
/// optional channel inversion, optional median denoise, grayscale
/// reduction, optional Gaussian blur.
pub fn preprocess(
    image: &RasterImage,
    invert_colors: bool,
    edge_cfg: &EdgeDetectionConfig,
) -> GrayBuffer {
    log::debug!(
        "preprocess: invert={invert_colors} denoise={} blur_sigma={}",
        edge_cfg.apply_noise_reduction,
        edge_cfg.gaussian_blur
    );

    let mut working = if invert_colors {
        image.inverted()
    } else {
        image.clone()
    };

    if edge_cfg.apply_noise_reduction {
        working = median::median_filter_3x3(&working);
    }

    let gray = grayscale::to_grayscale(&working);

    if edge_cfg.gaussian_blur > 0.0 {
        blur::blur_gray(&gray, edge_cfg.gaussian_blur)
    } else {
        gray
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EdgeDetectionConfig;

    #[test]
    fn invert_flips_black_to_white_before_grayscale() {
        let img = RasterImage::new(1, 1, vec![0, 0, 0, 255]).unwrap();
        let cfg = EdgeDetectionConfig {
            gaussian_blur: 0.0,
            ..EdgeDetectionConfig::default()
        };
        let gray = preprocess(&img, true, &cfg);
        assert_eq!(gray.data[0], 255);
    }
}
