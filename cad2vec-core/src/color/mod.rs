//! Color analysis: background detection, palette extraction, dominant
//! color clustering, and per-path color assignment.

pub mod assignment;
pub mod background;
pub mod kmeans;
pub mod median_cut;
pub mod palette;

use crate::config::ColorExtractionConfig;
use crate::geometry::{Color, Layer, Path};
use crate::raster::RasterImage;

pub const LAYER_GROUPING_DISTANCE: f32 = 30.0;

/// Run background detection, palette extraction, per-path color
/// assignment, and layer grouping for a finished set of paths.
pub fn analyze_and_assign(paths: Vec<Path>, image: &RasterImage, cfg: &ColorExtractionConfig) -> Vec<Layer> {
    let background = cfg
        .background_color
        .map(|(r, g, b)| Color::rgb(r, g, b))
        .unwrap_or_else(|| background::detect_background(image));

    // `ignore_background` skips background-aware palette filtering by
    // comparing against a generic white reference instead of the
    // detected background.
    let reference_background = if cfg.ignore_background {
        Color::rgb(255, 255, 255)
    } else {
        background
    };
    // `quantize` reduces the qualifying histogram bins with median-cut
    // instead of taking the top-N bins by pixel count directly.
    let palette = if cfg.quantize {
        palette::extract_palette_quantized(image, reference_background, cfg.max_colors, cfg.min_percentage)
    } else {
        palette::extract_palette(image, reference_background, cfg.max_colors, cfg.min_percentage)
    };

    let mut paths = paths;
    assignment::assign_path_colors(&mut paths, image, &palette);
    log::debug!(
        "color: background={} palette_size={} paths={}",
        background.to_hex(),
        palette.len(),
        paths.len()
    );
    assignment::group_into_layers(paths, LAYER_GROUPING_DISTANCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    #[test]
    fn assigns_and_groups_into_at_least_one_layer() {
        let mut data = vec![255u8; 20 * 20 * 4];
        for y in 5..15 {
            for x in 5..15 {
                let idx = (y * 20 + x) * 4;
                data[idx] = 0;
                data[idx + 1] = 0;
                data[idx + 2] = 0;
            }
        }
        let image = RasterImage::new(20, 20, data).unwrap();
        let paths = vec![Path {
            points: vec![Point::new(6.0, 6.0), Point::new(10.0, 10.0)],
            closed: false,
            color: Color::BLACK,
            stroke_width: 1.0,
            layer: None,
        }];
        let layers = analyze_and_assign(paths, &image, &ColorExtractionConfig::default());
        assert_eq!(layers.len(), 1);
    }
}
