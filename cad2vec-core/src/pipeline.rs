//! Top-level orchestration tying preprocessing, extraction, tracing,
//! simplification, color analysis, refinement, and emission together
//! stage by stage.

use crate::binary;
use crate::color;
use crate::config::{ContourMethod, PipelineOptions, SmoothingMethod};
use crate::emit::{self, DocumentMetadata};
use crate::error::StageResult;
use crate::geometry::{Color, Layer, Path};
use crate::preprocessing;
use crate::raster::RasterImage;
use crate::refine::{self, RefinementReport};
use crate::simplify;
use crate::tracer;

/// Per-color path counts, useful for UI color pickers.
pub type ColorHistogram = Vec<(Color, usize)>;

pub struct ConversionMetadata {
    pub original_format: Option<String>,
    pub duration_ms: u64,
    pub path_count: usize,
    pub layer_count: usize,
}

pub struct ConversionResult {
    pub document: String,
    pub width: u32,
    pub height: u32,
    pub paths: Vec<Path>,
    pub layers: Vec<Layer>,
    pub color_histogram: ColorHistogram,
    pub metadata: ConversionMetadata,
    pub refinement_report: Option<RefinementReport>,
}

/// Run the full raster-to-vector conversion for one image.
pub fn convert(
    image: &RasterImage,
    options: &PipelineOptions,
    document_metadata: Option<&DocumentMetadata>,
) -> StageResult<ConversionResult> {
    let gray = preprocessing::preprocess(image, options.invert_colors, &options.edge_detection);
    let mask = binary::extract(&gray, &options.edge_detection)?;

    let gray_for_marching = if options.contour_detection.method == ContourMethod::MarchingSquares {
        Some(&gray)
    } else {
        None
    };
    let contours = tracer::trace(&mask, gray_for_marching, &options.contour_detection);

    let mut paths: Vec<Path> = contours
        .into_iter()
        .map(|contour| build_path(contour, options))
        .collect();

    if options.contour_detection.fit_bezier {
        apply_bezier_fit(&mut paths, options.contour_detection.bezier_error_tolerance);
    }

    let mut layers = assign_layers(paths, image, options);

    let refinement_report = if options.refinement.enabled {
        let flattened: Vec<Path> = layers.into_iter().flat_map(|l| l.paths).collect();
        let (refined, report) = refine::refine(
            flattened,
            &mask,
            &options.refinement,
            options.contour_detection.tolerance,
        );
        layers = assign_layers(refined, image, options);
        Some(report)
    } else {
        None
    };

    let document = emit::emit(image.width, image.height, &layers, &options.svg, document_metadata);
    let all_paths: Vec<Path> = layers.iter().flat_map(|l| l.paths.clone()).collect();
    let color_histogram = build_histogram(&layers);
    let path_count = all_paths.len();
    let layer_count = layers.len();

    Ok(ConversionResult {
        document,
        width: image.width,
        height: image.height,
        paths: all_paths,
        layers,
        color_histogram,
        metadata: ConversionMetadata {
            original_format: None,
            duration_ms: 0,
            path_count,
            layer_count,
        },
        refinement_report,
    })
}

fn build_path(contour: crate::geometry::Contour, options: &PipelineOptions) -> Path {
    let cfg = &options.contour_detection;
    let simplified = if cfg.simplify {
        let target_count = (contour.points.len() / 2).max(4);
        simplify::simplify_contour(
            &contour,
            cfg.simplify_method,
            cfg.tolerance,
            target_count,
            if options.smooth_curves { cfg.smoothing } else { SmoothingMethod::None },
            smoothing_param(cfg, options.curve_tension),
        )
    } else {
        contour
    };

    Path {
        points: simplified.points,
        closed: simplified.closed,
        color: Color::BLACK,
        stroke_width: options.svg.stroke_width,
        layer: None,
    }
}

/// Bezier control points are produced in-place per path; the minimal
/// document format still emits line segments sampled from the fitted
/// curves rather than native cubic commands.
fn apply_bezier_fit(paths: &mut [Path], error_tolerance: f32) {
    for path in paths.iter_mut() {
        let curves = simplify::bezier_fit::fit(&path.points, error_tolerance);
        if curves.is_empty() {
            continue;
        }
        let mut points: Vec<_> = curves.iter().map(|c| c.p0).collect();
        points.push(curves[curves.len() - 1].p3);
        path.points = points;
    }
}

fn assign_layers(paths: Vec<Path>, image: &RasterImage, options: &PipelineOptions) -> Vec<Layer> {
    if options.detect_layers {
        color::analyze_and_assign(paths, image, &options.color_extraction)
    } else {
        vec![Layer {
            id: 0,
            name: "layer-0".to_string(),
            color: Color::BLACK,
            visible: true,
            locked: false,
            paths,
        }]
    }
}

fn smoothing_param(contour_cfg: &crate::config::ContourDetectionConfig, curve_tension: f32) -> f32 {
    match contour_cfg.smoothing {
        SmoothingMethod::Chaikin | SmoothingMethod::MovingAverage => {
            contour_cfg.smoothing_iterations.max(1) as f32
        }
        SmoothingMethod::Gaussian => curve_tension.max(0.1) * 2.0,
        SmoothingMethod::None => 0.0,
    }
}

fn build_histogram(layers: &[Layer]) -> ColorHistogram {
    let mut counts: ColorHistogram = Vec::new();
    for layer in layers {
        let count = layer.paths.len();
        match counts.iter_mut().find(|(c, _)| *c == layer.color) {
            Some(entry) => entry.1 += count,
            None => counts.push((layer.color, count)),
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_a_simple_black_line_on_white() {
        let mut pixels = vec![255u8; 20 * 20 * 4];
        for x in 0..20usize {
            let idx = (10 * 20 + x) * 4;
            pixels[idx] = 0;
            pixels[idx + 1] = 0;
            pixels[idx + 2] = 0;
        }
        let image = RasterImage::new(20, 20, pixels).unwrap();
        let options = PipelineOptions::default();
        let result = convert(&image, &options, None).unwrap();
        assert!(result.document.contains("<svg"));
        assert_eq!(result.width, 20);
        assert_eq!(result.height, 20);
    }

    #[test]
    fn empty_image_yields_no_paths() {
        let pixels = vec![255u8; 10 * 10 * 4];
        let image = RasterImage::new(10, 10, pixels).unwrap();
        let options = PipelineOptions::default();
        let result = convert(&image, &options, None).unwrap();
        assert!(result.paths.is_empty());
    }
}
