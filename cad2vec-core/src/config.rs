//! Configuration types for the pipeline: one options record per stage.

use serde::{Deserialize, Serialize};

/// Binary/edge extraction method selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeMethod {
    Skeleton,
    Canny,
    Sobel,
    Prewitt,
    Roberts,
    Laplacian,
}

/// Contour tracer method selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContourMethod {
    EdgeChain,
    Moore,
    Suzuki,
    MarchingSquares,
}

/// Point-reduction algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SimplifyMethod {
    DouglasPeucker,
    VisvalingamWhyatt,
    ReumannWitkam,
}

/// Optional post-simplification smoothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SmoothingMethod {
    None,
    Chaikin,
    MovingAverage,
    Gaussian,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeDetectionConfig {
    pub method: EdgeMethod,
    pub low_threshold: u8,
    pub high_threshold: u8,
    pub gaussian_blur: f32,
    pub apply_noise_reduction: bool,
    /// Number of morphological close iterations applied after extraction
    /// (0 disables the close pass).
    pub morphology_close_iterations: u32,
}

impl Default for EdgeDetectionConfig {
    fn default() -> Self {
        Self {
            method: EdgeMethod::Skeleton,
            low_threshold: 50,
            high_threshold: 150,
            gaussian_blur: 1.0,
            apply_noise_reduction: false,
            morphology_close_iterations: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContourDetectionConfig {
    pub method: ContourMethod,
    pub min_area: f64,
    pub max_area: f64,
    pub simplify: bool,
    pub simplify_method: SimplifyMethod,
    pub tolerance: f32,
    pub smoothing: SmoothingMethod,
    pub smoothing_iterations: u32,
    pub fit_bezier: bool,
    pub bezier_error_tolerance: f32,
}

impl Default for ContourDetectionConfig {
    fn default() -> Self {
        Self {
            method: ContourMethod::EdgeChain,
            min_area: 0.0,
            max_area: f64::INFINITY,
            simplify: true,
            simplify_method: SimplifyMethod::DouglasPeucker,
            tolerance: 1.0,
            smoothing: SmoothingMethod::None,
            smoothing_iterations: 1,
            fit_bezier: false,
            bezier_error_tolerance: 2.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SvgConfig {
    pub stroke_width: f32,
    pub precision: u8,
    pub optimize: bool,
    pub add_metadata: bool,
    pub add_layer_groups: bool,
    pub view_box: Option<(f32, f32, f32, f32)>,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            stroke_width: 1.0,
            precision: 3,
            optimize: true,
            add_metadata: false,
            add_layer_groups: true,
            view_box: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorExtractionConfig {
    pub max_colors: usize,
    pub min_percentage: f32,
    pub quantize: bool,
    pub ignore_background: bool,
    pub background_color: Option<(u8, u8, u8)>,
}

impl Default for ColorExtractionConfig {
    fn default() -> Self {
        Self {
            max_colors: 10,
            min_percentage: 0.1,
            quantize: true,
            ignore_background: true,
            background_color: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinementConfig {
    pub enabled: bool,
    pub target_accuracy: f64,
    pub max_iterations: u32,
    pub snap_radius: i32,
    pub gap_fill_min_cluster: usize,
    pub spurious_threshold: f64,
    pub distance_tolerance: f32,
}

impl Default for RefinementConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            target_accuracy: 0.85,
            max_iterations: 3,
            snap_radius: 3,
            gap_fill_min_cluster: 20,
            spurious_threshold: 0.7,
            distance_tolerance: 2.0,
        }
    }
}

/// Top-level options record for one `convert` invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOptions {
    pub invert_colors: bool,
    pub edge_detection: EdgeDetectionConfig,
    pub contour_detection: ContourDetectionConfig,
    pub svg: SvgConfig,
    pub color_extraction: ColorExtractionConfig,
    pub smooth_curves: bool,
    pub curve_tension: f32,
    pub detect_layers: bool,
    pub merge_similar_paths: bool,
    pub path_merge_threshold: f32,
    pub refinement: RefinementConfig,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            invert_colors: false,
            edge_detection: EdgeDetectionConfig::default(),
            contour_detection: ContourDetectionConfig::default(),
            svg: SvgConfig::default(),
            color_extraction: ColorExtractionConfig::default(),
            smooth_curves: false,
            curve_tension: 0.5,
            detect_layers: true,
            merge_similar_paths: false,
            path_merge_threshold: 30.0,
            refinement: RefinementConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec_constants() {
        let opts = PipelineOptions::default();
        assert_eq!(opts.refinement.target_accuracy, 0.85);
        assert_eq!(opts.refinement.max_iterations, 3);
        assert_eq!(opts.refinement.snap_radius, 3);
        assert_eq!(opts.refinement.gap_fill_min_cluster, 20);
        assert_eq!(opts.svg.precision, 3);
        assert_eq!(opts.color_extraction.max_colors, 10);
    }
}
