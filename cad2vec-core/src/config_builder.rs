//! Fluent builder for `PipelineOptions`, with validation deferred to
//! `build()` so misconfiguration surfaces before any pixel is touched.

use crate::config::{
    ColorExtractionConfig, ContourDetectionConfig, ContourMethod, EdgeDetectionConfig, EdgeMethod,
    PipelineOptions, RefinementConfig, SvgConfig,
};

/// Error raised by `ConfigBuilder::build` when the assembled options record
/// would be invalid (threshold ordering, out-of-range precision, etc).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigBuilderError(pub String);

impl std::fmt::Display for ConfigBuilderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid configuration: {}", self.0)
    }
}

impl std::error::Error for ConfigBuilderError {}

pub type ConfigBuilderResult<T> = Result<T, ConfigBuilderError>;

#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    options: PipelineOptions,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            options: PipelineOptions::default(),
        }
    }

    pub fn invert_colors(mut self, invert: bool) -> Self {
        self.options.invert_colors = invert;
        self
    }

    pub fn edge_method(mut self, method: EdgeMethod) -> Self {
        self.options.edge_detection.method = method;
        self
    }

    pub fn edge_thresholds(mut self, low: u8, high: u8) -> Self {
        self.options.edge_detection.low_threshold = low;
        self.options.edge_detection.high_threshold = high;
        self
    }

    pub fn gaussian_blur(mut self, sigma: f32) -> Self {
        self.options.edge_detection.gaussian_blur = sigma;
        self
    }

    pub fn contour_method(mut self, method: ContourMethod) -> Self {
        self.options.contour_detection.method = method;
        self
    }

    pub fn simplify_tolerance(mut self, tolerance: f32) -> Self {
        self.options.contour_detection.tolerance = tolerance;
        self
    }

    pub fn svg_precision(mut self, precision: u8) -> Self {
        self.options.svg.precision = precision;
        self
    }

    pub fn refinement_target(mut self, target_f1: f64, max_iterations: u32) -> Self {
        self.options.refinement.target_accuracy = target_f1;
        self.options.refinement.max_iterations = max_iterations;
        self
    }

    pub fn disable_refinement(mut self) -> Self {
        self.options.refinement.enabled = false;
        self
    }

    pub fn edge_detection(mut self, config: EdgeDetectionConfig) -> Self {
        self.options.edge_detection = config;
        self
    }

    pub fn contour_detection(mut self, config: ContourDetectionConfig) -> Self {
        self.options.contour_detection = config;
        self
    }

    pub fn svg(mut self, config: SvgConfig) -> Self {
        self.options.svg = config;
        self
    }

    pub fn color_extraction(mut self, config: ColorExtractionConfig) -> Self {
        self.options.color_extraction = config;
        self
    }

    pub fn refinement(mut self, config: RefinementConfig) -> Self {
        self.options.refinement = config;
        self
    }

    /// Validate the accumulated options and return the finished record.
    pub fn build(self) -> ConfigBuilderResult<PipelineOptions> {
        let o = &self.options;

        if o.edge_detection.low_threshold > o.edge_detection.high_threshold {
            return Err(ConfigBuilderError(format!(
                "edge_detection.low_threshold ({}) must be <= high_threshold ({})",
                o.edge_detection.low_threshold, o.edge_detection.high_threshold
            )));
        }
        if o.edge_detection.gaussian_blur < 0.0 {
            return Err(ConfigBuilderError(
                "edge_detection.gaussian_blur must be >= 0".to_string(),
            ));
        }
        if o.contour_detection.min_area < 0.0
            || o.contour_detection.max_area < o.contour_detection.min_area
        {
            return Err(ConfigBuilderError(
                "contour_detection area bounds must satisfy 0 <= min_area <= max_area"
                    .to_string(),
            ));
        }
        if o.contour_detection.tolerance < 0.0 {
            return Err(ConfigBuilderError(
                "contour_detection.tolerance must be >= 0".to_string(),
            ));
        }
        if o.svg.precision > 6 {
            return Err(ConfigBuilderError(
                "svg.precision must be in [0, 6]".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&o.curve_tension) {
            return Err(ConfigBuilderError(
                "curve_tension must be in [0.0, 1.0]".to_string(),
            ));
        }
        if o.refinement.enabled
            && !(0.0..=1.0).contains(&o.refinement.target_accuracy)
        {
            return Err(ConfigBuilderError(
                "refinement.target_accuracy must be in [0.0, 1.0]".to_string(),
            ));
        }

        Ok(self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_inverted_thresholds() {
        let err = ConfigBuilder::new()
            .edge_thresholds(200, 50)
            .build()
            .unwrap_err();
        assert!(err.0.contains("low_threshold"));
    }

    #[test]
    fn rejects_out_of_range_precision() {
        let err = ConfigBuilder::new().svg_precision(9).build().unwrap_err();
        assert!(err.0.contains("precision"));
    }

    #[test]
    fn accepts_defaults() {
        assert!(ConfigBuilder::new().build().is_ok());
    }

    #[test]
    fn fluent_overrides_apply() {
        let opts = ConfigBuilder::new()
            .edge_method(EdgeMethod::Canny)
            .contour_method(ContourMethod::Moore)
            .simplify_tolerance(2.5)
            .build()
            .unwrap();
        assert_eq!(opts.edge_detection.method, EdgeMethod::Canny);
        assert_eq!(opts.contour_detection.method, ContourMethod::Moore);
        assert_eq!(opts.contour_detection.tolerance, 2.5);
    }
}
