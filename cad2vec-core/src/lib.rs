//! Raster-to-vector conversion pipeline: preprocessing, binary/edge
//! extraction, contour tracing, simplification, color analysis,
//! accuracy-driven refinement, and vector document emission.

pub mod binary;
pub mod color;
pub mod config;
pub mod config_builder;
pub mod emit;
pub mod error;
pub mod geometry;
pub mod pipeline;
pub mod preprocessing;
pub mod raster;
pub mod refine;
pub mod simplify;
pub mod tracer;

pub use config::PipelineOptions;
pub use config_builder::ConfigBuilder;
pub use error::{PipelineError, StageResult};
pub use pipeline::{convert, ConversionResult};
pub use raster::RasterImage;
