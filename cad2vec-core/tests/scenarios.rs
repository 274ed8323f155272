//! End-to-end scenarios from the pipeline's behavioral contract: literal
//! inputs with expected qualitative behaviors, not pixel-exact outputs.

use cad2vec_core::config::{ContourMethod, EdgeMethod, PipelineOptions};
use cad2vec_core::{convert, RasterImage};

fn solid(width: u32, height: u32, rgba: [u8; 4]) -> RasterImage {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for _ in 0..(width * height) {
        data.extend_from_slice(&rgba);
    }
    RasterImage::new(width, height, data).unwrap()
}

fn set_pixel(image: &mut RasterImage, x: u32, y: u32, rgba: [u8; 4]) {
    let idx = ((y * image.width + x) * 4) as usize;
    image.pixels[idx..idx + 4].copy_from_slice(&rgba);
}

#[test]
fn white_canvas_one_black_horizontal_line() {
    let mut image = solid(100, 100, [255, 255, 255, 255]);
    for x in 0..100 {
        set_pixel(&mut image, x, 50, [0, 0, 0, 255]);
    }

    let mut options = PipelineOptions::default();
    options.edge_detection.method = EdgeMethod::Skeleton;

    let result = convert(&image, &options, None).unwrap();
    assert_eq!(result.layers.len(), 1);
    assert_eq!(result.paths.len(), 1);
    let path = &result.paths[0];
    let min_x = path.points.iter().map(|p| p.x).fold(f32::MAX, f32::min);
    let max_x = path.points.iter().map(|p| p.x).fold(f32::MIN, f32::max);
    assert!(min_x <= 2.0);
    assert!(max_x >= 97.0);
    assert_eq!(path.color, cad2vec_core::geometry::Color::BLACK);

    if let Some(report) = result.refinement_report {
        assert!(report.after_score.f1 >= 0.95, "f1={}", report.after_score.f1);
    }
}

#[test]
fn empty_image_yields_nothing() {
    let image = solid(32, 32, [255, 255, 255, 255]);
    let options = PipelineOptions::default();
    let result = convert(&image, &options, None).unwrap();
    assert!(result.paths.is_empty());
    assert!(result.layers.iter().all(|l| l.paths.is_empty()));
    assert!(result.document.contains("<svg"));
}

fn square_outline_image() -> RasterImage {
    let mut image = solid(64, 64, [255, 255, 255, 255]);
    let (offset, size) = (7u32, 50u32);
    for i in 0..size {
        set_pixel(&mut image, offset + i, offset, [0, 0, 0, 255]);
        set_pixel(&mut image, offset + i, offset + size - 1, [0, 0, 0, 255]);
        set_pixel(&mut image, offset, offset + i, [0, 0, 0, 255]);
        set_pixel(&mut image, offset + size - 1, offset + i, [0, 0, 0, 255]);
    }
    image
}

#[test]
fn black_square_outline_suzuki_mode() {
    let image = square_outline_image();
    let mut options = PipelineOptions::default();
    options.edge_detection.method = EdgeMethod::Skeleton;
    options.contour_detection.method = ContourMethod::Suzuki;
    options.refinement.enabled = false;

    let result = convert(&image, &options, None).unwrap();
    let closed = result.paths.iter().find(|p| p.closed);
    assert!(closed.is_some(), "expected at least one closed contour");
}

#[test]
fn black_square_outline_moore_mode() {
    let image = square_outline_image();
    let mut options = PipelineOptions::default();
    options.edge_detection.method = EdgeMethod::Skeleton;
    options.contour_detection.method = ContourMethod::Moore;
    options.refinement.enabled = false;

    let result = convert(&image, &options, None).unwrap();
    assert!(!result.paths.is_empty());
    assert!(result.paths.iter().all(|p| p.closed));
}

#[test]
fn black_square_outline_marching_squares_mode() {
    let image = square_outline_image();
    let mut options = PipelineOptions::default();
    options.contour_detection.method = ContourMethod::MarchingSquares;
    options.refinement.enabled = false;

    let result = convert(&image, &options, None).unwrap();
    assert!(!result.paths.is_empty());
}

#[test]
fn two_disjoint_blue_lines() {
    let mut image = solid(60, 60, [255, 255, 255, 255]);
    for x in 5..25 {
        set_pixel(&mut image, x, 10, [0, 0, 255, 255]);
    }
    for x in 35..55 {
        set_pixel(&mut image, x, 40, [0, 0, 255, 255]);
    }

    let mut options = PipelineOptions::default();
    options.edge_detection.method = EdgeMethod::Skeleton;

    let result = convert(&image, &options, None).unwrap();
    assert_eq!(result.layers.len(), 1);
    assert_eq!(result.paths.len(), 2);
    for path in &result.paths {
        assert_eq!(path.color.r, 0);
        assert_eq!(path.color.b, 255);
    }
}

#[test]
fn invert_colors_recovers_white_on_black() {
    let mut image = solid(64, 64, [0, 0, 0, 255]);
    let (offset, size) = (7u32, 50u32);
    for i in 0..size {
        set_pixel(&mut image, offset + i, offset, [255, 255, 255, 255]);
        set_pixel(&mut image, offset + i, offset + size - 1, [255, 255, 255, 255]);
        set_pixel(&mut image, offset, offset + i, [255, 255, 255, 255]);
        set_pixel(&mut image, offset + size - 1, offset + i, [255, 255, 255, 255]);
    }

    let mut options = PipelineOptions::default();
    options.invert_colors = true;
    options.edge_detection.method = EdgeMethod::Skeleton;
    options.contour_detection.method = ContourMethod::Suzuki;

    let result = convert(&image, &options, None).unwrap();
    assert!(!result.paths.is_empty());
}

#[test]
fn noisy_square_with_noise_reduction_keeps_dominant_boundary() {
    let mut image = square_outline_image();
    let mut rng_state: u32 = 0xC0FFEE;
    let mut next = || {
        rng_state ^= rng_state << 13;
        rng_state ^= rng_state >> 17;
        rng_state ^= rng_state << 5;
        rng_state
    };
    for y in 0..image.height {
        for x in 0..image.width {
            if next() % 100 == 0 {
                let v = if next() % 2 == 0 { 0 } else { 255 };
                set_pixel(&mut image, x, y, [v, v, v, 255]);
            }
        }
    }

    let mut options = PipelineOptions::default();
    options.edge_detection.method = EdgeMethod::Skeleton;
    options.edge_detection.apply_noise_reduction = true;
    options.contour_detection.method = ContourMethod::Suzuki;

    let result = convert(&image, &options, None).unwrap();
    let largest = result
        .paths
        .iter()
        .map(|p| p.points.len())
        .max()
        .unwrap_or(0);
    assert!(largest > 10, "expected a dominant boundary path to survive, got max len {largest}");
}
