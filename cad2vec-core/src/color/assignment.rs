//! Per-path color assignment and layer grouping.

use crate::geometry::{Color, Layer, Path};
use crate::raster::RasterImage;

const MAX_SAMPLES: usize = 10;

fn sample_average_color(path: &Path, image: &RasterImage) -> Color {
    if path.points.is_empty() {
        return Color::BLACK;
    }
    let sample_count = path.points.len().min(MAX_SAMPLES);
    let (mut sr, mut sg, mut sb, mut count) = (0u64, 0u64, 0u64, 0u64);
    for i in 0..sample_count {
        let t = if sample_count == 1 {
            0.0
        } else {
            i as f32 / (sample_count - 1) as f32
        };
        let idx = (t * (path.points.len() - 1) as f32).round() as usize;
        let p = path.points[idx];
        let px = image.get(p.x.round() as i32, p.y.round() as i32);
        if px[3] < 128 {
            continue;
        }
        sr += px[0] as u64;
        sg += px[1] as u64;
        sb += px[2] as u64;
        count += 1;
    }
    if count == 0 {
        return Color::BLACK;
    }
    Color::rgb((sr / count) as u8, (sg / count) as u8, (sb / count) as u8)
}

fn nearest_palette_color(color: Color, palette: &[Color]) -> Color {
    palette
        .iter()
        .copied()
        .min_by_key(|c| color.dist_sq(c))
        .unwrap_or(Color::BLACK)
}

/// Sample each path's average color along the image and snap it to the
/// nearest palette entry, mutating `path.color` in place.
pub fn assign_path_colors(paths: &mut [Path], image: &RasterImage, palette: &[Color]) {
    if palette.is_empty() {
        return;
    }
    for path in paths.iter_mut() {
        let sampled = sample_average_color(path, image);
        path.color = nearest_palette_color(sampled, palette);
    }
}

/// Bucket paths by greedy nearest-color within `max_distance`; one layer
/// per bucket, ordered by first-insertion.
pub fn group_into_layers(paths: Vec<Path>, max_distance: f32) -> Vec<Layer> {
    let max_dist_sq = (max_distance * max_distance) as u32;
    let mut layers: Vec<Layer> = Vec::new();

    for path in paths {
        let existing = layers
            .iter_mut()
            .find(|layer| layer.color.dist_sq(&path.color) <= max_dist_sq);
        match existing {
            Some(layer) => layer.paths.push(path),
            None => {
                let id = layers.len();
                layers.push(Layer {
                    id,
                    name: format!("layer-{id}"),
                    color: path.color,
                    visible: true,
                    locked: false,
                    paths: vec![path],
                });
            }
        }
    }
    layers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn solid_image(width: u32, height: u32, color: [u8; 4]) -> RasterImage {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for _ in 0..(width * height) {
            data.extend_from_slice(&color);
        }
        RasterImage::new(width, height, data).unwrap()
    }

    #[test]
    fn assigns_nearest_palette_entry() {
        let image = solid_image(10, 10, [200, 20, 20, 255]);
        let mut paths = vec![Path {
            points: vec![Point::new(1.0, 1.0), Point::new(5.0, 5.0)],
            closed: false,
            color: Color::BLACK,
            stroke_width: 1.0,
            layer: None,
        }];
        let palette = vec![Color::rgb(210, 10, 10), Color::rgb(10, 10, 210)];
        assign_path_colors(&mut paths, &image, &palette);
        assert_eq!(paths[0].color, Color::rgb(210, 10, 10));
    }

    #[test]
    fn groups_nearby_colors_into_one_layer() {
        let make_path = |color| Path {
            points: vec![Point::new(0.0, 0.0)],
            closed: false,
            color,
            stroke_width: 1.0,
            layer: None,
        };
        let paths = vec![
            make_path(Color::rgb(200, 0, 0)),
            make_path(Color::rgb(205, 2, 1)),
            make_path(Color::rgb(0, 0, 200)),
        ];
        let layers = group_into_layers(paths, 30.0);
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].paths.len(), 2);
    }
}
