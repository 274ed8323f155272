//! Refinement actions applied each iteration, in fixed order: remove
//! spurious paths, snap to edges, adaptive re-simplify, fill gaps.

use super::distance_transform::distance_transform;
use crate::geometry::{Color, Path, Point};
use crate::raster::{BinaryMask, DistanceField};
use crate::simplify::douglas_peucker;
use crate::tracer::moore;

/// Drop any path whose fraction of points with no reference pixel within
/// `radius` exceeds `threshold`, and any path with fewer than 3 points.
pub fn remove_spurious(paths: Vec<Path>, reference: &BinaryMask, radius: i32, threshold: f64) -> Vec<Path> {
    paths
        .into_iter()
        .filter(|path| {
            if path.points.len() < 3 {
                return false;
            }
            let unmatched = path
                .points
                .iter()
                .filter(|p| !has_reference_pixel_nearby(reference, p, radius))
                .count();
            (unmatched as f64 / path.points.len() as f64) <= threshold
        })
        .collect()
}

fn has_reference_pixel_nearby(mask: &BinaryMask, p: &Point, radius: i32) -> bool {
    let cx = p.x.round() as i32;
    let cy = p.y.round() as i32;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if mask.is_set(cx + dx, cy + dy) {
                return true;
            }
        }
    }
    false
}

/// For each point not already on a reference pixel, search within a
/// `snap_radius` square for the nearest reference pixel and replace it
/// with integer coordinates. Ties break by smaller squared distance, then
/// scan order.
pub fn snap_to_edges(mut paths: Vec<Path>, reference: &BinaryMask, snap_radius: i32) -> Vec<Path> {
    for path in paths.iter_mut() {
        for point in path.points.iter_mut() {
            let cx = point.x.round() as i32;
            let cy = point.y.round() as i32;
            if reference.is_set(cx, cy) {
                continue;
            }
            let mut best: Option<(i32, i32, i32)> = None; // (dist_sq, x, y)
            for dy in -snap_radius..=snap_radius {
                for dx in -snap_radius..=snap_radius {
                    let (nx, ny) = (cx + dx, cy + dy);
                    if !reference.is_set(nx, ny) {
                        continue;
                    }
                    let d2 = dx * dx + dy * dy;
                    match best {
                        Some((bd, _, _)) if bd <= d2 => {}
                        _ => best = Some((d2, nx, ny)),
                    }
                }
            }
            if let Some((_, nx, ny)) = best {
                *point = Point::new(nx as f32, ny as f32);
            }
        }
    }
    paths
}

/// Recompute mean reference distance per path; re-simplify with a tighter
/// tolerance (half the default) when it exceeds `tau`.
pub fn adaptive_resimplify(mut paths: Vec<Path>, reference_distance: &DistanceField, tau: f32, default_tolerance: f32) -> Vec<Path> {
    for path in paths.iter_mut() {
        if path.points.is_empty() {
            continue;
        }
        let mean: f32 = path
            .points
            .iter()
            .map(|p| reference_distance.get(p.x.round() as i32, p.y.round() as i32))
            .sum::<f32>()
            / path.points.len() as f32;
        if mean > tau {
            path.points = douglas_peucker::simplify(&path.points, default_tolerance * 0.5);
        }
    }
    paths
}

/// Build the unmatched-reference mask, label its 8-connected components,
/// and trace each sufficiently large component with Moore tracing to
/// produce new gap-fill paths.
pub fn fill_gaps(reference: &BinaryMask, rendered: &BinaryMask, tau: f32, min_cluster: usize) -> Vec<Path> {
    let dist_to_rendered = distance_transform(rendered);
    let (w, h) = (reference.width, reference.height);

    let mut unmatched = BinaryMask::new(w, h);
    for y in 0..h as i32 {
        for x in 0..w as i32 {
            if reference.is_set(x, y) && dist_to_rendered.get(x, y) > tau {
                unmatched.set(x as u32, y as u32, 255);
            }
        }
    }

    let components = label_components(&unmatched);
    let mut new_paths = Vec::new();

    for component in components {
        if component.len() < min_cluster {
            continue;
        }
        let mut component_mask = BinaryMask::new(w, h);
        for &(x, y) in &component {
            component_mask.set(x, y, 255);
        }
        for contour in moore::trace(&component_mask) {
            let area = contour.area();
            if area < 5.0 {
                continue;
            }
            let points = douglas_peucker::simplify(&contour.points, 1.0);
            new_paths.push(Path {
                points,
                closed: contour.closed,
                color: Color::BLACK,
                stroke_width: 1.0,
                layer: None,
            });
        }
    }

    new_paths
}

fn label_components(mask: &BinaryMask) -> Vec<Vec<(u32, u32)>> {
    let (w, h) = (mask.width as i32, mask.height as i32);
    let mut visited = vec![false; (w * h) as usize];
    let mut components = Vec::new();

    for y in 0..h {
        for x in 0..w {
            let idx = (y * w + x) as usize;
            if visited[idx] || !mask.is_set(x, y) {
                continue;
            }
            let mut stack = vec![(x, y)];
            visited[idx] = true;
            let mut component = Vec::new();
            while let Some((cx, cy)) = stack.pop() {
                component.push((cx as u32, cy as u32));
                for dy in -1..=1 {
                    for dx in -1..=1 {
                        if dx == 0 && dy == 0 {
                            continue;
                        }
                        let (nx, ny) = (cx + dx, cy + dy);
                        if nx < 0 || ny < 0 || nx >= w || ny >= h {
                            continue;
                        }
                        let nidx = (ny * w + nx) as usize;
                        if !visited[nidx] && mask.is_set(nx, ny) {
                            visited[nidx] = true;
                            stack.push((nx, ny));
                        }
                    }
                }
            }
            components.push(component);
        }
    }
    components
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_spurious_drops_short_paths() {
        let reference = BinaryMask::new(10, 10);
        let short = Path {
            points: vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0)],
            closed: false,
            color: Color::BLACK,
            stroke_width: 1.0,
            layer: None,
        };
        let kept = remove_spurious(vec![short], &reference, 2, 0.7);
        assert!(kept.is_empty());
    }

    #[test]
    fn snap_to_edges_moves_point_to_nearest_reference_pixel() {
        let mut reference = BinaryMask::new(10, 10);
        reference.set(5, 5, 255);
        let path = Path {
            points: vec![Point::new(4.0, 4.0)],
            closed: false,
            color: Color::BLACK,
            stroke_width: 1.0,
            layer: None,
        };
        let snapped = snap_to_edges(vec![path], &reference, 3);
        assert_eq!(snapped[0].points[0], Point::new(5.0, 5.0));
    }

    #[test]
    fn fill_gaps_produces_nothing_below_min_cluster() {
        let reference = {
            let mut m = BinaryMask::new(10, 10);
            m.set(5, 5, 255);
            m
        };
        let rendered = BinaryMask::new(10, 10);
        let paths = fill_gaps(&reference, &rendered, 2.0, 20);
        assert!(paths.is_empty());
    }
}
