//! Douglas-Peucker point reduction (the default simplifier).
//!
//! Standard recursive max-perpendicular-distance split, extended with a
//! relative-tolerance variant that scales against the input polyline's
//! own bounding-box diagonal.

use crate::geometry::{bounding_box, Point};

/// Perpendicular distance from `point` to the segment `a -> b`, using the
/// projected distance when the projection parameter `t` lies in `[0, 1]`,
/// else the Euclidean distance to the nearer endpoint.
fn point_segment_distance(point: &Point, a: &Point, b: &Point) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq < 1e-12 {
        return point.dist(a);
    }
    let t = ((point.x - a.x) * dx + (point.y - a.y) * dy) / len_sq;
    if (0.0..=1.0).contains(&t) {
        let proj = Point::new(a.x + t * dx, a.y + t * dy);
        point.dist(&proj)
    } else if t < 0.0 {
        point.dist(a)
    } else {
        point.dist(b)
    }
}

fn dp_recursive(points: &[Point], start: usize, end: usize, tolerance: f32, keep: &mut [bool]) {
    if end <= start + 1 {
        return;
    }
    let (a, b) = (points[start], points[end]);
    let mut max_dist = 0.0f32;
    let mut max_idx = start;
    for i in (start + 1)..end {
        let d = point_segment_distance(&points[i], &a, &b);
        if d > max_dist {
            max_dist = d;
            max_idx = i;
        }
    }
    if max_dist > tolerance {
        keep[max_idx] = true;
        dp_recursive(points, start, max_idx, tolerance, keep);
        dp_recursive(points, max_idx, end, tolerance, keep);
    }
}

/// Simplify a polyline with an absolute pixel tolerance.
pub fn simplify(points: &[Point], tolerance: f32) -> Vec<Point> {
    if points.len() <= 2 {
        return points.to_vec();
    }
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[points.len() - 1] = true;
    dp_recursive(points, 0, points.len() - 1, tolerance, &mut keep);

    points
        .iter()
        .zip(keep.iter())
        .filter(|(_, &k)| k)
        .map(|(p, _)| *p)
        .collect()
}

/// Simplify using a tolerance relative to the polyline's bounding-box
/// diagonal: `tolerance = diagonal * percent / 100`.
pub fn simplify_relative(points: &[Point], percent: f32) -> Vec<Point> {
    let (min_x, min_y, max_x, max_y) = bounding_box(points);
    let diagonal = ((max_x - min_x).powi(2) + (max_y - min_y).powi(2)).sqrt();
    simplify(points, diagonal * percent / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collinear_points_collapse_to_endpoints() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(3.0, 0.0),
        ];
        let simplified = simplify(&points, 0.5);
        assert_eq!(simplified.len(), 2);
    }

    #[test]
    fn retained_points_are_endpoints_or_exceed_tolerance() {
        // property: every removed point must have been within tolerance
        // of the two points that survive around it.
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.01),
            Point::new(2.0, 5.0), // clear outlier, must survive
            Point::new(3.0, 0.02),
            Point::new(4.0, 0.0),
        ];
        let simplified = simplify(&points, 0.5);
        assert!(simplified.contains(&points[0]));
        assert!(simplified.contains(&points[4]));
        assert!(simplified.contains(&points[2]));
    }

    #[test]
    fn short_paths_pass_through_unchanged() {
        let points = vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        assert_eq!(simplify(&points, 5.0), points);
    }

    #[test]
    fn relative_tolerance_scales_with_bounding_box() {
        let small = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.05),
            Point::new(2.0, 0.0),
        ];
        let large = vec![
            Point::new(0.0, 0.0),
            Point::new(50.0, 2.5),
            Point::new(100.0, 0.0),
        ];
        // same relative bump (5% of half-diagonal-ish); 1% tolerance keeps
        // both middling points given their deviation is below threshold
        assert_eq!(simplify_relative(&small, 10.0).len(), 2);
        assert_eq!(simplify_relative(&large, 10.0).len(), 2);
    }
}
