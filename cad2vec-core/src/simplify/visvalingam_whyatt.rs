//! Visvalingam-Whyatt point reduction: repeatedly drop the point whose
//! triangle with its two current neighbors has the smallest area.

use crate::geometry::Point;

fn triangle_area(a: &Point, b: &Point, c: &Point) -> f32 {
    ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)).abs() / 2.0
}

/// Reduce `points` to `target_count` points (clamped to at least 2).
pub fn simplify(points: &[Point], target_count: usize) -> Vec<Point> {
    let target_count = target_count.max(2);
    if points.len() <= target_count {
        return points.to_vec();
    }

    let kept: Vec<Point> = points.to_vec();
    // doubly linked list over indices into `kept`, so removals are O(1)
    let mut prev: Vec<Option<usize>> = (0..kept.len()).map(|i| i.checked_sub(1)).collect();
    let mut next: Vec<Option<usize>> = (0..kept.len())
        .map(|i| if i + 1 < kept.len() { Some(i + 1) } else { None })
        .collect();
    let mut alive = vec![true; kept.len()];
    let mut alive_count = kept.len();

    let mut areas: Vec<f32> = vec![f32::INFINITY; kept.len()];
    for i in 1..kept.len() - 1 {
        areas[i] = triangle_area(&kept[i - 1], &kept[i], &kept[i + 1]);
    }

    while alive_count > target_count {
        // find the interior point with minimum area
        let mut min_idx = None;
        let mut min_area = f32::INFINITY;
        for (i, &a) in areas.iter().enumerate() {
            if alive[i] && a < min_area {
                min_area = a;
                min_idx = Some(i);
            }
        }
        let Some(idx) = min_idx else { break };
        if prev[idx].is_none() || next[idx].is_none() {
            // never remove an endpoint
            areas[idx] = f32::INFINITY;
            continue;
        }

        let p = prev[idx].unwrap();
        let n = next[idx].unwrap();
        alive[idx] = false;
        alive_count -= 1;
        next[p] = Some(n);
        prev[n] = Some(p);

        // recompute areas for the two surviving neighbors
        if let (Some(pp), true) = (prev[p], alive[p]) {
            areas[p] = triangle_area(&kept[pp], &kept[p], &kept[n]);
        }
        if let (Some(nn), true) = (next[n], alive[n]) {
            areas[n] = triangle_area(&kept[p], &kept[n], &kept[nn]);
        }
    }

    let mut result = Vec::with_capacity(alive_count);
    let mut cursor = Some(0usize);
    while let Some(i) = cursor {
        result.push(kept[i]);
        cursor = next[i];
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduces_to_requested_count() {
        let points: Vec<Point> = (0..20)
            .map(|i| Point::new(i as f32, (i as f32 * 0.37).sin() * 3.0))
            .collect();
        let simplified = simplify(&points, 5);
        assert_eq!(simplified.len(), 5);
    }

    #[test]
    fn endpoints_always_survive() {
        let points: Vec<Point> = (0..10).map(|i| Point::new(i as f32, 0.0)).collect();
        let simplified = simplify(&points, 3);
        assert_eq!(simplified.first(), points.first());
        assert_eq!(simplified.last(), points.last());
    }

    #[test]
    fn short_input_passes_through() {
        let points = vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        assert_eq!(simplify(&points, 10), points);
    }
}
