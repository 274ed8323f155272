//! Post-simplification smoothing passes: Chaikin corner-cutting, moving
//! average, and Gaussian corner-cutting/blur passes.

use crate::geometry::Point;

/// Chaikin corner-cutting: each edge AB becomes `0.75A+0.25B` and
/// `0.25A+0.75B`; repeated for `iterations` rounds. Closed paths wrap the
/// last edge back to the first point.
pub fn chaikin(points: &[Point], iterations: u32, closed: bool) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let mut current = points.to_vec();
    for _ in 0..iterations {
        let edge_count = if closed {
            current.len()
        } else {
            current.len() - 1
        };
        let mut next = Vec::with_capacity(edge_count * 2);
        if !closed {
            next.push(current[0]);
        }
        for i in 0..edge_count {
            let a = current[i];
            let b = current[(i + 1) % current.len()];
            next.push(Point::new(0.75 * a.x + 0.25 * b.x, 0.75 * a.y + 0.25 * b.y));
            next.push(Point::new(0.25 * a.x + 0.75 * b.x, 0.25 * a.y + 0.75 * b.y));
        }
        if !closed {
            next.push(current[current.len() - 1]);
        }
        current = next;
    }
    current
}

/// Moving average over a window of `2k+1` points, clamping at the edges of
/// open paths.
pub fn moving_average(points: &[Point], k: usize, closed: bool) -> Vec<Point> {
    if k == 0 || points.len() < 3 {
        return points.to_vec();
    }
    let n = points.len();
    let at = |i: isize| -> Point {
        if closed {
            points[i.rem_euclid(n as isize) as usize]
        } else {
            points[i.clamp(0, n as isize - 1) as usize]
        }
    };
    (0..n)
        .map(|i| {
            let mut sx = 0.0f32;
            let mut sy = 0.0f32;
            let window = 2 * k as isize + 1;
            for offset in -(k as isize)..=(k as isize) {
                let p = at(i as isize + offset);
                sx += p.x;
                sy += p.y;
            }
            Point::new(sx / window as f32, sy / window as f32)
        })
        .collect()
}

/// Gaussian smoothing with a mirror-padded kernel of half-width `ceil(3*sigma)`.
pub fn gaussian(points: &[Point], sigma: f32, closed: bool) -> Vec<Point> {
    if sigma <= 0.0 || points.len() < 3 {
        return points.to_vec();
    }
    let n = points.len();
    let radius = (3.0 * sigma).ceil() as isize;
    let mut kernel: Vec<f32> = (-radius..=radius)
        .map(|i| (-(i as f32 * i as f32) / (2.0 * sigma * sigma)).exp())
        .collect();
    let sum: f32 = kernel.iter().sum();
    for k in kernel.iter_mut() {
        *k /= sum;
    }

    let at = |i: isize| -> Point {
        if closed {
            points[i.rem_euclid(n as isize) as usize]
        } else {
            points[i.clamp(0, n as isize - 1) as usize]
        }
    };

    (0..n)
        .map(|i| {
            let mut sx = 0.0f32;
            let mut sy = 0.0f32;
            for (offset, &w) in (-radius..=radius).zip(kernel.iter()) {
                let p = at(i as isize + offset);
                sx += p.x * w;
                sy += p.y * w;
            }
            Point::new(sx, sy)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chaikin_doubles_edges_each_round() {
        let square = vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
        ];
        let once = chaikin(&square, 1, true);
        assert_eq!(once.len(), square.len() * 2);
    }

    #[test]
    fn moving_average_smooths_a_zigzag() {
        let points: Vec<Point> = (0..9)
            .map(|i| Point::new(i as f32, if i % 2 == 0 { 0.0 } else { 4.0 }))
            .collect();
        let smoothed = moving_average(&points, 1, false);
        assert!(smoothed[4].y < points[4].y);
        assert_eq!(smoothed[0], points[0]);
    }

    #[test]
    fn gaussian_preserves_point_count() {
        let points: Vec<Point> = (0..10).map(|i| Point::new(i as f32, 0.0)).collect();
        let smoothed = gaussian(&points, 1.0, false);
        assert_eq!(smoothed.len(), points.len());
    }
}
