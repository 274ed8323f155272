//! Cubic Bezier curve fitting (Schneider's method).

use crate::geometry::Point;

#[derive(Debug, Clone, Copy)]
pub struct CubicBezier {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

impl CubicBezier {
    fn eval(&self, t: f32) -> Point {
        let u = 1.0 - t;
        let (uuu, uut, utt, ttt) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
        Point::new(
            uuu * self.p0.x + uut * self.p1.x + utt * self.p2.x + ttt * self.p3.x,
            uuu * self.p0.y + uut * self.p1.y + utt * self.p2.y + ttt * self.p3.y,
        )
    }
}

fn normalize(p: Point) -> Point {
    let len = (p.x * p.x + p.y * p.y).sqrt();
    if len < 1e-9 {
        Point::new(0.0, 0.0)
    } else {
        Point::new(p.x / len, p.y / len)
    }
}

fn sub(a: Point, b: Point) -> Point {
    Point::new(a.x - b.x, a.y - b.y)
}

fn dot(a: Point, b: Point) -> f32 {
    a.x * b.x + a.y * b.y
}

/// Parameterize points by cumulative chord length, normalized to `[0, 1]`.
fn chord_length_parameterize(points: &[Point]) -> Vec<f32> {
    let mut u = vec![0.0f32; points.len()];
    for i in 1..points.len() {
        u[i] = u[i - 1] + points[i].dist(&points[i - 1]);
    }
    let total = *u.last().unwrap_or(&1.0);
    if total < 1e-9 {
        return u;
    }
    for v in u.iter_mut() {
        *v /= total;
    }
    u
}

fn bernstein(t: f32) -> [f32; 4] {
    let u = 1.0 - t;
    [u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t]
}

/// Fit a single cubic segment over `points[start..=end]` given tangent
/// directions at the endpoints, solving the 2x2 normal system for the
/// tangent-aligned control distances alpha1, alpha2.
fn fit_one_segment(
    points: &[Point],
    u: &[f32],
    start: usize,
    end: usize,
    tangent1: Point,
    tangent2: Point,
) -> CubicBezier {
    let p0 = points[start];
    let p3 = points[end];
    let n = end - start + 1;

    let mut c = [[0.0f32; 2]; 2];
    let mut x = [0.0f32; 2];

    for (i, &t) in u[start..=end].iter().enumerate() {
        let b = bernstein(t);
        let a1 = Point::new(tangent1.x * b[1], tangent1.y * b[1]);
        let a2 = Point::new(tangent2.x * b[2], tangent2.y * b[2]);

        c[0][0] += dot(a1, a1);
        c[0][1] += dot(a1, a2);
        c[1][0] = c[0][1];
        c[1][1] += dot(a2, a2);

        let point_on_baseline = Point::new(
            b[0] * p0.x + b[3] * p3.x,
            b[0] * p0.y + b[3] * p3.y,
        );
        let rhs = sub(points[start + i], point_on_baseline);
        x[0] += dot(a1, rhs);
        x[1] += dot(a2, rhs);
    }

    let det = c[0][0] * c[1][1] - c[0][1] * c[1][0];
    let seg_len = p0.dist(&p3);
    let fallback = seg_len / 3.0;

    let (alpha1, alpha2) = if det.abs() < 1e-9 {
        (fallback, fallback)
    } else {
        let a1 = (x[0] * c[1][1] - x[1] * c[0][1]) / det;
        let a2 = (c[0][0] * x[1] - c[1][0] * x[0]) / det;
        (
            if a1 > 1e-6 { a1 } else { fallback },
            if a2 > 1e-6 { a2 } else { fallback },
        )
    };
    let _ = n;

    CubicBezier {
        p0,
        p1: Point::new(p0.x + tangent1.x * alpha1, p0.y + tangent1.y * alpha1),
        p2: Point::new(p3.x + tangent2.x * alpha2, p3.y + tangent2.y * alpha2),
        p3,
    }
}

fn max_error(points: &[Point], u: &[f32], start: usize, end: usize, curve: &CubicBezier) -> (f32, usize) {
    let mut max_d = 0.0f32;
    let mut max_idx = start;
    for i in start..=end {
        let fit = curve.eval(u[i]);
        let d = points[i].dist(&fit);
        if d > max_d {
            max_d = d;
            max_idx = i;
        }
    }
    (max_d, max_idx)
}

fn fit_recursive(
    points: &[Point],
    u: &[f32],
    start: usize,
    end: usize,
    tangent1: Point,
    tangent2: Point,
    error_threshold: f32,
    out: &mut Vec<CubicBezier>,
) {
    if end - start < 2 {
        let p0 = points[start];
        let p3 = points[end];
        let seg_len = p0.dist(&p3);
        out.push(CubicBezier {
            p0,
            p1: Point::new(p0.x + tangent1.x * seg_len / 3.0, p0.y + tangent1.y * seg_len / 3.0),
            p2: Point::new(p3.x + tangent2.x * seg_len / 3.0, p3.y + tangent2.y * seg_len / 3.0),
            p3,
        });
        return;
    }

    let curve = fit_one_segment(points, u, start, end, tangent1, tangent2);
    let (err, split_idx) = max_error(points, u, start, end, &curve);

    if err <= error_threshold || split_idx == start || split_idx == end {
        out.push(curve);
        return;
    }

    let next_idx = (split_idx + 1).min(points.len() - 1);
    let mut center_tangent = normalize(sub(points[split_idx - 1], points[next_idx]));
    if center_tangent.x == 0.0 && center_tangent.y == 0.0 {
        center_tangent = normalize(sub(points[split_idx], points[start]));
    }

    fit_recursive(points, u, start, split_idx, tangent1, center_tangent, error_threshold, out);
    let reverse_tangent = Point::new(-center_tangent.x, -center_tangent.y);
    fit_recursive(points, u, split_idx, end, reverse_tangent, tangent2, error_threshold, out);
}

/// Fit a polyline with cubic Bezier segments, subdividing at the
/// max-error point whenever a single segment's error exceeds the threshold.
pub fn fit(points: &[Point], error_threshold: f32) -> Vec<CubicBezier> {
    if points.len() < 2 {
        return Vec::new();
    }
    let u = chord_length_parameterize(points);
    let tangent1 = normalize(sub(points[1], points[0]));
    let tangent2 = normalize(sub(points[points.len() - 2], points[points.len() - 1]));

    let mut out = Vec::new();
    fit_recursive(points, &u, 0, points.len() - 1, tangent1, tangent2, error_threshold, &mut out);
    out
}
