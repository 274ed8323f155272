//! Polyline simplification and smoothing.

pub mod bezier_fit;
pub mod douglas_peucker;
pub mod reumann_witkam;
pub mod smoothing;
pub mod visvalingam_whyatt;

use crate::config::{SimplifyMethod, SmoothingMethod};
use crate::geometry::{Contour, Point};

/// Reduce a contour's points per the configured method and tolerance, then
/// apply an optional smoothing pass. Tolerance is interpreted as an
/// absolute pixel distance for Douglas-Peucker and Reumann-Witkam, and as a
/// target point count for Visvalingam-Whyatt (`target_count` param).
pub fn simplify_contour(
    contour: &Contour,
    method: SimplifyMethod,
    tolerance: f32,
    target_count: usize,
    smoothing: SmoothingMethod,
    smoothing_param: f32,
) -> Contour {
    let reduced = match method {
        SimplifyMethod::DouglasPeucker => douglas_peucker::simplify(&contour.points, tolerance),
        SimplifyMethod::VisvalingamWhyatt => {
            visvalingam_whyatt::simplify(&contour.points, target_count)
        }
        SimplifyMethod::ReumannWitkam => reumann_witkam::simplify(&contour.points, tolerance),
    };

    let smoothed = apply_smoothing(&reduced, smoothing, smoothing_param, contour.closed);

    Contour {
        points: smoothed,
        closed: contour.closed,
        hole: contour.hole,
    }
}

fn apply_smoothing(
    points: &[Point],
    method: SmoothingMethod,
    param: f32,
    closed: bool,
) -> Vec<Point> {
    match method {
        SmoothingMethod::None => points.to_vec(),
        SmoothingMethod::Chaikin => smoothing::chaikin(points, param.round().max(1.0) as u32, closed),
        SmoothingMethod::MovingAverage => smoothing::moving_average(points, param.round().max(0.0) as usize, closed),
        SmoothingMethod::Gaussian => smoothing::gaussian(points, param, closed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simplify_contour_preserves_closed_flag() {
        let contour = Contour::closed_loop(
            vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(2.0, 0.0),
                Point::new(2.0, 2.0),
                Point::new(0.0, 2.0),
            ],
            false,
        );
        let result = simplify_contour(
            &contour,
            SimplifyMethod::DouglasPeucker,
            0.5,
            4,
            SmoothingMethod::None,
            0.0,
        );
        assert!(result.closed);
    }
}
