//! Rasterize a polyline set to a binary mask via Bresenham line drawing.

use crate::geometry::Path;
use crate::raster::BinaryMask;

fn draw_line(mask: &mut BinaryMask, x0: i32, y0: i32, x1: i32, y1: i32) {
    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;
    let (mut x, mut y) = (x0, y0);

    loop {
        if x >= 0 && y >= 0 && (x as u32) < mask.width && (y as u32) < mask.height {
            mask.set(x as u32, y as u32, 255);
        }
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
}

/// Rasterize every path's consecutive point pairs (and closing edge, if
/// closed) onto a mask of the given dimensions.
pub fn rasterize(paths: &[Path], width: u32, height: u32) -> BinaryMask {
    let mut mask = BinaryMask::new(width, height);
    for path in paths {
        if path.points.len() < 2 {
            continue;
        }
        for window in path.points.windows(2) {
            let a = window[0];
            let b = window[1];
            draw_line(&mut mask, a.x.round() as i32, a.y.round() as i32, b.x.round() as i32, b.y.round() as i32);
        }
        if path.closed {
            let first = path.points[0];
            let last = path.points[path.points.len() - 1];
            draw_line(
                &mut mask,
                last.x.round() as i32,
                last.y.round() as i32,
                first.x.round() as i32,
                first.y.round() as i32,
            );
        }
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Color, Point};

    #[test]
    fn rasterizes_a_horizontal_segment() {
        let path = Path {
            points: vec![Point::new(0.0, 5.0), Point::new(9.0, 5.0)],
            closed: false,
            color: Color::BLACK,
            stroke_width: 1.0,
            layer: None,
        };
        let mask = rasterize(&[path], 10, 10);
        assert_eq!(mask.count_set(), 10);
    }

    #[test]
    fn closed_path_draws_closing_edge() {
        let path = Path {
            points: vec![
                Point::new(2.0, 2.0),
                Point::new(6.0, 2.0),
                Point::new(6.0, 6.0),
            ],
            closed: true,
            color: Color::BLACK,
            stroke_width: 1.0,
            layer: None,
        };
        let mask = rasterize(&[path], 10, 10);
        assert!(mask.is_set(2, 6));
    }
}
