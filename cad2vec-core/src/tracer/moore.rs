//! Mode 2: Moore boundary tracing, producing closed boundary loops.

use crate::geometry::{Contour, Point};
use crate::raster::BinaryMask;

/// Clockwise neighbor offsets starting from north, matching `edge_chain`'s
/// direction order so both tracers agree on "clockwise".
const DIRS: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Trace the 8-connected boundary of the blob containing `start`, which
/// must be the leftmost foreground pixel of an unvisited blob.
///
/// The per-step search begins at the backtrack direction offset by 5
/// (mod 8).
pub(crate) fn trace_boundary_from(
    mask: &BinaryMask,
    start: (i32, i32),
    initial_backtrack_dir: usize,
) -> Vec<Point> {
    let mut boundary = vec![Point::new(start.0 as f32, start.1 as f32)];
    let mut current = start;
    let mut backtrack_dir = initial_backtrack_dir;

    loop {
        let start_search = (backtrack_dir + 5) % 8;
        let mut found = None;
        for i in 0..8 {
            let dir = (start_search + i) % 8;
            let (dx, dy) = DIRS[dir];
            let candidate = (current.0 + dx, current.1 + dy);
            if mask.is_set(candidate.0, candidate.1) {
                found = Some((candidate, dir));
                break;
            }
        }

        let (next, dir) = match found {
            Some(v) => v,
            None => break, // isolated pixel
        };

        current = next;
        backtrack_dir = (dir + 4) % 8;

        if current == start && boundary.len() >= 3 {
            break;
        }
        boundary.push(Point::new(current.0 as f32, current.1 as f32));
        if boundary.len() > (mask.width as usize) * (mask.height as usize) {
            break;
        }
    }

    boundary
}

/// Trace starting from an "outer" seed (arrived from background on the
/// west side).
fn trace_boundary(mask: &BinaryMask, start: (i32, i32)) -> Vec<Point> {
    trace_boundary_from(mask, start, 6)
}

/// Raster-scan to find each unvisited blob's leftmost foreground pixel and
/// trace its boundary. `visited` here tracks blobs already emitted (by
/// boundary membership), not every interior pixel.
pub fn trace(mask: &BinaryMask) -> Vec<Contour> {
    let width = mask.width as i32;
    let height = mask.height as i32;
    let mut seen = vec![false; mask.data.len()];
    let mut contours = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let idx = (y * width + x) as usize;
            if seen[idx] || !mask.is_set(x, y) {
                continue;
            }
            // only start a trace at a left edge: background (or frame) to
            // the west, matching "leftmost pixel of the blob"
            if mask.is_set(x - 1, y) {
                continue;
            }

            let boundary = trace_boundary(mask, (x, y));
            for p in &boundary {
                seen[(p.y as i32 * width + p.x as i32) as usize] = true;
            }
            if boundary.len() >= 3 {
                contours.push(Contour::closed_loop(boundary, false));
            }
        }
    }

    contours
}
