//! Mode 1 (default): edge-chain tracing along a thinned skeleton.
//!
//! Walks single polylines out of the thinned mask rather than closed
//! boundary loops: contours are `closed = false` unless the walk rejoins
//! its own start.

use crate::geometry::{Contour, Point};
use crate::raster::BinaryMask;

const DIRECTIONS: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

fn foreground_neighbors(mask: &BinaryMask, x: i32, y: i32) -> Vec<(i32, i32)> {
    DIRECTIONS
        .iter()
        .map(|(dx, dy)| (x + dx, y + dy))
        .filter(|&(nx, ny)| mask.is_set(nx, ny))
        .collect()
}

/// Walk from `(x, y)` choosing the first unvisited foreground 8-neighbor in
/// a fixed direction order, marking pixels visited as it goes.
fn walk(mask: &BinaryMask, visited: &mut [bool], start: (i32, i32)) -> Vec<Point> {
    let width = mask.width as i32;
    let cap = (mask.width as usize) * (mask.height as usize);
    let mut chain = Vec::new();
    let mut current = start;

    loop {
        let idx = (current.1 * width + current.0) as usize;
        if visited[idx] {
            break;
        }
        visited[idx] = true;
        chain.push(Point::new(current.0 as f32, current.1 as f32));

        if chain.len() >= cap {
            break;
        }

        let mut next = None;
        for (dx, dy) in DIRECTIONS {
            let (nx, ny) = (current.0 + dx, current.1 + dy);
            if !mask.is_set(nx, ny) {
                continue;
            }
            let nidx = (ny * width + nx) as usize;
            if !visited[nidx] {
                next = Some((nx, ny));
                break;
            }
        }

        match next {
            Some(p) => current = p,
            None => break,
        }
    }

    chain
}

fn is_endpoint(mask: &BinaryMask, x: i32, y: i32) -> bool {
    foreground_neighbors(mask, x, y).len() == 1
}

/// Trace all chains: pass 1 starts from endpoints, pass 2 mops up
/// remaining unvisited pixels (closed loops with no endpoints).
pub fn trace(mask: &BinaryMask) -> Vec<Contour> {
    let width = mask.width as i32;
    let height = mask.height as i32;
    let mut visited = vec![false; mask.data.len()];
    let mut contours = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let idx = (y * width + x) as usize;
            if visited[idx] || !mask.is_set(x, y) {
                continue;
            }
            if is_endpoint(mask, x, y) {
                let chain = walk(mask, &mut visited, (x, y));
                if chain.len() >= 3 {
                    contours.push(Contour::open(chain));
                } else {
                    for p in &chain {
                        visited[(p.y as i32 * width + p.x as i32) as usize] = true;
                    }
                }
            }
        }
    }

    for y in 0..height {
        for x in 0..width {
            let idx = (y * width + x) as usize;
            if visited[idx] || !mask.is_set(x, y) {
                continue;
            }
            let chain = walk(mask, &mut visited, (x, y));
            if chain.len() >= 3 {
                let closed = chain_is_loop(mask, &chain);
                contours.push(Contour {
                    points: chain,
                    closed,
                    hole: false,
                });
            }
        }
    }

    contours
}

/// A chain found in pass 2 forms a closed loop when its two ends are
/// themselves 8-adjacent.
fn chain_is_loop(_mask: &BinaryMask, chain: &[Point]) -> bool {
    if chain.len() < 3 {
        return false;
    }
    let first = chain[0];
    let last = chain[chain.len() - 1];
    (first.x - last.x).abs() <= 1.0 && (first.y - last.y).abs() <= 1.0
}
