//! Mode 4: marching squares, sub-pixel closed polylines.
//!
//! Each 2x2 cell is classified against a grayscale threshold into a 4-bit
//! corner index (TL=1, TR=2, BR=4, BL=8); edge crossings are linearly
//! interpolated. The two ambiguous saddle cases (5 and 10) emit both
//! diagonal connections rather than picking one: the classic lookup
//! table for these cases lists only one connection, which loses contour
//! segments where the other diagonal also crosses foreground.

use crate::geometry::Point;
use crate::raster::GrayBuffer;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// For each case, the list of (entry edge, exit edge) segments to emit.
fn case_segments(case: u8) -> Vec<(Edge, Edge)> {
    use Edge::*;
    match case {
        0 | 15 => vec![],
        1 => vec![(Left, Top)],
        2 => vec![(Top, Right)],
        3 => vec![(Left, Right)],
        4 => vec![(Right, Bottom)],
        5 => vec![(Left, Top), (Right, Bottom)], // saddle: both diagonals
        6 => vec![(Top, Bottom)],
        7 => vec![(Left, Bottom)],
        8 => vec![(Bottom, Left)],
        9 => vec![(Bottom, Top)],
        10 => vec![(Top, Right), (Bottom, Left)], // saddle: both diagonals
        11 => vec![(Bottom, Right)],
        12 => vec![(Right, Left)],
        13 => vec![(Right, Top)],
        14 => vec![(Top, Left)],
        _ => unreachable!("case index out of range: {case}"),
    }
}

fn lerp_edge(
    edge: Edge,
    cell_x: i32,
    cell_y: i32,
    tl: f32,
    tr: f32,
    br: f32,
    bl: f32,
    threshold: f32,
) -> Point {
    let interp = |a: f32, b: f32| -> f32 {
        if (b - a).abs() < 1e-6 {
            0.5
        } else {
            ((threshold - a) / (b - a)).clamp(0.0, 1.0)
        }
    };
    let (x, y) = (cell_x as f32, cell_y as f32);
    match edge {
        Edge::Top => Point::new(x + interp(tl, tr), y),
        Edge::Right => Point::new(x + 1.0, y + interp(tr, br)),
        Edge::Bottom => Point::new(x + interp(bl, br), y + 1.0),
        Edge::Left => Point::new(x, y + interp(tl, bl)),
    }
}

/// Deduplication key for an edge crossing, shared between the two cells
/// that border it.
fn edge_key(cell_x: i32, cell_y: i32, edge: Edge) -> (i32, i32, u8) {
    match edge {
        Edge::Top => (cell_x, cell_y, 0),
        Edge::Left => (cell_x, cell_y, 1),
        Edge::Bottom => (cell_x, cell_y + 1, 0),
        Edge::Right => (cell_x + 1, cell_y, 1),
    }
}

/// Trace all cells, returning closed polylines formed by linking segments
/// across shared edges.
pub fn trace(gray: &GrayBuffer, threshold: f32) -> Vec<Vec<Point>> {
    let (w, h) = (gray.width as i32, gray.height as i32);
    // value: foreground (line material) scores higher than threshold when
    // luminance is low, matching the skeleton's "luminance < 128 is
    // foreground" convention; so the scalar field is `255 - luminance`.
    let value = |x: i32, y: i32| -> f32 { 255.0 - gray.get(x, y) as f32 };

    let mut points_by_key: HashMap<(i32, i32, u8), usize> = HashMap::new();
    let mut points: Vec<Point> = Vec::new();
    // undirected adjacency between point indices, built from each segment
    let mut adjacency: HashMap<usize, Vec<usize>> = HashMap::new();

    let mut get_or_insert = |key: (i32, i32, u8), p: Point| -> usize {
        *points_by_key.entry(key).or_insert_with(|| {
            points.push(p);
            points.len() - 1
        })
    };

    for cy in 0..(h - 1) {
        for cx in 0..(w - 1) {
            let tl = value(cx, cy);
            let tr = value(cx + 1, cy);
            let br = value(cx + 1, cy + 1);
            let bl = value(cx, cy + 1);

            let mut case = 0u8;
            if tl > threshold {
                case |= 1;
            }
            if tr > threshold {
                case |= 2;
            }
            if br > threshold {
                case |= 4;
            }
            if bl > threshold {
                case |= 8;
            }

            for (entry, exit) in case_segments(case) {
                let entry_pt = lerp_edge(entry, cx, cy, tl, tr, br, bl, threshold);
                let exit_pt = lerp_edge(exit, cx, cy, tl, tr, br, bl, threshold);
                let a = get_or_insert(edge_key(cx, cy, entry), entry_pt);
                let b = get_or_insert(edge_key(cx, cy, exit), exit_pt);
                adjacency.entry(a).or_default().push(b);
                adjacency.entry(b).or_default().push(a);
            }
        }
    }

    // Link segments into polylines by walking the adjacency graph.
    let mut visited_edges: std::collections::HashSet<(usize, usize)> = Default::default();
    let mut polylines = Vec::new();

    for &start in points_by_key.values() {
        let neighbors = match adjacency.get(&start) {
            Some(n) if !n.is_empty() => n.clone(),
            _ => continue,
        };
        for &first_next in &neighbors {
            if visited_edges.contains(&(start, first_next)) {
                continue;
            }
            let mut path = vec![start];
            let mut prev = start;
            let mut current = first_next;
            visited_edges.insert((prev, current));
            visited_edges.insert((current, prev));
            path.push(current);

            loop {
                let next_candidates = adjacency.get(&current).cloned().unwrap_or_default();
                let next = next_candidates
                    .into_iter()
                    .find(|&n| !visited_edges.contains(&(current, n)));
                match next {
                    Some(n) => {
                        visited_edges.insert((current, n));
                        visited_edges.insert((n, current));
                        prev = current;
                        current = n;
                        path.push(current);
                        if current == start {
                            break;
                        }
                    }
                    None => break,
                }
            }
            let _ = prev;

            if path.len() >= 3 {
                polylines.push(path.iter().map(|&i| points[i]).collect());
            }
        }
    }

    polylines
}
