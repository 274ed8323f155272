//! Mode 3: Suzuki-Abe border following with outer/hole hierarchy.
//!
//! Labels foreground components and their enclosed background (hole)
//! regions via flood fill, then traces each with `moore::trace_boundary_from`
//! seeded from the right for outer borders and from the left for holes.

use super::moore::trace_boundary_from;
use crate::geometry::Contour;
use crate::raster::BinaryMask;

/// A traced contour plus its parent index into the same result vector
/// (`None` for outer contours with no parent).
pub struct SuzukiContour {
    pub contour: Contour,
    pub parent: Option<usize>,
}

fn flood_fill(
    seed: (i32, i32),
    width: i32,
    height: i32,
    belongs: impl Fn(i32, i32) -> bool,
    labels: &mut [i32],
    label: i32,
) {
    let mut stack = vec![seed];
    labels[(seed.1 * width + seed.0) as usize] = label;
    while let Some((x, y)) = stack.pop() {
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let (nx, ny) = (x + dx, y + dy);
                if nx < 0 || ny < 0 || nx >= width || ny >= height {
                    continue;
                }
                let idx = (ny * width + nx) as usize;
                if labels[idx] != -1 || !belongs(nx, ny) {
                    continue;
                }
                labels[idx] = label;
                stack.push((nx, ny));
            }
        }
    }
}

pub fn trace(mask: &BinaryMask) -> Vec<SuzukiContour> {
    let width = mask.width as i32;
    let height = mask.height as i32;
    let n = mask.data.len();

    // Label foreground components.
    let mut fg_labels = vec![-1i32; n];
    let mut fg_count = 0i32;
    for y in 0..height {
        for x in 0..width {
            let idx = (y * width + x) as usize;
            if fg_labels[idx] == -1 && mask.is_set(x, y) {
                flood_fill(
                    (x, y),
                    width,
                    height,
                    |nx, ny| mask.is_set(nx, ny),
                    &mut fg_labels,
                    fg_count,
                );
                fg_count += 1;
            }
        }
    }

    // Mark background pixels reachable from the image border as "outside".
    let mut outside = vec![-1i32; n];
    for x in 0..width {
        for &y in &[0, height - 1] {
            if !mask.is_set(x, y) {
                flood_fill((x, y), width, height, |nx, ny| !mask.is_set(nx, ny), &mut outside, 0);
            }
        }
    }
    for y in 0..height {
        for &x in &[0, width - 1] {
            if !mask.is_set(x, y) && outside[(y * width + x) as usize] == -1 {
                flood_fill((x, y), width, height, |nx, ny| !mask.is_set(nx, ny), &mut outside, 0);
            }
        }
    }

    // Remaining un-reached background pixels are enclosed holes; label
    // each connected hole region.
    let mut hole_labels = vec![-1i32; n];
    let mut hole_count = 0i32;
    for y in 0..height {
        for x in 0..width {
            let idx = (y * width + x) as usize;
            if !mask.is_set(x, y) && outside[idx] == -1 && hole_labels[idx] == -1 {
                flood_fill(
                    (x, y),
                    width,
                    height,
                    |nx, ny| !mask.is_set(nx, ny) && outside[(ny * width + nx) as usize] == -1,
                    &mut hole_labels,
                    hole_count,
                );
                hole_count += 1;
            }
        }
    }

    let mut results = Vec::new();
    let mut outer_index_of_label = vec![None; fg_count.max(0) as usize];

    // Outer contours: a foreground pixel whose left neighbor is background.
    for y in 0..height {
        for x in 0..width {
            if !mask.is_set(x, y) || mask.is_set(x - 1, y) {
                continue;
            }
            let label = fg_labels[(y * width + x) as usize];
            if outer_index_of_label[label as usize].is_some() {
                continue;
            }
            let points = trace_boundary_from(mask, (x, y), 6);
            if points.len() < 3 {
                continue;
            }
            outer_index_of_label[label as usize] = Some(results.len());
            results.push(SuzukiContour {
                contour: Contour::closed_loop(points, false),
                parent: None,
            });
        }
    }

    // Inner (hole) contours: a foreground pixel whose below neighbor is an
    // enclosed hole pixel.
    let mut traced_hole = vec![false; hole_count.max(0) as usize];
    for y in 0..height {
        for x in 0..width {
            if !mask.is_set(x, y) {
                continue;
            }
            let below_idx = ((y + 1).min(height - 1) * width + x) as usize;
            if y + 1 >= height || mask.is_set(x, y + 1) {
                continue;
            }
            let hole_label = hole_labels[below_idx];
            if hole_label < 0 || traced_hole[hole_label as usize] {
                continue;
            }
            traced_hole[hole_label as usize] = true;

            let points = trace_boundary_from(mask, (x, y), 2);
            if points.len() < 3 {
                continue;
            }
            let owner_label = fg_labels[(y * width + x) as usize];
            let parent = outer_index_of_label[owner_label as usize];
            results.push(SuzukiContour {
                contour: Contour::closed_loop(points, true),
                parent,
            });
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_outline(size: i32, canvas: i32) -> BinaryMask {
        let mut mask = BinaryMask::new(canvas as u32, canvas as u32);
        let offset = (canvas - size) / 2;
        for i in 0..size {
            mask.set((offset + i) as u32, offset as u32, 255);
            mask.set((offset + i) as u32, (offset + size - 1) as u32, 255);
            mask.set(offset as u32, (offset + i) as u32, 255);
            mask.set((offset + size - 1) as u32, (offset + i) as u32, 255);
        }
        mask
    }

    #[test]
    fn traces_outer_boundary_of_square_outline() {
        let mask = square_outline(50, 64);
        let results = trace(&mask);
        assert!(!results.is_empty());
        let outer = results.iter().find(|r| !r.contour.hole).unwrap();
        let area = outer.contour.area();
        assert!((area - 2500.0).abs() < 300.0, "area={area}");
    }

    #[test]
    fn filled_square_has_no_hole() {
        let mut mask = BinaryMask::new(20, 20);
        for y in 5..15 {
            for x in 5..15 {
                mask.set(x, y, 255);
            }
        }
        let results = trace(&mask);
        assert!(results.iter().all(|r| !r.contour.hole));
    }
}
