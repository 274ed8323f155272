//! Morphological close (dilate then erode) to bridge one-pixel gaps.

use crate::raster::BinaryMask;

fn dilate(mask: &BinaryMask) -> BinaryMask {
    let mut out = mask.clone();
    for y in 0..mask.height as i32 {
        for x in 0..mask.width as i32 {
            if mask.neighbor_count(x, y) > 0 || mask.is_set(x, y) {
                out.set(x as u32, y as u32, 255);
            }
        }
    }
    out
}

fn erode(mask: &BinaryMask) -> BinaryMask {
    let mut out = mask.clone();
    for y in 0..mask.height as i32 {
        for x in 0..mask.width as i32 {
            if !mask.is_set(x, y) {
                continue;
            }
            let mut all_set = true;
            'check: for dy in -1..=1 {
                for dx in -1..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    if !mask.is_set(x + dx, y + dy) {
                        all_set = false;
                        break 'check;
                    }
                }
            }
            if !all_set {
                out.set(x as u32, y as u32, 0);
            }
        }
    }
    out
}

/// `iterations` rounds of dilate-then-erode, 8-connected.
pub fn close(mask: &BinaryMask, iterations: u32) -> BinaryMask {
    let mut current = mask.clone();
    for _ in 0..iterations {
        current = erode(&dilate(&current));
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closes_a_single_pixel_gap() {
        // two horizontal segments with a 1px gap between them
        let mut mask = BinaryMask::new(7, 1);
        for x in [0, 1, 2, 4, 5, 6] {
            mask.set(x, 0, 255);
        }
        assert!(!mask.is_set(3, 0));
        let closed = close(&mask, 1);
        assert!(closed.is_set(3, 0));
    }

    #[test]
    fn zero_iterations_is_identity() {
        let mut mask = BinaryMask::new(3, 3);
        mask.set(1, 1, 255);
        let closed = close(&mask, 0);
        assert_eq!(closed.data, mask.data);
    }
}
