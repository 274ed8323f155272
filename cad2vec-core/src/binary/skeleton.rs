//! Mode A: threshold + Zhang-Suen thinning to a one-pixel-wide skeleton.
//!
//! Standard Zhang-Suen two-subiteration thinning over this crate's own
//! `BinaryMask`/`GrayBuffer` grid types.

use crate::raster::{BinaryMask, GrayBuffer};

/// Threshold a grayscale buffer: luminance < 128 is foreground ("line
/// material"), stored as 1 prior to thinning.
fn threshold(gray: &GrayBuffer) -> Vec<u8> {
    gray.data.iter().map(|&v| if v < 128 { 1 } else { 0 }).collect()
}

#[inline]
fn fg(data: &[u8], x: i32, y: i32, width: i32, height: i32) -> u8 {
    if x < 0 || y < 0 || x >= width || y >= height {
        0
    } else {
        data[(y * width + x) as usize]
    }
}

/// Zhang-Suen thinning: repeat two sub-iterations until no pixel changes.
fn zhang_suen_thin(mut data: Vec<u8>, width: i32, height: i32) -> Vec<u8> {
    let mut changed = true;
    while changed {
        changed = false;
        for sub_iteration in 0..2 {
            let mut to_clear = Vec::new();
            for y in 0..height {
                for x in 0..width {
                    if fg(&data, x, y, width, height) == 0 {
                        continue;
                    }
                    let p2 = fg(&data, x, y - 1, width, height);
                    let p3 = fg(&data, x + 1, y - 1, width, height);
                    let p4 = fg(&data, x + 1, y, width, height);
                    let p5 = fg(&data, x + 1, y + 1, width, height);
                    let p6 = fg(&data, x, y + 1, width, height);
                    let p7 = fg(&data, x - 1, y + 1, width, height);
                    let p8 = fg(&data, x - 1, y, width, height);
                    let p9 = fg(&data, x - 1, y - 1, width, height);

                    let b = p2 + p3 + p4 + p5 + p6 + p7 + p8 + p9;
                    if !(2..=6).contains(&b) {
                        continue;
                    }

                    let seq = [p2, p3, p4, p5, p6, p7, p8, p9, p2];
                    let a = seq.windows(2).filter(|w| w[0] == 0 && w[1] == 1).count();
                    if a != 1 {
                        continue;
                    }

                    let ok = if sub_iteration == 0 {
                        p2 * p4 * p6 == 0 && p4 * p6 * p8 == 0
                    } else {
                        p2 * p4 * p8 == 0 && p2 * p6 * p8 == 0
                    };
                    if ok {
                        to_clear.push((x, y));
                    }
                }
            }
            if !to_clear.is_empty() {
                changed = true;
                for (x, y) in to_clear {
                    data[(y * width + x) as usize] = 0;
                }
            }
        }
    }
    data
}

/// Threshold then Zhang-Suen thin, producing a 0/255 `BinaryMask`.
pub fn skeletonize(gray: &GrayBuffer) -> BinaryMask {
    let width = gray.width as i32;
    let height = gray.height as i32;
    let binary = threshold(gray);
    let thinned = zhang_suen_thin(binary, width, height);
    BinaryMask {
        width: gray.width,
        height: gray.height,
        data: thinned.into_iter().map(|v| v * 255).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_gray(width: u32, height: u32, data: Vec<u8>) -> GrayBuffer {
        GrayBuffer {
            width,
            height,
            data,
        }
    }

    #[test]
    fn thins_a_thick_horizontal_bar_to_one_pixel_tall() {
        // 10 wide, 3 tall, all black (foreground)
        let gray = make_gray(10, 3, vec![0u8; 30]);
        let mask = skeletonize(&gray);
        for x in 2..8 {
            let set_count = (0..3).filter(|&y| mask.is_set(x, y)).count();
            assert!(set_count <= 1, "column {x} not thinned: {set_count} set pixels");
        }
    }

    #[test]
    fn skeleton_is_idempotent() {
        // property: thinning an already-thinned mask changes nothing
        let gray = make_gray(10, 3, vec![0u8; 30]);
        let mask = skeletonize(&gray);
        let width = mask.width as i32;
        let height = mask.height as i32;
        let reapplied = zhang_suen_thin(
            mask.data.iter().map(|&v| if v > 0 { 1 } else { 0 }).collect(),
            width,
            height,
        );
        let expected: Vec<u8> = mask.data.iter().map(|&v| if v > 0 { 1 } else { 0 }).collect();
        assert_eq!(reapplied, expected);
    }

    #[test]
    fn empty_image_yields_empty_mask() {
        let gray = make_gray(4, 4, vec![255u8; 16]);
        let mask = skeletonize(&gray);
        assert_eq!(mask.count_set(), 0);
    }
}
