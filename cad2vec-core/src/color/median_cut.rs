//! Median-cut color quantization.

use crate::geometry::Color;

struct Box_ {
    colors: Vec<Color>,
}

impl Box_ {
    fn channel_range(&self, channel: usize) -> u8 {
        let pick = |c: &Color| match channel {
            0 => c.r,
            1 => c.g,
            _ => c.b,
        };
        let min = self.colors.iter().map(pick).min().unwrap_or(0);
        let max = self.colors.iter().map(pick).max().unwrap_or(0);
        max - min
    }

    fn widest_channel(&self) -> usize {
        let ranges = [self.channel_range(0), self.channel_range(1), self.channel_range(2)];
        ranges
            .iter()
            .enumerate()
            .max_by_key(|(_, &r)| r)
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn average(&self) -> Color {
        let n = self.colors.len().max(1) as u32;
        let (mut r, mut g, mut b) = (0u32, 0u32, 0u32);
        for c in &self.colors {
            r += c.r as u32;
            g += c.g as u32;
            b += c.b as u32;
        }
        Color::rgb((r / n) as u8, (g / n) as u8, (b / n) as u8)
    }

    fn split(mut self) -> (Box_, Box_) {
        let channel = self.widest_channel();
        self.colors.sort_by_key(|c| match channel {
            0 => c.r,
            1 => c.g,
            _ => c.b,
        });
        let mid = self.colors.len() / 2;
        let right = self.colors.split_off(mid);
        (Box_ { colors: self.colors }, Box_ { colors: right })
    }
}

/// Quantize `samples` down to at most `target_count` representative colors.
pub fn quantize(samples: &[Color], target_count: usize) -> Vec<Color> {
    if samples.is_empty() || target_count == 0 {
        return Vec::new();
    }
    let mut boxes = vec![Box_ {
        colors: samples.to_vec(),
    }];

    while boxes.len() < target_count {
        let splittable_idx = boxes
            .iter()
            .enumerate()
            .filter(|(_, b)| b.colors.len() >= 2)
            .max_by_key(|(_, b)| b.channel_range(b.widest_channel()))
            .map(|(i, _)| i);

        let Some(idx) = splittable_idx else { break };
        let box_to_split = boxes.remove(idx);
        let (a, b) = box_to_split.split();
        if a.colors.is_empty() || b.colors.is_empty() {
            boxes.push(a);
            continue;
        }
        boxes.push(a);
        boxes.push(b);
    }

    boxes.into_iter().map(|b| b.average()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_exceeds_target_count() {
        let samples: Vec<Color> = (0..50)
            .map(|i| Color::rgb((i * 5) as u8, (255 - i * 5) as u8, (i * 2) as u8))
            .collect();
        let result = quantize(&samples, 8);
        assert!(result.len() <= 8);
    }

    #[test]
    fn single_color_input_yields_one_box() {
        let samples = vec![Color::rgb(10, 10, 10); 5];
        let result = quantize(&samples, 4);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0], Color::rgb(10, 10, 10));
    }
}
