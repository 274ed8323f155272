//! K-means dominant-color extraction with k-means++ initialization
//! for advanced palette tuning.

use crate::geometry::Color;
use rand::Rng;

type Rgb = (f32, f32, f32);

fn to_rgb(c: Color) -> Rgb {
    (c.r as f32, c.g as f32, c.b as f32)
}

fn dist_sq(a: Rgb, b: Rgb) -> f32 {
    let dr = a.0 - b.0;
    let dg = a.1 - b.1;
    let db = a.2 - b.2;
    dr * dr + dg * dg + db * db
}

/// k-means++ initialization: first centroid uniform random, subsequent
/// centroids chosen with probability proportional to squared distance to
/// the nearest existing centroid.
fn init_centroids(samples: &[Rgb], k: usize, rng: &mut impl Rng) -> Vec<Rgb> {
    let mut centroids = Vec::with_capacity(k);
    centroids.push(samples[rng.gen_range(0..samples.len())]);

    while centroids.len() < k {
        let weights: Vec<f32> = samples
            .iter()
            .map(|&s| {
                centroids
                    .iter()
                    .map(|&c| dist_sq(s, c))
                    .fold(f32::INFINITY, f32::min)
            })
            .collect();
        let total: f32 = weights.iter().sum();
        if total <= 0.0 {
            centroids.push(samples[rng.gen_range(0..samples.len())]);
            continue;
        }
        let mut target = rng.gen_range(0.0..total);
        let mut chosen = samples[0];
        for (&s, &w) in samples.iter().zip(weights.iter()) {
            if target <= w {
                chosen = s;
                break;
            }
            target -= w;
        }
        centroids.push(chosen);
    }
    centroids
}

/// Cluster `samples` into `k` dominant colors. Iterates assignment and
/// mean updates until no centroid moves more than 1 unit or 20 iterations
/// elapse.
pub fn dominant_colors(samples: &[Color], k: usize, rng: &mut impl Rng) -> Vec<Color> {
    if samples.is_empty() || k == 0 {
        return Vec::new();
    }
    let points: Vec<Rgb> = samples.iter().map(|&c| to_rgb(c)).collect();
    let k = k.min(points.len());
    let mut centroids = init_centroids(&points, k, rng);

    for _ in 0..20 {
        let mut sums = vec![(0.0f32, 0.0f32, 0.0f32, 0u32); k];
        for &p in &points {
            let mut best = 0;
            let mut best_dist = f32::INFINITY;
            for (i, &c) in centroids.iter().enumerate() {
                let d = dist_sq(p, c);
                if d < best_dist {
                    best_dist = d;
                    best = i;
                }
            }
            sums[best].0 += p.0;
            sums[best].1 += p.1;
            sums[best].2 += p.2;
            sums[best].3 += 1;
        }

        let mut max_move = 0.0f32;
        for (i, sum) in sums.into_iter().enumerate() {
            if sum.3 == 0 {
                continue;
            }
            let new_centroid = (sum.0 / sum.3 as f32, sum.1 / sum.3 as f32, sum.2 / sum.3 as f32);
            max_move = max_move.max(dist_sq(new_centroid, centroids[i]).sqrt());
            centroids[i] = new_centroid;
        }
        if max_move <= 1.0 {
            break;
        }
    }

    centroids
        .into_iter()
        .map(|(r, g, b)| Color::rgb(r.round() as u8, g.round() as u8, b.round() as u8))
        .collect()
}
