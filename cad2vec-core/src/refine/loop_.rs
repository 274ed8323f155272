//! The refinement iteration loop: rasterize, score, and apply actions
//! until target F1 or the iteration cap.

use super::accuracy::score;
use super::actions::{adaptive_resimplify, fill_gaps, remove_spurious, snap_to_edges};
use super::distance_transform::distance_transform;
use super::rasterize::rasterize;
use crate::config::RefinementConfig;
use crate::geometry::{Path, RefinementScore};
use crate::raster::BinaryMask;

pub struct RefinementReport {
    pub before_score: RefinementScore,
    pub after_score: RefinementScore,
    pub iterations_used: u32,
    /// Set when no iteration beat `before_score`; the returned paths are
    /// then the untouched input rather than the loop's last attempt.
    pub regressed: bool,
}

/// Run the refinement loop against `reference`, returning the refined
/// paths and a before/after report.
///
/// Tracks the best-scoring paths seen across iterations rather than just
/// the last one, and never returns a worse F1 than `before_score`: if no
/// iteration improves on it, the original input paths are returned
/// unchanged and `regressed` is set.
pub fn refine(
    paths: Vec<Path>,
    reference: &BinaryMask,
    cfg: &RefinementConfig,
    default_simplify_tolerance: f32,
) -> (Vec<Path>, RefinementReport) {
    let tau = cfg.distance_tolerance;
    let (w, h) = (reference.width, reference.height);

    let original_paths = paths.clone();
    let rendered = rasterize(&paths, w, h);
    let before_score = score(reference, &rendered, tau);

    let mut paths = paths;
    let mut current_score = before_score;
    let mut iterations_used = 0u32;
    // Best-scoring (paths, score) produced by an iteration, tracked apart
    // from `before_score` so the comparison below can actually detect a
    // worse-than-input outcome instead of trivially starting at the best.
    let mut best_iteration: Option<(RefinementScore, Vec<Path>)> = None;

    for _ in 0..cfg.max_iterations {
        if current_score.f1 >= cfg.target_accuracy {
            break;
        }
        iterations_used += 1;

        if current_score.precision < cfg.target_accuracy {
            paths = remove_spurious(paths, reference, 2, cfg.spurious_threshold);
        }

        paths = snap_to_edges(paths, reference, cfg.snap_radius);

        let reference_distance = distance_transform(reference);
        paths = adaptive_resimplify(paths, &reference_distance, tau, default_simplify_tolerance);

        let rendered_after_snap = rasterize(&paths, w, h);
        if current_score.recall < cfg.target_accuracy {
            let gap_paths = fill_gaps(reference, &rendered_after_snap, tau, cfg.gap_fill_min_cluster);
            paths.extend(gap_paths);
        }

        let rendered = rasterize(&paths, w, h);
        current_score = score(reference, &rendered, tau);

        let improves = best_iteration.as_ref().map_or(true, |(best, _)| current_score.f1 > best.f1);
        if improves {
            best_iteration = Some((current_score, paths.clone()));
        }
    }

    let (final_score, final_paths, regressed) = match best_iteration {
        Some((iter_score, iter_paths)) if iter_score.f1 >= before_score.f1 => (iter_score, iter_paths, false),
        Some(_) => (before_score, original_paths, true),
        None => (before_score, original_paths, false),
    };

    let report = RefinementReport {
        before_score,
        after_score: final_score,
        iterations_used,
        regressed,
    };
    (final_paths, report)
}
