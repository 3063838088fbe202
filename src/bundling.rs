//! Merging near-duplicate raw lines into representative bundles.
//!
//! Hough-style extraction over a real edge map typically yields several
//! near-identical lines per true document edge. Bundling collapses each such
//! cluster to one representative so the combinatorial search stays feasible
//! and numerically quiet.
//!
//! Two lines are mergeable when their orientations differ by at most
//! `min_angle_to_merge_deg` and their perpendicular offsets differ by at
//! most `min_distance_to_merge`. Clustering is greedy and single-pass: each
//! line is placed into the first bundle whose running mean it matches, or
//! opens a new bundle.

use crate::angle::orientation_difference_deg;
use crate::geometry::Line;
use log::debug;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

const EPS: f64 = 1e-12;

/// Thresholds controlling when two lines are considered near-duplicates.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct BundlingParams {
    /// Maximum perpendicular-offset difference (pixels) to merge two lines.
    pub min_distance_to_merge: f64,
    /// Maximum orientation difference (degrees) to merge two lines.
    pub min_angle_to_merge_deg: f64,
}

impl Default for BundlingParams {
    fn default() -> Self {
        Self {
            min_distance_to_merge: 10.0,
            min_angle_to_merge_deg: 10.0,
        }
    }
}

/// Line-grouping strategy selector.
///
/// `Canonical` is the production pipeline. `LargestCluster` reproduces an
/// alternate grouping used by a different entry path in the original system;
/// it is selectable but never wired into the default pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BundleStrategy {
    #[default]
    Canonical,
    LargestCluster,
}

/// A cluster of mergeable raw lines plus the line chosen to stand in for
/// them during the quadrilateral search.
#[derive(Clone, Debug)]
pub struct LineBundle {
    pub members: Vec<Line>,
    pub representative: Line,
}

struct BundleAccum {
    /// Sum of sign-aligned unit normal forms of all members.
    sum: Vector3<f64>,
    members: Vec<Line>,
}

impl BundleAccum {
    fn new(nf: Vector3<f64>, line: Line) -> Self {
        Self {
            sum: nf,
            members: vec![line],
        }
    }

    /// Mean normal form, renormalised to a unit line normal.
    fn mean(&self) -> Vector3<f64> {
        let m = self.sum / self.members.len() as f64;
        let norm = (m[0] * m[0] + m[1] * m[1]).sqrt().max(EPS);
        m / norm
    }

    fn merge(&mut self, nf: Vector3<f64>, line: Line) {
        self.sum += align_to(&self.sum, nf);
        self.members.push(line);
    }

    fn into_bundle(self) -> LineBundle {
        let fallback = self.members[0];
        let representative = Line::from_normal_form(&self.mean()).unwrap_or(fallback);
        LineBundle {
            members: self.members,
            representative,
        }
    }
}

/// Flips `nf` so its normal points the same way as `reference`.
fn align_to(reference: &Vector3<f64>, nf: Vector3<f64>) -> Vector3<f64> {
    if reference[0] * nf[0] + reference[1] * nf[1] < 0.0 {
        -nf
    } else {
        nf
    }
}

/// Compares a candidate unit normal form against a bundle's unit mean.
fn mergeable(mean: &Vector3<f64>, candidate: &Vector3<f64>, params: &BundlingParams) -> bool {
    let mean_angle = mean[1].atan2(mean[0]).to_degrees();
    let cand_angle = candidate[1].atan2(candidate[0]).to_degrees();
    let angle_deg = orientation_difference_deg(mean_angle, cand_angle);
    let c = align_to(mean, *candidate);
    let offset = (mean[2] - c[2]).abs();
    angle_deg <= params.min_angle_to_merge_deg && offset <= params.min_distance_to_merge
}

/// Partitions `lines` into clusters of mergeable lines.
pub fn bundle_clusters(lines: &[Line], params: &BundlingParams) -> Vec<LineBundle> {
    let mut accums: Vec<BundleAccum> = Vec::new();
    for &line in lines {
        let nf = line.normal_form();
        let mut placed = false;
        for acc in accums.iter_mut() {
            if mergeable(&acc.mean(), &nf, params) {
                acc.merge(nf, line);
                placed = true;
                break;
            }
        }
        if !placed {
            accums.push(BundleAccum::new(nf, line));
        }
    }
    accums.into_iter().map(BundleAccum::into_bundle).collect()
}

/// Canonical bundling used by the detection pipeline: one representative
/// line per cluster.
///
/// A set of at most four lines is already minimal for a quadrilateral, so
/// bundling is a no-op there and the input is returned unchanged.
pub fn bundle(lines: &[Line], params: &BundlingParams) -> Vec<Line> {
    if lines.len() <= 4 {
        return lines.to_vec();
    }
    let bundles = bundle_clusters(lines, params);
    debug!("bundling: {} raw lines -> {} bundles", lines.len(), bundles.len());
    bundles.into_iter().map(|b| b.representative).collect()
}

/// Alternate grouping: returns the members of the largest group of lines all
/// mergeable with a common seed, without merging them.
pub fn largest_cluster(lines: &[Line], params: &BundlingParams) -> Vec<Line> {
    let normals: Vec<Vector3<f64>> = lines.iter().map(Line::normal_form).collect();
    let mut best: Vec<Line> = Vec::new();
    for seed in &normals {
        let group: Vec<Line> = lines
            .iter()
            .zip(normals.iter())
            .filter(|(_, nf)| mergeable(seed, nf, params))
            .map(|(line, _)| *line)
            .collect();
        if group.len() > best.len() {
            best = group;
        }
    }
    debug!(
        "largest-cluster grouping: {} raw lines -> {} kept",
        lines.len(),
        best.len()
    );
    best
}

/// Dispatches to the configured grouping strategy.
pub fn bundle_with_strategy(
    lines: &[Line],
    params: &BundlingParams,
    strategy: BundleStrategy,
) -> Vec<Line> {
    match strategy {
        BundleStrategy::Canonical => bundle(lines, params),
        BundleStrategy::LargestCluster => largest_cluster(lines, params),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_params() -> BundlingParams {
        BundlingParams::default()
    }

    #[test]
    fn small_sets_pass_through_unchanged() {
        let lines = vec![
            Line::new(0.0, 0.0),
            Line::new(0.0, 1.0),
            Line::vertical(5.0),
            Line::new(1.0, -2.0),
        ];
        assert_eq!(bundle(&lines, &default_params()), lines);
        assert_eq!(bundle(&lines[..2].to_vec(), &default_params()), lines[..2]);
        assert!(bundle(&[], &default_params()).is_empty());
    }

    #[test]
    fn output_never_larger_than_input() {
        let lines = vec![
            Line::new(0.0, 0.0),
            Line::new(0.01, 1.5),
            Line::new(0.0, 400.0),
            Line::vertical(10.0),
            Line::vertical(12.0),
            Line::new(1.0, 50.0),
            Line::new(-1.0, 80.0),
        ];
        let out = bundle(&lines, &default_params());
        assert!(out.len() <= lines.len());
    }

    #[test]
    fn near_duplicates_collapse_to_one_representative_each() {
        // Three noisy copies of each of four document edges.
        let lines = vec![
            Line::new(0.002, 298.0),
            Line::new(-0.003, 300.0),
            Line::new(0.0, 302.0),
            Line::new(0.001, 899.0),
            Line::new(0.0, 900.0),
            Line::new(-0.002, 901.0),
            Line::vertical(299.0),
            Line::new(900.0, -269400.0), // near-vertical at x ≈ 300
            Line::vertical(301.0),
            Line::vertical(699.0),
            Line::vertical(700.0),
            Line::vertical(701.0),
        ];
        let out = bundle(&lines, &default_params());
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn distant_parallels_stay_separate() {
        let lines = vec![
            Line::new(0.0, 0.0),
            Line::new(0.0, 100.0),
            Line::new(0.0, 200.0),
            Line::new(0.0, 300.0),
            Line::new(0.0, 400.0),
        ];
        let out = bundle(&lines, &default_params());
        assert_eq!(out.len(), 5);
    }

    #[test]
    fn largest_cluster_returns_biggest_group() {
        let lines = vec![
            Line::new(0.0, 0.0),
            Line::new(0.0, 2.0),
            Line::new(0.0, 4.0),
            Line::vertical(50.0),
            Line::vertical(51.0),
            Line::new(1.0, -300.0),
        ];
        let out = largest_cluster(&lines, &default_params());
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|l| !l.is_vertical() && l.slope.abs() < 0.5));
    }

    #[test]
    fn representative_averages_the_cluster() {
        let lines = vec![
            Line::new(0.0, 99.0),
            Line::new(0.0, 100.0),
            Line::new(0.0, 101.0),
            Line::new(0.0, 100.0),
            Line::vertical(500.0),
        ];
        let bundles = bundle_clusters(&lines, &default_params());
        assert_eq!(bundles.len(), 2);
        let horizontal = bundles
            .iter()
            .find(|b| !b.representative.is_vertical())
            .unwrap();
        assert_eq!(horizontal.members.len(), 4);
        assert!((horizontal.representative.intercept - 100.0).abs() < 0.5);
    }
}
