//! Default quadrilateral search: fast path for exactly four lines, bounded
//! combinatorial enumeration otherwise.

use super::{
    angle_in_range, best_by_area, in_bounds, in_bounds_intersections, QuadSearch, SearchParams,
};
use crate::geometry::{Line, PARALLEL_EPS};
use crate::quad::BoundaryQuad;
use log::debug;

/// Production search strategy.
///
/// With exactly four lines the six pairwise intersections either describe
/// the quadrilateral directly (exactly four land inside the image) or they
/// don't; no enumeration is needed. Otherwise lines without a roughly
/// perpendicular partner are dropped and all 4-subsets of the remainder are
/// scored. The search stops early after `max_candidates` hits and returns
/// the largest candidate by area — a latency/quality tradeoff for per-frame
/// use, not an exhaustive optimum (set `max_candidates: None` for that).
#[derive(Clone, Copy, Debug, Default)]
pub struct CombinatorialSearch;

impl QuadSearch for CombinatorialSearch {
    fn find_quad(
        &self,
        lines: &[Line],
        image_width: f64,
        image_height: f64,
        params: &SearchParams,
    ) -> Option<BoundaryQuad> {
        let n = lines.len();
        if n < params.min_bundle_count || n > params.max_bundle_count {
            debug!("quad search skipped: {n} lines outside configured bounds");
            return None;
        }
        if n == 4 {
            if let Some(quad) = fast_path(lines, image_width, image_height) {
                return Some(quad);
            }
        }
        general_search(lines, image_width, image_height, params)
    }
}

fn fast_path(lines: &[Line], width: f64, height: f64) -> Option<BoundaryQuad> {
    let hits = in_bounds_intersections(lines, width, height);
    if hits.len() != 4 {
        debug!(
            "fast path miss: {} in-bounds intersections, falling back",
            hits.len()
        );
        return None;
    }
    // Concurrent lines can repeat the same point four times; a boundary needs
    // four distinct corners.
    let distinct = hits
        .iter()
        .enumerate()
        .all(|(i, a)| hits.iter().skip(i + 1).all(|b| a.point != b.point));
    if !distinct {
        debug!("fast path miss: duplicated intersection points, falling back");
        return None;
    }
    debug!("fast path hit: 4 lines, 4 in-bounds intersections");
    Some(BoundaryQuad::from_unordered([
        hits[0].point,
        hits[1].point,
        hits[2].point,
        hits[3].point,
    ]))
}

/// A line survives the pre-filter only if some other line meets it inside
/// the image at a roughly right angle. Lines without such a partner cannot
/// participate in a document corner.
fn has_partner(index: usize, lines: &[Line], width: f64, height: f64, params: &SearchParams) -> bool {
    let line = &lines[index];
    lines.iter().enumerate().any(|(j, other)| {
        if j == index || line.is_parallel_to(other, PARALLEL_EPS) {
            return false;
        }
        let point = match line.intersection(other) {
            Some(p) => p,
            None => return false,
        };
        in_bounds(&point, width, height)
            && angle_in_range(line.angle_between_deg(other), params.partner_angle_range_deg)
    })
}

fn general_search(
    lines: &[Line],
    width: f64,
    height: f64,
    params: &SearchParams,
) -> Option<BoundaryQuad> {
    let filtered: Vec<Line> = (0..lines.len())
        .filter(|&i| has_partner(i, lines, width, height, params))
        .map(|i| lines[i])
        .collect();
    debug!(
        "partner pre-filter: {} of {} lines kept",
        filtered.len(),
        lines.len()
    );
    if filtered.len() < params.min_bundle_count {
        return None;
    }

    let n = filtered.len();
    let mut candidates = Vec::new();
    'enumeration: for i in 0..n {
        for j in (i + 1)..n {
            for k in (j + 1)..n {
                for l in (k + 1)..n {
                    let subset = [filtered[i], filtered[j], filtered[k], filtered[l]];
                    if has_parallel_pair(&subset) {
                        continue;
                    }
                    if let Some(quad) = evaluate_subset(&subset, width, height, params) {
                        candidates.push(quad);
                        if let Some(limit) = params.max_candidates {
                            if candidates.len() >= limit {
                                debug!("early stop after {limit} candidates");
                                break 'enumeration;
                            }
                        }
                    }
                }
            }
        }
    }
    debug!("combinatorial search collected {} candidates", candidates.len());
    best_by_area(candidates)
}

fn has_parallel_pair(subset: &[Line; 4]) -> bool {
    for (i, a) in subset.iter().enumerate() {
        for b in subset.iter().skip(i + 1) {
            if a.is_parallel_to(b, PARALLEL_EPS) {
                return true;
            }
        }
    }
    false
}

/// A 4-subset qualifies when exactly four of its six pairwise intersections
/// are in-bounds and every vertex angle lies inside the configured range.
fn evaluate_subset(
    subset: &[Line; 4],
    width: f64,
    height: f64,
    params: &SearchParams,
) -> Option<BoundaryQuad> {
    let hits = in_bounds_intersections(subset, width, height);
    if hits.len() != 4 {
        return None;
    }
    for hit in &hits {
        let angle = hit.lines.0.angle_between_deg(&hit.lines.1);
        if !angle_in_range(angle, params.vertex_angle_range_deg) {
            return None;
        }
    }
    Some(BoundaryQuad::from_unordered([
        hits[0].point,
        hits[1].point,
        hits[2].point,
        hits[3].point,
    ]))
}
