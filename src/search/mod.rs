//! Quadrilateral search strategies.
//!
//! Given a set of bundled lines and the image bounds, a strategy finds a
//! 4-line subset whose pairwise intersections describe a plausible document
//! boundary. [`CombinatorialSearch`] is the production strategy; the
//! graph-based [`GraphSearch`] is an alternate behind the same seam.

mod combinatorial;
mod graph;

pub use combinatorial::CombinatorialSearch;
pub use graph::GraphSearch;

use crate::geometry::{Line, Point};
use crate::quad::BoundaryQuad;
use serde::{Deserialize, Serialize};

/// Knobs bounding the search cost and gating candidate geometry.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SearchParams {
    /// Fewer bundled lines than this → no usable boundary this frame.
    pub min_bundle_count: usize,
    /// More bundled lines than this → frame rejected to bound worst-case
    /// latency (the combinatorial search is O(n⁴)).
    pub max_bundle_count: usize,
    /// Open interval of acceptable vertex angles (degrees) at each corner.
    pub vertex_angle_range_deg: (f64, f64),
    /// Open interval used by the partner pre-filter: a line survives only if
    /// it meets some other line inside the image at an angle in this range.
    pub partner_angle_range_deg: (f64, f64),
    /// Stop collecting once this many valid candidates were found and pick
    /// the largest by area. `None` runs the search exhaustively — suitable
    /// for batch callers with no latency budget.
    pub max_candidates: Option<usize>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            min_bundle_count: 4,
            max_bundle_count: 20,
            vertex_angle_range_deg: (60.0, 120.0),
            partner_angle_range_deg: (70.0, 110.0),
            max_candidates: Some(3),
        }
    }
}

/// Strategy seam for the quadrilateral search.
pub trait QuadSearch {
    fn find_quad(
        &self,
        lines: &[Line],
        image_width: f64,
        image_height: f64,
        params: &SearchParams,
    ) -> Option<BoundaryQuad>;
}

/// Intersection of two candidate lines; internal to the strategies.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CandidateIntersection {
    pub point: Point,
    pub lines: (Line, Line),
}

pub(crate) fn in_bounds(point: &Point, width: f64, height: f64) -> bool {
    point.x >= 0.0 && point.x <= width && point.y >= 0.0 && point.y <= height
}

/// All pairwise intersections of `lines` that fall within the image bounds.
pub(crate) fn in_bounds_intersections(
    lines: &[Line],
    width: f64,
    height: f64,
) -> Vec<CandidateIntersection> {
    let mut hits = Vec::new();
    for (i, a) in lines.iter().enumerate() {
        for b in lines.iter().skip(i + 1) {
            if let Some(point) = a.intersection(b) {
                if in_bounds(&point, width, height) {
                    hits.push(CandidateIntersection {
                        point,
                        lines: (*a, *b),
                    });
                }
            }
        }
    }
    hits
}

/// Open-interval angle test used by the vertex and partner gates.
pub(crate) fn angle_in_range(angle_deg: f64, range: (f64, f64)) -> bool {
    angle_deg > range.0 && angle_deg < range.1
}

/// Largest-area candidate, if any were collected.
pub(crate) fn best_by_area(candidates: Vec<BoundaryQuad>) -> Option<BoundaryQuad> {
    candidates.into_iter().max_by(|a, b| {
        a.area()
            .partial_cmp(&b.area())
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}
