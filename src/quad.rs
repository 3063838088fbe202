//! Boundary quadrilateral: corner labeling, area, and crop planning.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Four corner points of a document boundary with a fixed labeling.
///
/// Connected in perimeter order (`top_left → top_right → bottom_right →
/// bottom_left`) the corners form a simple polygon. Produced fresh per
/// detection call; consumed immediately by the crop or preview overlay.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundaryQuad {
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_left: Point,
    pub bottom_right: Point,
}

impl BoundaryQuad {
    /// Labels four unordered corner points.
    ///
    /// The points are stable-sorted by `(x, y)`; the first two form the left
    /// pair and the last two the right pair, and within each pair the
    /// smaller `(y, x)` becomes the top corner. The `(x, y)` / `(y, x)`
    /// tie-breaks make the labeling deterministic for axis-aligned and
    /// near-square degenerate inputs.
    pub fn from_unordered(points: [Point; 4]) -> Self {
        let mut sorted = points;
        sorted.sort_by(cmp_xy);
        let (mut left, mut right) = ([sorted[0], sorted[1]], [sorted[2], sorted[3]]);
        left.sort_by(cmp_yx);
        right.sort_by(cmp_yx);
        Self {
            top_left: left[0],
            bottom_left: left[1],
            top_right: right[0],
            bottom_right: right[1],
        }
    }

    /// Corners in perimeter order.
    pub fn corners(&self) -> [Point; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    /// Area via the shoelace formula over the perimeter order.
    pub fn area(&self) -> f64 {
        let pts = self.corners();
        let mut acc = 0.0;
        for i in 0..4 {
            let a = pts[i];
            let b = pts[(i + 1) % 4];
            acc += a.x * b.y - b.x * a.y;
        }
        acc.abs() * 0.5
    }
}

fn cmp_xy(a: &Point, b: &Point) -> Ordering {
    a.x.partial_cmp(&b.x)
        .unwrap_or(Ordering::Equal)
        .then(a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal))
}

fn cmp_yx(a: &Point, b: &Point) -> Ordering {
    a.y.partial_cmp(&b.y)
        .unwrap_or(Ordering::Equal)
        .then(a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal))
}

/// Target output rectangle for the perspective warp.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CropSize {
    pub width: f64,
    pub height: f64,
}

/// Sizes the destination rectangle of a four-point perspective warp so that
/// the wider/taller of each pair of opposing edges is not compressed. The
/// pixel-level warp itself is delegated to the caller's image transform.
pub fn plan_crop(quad: &BoundaryQuad) -> CropSize {
    let top = quad.top_left.distance_to(&quad.top_right);
    let bottom = quad.bottom_left.distance_to(&quad.bottom_right);
    let left = quad.top_left.distance_to(&quad.bottom_left);
    let right = quad.top_right.distance_to(&quad.bottom_right);
    CropSize {
        width: top.max(bottom),
        height: left.max(right),
    }
}
