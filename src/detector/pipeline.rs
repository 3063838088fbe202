//! Detection pipeline: bundle → gate → search → label.
//!
//! Typical usage:
//! ```no_run
//! use page_detector::{DetectionParams, PageDetector, Line};
//!
//! # fn example(raw_lines: Vec<Line>) {
//! let detector = PageDetector::new(DetectionParams::default());
//! match detector.detect(&raw_lines, 1920.0, 1080.0) {
//!     Ok(quad) => println!("page corners: {:?}", quad.corners()),
//!     Err(err) => println!("keep scanning: {err}"),
//! }
//! # }
//! ```

use super::params::DetectionParams;
use crate::bundling::bundle_with_strategy;
use crate::geometry::Line;
use crate::quad::{plan_crop, BoundaryQuad, CropSize};
use crate::search::{CombinatorialSearch, QuadSearch};
use log::debug;
use serde::Serialize;
use std::time::Instant;
use thiserror::Error;

/// Recoverable per-frame failures. None of these is fatal: the caller
/// simply supplies the next frame.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DetectionError {
    /// Fewer usable lines than the configured minimum after bundling.
    #[error("insufficient line evidence after bundling ({found} < {min})")]
    InsufficientEvidence { found: usize, min: usize },
    /// More bundled lines than the configured maximum; rejecting the frame
    /// bounds worst-case search latency.
    #[error("too many candidate lines after bundling ({found} > {max})")]
    TooManyCandidates { found: usize, max: usize },
    /// The search exhausted without a 4-subset satisfying the constraints.
    #[error("no quadrilateral satisfied the angle and bounds constraints")]
    NoQuadrilateralFound,
}

/// Per-frame diagnostics for callers that want counters and latency instead
/// of a bare `Result`.
#[derive(Clone, Debug, Default, Serialize)]
pub struct DetectionReport {
    pub found: bool,
    pub boundary: Option<BoundaryQuad>,
    /// Target rectangle for the perspective warp, when a boundary was found.
    pub crop: Option<CropSize>,
    pub raw_line_count: usize,
    pub bundled_line_count: usize,
    pub latency_ms: f64,
}

/// Stateless document boundary detector.
///
/// Each call is independent; there is no retry logic inside — retry is
/// temporal and external (the next frame).
pub struct PageDetector {
    params: DetectionParams,
    strategy: Box<dyn QuadSearch + Send + Sync>,
}

impl PageDetector {
    /// Detector with the default combinatorial search strategy.
    pub fn new(params: DetectionParams) -> Self {
        Self::with_strategy(params, Box::new(CombinatorialSearch))
    }

    /// Detector with a custom search strategy (e.g. [`crate::search::GraphSearch`]).
    pub fn with_strategy(
        params: DetectionParams,
        strategy: Box<dyn QuadSearch + Send + Sync>,
    ) -> Self {
        Self { params, strategy }
    }

    pub fn params(&self) -> &DetectionParams {
        &self.params
    }

    /// Single-shot boundary detection over raw extracted lines.
    pub fn detect(
        &self,
        raw_lines: &[Line],
        image_width: f64,
        image_height: f64,
    ) -> Result<BoundaryQuad, DetectionError> {
        let bundled = bundle_with_strategy(
            raw_lines,
            &self.params.bundling,
            self.params.bundle_strategy,
        );
        self.search_bundled(&bundled, image_width, image_height)
    }

    /// Like [`detect`](Self::detect), but returns counters and latency for
    /// frame-loop diagnostics instead of an error.
    pub fn process(
        &self,
        raw_lines: &[Line],
        image_width: f64,
        image_height: f64,
    ) -> DetectionReport {
        let start = Instant::now();
        let bundled = bundle_with_strategy(
            raw_lines,
            &self.params.bundling,
            self.params.bundle_strategy,
        );
        let outcome = self.search_bundled(&bundled, image_width, image_height);
        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

        let boundary = outcome.ok();
        let crop = boundary.as_ref().map(plan_crop);
        DetectionReport {
            found: boundary.is_some(),
            boundary,
            crop,
            raw_line_count: raw_lines.len(),
            bundled_line_count: bundled.len(),
            latency_ms,
        }
    }

    fn search_bundled(
        &self,
        bundled: &[Line],
        image_width: f64,
        image_height: f64,
    ) -> Result<BoundaryQuad, DetectionError> {
        let min = self.params.search.min_bundle_count;
        let max = self.params.search.max_bundle_count;
        if bundled.len() < min {
            debug!("detect: {} bundled lines, need {min}", bundled.len());
            return Err(DetectionError::InsufficientEvidence {
                found: bundled.len(),
                min,
            });
        }
        if bundled.len() > max {
            debug!("detect: {} bundled lines exceed cap {max}", bundled.len());
            return Err(DetectionError::TooManyCandidates {
                found: bundled.len(),
                max,
            });
        }
        self.strategy
            .find_quad(bundled, image_width, image_height, &self.params.search)
            .ok_or(DetectionError::NoQuadrilateralFound)
    }
}

/// Caller-facing single-shot operation: detect the document boundary in one
/// analyzed frame. Synchronous and allocation-light; callable from a frame
/// loop or a capture handler.
pub fn detect_document_boundary(
    raw_lines: &[Line],
    image_width: f64,
    image_height: f64,
    params: &DetectionParams,
) -> Result<BoundaryQuad, DetectionError> {
    PageDetector::new(*params).detect(raw_lines, image_width, image_height)
}
