#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod detector;
pub mod geometry;
pub mod quad;

// “Expert” modules – still public, but considered unstable internals.
pub mod angle;
pub mod bundling;
pub mod search;

// --- High-level re-exports -------------------------------------------------

// Main entry points: detector + results.
pub use crate::detector::{
    detect_document_boundary, DetectionError, DetectionParams, DetectionReport, PageDetector,
};
pub use crate::geometry::{Line, Point};
pub use crate::quad::{plan_crop, BoundaryQuad, CropSize};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use page_detector::prelude::*;
///
/// let lines = vec![
///     Line::new(0.0, 0.0),
///     Line::new(0.0, 480.0),
///     Line::vertical(0.0),
///     Line::vertical(640.0),
/// ];
/// let detector = PageDetector::new(DetectionParams::default());
/// let report = detector.process(&lines, 640.0, 480.0);
/// println!("found={} latency_ms={:.3}", report.found, report.latency_ms);
/// ```
pub mod prelude {
    pub use crate::geometry::{Line, Point};
    pub use crate::{BoundaryQuad, DetectionParams, DetectionReport, PageDetector};
}
