//! Document boundary detector orchestrating the line-based pipeline.
//!
//! Overview
//! - Bundles raw extracted lines into one representative per near-duplicate
//!   cluster.
//! - Gates the bundled count: too little evidence or too many candidates
//!   both abort the frame early (the combinatorial search is O(n⁴)).
//! - Runs the configured quadrilateral search strategy and returns the
//!   labeled boundary, or a recoverable error meaning "keep scanning".
//!
//! Modules
//! - [`params`] – configuration consumed once per call, never mutated.
//! - `pipeline` – the [`PageDetector`] implementation and error taxonomy.

pub mod params;
mod pipeline;

pub use params::DetectionParams;
pub use pipeline::{detect_document_boundary, DetectionError, DetectionReport, PageDetector};
