//! Parameter types configuring the detection pipeline.
//!
//! Defaults aim for robust per-frame behaviour at common camera
//! resolutions. For tuning, start with the bundling thresholds: they decide
//! how many lines survive into the combinatorial search.

use crate::bundling::{BundleStrategy, BundlingParams};
use crate::search::SearchParams;
use serde::{Deserialize, Serialize};

/// Detector-wide configuration.
///
/// Immutable once supplied; safe to share read-only across concurrent
/// invocations when the host analyzes frames in parallel.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct DetectionParams {
    /// Near-duplicate merge thresholds.
    pub bundling: BundlingParams,
    /// Line-grouping strategy; the default pipeline uses `Canonical`.
    pub bundle_strategy: BundleStrategy,
    /// Search bounds and angle gates.
    pub search: SearchParams,
}
