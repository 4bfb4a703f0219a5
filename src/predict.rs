use std::path::Path;

use crate::constants::PLACEHOLDER_PREDICTED_VALUE;

/// Image comparison model seam
///
/// The comparison upload handler takes whatever implementation the state
/// carries; swapping in a real model means implementing this trait, nothing
/// else changes.
pub trait Predictor: Send + Sync {
    /// Score a candidate image against the batch's initial reference image
    fn compare(&self, initial: &Path, candidate: &Path) -> f64;
}

/// Stand-in predictor used until a real comparison model exists
#[derive(Debug, Default)]
pub struct PlaceholderPredictor;

impl Predictor for PlaceholderPredictor {
    fn compare(&self, _initial: &Path, _candidate: &Path) -> f64 {
        PLACEHOLDER_PREDICTED_VALUE
    }
}
