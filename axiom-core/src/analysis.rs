//! Frustration score combination
//!
//! The analysis backend scores each email twice (a TF-IDF model and
//! Gemini) and flags it as frustrated when the weighted combination
//! exceeds [`FRUSTRATION_THRESHOLD`].

use tracing::debug;

use crate::document::Document;

/// Weight of the custom model score
pub const CUSTOM_WEIGHT: f64 = 0.6;
/// Weight of the Gemini score
pub const GEMINI_WEIGHT: f64 = 0.4;
/// Combined score above which an email counts as frustrated
pub const FRUSTRATION_THRESHOLD: f64 = 0.5;

/// Weighted combination of the two model scores
pub fn combine_scores(custom: f64, gemini: f64) -> f64 {
    CUSTOM_WEIGHT * custom + GEMINI_WEIGHT * gemini
}

/// Classification for a combined score
pub fn is_frustrated(combined: f64) -> bool {
    combined > FRUSTRATION_THRESHOLD
}

/// Fill in `combined_score` where the backend sent both raw scores but no
/// combination. Returns the number of documents updated.
///
/// `is_frustrated` stays as the backend sent it.
pub fn fill_combined_scores(documents: &mut [Document]) -> usize {
    let mut filled = 0;
    for document in documents.iter_mut() {
        if document.combined_score.is_some() {
            continue;
        }
        if let (Some(custom), Some(gemini)) = (document.score_custom, document.score_gemini) {
            let combined = combine_scores(custom, gemini);
            if is_frustrated(combined) != document.is_frustrated {
                debug!(
                    "Combined score {:.3} disagrees with backend flag for '{}'",
                    combined, document.subject
                );
            }
            document.combined_score = Some(combined);
            filled += 1;
        }
    }
    filled
}
