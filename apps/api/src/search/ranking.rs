//! Thresholding and ordering of scored records.

use crate::models::job::JobRecord;

pub const DEFAULT_MIN_MATCH: f64 = 80.0;

/// Keeps records scoring at least `min_match` and sorts them by score, highest first.
/// The sort is stable: equal scores keep their incoming order.
pub fn filter_and_sort(jobs: Vec<JobRecord>, min_match: f64) -> Vec<JobRecord> {
    let mut kept: Vec<JobRecord> = jobs
        .into_iter()
        .filter(|job| f64::from(job.match_score.unwrap_or(0)) >= min_match)
        .collect();
    kept.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    kept
}
