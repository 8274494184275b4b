//! Review effort arithmetic.
//!
//! Converts a changed-line count into a suggested number of review
//! sessions, a session length in minutes, and a minimum reviewer count.
//! The baseline is one minute of review per five changed lines, never less
//! than five minutes, split into sessions of at most an hour.

use serde::Serialize;

use revmate_core::{Result, RevmateError};

/// Suggested review effort for one change.
///
/// # Examples
///
/// ```
/// use revmate_analysis::effort::estimate;
///
/// let effort = estimate(1000).unwrap();
/// assert_eq!(effort.sessions_count, 4);
/// assert_eq!(effort.session_length, 50);
/// assert_eq!(effort.reviewers_count, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffortEstimate {
    /// Number of review sessions.
    pub sessions_count: u64,
    /// Length of each session in minutes, rounded up to a multiple of 5.
    pub session_length: u64,
    /// Minimum number of reviewers to invite: one more than the session
    /// count.
    pub reviewers_count: u64,
}

/// Estimate review effort from a changed-line count.
///
/// # Errors
///
/// Returns [`RevmateError::InvalidArgument`] if `changed_lines` is zero.
/// Zero-line changes short-circuit the analysis before estimation; reaching
/// this function with zero is a caller bug.
pub fn estimate(changed_lines: u64) -> Result<EffortEstimate> {
    if changed_lines == 0 {
        return Err(RevmateError::InvalidArgument(
            "changed line count must be positive".into(),
        ));
    }

    let total_review_time = ceil_div(changed_lines, 5).max(5);
    let rounded_review_time = round_up_to_multiple_of_five(total_review_time);
    let sessions_count = ceil_div(rounded_review_time, 60);
    let session_length = round_up_to_multiple_of_five(ceil_div(rounded_review_time, sessions_count));

    Ok(EffortEstimate {
        sessions_count,
        session_length,
        reviewers_count: sessions_count + 1,
    })
}

fn ceil_div(number: u64, divisor: u64) -> u64 {
    (number + divisor - 1) / divisor
}

fn round_up_to_multiple_of_five(number: u64) -> u64 {
    (number + 4) / 5 * 5
}
