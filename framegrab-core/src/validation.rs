//! Timestamp validation against a probed duration.
//!
//! A timestamp is valid iff `0 <= timestamp <= duration`; a timestamp equal
//! to the duration is accepted. Validation is pure: no I/O, and the input is
//! neither mutated nor reordered.

use crate::models::ValidatedTimestamp;

/// Reason attached to negative timestamps
pub const NEGATIVE_TIMESTAMP_REASON: &str = "Timestamp cannot be negative";

/// Classifies every timestamp, returning exactly one entry per input in input order.
///
/// # Examples
///
/// ```rust
/// use framegrab_core::validation::validate_timestamps;
///
/// let validated = validate_timestamps(&[-1.0, 5.0, 999999.0], 10.0);
/// assert_eq!(validated.len(), 3);
/// assert!(!validated[0].valid);
/// assert!(validated[1].valid);
/// assert_eq!(
///     validated[2].reason.as_deref(),
///     Some("Timestamp exceeds video duration of 10.00 seconds")
/// );
/// ```
pub fn validate_timestamps(timestamps: &[f64], duration: f64) -> Vec<ValidatedTimestamp> {
    timestamps
        .iter()
        .map(|&ts| {
            if ts < 0.0 {
                ValidatedTimestamp::invalid(ts, NEGATIVE_TIMESTAMP_REASON)
            } else if ts > duration {
                ValidatedTimestamp::invalid(
                    ts,
                    format!("Timestamp exceeds video duration of {duration:.2} seconds"),
                )
            } else if ts.is_nan() {
                // Only reachable from non-JSON callers
                ValidatedTimestamp::invalid(ts, "Timestamp is not a number")
            } else {
                ValidatedTimestamp::valid(ts)
            }
        })
        .collect()
}
