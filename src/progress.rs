use crate::models::CHALLENGE_DAYS;
use std::collections::BTreeSet;

/// Completion percentage for a checked-day set.
///
/// Rounded to the nearest whole percent, half away from zero, which is
/// also how the persisted `progress` values were produced.
pub fn compute_progress(checked_days: &BTreeSet<u8>) -> u8 {
    (checked_days.len() as f64 / f64::from(CHALLENGE_DAYS) * 100.0).round() as u8
}
