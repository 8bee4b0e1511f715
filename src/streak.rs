use crate::models::Tracker;
use chrono::{Local, NaiveDate};
use std::collections::HashSet;

/// Consecutive calendar days, counting back from today, on which some
/// tracker recorded activity.
pub fn current_streak(trackers: &[Tracker]) -> u32 {
    current_streak_at(Local::now().date_naive(), trackers)
}

/// Activity on a date means a tracker with at least one checked day was
/// last updated that date (local time). Which of the 30 slots changed is
/// deliberately not tracked; any update counts for its day. A day with
/// no activity ends the walk, so a miss resets the streak to zero.
pub fn current_streak_at(today: NaiveDate, trackers: &[Tracker]) -> u32 {
    let activity: HashSet<NaiveDate> = trackers
        .iter()
        .filter(|tracker| !tracker.checked_days.is_empty())
        .map(|tracker| tracker.updated_at.with_timezone(&Local).date_naive())
        .collect();

    let mut streak = 0;
    let mut day = today;
    while activity.contains(&day) {
        streak += 1;
        match day.pred_opt() {
            Some(previous) => day = previous,
            None => break,
        }
    }

    streak
}
