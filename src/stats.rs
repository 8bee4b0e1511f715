use crate::models::{
    CHALLENGE_DAYS, Category, CategoryStats, Statistics, Tracker, WeekdayActivity, WeekdayPoint,
};
use chrono::{Datelike, Local, Weekday};

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Summary metrics over the full tracker list.
///
/// Recomputed from a full scan on every call; the store is capped well
/// below any size where that matters.
pub fn build_statistics(trackers: &[Tracker]) -> Statistics {
    let total_trackers = trackers.len();
    let active_trackers = trackers
        .iter()
        .filter(|tracker| !tracker.checked_days.is_empty())
        .count();
    let completed_days_total: usize = trackers
        .iter()
        .map(|tracker| tracker.checked_days.len())
        .sum();

    let average_progress = if total_trackers == 0 {
        0
    } else {
        let sum: u32 = trackers
            .iter()
            .map(|tracker| u32::from(tracker.progress))
            .sum();
        (f64::from(sum) / total_trackers as f64).round() as u8
    };

    // Global fill rate over every possible tracker-day. Differs from the
    // average progress when trackers have unequal activity.
    let completion_rate = if total_trackers == 0 {
        0
    } else {
        let possible = total_trackers * usize::from(CHALLENGE_DAYS);
        (completed_days_total as f64 / possible as f64 * 100.0).round() as u8
    };

    let category_distribution = category_distribution(trackers);
    let favorite_category = favorite_category(&category_distribution);

    Statistics {
        total_trackers,
        active_trackers,
        completed_days_total,
        average_progress,
        completion_rate,
        favorite_category,
        category_distribution,
        weekday_activity: weekday_activity(trackers),
    }
}

/// Count and average progress per category, in fixed enumeration order.
/// Unrecognized stored categories were already folded into `Other` when
/// the record was decoded.
pub fn category_distribution(trackers: &[Tracker]) -> Vec<CategoryStats> {
    Category::ALL
        .iter()
        .map(|&category| {
            let mut count = 0usize;
            let mut progress_sum = 0u32;
            for tracker in trackers.iter().filter(|t| t.category == category) {
                count += 1;
                progress_sum += u32::from(tracker.progress);
            }

            let average_progress = if count == 0 {
                0
            } else {
                (f64::from(progress_sum) / count as f64).round() as u8
            };

            CategoryStats {
                category,
                count,
                average_progress,
            }
        })
        .collect()
}

/// Category with the highest tracker count; ties resolve to the first
/// category in enumeration order, an empty store to none.
fn favorite_category(distribution: &[CategoryStats]) -> Option<Category> {
    let mut favorite: Option<&CategoryStats> = None;
    for stats in distribution {
        if stats.count > favorite.map_or(0, |best| best.count) {
            favorite = Some(stats);
        }
    }
    favorite.map(|best| best.category)
}

/// How many trackers were last updated on each weekday (local time).
pub fn weekday_activity(trackers: &[Tracker]) -> WeekdayActivity {
    let mut counts = [0usize; 7];
    for tracker in trackers {
        let weekday = tracker.updated_at.with_timezone(&Local).weekday();
        counts[weekday.num_days_from_monday() as usize] += 1;
    }

    let best_day = best_weekday(&counts).map(|index| WEEKDAYS[index].to_string());

    let days = WEEKDAYS
        .iter()
        .zip(counts)
        .map(|(weekday, count)| WeekdayPoint {
            weekday: weekday.to_string(),
            count,
        })
        .collect();

    WeekdayActivity { days, best_day }
}

/// Index of the weekday with a strictly highest count. A tied maximum,
/// or no activity at all, yields none.
fn best_weekday(counts: &[usize; 7]) -> Option<usize> {
    let max = *counts.iter().max()?;
    if max == 0 {
        return None;
    }

    let mut at_max = counts.iter().enumerate().filter(|(_, count)| **count == max);
    let (index, _) = at_max.next()?;
    if at_max.next().is_some() {
        return None;
    }
    Some(index)
}
