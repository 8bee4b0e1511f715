use crate::models::{TimelinePoint, Tracker};
use chrono::{Local, NaiveDate};

/// Series shorter than this get a synthetic trailing point so sparse
/// data still reads as a line.
const MIN_POINTS: usize = 3;

/// Chronological series of cumulative completed/active tracker counts,
/// one point per tracker in `created_at` order.
pub fn completion_timeline(trackers: &[Tracker]) -> Vec<TimelinePoint> {
    completion_timeline_at(Local::now().date_naive(), trackers)
}

/// A tracker counts as completed at exactly 100% progress, as active
/// with any checked day below that; both counters only ever grow along
/// the series.
pub fn completion_timeline_at(today: NaiveDate, trackers: &[Tracker]) -> Vec<TimelinePoint> {
    let mut ordered: Vec<&Tracker> = trackers.iter().collect();
    ordered.sort_by_key(|tracker| tracker.created_at);

    let mut points = Vec::with_capacity(ordered.len() + 1);
    let mut completed_count = 0u32;
    let mut active_count = 0u32;

    for tracker in ordered {
        if tracker.progress == 100 {
            completed_count += 1;
        } else if !tracker.checked_days.is_empty() {
            active_count += 1;
        }

        points.push(TimelinePoint {
            label: tracker
                .created_at
                .with_timezone(&Local)
                .date_naive()
                .to_string(),
            completed_count,
            active_count,
        });
    }

    if points.len() < MIN_POINTS {
        let today_label = today.to_string();
        if points.last().map_or(true, |point| point.label != today_label) {
            points.push(TimelinePoint {
                label: today_label,
                completed_count,
                active_count,
            });
        }
    }

    points
}
