use crate::errors::TrackerError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use ulid::Ulid;

/// Length of a challenge.
pub const CHALLENGE_DAYS: u8 = 30;

pub const NAME_MIN_CHARS: usize = 3;
pub const NAME_MAX_CHARS: usize = 100;
pub const GOAL_MIN_CHARS: usize = 10;
pub const GOAL_MAX_CHARS: usize = 500;

/// Tracker grouping tag. Values stored under a name this build doesn't
/// know fold into `Other` when loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Category {
    Health,
    Learning,
    Productivity,
    Mindfulness,
    Other,
}

impl Category {
    /// Fixed enumeration order, used for tie-breaking in statistics.
    pub const ALL: [Category; 5] = [
        Category::Health,
        Category::Learning,
        Category::Productivity,
        Category::Mindfulness,
        Category::Other,
    ];
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.as_str() {
            "health" => Category::Health,
            "learning" => Category::Learning,
            "productivity" => Category::Productivity,
            "mindfulness" => Category::Mindfulness,
            _ => Category::Other,
        }
    }
}

/// Palette key for a tracker. Unrecognized stored values fall back to the
/// default `Blue`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Color {
    #[default]
    Blue,
    Green,
    Purple,
    Orange,
    Pink,
}

impl From<String> for Color {
    fn from(value: String) -> Self {
        match value.as_str() {
            "green" => Color::Green,
            "purple" => Color::Purple,
            "orange" => Color::Orange,
            "pink" => Color::Pink,
            _ => Color::Blue,
        }
    }
}

/// A single 30-day challenge record, the only persisted entity.
///
/// Field names serialize in camelCase to keep the stored record shape
/// stable across versions of the data file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tracker {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub goal: String,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub checked_days: BTreeSet<u8>,
    #[serde(default)]
    pub progress: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tracker {
    /// Builds a fresh tracker from user input: sanitizes the text fields,
    /// assigns an id and timestamps, and checks the field invariants.
    pub fn create(input: NewTracker) -> Result<Self, TrackerError> {
        let now = Utc::now();
        let tracker = Self {
            id: generate_id(),
            name: sanitize_text(&input.name, NAME_MAX_CHARS),
            category: input.category,
            goal: sanitize_text(&input.goal, GOAL_MAX_CHARS),
            color: input.color,
            checked_days: BTreeSet::new(),
            progress: 0,
            created_at: now,
            updated_at: now,
        };
        tracker.validate()?;
        Ok(tracker)
    }

    /// Field invariants, enforced on every write path regardless of what
    /// the caller already checked.
    pub fn validate(&self) -> Result<(), TrackerError> {
        let name_chars = self.name.chars().count();
        if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&name_chars) {
            return Err(TrackerError::Validation(format!(
                "name must be {NAME_MIN_CHARS}-{NAME_MAX_CHARS} characters"
            )));
        }

        let goal_chars = self.goal.chars().count();
        if !(GOAL_MIN_CHARS..=GOAL_MAX_CHARS).contains(&goal_chars) {
            return Err(TrackerError::Validation(format!(
                "goal must be {GOAL_MIN_CHARS}-{GOAL_MAX_CHARS} characters"
            )));
        }

        if let Some(day) = self
            .checked_days
            .iter()
            .find(|day| !(1..=CHALLENGE_DAYS).contains(*day))
        {
            return Err(TrackerError::Validation(format!(
                "day {day} is outside 1-{CHALLENGE_DAYS}"
            )));
        }

        Ok(())
    }
}

/// Trims, strips angle brackets, and clamps to `max_chars`.
pub fn sanitize_text(value: &str, max_chars: usize) -> String {
    value
        .trim()
        .chars()
        .filter(|c| *c != '<' && *c != '>')
        .take(max_chars)
        .collect()
}

/// Opaque unique tracker id.
pub fn generate_id() -> String {
    Ulid::new().to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTracker {
    pub name: String,
    pub category: Category,
    pub goal: String,
    #[serde(default)]
    pub color: Color,
}

#[derive(Debug, Deserialize)]
pub struct ToggleDayRequest {
    pub day: u8,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveTrackerResponse {
    pub tracker: Tracker,
    /// True when this save dropped the oldest tracker to stay under the
    /// store capacity.
    pub limit_reached: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_trackers: usize,
    pub active_trackers: usize,
    pub completed_days_total: usize,
    pub average_progress: u8,
    pub completion_rate: u8,
    pub favorite_category: Option<Category>,
    pub category_distribution: Vec<CategoryStats>,
    pub weekday_activity: WeekdayActivity,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub category: Category,
    pub count: usize,
    pub average_progress: u8,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekdayActivity {
    pub days: Vec<WeekdayPoint>,
    pub best_day: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekdayPoint {
    pub weekday: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePoint {
    pub label: String,
    pub completed_count: u32,
    pub active_count: u32,
}

#[derive(Debug, Serialize)]
pub struct StreakResponse {
    pub streak: u32,
}
