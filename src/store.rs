use crate::errors::TrackerError;
use crate::models::Tracker;
use crate::progress::compute_progress;
use crate::storage::persist_trackers;
use chrono::Utc;
use std::collections::BTreeSet;
use std::env;
use std::path::PathBuf;
use tracing::warn;

/// Default ceiling on stored trackers.
pub const DEFAULT_MAX_TRACKERS: usize = 50;

pub fn resolve_max_trackers() -> usize {
    env::var("MAX_TRACKERS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(DEFAULT_MAX_TRACKERS)
}

/// Result of a successful save.
#[derive(Debug, Clone)]
pub struct Upserted {
    /// The tracker as stored, with its refreshed `updated_at`.
    pub tracker: Tracker,
    /// True when the save pushed the list past capacity and the oldest
    /// tracker was dropped from the tail.
    pub truncated: bool,
}

/// Owns the tracker list, newest first, and its on-disk copy.
///
/// Every mutation persists the candidate list first and only commits it
/// to memory when the write succeeds, so a failed write leaves readers
/// seeing the previous state.
pub struct TrackerStore {
    data_path: PathBuf,
    max_trackers: usize,
    trackers: Vec<Tracker>,
}

impl TrackerStore {
    pub fn new(data_path: PathBuf, trackers: Vec<Tracker>) -> Self {
        Self::with_capacity(data_path, DEFAULT_MAX_TRACKERS, trackers)
    }

    pub fn with_capacity(data_path: PathBuf, max_trackers: usize, trackers: Vec<Tracker>) -> Self {
        Self {
            data_path,
            max_trackers,
            trackers,
        }
    }

    /// All trackers in store order, newest first.
    pub fn list(&self) -> &[Tracker] {
        &self.trackers
    }

    /// Absent ids are a normal result, not an error.
    pub fn get(&self, id: &str) -> Option<&Tracker> {
        self.trackers.iter().find(|tracker| tracker.id == id)
    }

    /// Inserts or replaces a tracker.
    ///
    /// New trackers go to the front; replacements keep their position.
    /// `updated_at` is stamped on every save. Past capacity the tail is
    /// dropped and the outcome reports `truncated`.
    pub async fn upsert(&mut self, mut tracker: Tracker) -> Result<Upserted, TrackerError> {
        tracker.validate()?;
        tracker.updated_at = Utc::now();
        let saved = tracker.clone();

        let mut next = self.trackers.clone();
        match next.iter_mut().find(|existing| existing.id == tracker.id) {
            Some(slot) => *slot = tracker,
            None => next.insert(0, tracker),
        }

        let truncated = next.len() > self.max_trackers;
        if truncated {
            warn!(
                "tracker limit reached ({}), dropping the oldest entry",
                self.max_trackers
            );
            next.truncate(self.max_trackers);
        }

        persist_trackers(&self.data_path, &next).await?;
        self.trackers = next;

        Ok(Upserted {
            tracker: saved,
            truncated,
        })
    }

    /// Removes a tracker by id. Ids that are already gone still succeed.
    pub async fn delete(&mut self, id: &str) -> Result<(), TrackerError> {
        let mut next = self.trackers.clone();
        next.retain(|tracker| tracker.id != id);

        persist_trackers(&self.data_path, &next).await?;
        self.trackers = next;
        Ok(())
    }

    /// Replaces a tracker's checked-day set, recomputing the stored
    /// progress and refreshing `updated_at` in the same save.
    pub async fn update_checked_days(
        &mut self,
        id: &str,
        checked_days: BTreeSet<u8>,
    ) -> Result<Tracker, TrackerError> {
        let mut tracker = self
            .get(id)
            .cloned()
            .ok_or_else(|| TrackerError::NotFound(id.to_string()))?;

        tracker.checked_days = checked_days;
        tracker.progress = compute_progress(&tracker.checked_days);

        let upserted = self.upsert(tracker).await?;
        Ok(upserted.tracker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Color, NewTracker};
    use tempfile::TempDir;

    fn sample(name: &str) -> Tracker {
        Tracker::create(NewTracker {
            name: name.to_string(),
            category: Category::Health,
            goal: "ten minutes of stretching after waking up".to_string(),
            color: Color::Green,
        })
        .expect("valid tracker")
    }

    fn store_in(dir: &TempDir) -> TrackerStore {
        TrackerStore::new(dir.path().join("trackers.json"), Vec::new())
    }

    #[tokio::test]
    async fn upsert_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        let tracker = sample("Morning runs");

        store.upsert(tracker.clone()).await.unwrap();

        let stored = store.get(&tracker.id).unwrap();
        assert_eq!(stored.name, tracker.name);
        assert_eq!(stored.category, tracker.category);
        assert_eq!(stored.goal, tracker.goal);
        assert_eq!(stored.checked_days, tracker.checked_days);
        assert_eq!(stored.created_at, tracker.created_at);
    }

    #[tokio::test]
    async fn new_trackers_are_listed_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        let first = sample("First");
        let second = sample("Second");

        store.upsert(first.clone()).await.unwrap();
        store.upsert(second.clone()).await.unwrap();

        let ids: Vec<&str> = store.list().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec![second.id.as_str(), first.id.as_str()]);
    }

    #[tokio::test]
    async fn replacing_a_tracker_keeps_its_position() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        let first = sample("First");
        let second = sample("Second");
        store.upsert(first.clone()).await.unwrap();
        store.upsert(second.clone()).await.unwrap();

        let mut renamed = first.clone();
        renamed.name = "First, renamed".to_string();
        let outcome = store.upsert(renamed).await.unwrap();
        assert!(!outcome.truncated);

        let ids: Vec<&str> = store.list().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec![second.id.as_str(), first.id.as_str()]);
        assert_eq!(store.get(&first.id).unwrap().name, "First, renamed");
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        let tracker = sample("Short lived");
        store.upsert(tracker.clone()).await.unwrap();

        store.delete(&tracker.id).await.unwrap();
        assert!(store.get(&tracker.id).is_none());

        store.delete(&tracker.id).await.unwrap();
        assert!(store.list().is_empty());
    }

    #[tokio::test]
    async fn capacity_overflow_drops_oldest_and_warns_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut store =
            TrackerStore::with_capacity(dir.path().join("trackers.json"), 50, Vec::new());

        let mut oldest_id = None;
        for i in 0..50 {
            let tracker = sample(&format!("Tracker {i}"));
            oldest_id.get_or_insert(tracker.id.clone());
            let outcome = store.upsert(tracker).await.unwrap();
            assert!(!outcome.truncated);
        }

        let outcome = store.upsert(sample("Tracker 50")).await.unwrap();
        assert!(outcome.truncated);
        assert_eq!(store.list().len(), 50);
        assert!(store.get(&oldest_id.unwrap()).is_none());
    }

    #[tokio::test]
    async fn update_checked_days_recomputes_progress() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        let tracker = sample("Reading");
        store.upsert(tracker.clone()).await.unwrap();

        let days: BTreeSet<u8> = (1..=15).collect();
        let updated = store.update_checked_days(&tracker.id, days).await.unwrap();

        assert_eq!(updated.progress, 50);
        assert_eq!(updated.checked_days.len(), 15);
        assert!(updated.updated_at >= tracker.updated_at);
        assert_eq!(store.get(&tracker.id).unwrap().progress, 50);
    }

    #[tokio::test]
    async fn update_checked_days_requires_existing_id() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        let result = store
            .update_checked_days("no-such-id", BTreeSet::new())
            .await;
        assert!(matches!(result, Err(TrackerError::NotFound(_))));
    }

    #[tokio::test]
    async fn update_checked_days_rejects_out_of_range_days() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        let tracker = sample("Walking");
        store.upsert(tracker.clone()).await.unwrap();

        let result = store
            .update_checked_days(&tracker.id, BTreeSet::from([31]))
            .await;
        assert!(matches!(result, Err(TrackerError::Validation(_))));
    }

    #[tokio::test]
    async fn failed_persist_keeps_previous_state() {
        let dir = tempfile::tempdir().unwrap();
        // The data path is a directory, so every write fails.
        let seeded = sample("Survivor");
        let mut store = TrackerStore::new(dir.path().to_path_buf(), vec![seeded.clone()]);

        let result = store.upsert(sample("Doomed")).await;
        assert!(matches!(result, Err(TrackerError::Io(_))));

        let ids: Vec<&str> = store.list().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec![seeded.id.as_str()]);
    }
}
