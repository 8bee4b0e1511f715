use crate::errors::TrackerError;
use crate::models::Tracker;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("TRACKER_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/trackers.json"))
}

/// Loads the persisted tracker list, newest first.
///
/// A missing file is a fresh install; unreadable or corrupt data degrades
/// to an empty list so a bad data file never takes the service down.
pub async fn load_trackers(path: &Path) -> Vec<Tracker> {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(trackers) => trackers,
            Err(err) => {
                error!("failed to parse tracker file: {err}");
                Vec::new()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
        Err(err) => {
            error!("failed to read tracker file: {err}");
            Vec::new()
        }
    }
}

pub async fn persist_trackers(path: &Path, trackers: &[Tracker]) -> Result<(), TrackerError> {
    let payload = serde_json::to_vec_pretty(trackers)?;
    fs::write(path, payload).await?;
    Ok(())
}
