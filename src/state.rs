use crate::store::TrackerStore;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<TrackerStore>>,
}

impl AppState {
    pub fn new(store: TrackerStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }
}
