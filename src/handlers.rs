use crate::errors::AppError;
use crate::models::{
    CHALLENGE_DAYS, CategoryStats, NewTracker, SaveTrackerResponse, Statistics, StreakResponse,
    TimelinePoint, ToggleDayRequest, Tracker, WeekdayActivity,
};
use crate::state::AppState;
use crate::stats::{build_statistics, category_distribution, weekday_activity};
use crate::streak::current_streak;
use crate::timeline::completion_timeline;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

pub async fn list_trackers(State(state): State<AppState>) -> Json<Vec<Tracker>> {
    let store = state.store.lock().await;
    Json(store.list().to_vec())
}

pub async fn get_tracker(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Tracker>, AppError> {
    let store = state.store.lock().await;
    let tracker = store
        .get(&id)
        .cloned()
        .ok_or_else(|| AppError::not_found(format!("tracker not found: {id}")))?;
    Ok(Json(tracker))
}

pub async fn create_tracker(
    State(state): State<AppState>,
    Json(payload): Json<NewTracker>,
) -> Result<Json<SaveTrackerResponse>, AppError> {
    let tracker = Tracker::create(payload)?;

    let mut store = state.store.lock().await;
    let upserted = store.upsert(tracker).await?;

    Ok(Json(SaveTrackerResponse {
        tracker: upserted.tracker,
        limit_reached: upserted.truncated,
    }))
}

/// Explicit save of a full record; the path id wins over the body id.
pub async fn save_tracker(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(mut payload): Json<Tracker>,
) -> Result<Json<SaveTrackerResponse>, AppError> {
    payload.id = id;

    let mut store = state.store.lock().await;
    let upserted = store.upsert(payload).await?;

    Ok(Json(SaveTrackerResponse {
        tracker: upserted.tracker,
        limit_reached: upserted.truncated,
    }))
}

pub async fn delete_tracker(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let mut store = state.store.lock().await;
    store.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Flips one day of a tracker's checklist and saves through the
/// read-modify-write path that recomputes the stored progress.
pub async fn toggle_day(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ToggleDayRequest>,
) -> Result<Json<Tracker>, AppError> {
    if !(1..=CHALLENGE_DAYS).contains(&payload.day) {
        return Err(AppError::bad_request(format!(
            "day must be between 1 and {CHALLENGE_DAYS}"
        )));
    }

    let mut store = state.store.lock().await;
    let current = store
        .get(&id)
        .cloned()
        .ok_or_else(|| AppError::not_found(format!("tracker not found: {id}")))?;

    let mut checked_days = current.checked_days;
    if !checked_days.remove(&payload.day) {
        checked_days.insert(payload.day);
    }

    let tracker = store.update_checked_days(&id, checked_days).await?;
    Ok(Json(tracker))
}

pub async fn get_stats(State(state): State<AppState>) -> Json<Statistics> {
    let store = state.store.lock().await;
    Json(build_statistics(store.list()))
}

pub async fn get_weekly_activity(State(state): State<AppState>) -> Json<WeekdayActivity> {
    let store = state.store.lock().await;
    Json(weekday_activity(store.list()))
}

pub async fn get_category_distribution(State(state): State<AppState>) -> Json<Vec<CategoryStats>> {
    let store = state.store.lock().await;
    Json(category_distribution(store.list()))
}

pub async fn get_timeline(State(state): State<AppState>) -> Json<Vec<TimelinePoint>> {
    let store = state.store.lock().await;
    Json(completion_timeline(store.list()))
}

pub async fn get_streak(State(state): State<AppState>) -> Json<StreakResponse> {
    let store = state.store.lock().await;
    Json(StreakResponse {
        streak: current_streak(store.list()),
    })
}
