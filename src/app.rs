use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/trackers",
            get(handlers::list_trackers).post(handlers::create_tracker),
        )
        .route(
            "/api/trackers/:id",
            get(handlers::get_tracker)
                .put(handlers::save_tracker)
                .delete(handlers::delete_tracker),
        )
        .route("/api/trackers/:id/toggle", post(handlers::toggle_day))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/stats/weekly", get(handlers::get_weekly_activity))
        .route(
            "/api/stats/categories",
            get(handlers::get_category_distribution),
        )
        .route("/api/stats/timeline", get(handlers::get_timeline))
        .route("/api/stats/streak", get(handlers::get_streak))
        .with_state(state)
}
