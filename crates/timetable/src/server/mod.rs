use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;

use crate::server::endpoints::{courses, sessions, status};
use crate::types::AppState;

mod endpoints;
mod types;

pub use types::ApiErrorType;

/// Creates a router that can be used by `axum`.
///
/// # Parameters
/// - `app_state`: The app server state.
///
/// # Returns
/// The router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    // Catalog browsing
    let course_router = Router::new()
        .route("/courses", get(courses::get_search_courses))
        .route("/courses/filters", get(courses::get_filter_options))
        .route("/courses/:course_id", get(courses::get_course));

    // Per-student timetable drafts
    let session_router = Router::new()
        .route("/sessions", post(sessions::post_create_session))
        .route(
            "/sessions/:session_id",
            get(sessions::get_session).delete(sessions::delete_session),
        )
        .route(
            "/sessions/:session_id/courses",
            post(sessions::post_add_course).delete(sessions::delete_all_courses),
        )
        .route(
            "/sessions/:session_id/courses/:course_id",
            delete(sessions::delete_course),
        )
        .route("/sessions/:session_id/layout", get(sessions::get_layout))
        .route(
            "/sessions/:session_id/recommend",
            post(sessions::post_recommend),
        )
        .route(
            "/sessions/:session_id/suggestions/apply",
            post(sessions::post_apply_suggestions),
        );

    Router::new()
        .route("/health", get(status::get_health))
        .merge(course_router)
        .merge(session_router)
        .with_state(app_state)
}
