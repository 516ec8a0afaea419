//! Timetable session endpoints.
//!
//! Each session owns one [`SelectionStore`]. Adds from the UI, from the
//! greedy recommender and from assistant replies all go through
//! `add_course`, so the no-duplicate and no-conflict rules hold for every
//! source.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::layout::{layout, LayoutError};
use crate::schedule::{SelectionError, SelectionStore};
use crate::server::types::ApiErrorType;
use crate::suggest::{apply_all, extract_course_codes, recommend, Preferences};
use crate::types::AppState;

/// Body for adding a catalog course to a session.
#[derive(Debug, Deserialize)]
pub struct AddCourseBody {
    pub course_id: String,
}

/// Body carrying an assistant reply to mine for course codes.
#[derive(Debug, Deserialize)]
pub struct ApplySuggestionsBody {
    pub message: String,
}

/// Query parameters for the layout endpoint.
#[derive(Debug, Deserialize)]
pub struct LayoutParams {
    /// Total grid width in pixels; columns share it evenly
    pub width: Option<f32>,
}

fn session_not_found(session_id: String) -> Response {
    ApiErrorType::from((StatusCode::NOT_FOUND, "Session not found", Some(session_id)))
        .into_response()
}

/// Converts a store rejection to an API response.
fn selection_error_to_response(e: SelectionError) -> Response {
    let status = match &e {
        SelectionError::DuplicateCourse { .. } | SelectionError::ScheduleConflict { .. } => {
            StatusCode::CONFLICT
        }
        SelectionError::NotFound { .. } => StatusCode::NOT_FOUND,
    };

    if e.is_conflict() {
        let conflicts: Vec<_> = e
            .conflicting_courses()
            .iter()
            .map(|c| json!({ "id": c.id, "code": c.code, "name": c.name }))
            .collect();
        return (
            status,
            Json(json!({
                "error": "Schedule conflict",
                "context": e.to_string(),
                "conflicts": conflicts,
            })),
        )
            .into_response();
    }

    let message = match &e {
        SelectionError::DuplicateCourse { .. } => "Course already in timetable",
        _ => "Course not in timetable",
    };
    ApiErrorType::from((status, message, Some(e.to_string()))).into_response()
}

fn session_view(session_id: &str, store: &SelectionStore) -> serde_json::Value {
    json!({
        "session_id": session_id,
        "courses": store.courses(),
        "total_credits": store.total_credits(),
    })
}

/// POST /sessions
pub async fn post_create_session(State(s): State<Arc<AppState>>) -> Response {
    let id = s
        .sessions
        .create(SelectionStore::with_remove_policy(s.config.remove_policy));
    info!("POST /sessions - created {}", id);

    (StatusCode::CREATED, Json(json!({ "session_id": id }))).into_response()
}

/// GET /sessions/:session_id
pub async fn get_session(
    Path(session_id): Path<String>,
    State(s): State<Arc<AppState>>,
) -> Response {
    info!("GET /sessions/{}", session_id);

    match s.sessions.get_mut(&session_id) {
        Some(store) => (StatusCode::OK, Json(session_view(&session_id, &store))).into_response(),
        None => session_not_found(session_id),
    }
}

/// DELETE /sessions/:session_id
pub async fn delete_session(
    Path(session_id): Path<String>,
    State(s): State<Arc<AppState>>,
) -> Response {
    info!("DELETE /sessions/{}", session_id);

    if s.sessions.remove(&session_id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        session_not_found(session_id)
    }
}

/// POST /sessions/:session_id/courses
pub async fn post_add_course(
    Path(session_id): Path<String>,
    State(s): State<Arc<AppState>>,
    Json(body): Json<AddCourseBody>,
) -> Response {
    info!("POST /sessions/{}/courses ({})", session_id, body.course_id);

    let Some(course) = s.catalog.get(&body.course_id) else {
        return ApiErrorType::from((
            StatusCode::NOT_FOUND,
            "Course not found",
            Some(body.course_id),
        ))
        .into_response();
    };
    let Some(mut store) = s.sessions.get_mut(&session_id) else {
        return session_not_found(session_id);
    };

    match store.add_course(course.clone()) {
        Ok(added) => (StatusCode::OK, Json(added)).into_response(),
        Err(e) => {
            warn!("Rejected {} for session {}: {}", body.course_id, session_id, e);
            selection_error_to_response(e)
        }
    }
}

/// DELETE /sessions/:session_id/courses/:course_id
pub async fn delete_course(
    Path((session_id, course_id)): Path<(String, String)>,
    State(s): State<Arc<AppState>>,
) -> Response {
    info!("DELETE /sessions/{}/courses/{}", session_id, course_id);

    let Some(mut store) = s.sessions.get_mut(&session_id) else {
        return session_not_found(session_id);
    };

    match store.remove_course(&course_id) {
        Ok(removed) => (StatusCode::OK, Json(removed)).into_response(),
        Err(e) => selection_error_to_response(e),
    }
}

/// DELETE /sessions/:session_id/courses
pub async fn delete_all_courses(
    Path(session_id): Path<String>,
    State(s): State<Arc<AppState>>,
) -> Response {
    info!("DELETE /sessions/{}/courses", session_id);

    match s.sessions.get_mut(&session_id) {
        Some(mut store) => {
            store.clear();
            (StatusCode::OK, Json(session_view(&session_id, &store))).into_response()
        }
        None => session_not_found(session_id),
    }
}

/// GET /sessions/:session_id/layout
///
/// Query parameters:
/// - `width` (optional): total grid width to fit the day columns into
pub async fn get_layout(
    Path(session_id): Path<String>,
    State(s): State<Arc<AppState>>,
    Query(params): Query<LayoutParams>,
) -> Response {
    info!("GET /sessions/{}/layout", session_id);

    let Some(store) = s.sessions.get_mut(&session_id) else {
        return session_not_found(session_id);
    };
    let grid = match params.width {
        Some(width) => s.config.grid.fit_width(width),
        None => s.config.grid.clone(),
    };

    match layout(store.courses(), &grid) {
        Ok(blocks) => (
            StatusCode::OK,
            Json(json!({
                "grid": grid,
                "blocks": blocks,
            })),
        )
            .into_response(),
        Err(e @ LayoutError::InvalidConfig { .. }) => {
            ApiErrorType::from((StatusCode::BAD_REQUEST, "Invalid grid", Some(e.to_string())))
                .into_response()
        }
        Err(e) => {
            error!("Layout invariant violated for session {}: {}", session_id, e);
            ApiErrorType::from((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to lay out timetable",
                Some(e.to_string()),
            ))
            .into_response()
        }
    }
}

/// POST /sessions/:session_id/recommend
///
/// Body: [`Preferences`]. Returns suggestions without adding them.
pub async fn post_recommend(
    Path(session_id): Path<String>,
    State(s): State<Arc<AppState>>,
    Json(prefs): Json<Preferences>,
) -> Response {
    info!("POST /sessions/{}/recommend", session_id);

    let Some(store) = s.sessions.get_mut(&session_id) else {
        return session_not_found(session_id);
    };
    let target = prefs
        .target_credits
        .unwrap_or(s.config.suggestions.target_credits);

    let suggestions = recommend(
        s.catalog.courses(),
        &store,
        &prefs,
        target,
        s.config.suggestions.max_suggestions,
        &mut rand::thread_rng(),
    );

    (
        StatusCode::OK,
        Json(json!({
            "target_credits": target,
            "suggestions": suggestions,
        })),
    )
        .into_response()
}

/// POST /sessions/:session_id/suggestions/apply
///
/// Extracts course codes from an assistant reply, resolves each to its first
/// catalog offering and adds them all.
pub async fn post_apply_suggestions(
    Path(session_id): Path<String>,
    State(s): State<Arc<AppState>>,
    Json(body): Json<ApplySuggestionsBody>,
) -> Response {
    info!("POST /sessions/{}/suggestions/apply", session_id);

    let Some(mut store) = s.sessions.get_mut(&session_id) else {
        return session_not_found(session_id);
    };

    let codes = extract_course_codes(&body.message);
    let mut unknown_codes = Vec::new();
    let mut courses = Vec::new();
    for code in codes {
        match s.catalog.find_by_code(&code) {
            Some(course) => courses.push(course.clone()),
            None => unknown_codes.push(code),
        }
    }
    if !unknown_codes.is_empty() {
        warn!("Suggested codes not in catalog: {}", unknown_codes.join(", "));
    }

    let report = apply_all(&mut store, courses);

    (
        StatusCode::OK,
        Json(json!({
            "report": report,
            "unknown_codes": unknown_codes,
        })),
    )
        .into_response()
}
