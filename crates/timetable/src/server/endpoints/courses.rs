//! Catalog browsing endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::catalog::{SearchFilters, Semester};
use crate::schedule::format_intervals;
use crate::server::types::ApiErrorType;
use crate::types::AppState;

/// Query parameters for course search.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub department: Option<String>,
    pub category: Option<String>,
    pub english: Option<bool>,
    pub semester: Option<Semester>,
}

/// GET /courses
///
/// Query parameters:
/// - `q`: substring of code, name or instructor
/// - `department`, `category`: exact match, `All` to disable
/// - `english`: `true`/`false`
/// - `semester`: `Spring`, `Summer`, `Fall` or `Winter`
pub async fn get_search_courses(
    State(s): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Response {
    info!("GET /courses (q={:?})", params.q);

    let filters = SearchFilters {
        department: params.department,
        category: params.category,
        english: params.english,
        semester: params.semester,
    };
    let courses: Vec<_> = s
        .catalog
        .search(&params.q, &filters)
        .into_iter()
        .map(|c| {
            json!({
                "course": c,
                "schedule": format_intervals(&c.intervals),
            })
        })
        .collect();

    (StatusCode::OK, Json(courses)).into_response()
}

/// GET /courses/filters
pub async fn get_filter_options(State(s): State<Arc<AppState>>) -> Response {
    info!("GET /courses/filters");
    (StatusCode::OK, Json(s.catalog.filter_options())).into_response()
}

/// GET /courses/:course_id
pub async fn get_course(
    Path(course_id): Path<String>,
    State(s): State<Arc<AppState>>,
) -> Response {
    info!("GET /courses/{}", course_id);

    match s.catalog.get(&course_id) {
        Some(course) => (StatusCode::OK, Json(course)).into_response(),
        None => ApiErrorType::from((
            StatusCode::NOT_FOUND,
            "Course not found",
            Some(course_id),
        ))
        .into_response(),
    }
}
