use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use timetable::catalog::Catalog;
use timetable::config::AppConfig;
use timetable::schedule::{Course, TimeInterval};
use timetable::server::create_router;
use timetable::types::AppState;
use tower::ServiceExt;

fn course(id: &str, code: &str, credits: f32, times: &[(u8, u16, u16, u16, u16)]) -> Course {
    let intervals = times
        .iter()
        .map(|&(d, sh, sm, eh, em)| TimeInterval::from_hm(d, sh, sm, eh, em).unwrap())
        .collect();
    Course::new(id, code, intervals, credits).with_name(code)
}

fn test_router() -> Router {
    let catalog = Catalog::from_courses(vec![
        course("CS.20004-A-0", "CS.20004", 3.0, &[(0, 9, 0, 10, 15), (2, 9, 0, 10, 15)]),
        course("EE.20001-A-1", "EE.20001", 3.0, &[(1, 9, 0, 10, 15)]),
        course("MAS.10001-A-2", "MAS.10001", 3.0, &[(0, 9, 30, 10, 30)]),
        course("PH.10001-A-3", "PH.10001", 3.0, &[(0, 6, 0, 7, 0), (3, 13, 0, 14, 0)]),
    ]);
    create_router(Arc::new(AppState::new(catalog, AppConfig::default())))
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn new_session(router: &Router) -> String {
    let (status, body) = send(router, Method::POST, "/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
    body["session_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health() {
    let router = test_router();
    let (status, body) = send(&router, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["catalog_courses"], 4);
}

#[tokio::test]
async fn test_add_conflict_and_duplicate() {
    let router = test_router();
    let id = new_session(&router).await;
    let uri = format!("/sessions/{id}/courses");

    let (status, body) = send(&router, Method::POST, &uri, Some(json!({"course_id": "CS.20004-A-0"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_credits"], 3.0);

    let (status, body) = send(&router, Method::POST, &uri, Some(json!({"course_id": "EE.20001-A-1"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_credits"], 6.0);

    let (status, body) = send(&router, Method::POST, &uri, Some(json!({"course_id": "MAS.10001-A-2"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["conflicts"][0]["id"], "CS.20004-A-0");

    let (status, _) = send(&router, Method::POST, &uri, Some(json!({"course_id": "CS.20004-A-0"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&router, Method::POST, &uri, Some(json!({"course_id": "nope"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&router, Method::GET, &format!("/sessions/{id}"), None).await;
    assert_eq!(body["courses"].as_array().unwrap().len(), 2);
    assert_eq!(body["total_credits"], 6.0);
}

#[tokio::test]
async fn test_remove_and_readd() {
    let router = test_router();
    let id = new_session(&router).await;
    let uri = format!("/sessions/{id}/courses");
    send(&router, Method::POST, &uri, Some(json!({"course_id": "CS.20004-A-0"}))).await;

    let (status, body) = send(&router, Method::DELETE, &format!("{uri}/CS.20004-A-0"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_credits"], 0.0);

    let (status, _) = send(&router, Method::DELETE, &format!("{uri}/CS.20004-A-0"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&router, Method::POST, &uri, Some(json!({"course_id": "MAS.10001-A-2"}))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&router, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["courses"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_layout_skips_out_of_window() {
    let router = test_router();
    let id = new_session(&router).await;
    let uri = format!("/sessions/{id}/courses");
    send(&router, Method::POST, &uri, Some(json!({"course_id": "PH.10001-A-3"}))).await;

    let (status, body) = send(&router, Method::GET, &format!("/sessions/{id}/layout?width=645"), None).await;
    assert_eq!(status, StatusCode::OK);
    let blocks = body["blocks"].as_array().unwrap();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0]["interval_index"], 1);
    assert_eq!(blocks[0]["left"], 45.0 + 3.0 * 120.0);
    assert_eq!(blocks[0]["top"], 40.0 + 4.0 * 40.0);
}

#[tokio::test]
async fn test_apply_assistant_reply() {
    let router = test_router();
    let id = new_session(&router).await;

    let message = "I suggest **CS.20004**, **MAS.10001** and **XX.99999**.";
    let (status, body) = send(
        &router,
        Method::POST,
        &format!("/sessions/{id}/suggestions/apply"),
        Some(json!({ "message": message })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["report"]["added"], json!(["CS.20004-A-0"]));
    assert_eq!(body["report"]["rejected"][0]["course_id"], "MAS.10001-A-2");
    assert_eq!(body["unknown_codes"], json!(["XX.99999"]));
}

#[tokio::test]
async fn test_recommend_does_not_mutate() {
    let router = test_router();
    let id = new_session(&router).await;

    let (status, body) = send(
        &router,
        Method::POST,
        &format!("/sessions/{id}/recommend"),
        Some(json!({ "target_credits": 6.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["suggestions"].as_array().unwrap().len() <= 2);

    let (_, session) = send(&router, Method::GET, &format!("/sessions/{id}"), None).await;
    assert_eq!(session["total_credits"], 0.0);
}

#[tokio::test]
async fn test_search_and_unknown_session() {
    let router = test_router();

    let (status, body) = send(&router, Method::GET, "/courses?q=ee.", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["schedule"], "Tue 09:00~10:15");

    let (status, _) = send(&router, Method::GET, "/sessions/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&router, Method::GET, "/courses/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
