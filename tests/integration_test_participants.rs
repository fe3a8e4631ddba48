mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{parse_body, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_same_identity_updates_instead_of_duplicating() {
    let app = TestApp::new().await;
    let token = app.create_lunch().await;
    let uri = format!("/api/v1/events/{}/participants", token);

    let (status, first) = app.call("POST", &uri, Some(json!({
        "name": "Ben", "password": "pw-ben", "status": "going", "comment": "bringing snacks"
    }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["created"], true);
    assert_eq!(first["participant"]["status"], "going");
    assert!(first["participant"].get("password_hash").is_none());

    let (status, second) = app.call("POST", &uri, Some(json!({
        "name": "Ben", "password": "pw-ben", "status": "maybe"
    }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["created"], false);
    assert_eq!(second["participant"]["id"], first["participant"]["id"]);
    assert_eq!(second["participant"]["status"], "maybe");
    assert!(second["participant"]["comment"].is_null());

    let (_, list) = app.call("GET", &uri, None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_name_collision_is_rejected() {
    let app = TestApp::new().await;
    let token = app.create_lunch().await;
    let uri = format!("/api/v1/events/{}/participants", token);

    app.call("POST", &uri, Some(json!({ "name": "Ben", "password": "pw-ben", "status": "going" }))).await;

    let (status, body) = app.call("POST", &uri, Some(json!({ "name": "Ben", "password": "other", "status": "not_going" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");

    let (status, _) = app.call("POST", &uri, Some(json!({ "name": "Ben", "status": "not_going" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, list) = app.call("GET", &uri, None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["status"], "going");
}

#[tokio::test]
async fn test_passwordless_row_only_matches_passwordless_submission() {
    let app = TestApp::new().await;
    let token = app.create_lunch().await;
    let uri = format!("/api/v1/events/{}/participants", token);

    let (_, first) = app.call("POST", &uri, Some(json!({ "name": "Chie", "status": "going" }))).await;
    assert_eq!(first["created"], true);

    // An empty password counts as no password.
    let (status, again) = app.call("POST", &uri, Some(json!({ "name": "Chie", "password": "", "status": "not_going" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(again["created"], false);

    let (status, _) = app.call("POST", &uri, Some(json!({ "name": "Chie", "password": "pw-chie", "status": "going" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_collision_message_is_localized() {
    let app = TestApp::new().await;
    let token = app.create_lunch().await;
    let uri = format!("/api/v1/events/{}/participants", token);

    app.call("POST", &uri, Some(json!({ "name": "Ben", "password": "pw-ben", "status": "going" }))).await;

    let response = app.send(
        Request::builder().method("POST").uri(&uri)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT_LANGUAGE, "ja")
            .body(Body::from(json!({ "name": "Ben", "password": "nope", "status": "going" }).to_string())).unwrap()
    ).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = parse_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("この名前はすでに使われています"));
}

#[tokio::test]
async fn test_response_validation_boundaries() {
    let app = TestApp::new().await;
    let token = app.create_lunch().await;
    let uri = format!("/api/v1/events/{}/participants", token);

    let (status, _) = app.call("POST", &uri, Some(json!({ "name": "n".repeat(50), "status": "going" }))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.call("POST", &uri, Some(json!({ "name": "n".repeat(51), "status": "going" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.call("POST", &uri, Some(json!({ "name": "Dai", "status": "going", "comment": "c".repeat(201) }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.call("POST", &uri, Some(json!({ "name": "Dai", "password": "x".repeat(73), "status": "going" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unknown status values never reach the handler.
    let (status, _) = app.call("POST", &uri, Some(json!({ "name": "Dai", "status": "perhaps" }))).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_attendance_summary_in_event_view() {
    let app = TestApp::new().await;
    let token = app.create_lunch().await;
    let uri = format!("/api/v1/events/{}/participants", token);

    for (name, status) in [("A", "going"), ("B", "going"), ("C", "maybe"), ("D", "not_going")] {
        app.call("POST", &uri, Some(json!({ "name": name, "status": status }))).await;
    }

    let (status, detail) = app.call("GET", &format!("/api/v1/events/{}", token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["summary"], json!({ "going": 2, "not_going": 1, "maybe": 1 }));
    assert_eq!(detail["participants"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_withdraw_requires_matching_identity() {
    let app = TestApp::new().await;
    let token = app.create_lunch().await;
    let uri = format!("/api/v1/events/{}/participants", token);

    app.call("POST", &uri, Some(json!({ "name": "Ben", "password": "pw-ben", "status": "going" }))).await;

    let (status, _) = app.call("DELETE", &uri, Some(json!({ "name": "Nobody" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.call("DELETE", &uri, Some(json!({ "name": "Ben", "password": "wrong" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app.call("DELETE", &uri, Some(json!({ "name": "Ben", "password": "pw-ben" }))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, list) = app.call("GET", &uri, None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_same_name_in_other_event_is_independent() {
    let app = TestApp::new().await;
    let first = app.create_lunch().await;
    let second = app.create_lunch().await;

    let (_, a) = app.call("POST", &format!("/api/v1/events/{}/participants", first), Some(json!({
        "name": "Ben", "password": "pw-one", "status": "going"
    }))).await;
    let (status, b) = app.call("POST", &format!("/api/v1/events/{}/participants", second), Some(json!({
        "name": "Ben", "password": "pw-two", "status": "going"
    }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(a["created"], true);
    assert_eq!(b["created"], true);
}
