//! HTTP server & routing integration tests
//!
//! Drives the router in-process with a scripted backend; no network and no
//! real model calls.

mod helpers;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use drawtut_tg::build_router;
use helpers::{image_reply, numbered_plan, test_app_state, text_reply, tutorial_request, ScriptedBackend};

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_endpoint_returns_ok_json() {
    let backend = Arc::new(ScriptedBackend::new(vec![]));
    let (state, _dir) = test_app_state(backend);
    let app = build_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "OK");
    assert!(json["message"].is_string());
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn missing_image_field_is_400() {
    let backend = Arc::new(ScriptedBackend::new(vec![]));
    let (state, _dir) = test_app_state(backend.clone());
    let app = build_router(state);

    let response = app
        .oneshot(tutorial_request(None, Some("beginner")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "No image provided");

    // Validation failed before any external call was attempted.
    assert!(backend.recorded_requests().is_empty());
}

#[tokio::test]
async fn missing_difficulty_field_is_400() {
    let backend = Arc::new(ScriptedBackend::new(vec![]));
    let (state, _dir) = test_app_state(backend);
    let app = build_router(state);

    let response = app
        .oneshot(tutorial_request(Some(&[1, 2, 3]), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "No difficulty provided");
}

#[tokio::test]
async fn beginner_upload_produces_full_tutorial() {
    // Script: sketch image, description, step count 9, 9-entry plan, then
    // one image per step.
    let mut replies = vec![
        image_reply(0xAA),
        text_reply("A round vase with two curved handles."),
        text_reply("9"),
        text_reply(&numbered_plan(9)),
    ];
    for step in 1..=9u8 {
        replies.push(image_reply(step));
    }

    let backend = Arc::new(ScriptedBackend::new(replies));
    let (state, _dir) = test_app_state(backend);
    let app = build_router(state);

    let response = app
        .oneshot(tutorial_request(Some(&[9, 9, 9]), Some("beginner")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let sketch_url = json["sketch"]["imageUrl"].as_str().unwrap();
    assert!(sketch_url.starts_with("/generated/sketch_"));
    assert!(sketch_url.ends_with(".png"));
    assert_eq!(
        json["sketch"]["description"],
        "A round vase with two curved handles."
    );
    assert_eq!(json["sketch"]["audio"], "placeholder-audio.mp3");

    let steps = json["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 9);
    for (index, step) in steps.iter().enumerate() {
        assert_eq!(step["step"], index as u64 + 1);
        assert_eq!(
            step["description"],
            format!("Step {} objective.", index + 1)
        );
        assert!(step["imageUrl"].as_str().unwrap().ends_with(".png"));
        assert_eq!(step["audio"], "placeholder-audio.mp3");
    }
}

#[tokio::test]
async fn difficulty_outside_known_levels_still_succeeds() {
    let replies = vec![
        image_reply(0xAA),
        text_reply("A lighthouse."),
        text_reply("8"),
        text_reply(&numbered_plan(8)),
        image_reply(1),
        image_reply(2),
        image_reply(3),
        image_reply(4),
        image_reply(5),
        image_reply(6),
        image_reply(7),
        image_reply(8),
    ];

    let backend = Arc::new(ScriptedBackend::new(replies));
    let (state, _dir) = test_app_state(backend.clone());
    let app = build_router(state);

    let response = app
        .oneshot(tutorial_request(Some(&[1]), Some("EXPERT")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    // The sketch prompt fell back to the generic instruction with no
    // level-specific style clause.
    let sketch_prompt = &backend.recorded_requests()[0].prompt;
    assert!(sketch_prompt.starts_with("Convert this image"));
    assert!(sketch_prompt.contains("monochrome pencil sketch"));
}

#[tokio::test]
async fn plan_call_failure_degrades_to_generic_plan() {
    let mut replies = vec![
        image_reply(0xAA),
        text_reply("A sailing boat."),
        text_reply("10"),
        Err(drawtut_tg::types::ModelError::Network(
            "connection reset".to_string(),
        )),
    ];
    for step in 1..=10u8 {
        replies.push(image_reply(step));
    }

    let backend = Arc::new(ScriptedBackend::new(replies));
    let (state, _dir) = test_app_state(backend);
    let app = build_router(state);

    let response = app
        .oneshot(tutorial_request(Some(&[1, 2]), Some("advanced")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let steps = json["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 10);
    for (index, step) in steps.iter().enumerate() {
        assert_eq!(
            step["description"],
            format!("Work on part {} of your drawing.", index + 1)
        );
    }
}

#[tokio::test]
async fn sketch_without_image_part_is_fatal_500() {
    // The sketch reply has text but no inline image; the pipeline cannot
    // proceed and the request fails as a whole.
    let backend = Arc::new(ScriptedBackend::new(vec![text_reply(
        "cannot draw that",
    )]));
    let (state, _dir) = test_app_state(backend);
    let app = build_router(state.clone());

    let response = app
        .oneshot(tutorial_request(Some(&[1, 2, 3]), Some("beginner")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Failed to generate tutorial");
    assert!(json["details"].is_string());

    // The failure is surfaced through health diagnostics.
    let health = build_router(state)
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let health_json = body_json(health).await;
    assert!(health_json["last_error"].is_string());
}

#[tokio::test]
async fn unknown_route_is_404() {
    let backend = Arc::new(ScriptedBackend::new(vec![]));
    let (state, _dir) = test_app_state(backend);
    let app = build_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/does-not-exist")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
