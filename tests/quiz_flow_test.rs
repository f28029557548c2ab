mod common;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use tower::ServiceExt;

use common::{quiz_payload, spawn_backend, test_state, Behavior};

async fn body_json(resp: axum::response::Response) -> JsonValue {
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: &JsonValue) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn quiz_flow_end_to_end() {
    let mut behaviors = HashMap::new();
    behaviors.insert(
        "gemini-3-flash-preview".to_string(),
        Behavior::Text(quiz_payload(15)),
    );
    let (base_url, _calls) = spawn_backend(behaviors).await;
    let app = tutor_backend::routes::router().with_state(test_state(&base_url));

    // generate a quiz
    let resp = app
        .clone()
        .oneshot(post_json(
            "/api/quiz",
            &serde_json::json!({ "grade": "8", "lesson_title": "Áp suất" }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let quiz = body_json(resp).await;
    let session_id = quiz["session_id"].as_str().unwrap().to_string();
    let questions = quiz["questions"].as_array().unwrap().clone();
    assert_eq!(questions.len(), 15);
    assert_eq!(quiz["current_index"], 0);

    let recall = questions
        .iter()
        .filter(|q| q["difficulty"] == "nhan_biet")
        .count();
    assert_eq!(recall, 5);

    // status starts in the active phase with a running timer
    let resp = app
        .clone()
        .oneshot(get(&format!("/api/quiz/{}", session_id)))
        .await
        .unwrap();
    let status = body_json(resp).await;
    assert_eq!(status["phase"], "active");
    assert!(status["elapsed_seconds"].as_i64().unwrap() >= 0);

    // answer every question correctly; choice answers confirm immediately
    for (i, question) in questions.iter().enumerate() {
        let correct = question["correctAnswer"].as_str().unwrap();
        let resp = app
            .clone()
            .oneshot(post_json(
                &format!("/api/quiz/{}/answer", session_id),
                &serde_json::json!({ "answer": correct }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let step = body_json(resp).await;
        assert_eq!(step["confirmed"], true);
        assert_eq!(step["correct"], true);
        assert!(step["explanation"].is_string());

        let resp = app
            .clone()
            .oneshot(post_json(
                &format!("/api/quiz/{}/next", session_id),
                &serde_json::json!({}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let advanced = body_json(resp).await;
        if i < 14 {
            assert_eq!(advanced["phase"], "active");
            assert_eq!(advanced["current_index"], i as i64 + 1);
        } else {
            assert_eq!(advanced["phase"], "result");
            assert_eq!(advanced["score"], 15);
            assert_eq!(advanced["total"], 15);
            assert!((advanced["normalized_score"].as_f64().unwrap() - 10.0).abs() < 1e-9);
        }
    }

    // completion side effects were persisted exactly once
    let resp = app.clone().oneshot(get("/api/stats")).await.unwrap();
    let stats = body_json(resp).await;
    assert_eq!(stats["solved"], 1);
    assert_eq!(stats["questions_done"], 15);
    assert_eq!(stats["streak"], 1);
    assert!((stats["average_score"].as_f64().unwrap() - 10.0).abs() < 1e-9);

    // retry reuses the same questions with a cleared attempt
    let resp = app
        .clone()
        .oneshot(post_json(
            &format!("/api/quiz/{}/retry", session_id),
            &serde_json::json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let retried = body_json(resp).await;
    assert_eq!(retried["current_index"], 0);
    assert_eq!(retried["questions"], JsonValue::Array(questions.clone()));

    let resp = app
        .clone()
        .oneshot(get(&format!("/api/quiz/{}", session_id)))
        .await
        .unwrap();
    let status = body_json(resp).await;
    assert_eq!(status["phase"], "active");
    assert_eq!(status["answered"].as_array().unwrap().len(), 0);
    assert_eq!(status["confirmed"].as_array().unwrap().len(), 0);

    // exit discards the session
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/quiz/{}", session_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = app
        .clone()
        .oneshot(get(&format!("/api/quiz/{}", session_id)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn advancing_unconfirmed_step_is_rejected() {
    let mut behaviors = HashMap::new();
    behaviors.insert(
        "gemini-3-flash-preview".to_string(),
        Behavior::Text(quiz_payload(15)),
    );
    let (base_url, _calls) = spawn_backend(behaviors).await;
    let app = tutor_backend::routes::router().with_state(test_state(&base_url));

    let resp = app
        .clone()
        .oneshot(post_json(
            "/api/quiz",
            &serde_json::json!({ "grade": "6", "lesson_title": "Lực ma sát" }),
        ))
        .await
        .unwrap();
    let quiz = body_json(resp).await;
    let session_id = quiz["session_id"].as_str().unwrap().to_string();

    let resp = app
        .clone()
        .oneshot(post_json(
            &format!("/api/quiz/{}/next", session_id),
            &serde_json::json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_session_is_not_found() {
    let (base_url, _calls) = spawn_backend(HashMap::new()).await;
    let app = tutor_backend::routes::router().with_state(test_state(&base_url));

    let resp = app
        .clone()
        .oneshot(post_json(
            &format!("/api/quiz/{}/answer", uuid::Uuid::new_v4()),
            &serde_json::json!({ "answer": "Đúng" }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blank_lesson_title_fails_validation() {
    let (base_url, calls) = spawn_backend(HashMap::new()).await;
    let app = tutor_backend::routes::router().with_state(test_state(&base_url));

    let resp = app
        .clone()
        .oneshot(post_json(
            "/api/quiz",
            &serde_json::json!({ "grade": "8", "lesson_title": "" }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 0);
}

#[tokio::test]
async fn generation_failure_leaves_stats_untouched() {
    // every candidate fails: the session never starts
    let (base_url, calls) = spawn_backend(HashMap::new()).await;
    let app = tutor_backend::routes::router().with_state(test_state(&base_url));

    let resp = app
        .clone()
        .oneshot(post_json(
            "/api/quiz",
            &serde_json::json!({ "grade": "8", "lesson_title": "Acid" }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 3);

    let resp = app.clone().oneshot(get("/api/stats")).await.unwrap();
    let stats = body_json(resp).await;
    assert_eq!(stats["solved"], 0);
    assert_eq!(stats["streak"], 0);
}
