mod common;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::atomic::Ordering;
use tower::ServiceExt;

use common::{spawn_backend, test_state, Behavior};

fn chat_request(body: &JsonValue) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_text(resp: axum::response::Response) -> String {
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn chat_streams_fragments_in_order() {
    let mut behaviors = HashMap::new();
    behaviors.insert(
        "gemini-3-flash-preview".to_string(),
        Behavior::Stream(vec!["Xin ".to_string(), "chào bạn!".to_string()]),
    );
    let (base_url, _calls) = spawn_backend(behaviors).await;
    let app = tutor_backend::routes::router().with_state(test_state(&base_url));

    let resp = app
        .clone()
        .oneshot(chat_request(
            &serde_json::json!({ "prompt": "Áp suất là gì?", "mode": "gentle" }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;

    let first = body.find("Xin ").expect("first fragment present");
    let second = body.find("chào bạn!").expect("second fragment present");
    assert!(first < second);

    // sending a chat message registers the day's activity
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let stats = body_text(resp).await;
    let stats: JsonValue = serde_json::from_str(&stats).unwrap();
    assert_eq!(stats["streak"], 1);
}

#[tokio::test]
async fn stream_connection_falls_back_to_next_candidate() {
    let mut behaviors = HashMap::new();
    behaviors.insert("gemini-3-flash-preview".to_string(), Behavior::Fail(429));
    behaviors.insert(
        "gemini-3-pro-preview".to_string(),
        Behavior::Stream(vec!["Trả lời từ mô hình dự phòng.".to_string()]),
    );
    let (base_url, calls) = spawn_backend(behaviors).await;
    let app = tutor_backend::routes::router().with_state(test_state(&base_url));

    let resp = app
        .clone()
        .oneshot(chat_request(&serde_json::json!({ "prompt": "Giúp mình với" })))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("mô hình dự phòng"));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn total_connection_failure_is_an_in_band_fragment() {
    let (base_url, calls) = spawn_backend(HashMap::new()).await;
    let app = tutor_backend::routes::router().with_state(test_state(&base_url));

    let resp = app
        .clone()
        .oneshot(chat_request(&serde_json::json!({ "prompt": "Có ai không?" })))
        .await
        .unwrap();
    // the chat surface must always have something to display
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("Lỗi kết nối API"));
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn attachment_alone_uses_the_default_prompt() {
    let mut behaviors = HashMap::new();
    behaviors.insert(
        "gemini-3-flash-preview".to_string(),
        Behavior::Stream(vec!["Bài toán trong ảnh giải như sau.".to_string()]),
    );
    let (base_url, _calls) = spawn_backend(behaviors).await;
    let app = tutor_backend::routes::router().with_state(test_state(&base_url));

    let resp = app
        .clone()
        .oneshot(chat_request(&serde_json::json!({
            "attachment": { "mime_type": "image/png", "data": "aGVsbG8=" }
        })))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("giải như sau"));
}

#[tokio::test]
async fn invalid_attachment_base64_is_rejected() {
    let (base_url, calls) = spawn_backend(HashMap::new()).await;
    let app = tutor_backend::routes::router().with_state(test_state(&base_url));

    let resp = app
        .clone()
        .oneshot(chat_request(&serde_json::json!({
            "attachment": { "mime_type": "image/png", "data": "không phải base64!!!" }
        })))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn empty_chat_request_is_rejected() {
    let (base_url, _calls) = spawn_backend(HashMap::new()).await;
    let app = tutor_backend::routes::router().with_state(test_state(&base_url));

    let resp = app
        .clone()
        .oneshot(chat_request(&serde_json::json!({ "prompt": "   " })))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
