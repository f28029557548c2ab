#![allow(dead_code)]

use axum::{
    body::Body,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use serde_json::{json, Value as JsonValue};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tutor_backend::services::ai_service::GeminiService;
use tutor_backend::store::KvStore;
use tutor_backend::AppState;

/// Canned per-model behaviour of the stub generation backend.
pub enum Behavior {
    /// Respond with this HTTP status and no usable body.
    Fail(u16),
    /// Respond with a text payload wrapped in the backend's envelope.
    Text(String),
    /// Respond 200 with a payload that is not parseable as JSON content.
    MalformedJson,
    /// Respond to stream requests with these fragments.
    Stream(Vec<String>),
}

static DEFAULT_FAIL: Behavior = Behavior::Fail(500);

#[derive(Clone)]
struct StubBackend {
    calls: Arc<AtomicUsize>,
    behaviors: Arc<HashMap<String, Behavior>>,
}

/// Bind a stub generation backend on a random port. Returns its base URL
/// and the total request counter (every model attempt counts once).
pub async fn spawn_backend(behaviors: HashMap<String, Behavior>) -> (String, Arc<AtomicUsize>) {
    let stub = StubBackend {
        calls: Arc::new(AtomicUsize::new(0)),
        behaviors: Arc::new(behaviors),
    };
    let calls = stub.calls.clone();

    let app = Router::new()
        .route("/v1beta/models/:model_op", post(stub_handler))
        .with_state(stub);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), calls)
}

async fn stub_handler(
    State(stub): State<StubBackend>,
    Path(model_op): Path<String>,
) -> Response {
    stub.calls.fetch_add(1, Ordering::SeqCst);
    let (model, op) = model_op
        .split_once(':')
        .unwrap_or((model_op.as_str(), "generateContent"));
    let behavior = stub.behaviors.get(model).unwrap_or(&DEFAULT_FAIL);

    match (op, behavior) {
        (_, Behavior::Fail(code)) => StatusCode::from_u16(*code).unwrap().into_response(),
        ("generateContent", Behavior::Text(text)) => Json(envelope(text)).into_response(),
        ("generateContent", Behavior::MalformedJson) => {
            Json(envelope("đây chắc chắn không phải JSON {")).into_response()
        }
        ("streamGenerateContent", Behavior::Text(text)) => {
            sse_body(std::slice::from_ref(text))
        }
        ("streamGenerateContent", Behavior::Stream(fragments)) => sse_body(fragments),
        _ => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

fn envelope(text: &str) -> JsonValue {
    json!({
        "candidates": [
            { "content": { "parts": [{ "text": text }] } }
        ]
    })
}

fn sse_body(fragments: &[String]) -> Response {
    let mut body = String::new();
    for fragment in fragments {
        let payload = serde_json::to_string(&envelope(fragment)).unwrap();
        body.push_str("data: ");
        body.push_str(&payload);
        body.push_str("\n\n");
    }
    Response::builder()
        .status(StatusCode::OK)
        .header("content-type", "text/event-stream")
        .body(Body::from(body))
        .unwrap()
}

/// Fresh application state wired to the given stub backend, with an API
/// key already stored and an isolated data directory.
pub fn test_state(base_url: &str) -> AppState {
    let dir = std::env::temp_dir().join(format!("tutor_test_{}", uuid::Uuid::new_v4()));
    let store = KvStore::open(&dir).unwrap();
    store.set("GEMINI_API_KEY", &"test-key").unwrap();
    let ai_service = GeminiService::new(
        tutor_backend::http_client(),
        store.clone(),
        base_url.to_string(),
        None,
    );
    AppState::with_ai(store, ai_service)
}

/// A structurally valid generated quiz: 5 recall, 5 comprehension and
/// 5 application items mixing the two allowed types.
pub fn quiz_payload(count: usize) -> String {
    let mut questions = Vec::new();
    for i in 0..count {
        let difficulty = match i {
            0..=4 => "nhan_biet",
            5..=9 => "thong_hieu",
            _ => "van_dung",
        };
        let question = if i % 2 == 0 {
            json!({
                "id": i + 1,
                "type": "true_false",
                "question": format!("Câu {} đúng hay sai?", i + 1),
                "correctAnswer": "Đúng",
                "difficulty": difficulty,
                "explanation": "Theo SGK Kết nối tri thức."
            })
        } else {
            json!({
                "id": i + 1,
                "type": "multiple_choice",
                "question": format!("Chọn đáp án cho câu {}", i + 1),
                "options": ["Phương án A", "Phương án B", "Phương án C", "Phương án D"],
                "correctAnswer": "Phương án B",
                "difficulty": difficulty,
                "explanation": "Phương án B khớp với định nghĩa trong bài."
            })
        };
        questions.push(question);
    }
    serde_json::to_string(&questions).unwrap()
}
