pub mod chat;
pub mod curriculum;
pub mod events;
pub mod health;
pub mod profile;
pub mod quiz;
pub mod theory;

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/curriculum", get(curriculum::list_grades))
        .route("/api/curriculum/:grade", get(curriculum::get_grade))
        .route("/api/quiz", post(quiz::start_quiz))
        .route(
            "/api/quiz/:id",
            get(quiz::get_quiz).delete(quiz::discard_quiz),
        )
        .route("/api/quiz/:id/answer", post(quiz::answer))
        .route("/api/quiz/:id/confirm", post(quiz::confirm))
        .route("/api/quiz/:id/next", post(quiz::advance))
        .route("/api/quiz/:id/retry", post(quiz::retry))
        .route("/api/theory", get(theory::get_theory))
        .route("/api/simulation", post(theory::generate_simulation))
        .route("/api/chat", post(chat::chat_stream))
        .route(
            "/api/profile",
            get(profile::get_profile).patch(profile::update_profile),
        )
        .route("/api/stats", get(profile::get_stats))
        .route("/api/stats/theory", post(profile::record_theory_minutes))
        .route(
            "/api/settings",
            get(profile::get_settings).put(profile::update_settings),
        )
        .route("/api/events", get(events::subscribe))
}
