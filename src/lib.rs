pub mod config;
pub mod dto;
pub mod error;
pub mod markup;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod utils;

use crate::services::{
    ai_service::GeminiService, events::EventBus, profile_service::ProfileService,
    quiz_service::QuizService, stats_service::StatsService, theory_service::TheoryService,
};
use crate::store::KvStore;
use reqwest::Client;

#[derive(Clone)]
pub struct AppState {
    pub store: KvStore,
    pub events: EventBus,
    pub ai_service: GeminiService,
    pub quiz_service: QuizService,
    pub theory_service: TheoryService,
    pub stats_service: StatsService,
    pub profile_service: ProfileService,
}

impl AppState {
    pub fn new(store: KvStore) -> Self {
        let config = crate::config::get_config();
        let ai_service = GeminiService::new(
            http_client(),
            store.clone(),
            config.gemini_base_url.clone(),
            config.gemini_api_key.clone(),
        );
        Self::with_ai(store, ai_service)
    }

    /// Assembly with an explicit backend client; tests point it at an
    /// in-process stub server.
    pub fn with_ai(store: KvStore, ai_service: GeminiService) -> Self {
        let events = EventBus::new();
        let quiz_service = QuizService::new();
        let theory_service = TheoryService::new(store.clone());
        let stats_service = StatsService::new(store.clone());
        let profile_service = ProfileService::new(store.clone(), events.clone());

        Self {
            store,
            events,
            ai_service,
            quiz_service,
            theory_service,
            stats_service,
            profile_service,
        }
    }
}

pub fn http_client() -> Client {
    Client::builder()
        .connect_timeout(std::time::Duration::from_secs(10))
        .build()
        .unwrap()
}
