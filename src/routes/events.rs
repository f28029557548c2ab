use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    response::IntoResponse,
};
use std::convert::Infallible;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::AppState;

/// Change feed for profile and credential state. Best-effort: only clients
/// subscribed at publish time see an event, and a lagging client simply
/// misses the overwritten ones.
#[axum::debug_handler]
pub async fn subscribe(State(state): State<AppState>) -> impl IntoResponse {
    let rx = state.events.subscribe();
    let stream = BroadcastStream::new(rx).filter_map(|event| {
        event
            .ok()
            .map(|event| Ok::<_, Infallible>(Event::default().event(event.name()).data(event.name())))
    });
    Sse::new(stream).keep_alive(KeepAlive::default())
}
