use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tutor_backend::{
    config::{get_config, init_config},
    routes,
    store::KvStore,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let store = KvStore::open(&config.data_dir)?;
    let app_state = AppState::new(store);

    if config.gemini_api_key.is_none() {
        tracing::warn!(
            "No GEMINI_API_KEY in the environment; a key must be provided via /api/settings before generation works"
        );
    }

    let app = routes::router()
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
