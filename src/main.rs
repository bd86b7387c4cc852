use std::sync::Arc;

use tower_http::trace::TraceLayer;

use notes_frontend::{
    config,
    handlers::{AppState, view},
    router,
};

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt::init();

    // Load config
    let cfg = config::load_config().unwrap_or_else(|e| {
        tracing::error!("Failed to load config: {e}");
        panic!("failed to load config: {e}");
    });
    tracing::info!("Successfully loaded notes frontend config");

    let api_base_url = cfg.api_base_url();
    tracing::info!("Notes API base URL: {}", api_base_url);

    // One pooled HTTP client, one notes API client per request
    let state = Arc::new(AppState::new(reqwest::Client::new(), api_base_url));

    // Router config
    let app = router::routes(&cfg.base_path, view::notes_main_view)
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", cfg.port))
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind port {}: {e}", cfg.port);
            panic!("failed to bind port {}: {e}", cfg.port);
        });

    match listener.local_addr() {
        Ok(addr) => tracing::info!("Notes frontend starting, listening on {}", addr),
        Err(e) => tracing::warn!("Could not read listener address: {e}"),
    }

    axum::serve(listener, app).await.unwrap_or_else(|e| {
        tracing::error!("HTTP server error: {e}");
        panic!("failed to start HTTP server: {e}");
    });
}
