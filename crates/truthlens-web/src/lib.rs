//! TruthLens Web Server
//!
//! Axum-based JSON API in front of the analysis tools.

pub mod error;
pub mod render;
pub mod routes;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use state::AppState;

/// Largest accepted request body (image uploads included).
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/tools", get(routes::tools::list_tools))
        .route("/article", post(routes::tools::analyze_article))
        .route("/source", post(routes::tools::check_source))
        .route("/image", post(routes::tools::verify_image))
        .route("/bias", post(routes::tools::detect_bias))
        .with_state(state.clone());

    Router::new()
        .route("/health", get(routes::health::health))
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server.
pub async fn run_server(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!("Web server listening on http://{}:{}", host, port);

    axum::serve(listener, app).await?;
    Ok(())
}
