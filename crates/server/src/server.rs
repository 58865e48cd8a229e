//! Router assembly and server loop.

use std::{net::SocketAddr, path::Path};

use axum::{Router, routing::get, routing::get_service};
use tokio::net::TcpListener;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::info;

use crate::{offline, routes, state::AppState};

/// Bind and serve until shutdown.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server loop
/// fails.
pub async fn run_server(
    addr: SocketAddr,
    state: AppState,
    assets_dir: &Path,
) -> std::io::Result<()> {
    let app = create_app(state, assets_dir);

    let listener = TcpListener::bind(addr).await?;
    info!("folio listening on {addr}");

    axum::serve(listener, app).await
}

/// Assemble the full application router:
///
/// - `/epub-local/{id}`: the byte-serving endpoint (reserved prefix)
/// - `/api/...`: the library API
/// - everything else: static frontend files from the assets directory
pub fn create_app(state: AppState, assets_dir: &Path) -> Router {
    let static_files =
        get_service(ServeDir::new(assets_dir).append_index_html_on_directories(true));

    Router::new()
        .nest("/api", routes::create_router())
        // The reserved offline prefix. The bare and trailing-slash forms
        // carry no id and are rejected rather than silently dropped.
        .route("/epub-local/{id}", get(offline::serve_book))
        .route("/epub-local/", get(offline::missing_id))
        .route("/epub-local", get(offline::missing_id))
        .with_state(state)
        .fallback_service(static_files)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}
