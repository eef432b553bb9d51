//! HTTP API built on axum.
//!
//! Routes:
//! - `GET /healthz`, `GET /books`, `GET /count`
//! - `GET /search?q=&book=&limit=&offset=&page=&page_size=`
//! - `GET /hadith/{book}/{number}`
//! - `GET /openapi.yaml` and the static web UI, when present on disk

pub mod errors;
pub mod handlers;
pub mod models;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::{Method, header};
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::corpus::CorpusStore;
use crate::error::Result;
use handlers::AppState;

/// Everything `serve` needs besides the store.
#[derive(Debug, Clone)]
pub struct ServerOptions {
    /// Socket address to bind, e.g. `0.0.0.0:8080`
    pub addr: String,
    pub static_dir: Option<PathBuf>,
    pub openapi_path: Option<PathBuf>,
    pub search_timeout_ms: u64,
}

/// Build the router; static assets are mounted only if they exist on disk.
pub fn create_router(state: AppState, options: &ServerOptions) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let mut router = Router::new()
        .route("/healthz", get(handlers::healthz))
        .route("/books", get(handlers::list_books))
        .route("/count", get(handlers::count))
        .route("/search", get(handlers::search))
        .route("/hadith/", get(handlers::hadith_usage))
        .route("/hadith/*rest", get(handlers::get_hadith));

    if let Some(path) = options.openapi_path.as_ref().filter(|p| p.is_file()) {
        router = router.route_service("/openapi.yaml", ServeFile::new(path));
    }
    if let Some(dir) = options.static_dir.as_ref().filter(|d| d.is_dir()) {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the API until Ctrl-C (or SIGTERM).
///
/// On Unix, SIGHUP reloads the corpus from disk; a failed reload keeps
/// serving the previous snapshot.
pub async fn serve(store: Arc<CorpusStore>, options: ServerOptions) -> Result<()> {
    let state = AppState::new(store.clone(), Duration::from_millis(options.search_timeout_ms));
    let app = create_router(state, &options);

    let listener = tokio::net::TcpListener::bind(&options.addr).await?;
    info!(addr = %listener.local_addr()?, "hadith API listening");

    spawn_reload_on_hangup(store);

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

#[cfg(unix)]
fn spawn_reload_on_hangup(store: Arc<CorpusStore>) {
    use tokio::signal::unix::{SignalKind, signal};

    let mut hangups = match signal(SignalKind::hangup()) {
        Ok(sig) => sig,
        Err(err) => {
            warn!(error = %err, "failed to install SIGHUP handler, reload disabled");
            return;
        }
    };
    tokio::spawn(async move {
        while hangups.recv().await.is_some() {
            info!("SIGHUP received, reloading corpus");
            let store = Arc::clone(&store);
            // Errors are logged by the store; the old snapshot stays live.
            let _ = tokio::task::spawn_blocking(move || store.reload()).await;
        }
    });
}

#[cfg(not(unix))]
fn spawn_reload_on_hangup(_store: Arc<CorpusStore>) {}

async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {err}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => tracing::error!("Failed to install SIGTERM handler: {err}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received SIGINT"),
        () = terminate => info!("Received SIGTERM"),
    }
    info!("Shutting down gracefully");
}
