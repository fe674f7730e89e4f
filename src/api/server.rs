//! Quoteforge API Server implementation
//!
//! HTTP REST API server using Axum. Serves rendered quotations as
//! downloadable .xlsx files.

use std::net::SocketAddr;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use axum::{
    http::header,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers;
use crate::error::{QuoteError, QuoteResult};
use crate::excel::DEFAULT_TEMPLATE;

/// API Server configuration
#[derive(Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// Template used when a request names none
    pub default_template: PathBuf,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            default_template: PathBuf::from(DEFAULT_TEMPLATE),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub version: String,
    pub default_template: PathBuf,
}

impl AppState {
    pub fn new(default_template: PathBuf) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            default_template,
        }
    }

    /// Template for a request: the default, or a file named by the client
    /// in the default template's directory
    pub fn template_path(&self, requested: Option<&str>) -> QuoteResult<PathBuf> {
        let Some(name) = requested else {
            return Ok(self.default_template.clone());
        };

        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(file)), None) => Ok(self.template_dir().join(file)),
            _ => Err(QuoteError::InvalidData(format!(
                "template_path '{}' must be a plain file name in the template directory",
                name
            ))),
        }
    }

    fn template_dir(&self) -> &Path {
        self.default_template.parent().unwrap_or_else(|| Path::new(""))
    }
}

/// Build the router with all routes and middleware
pub fn build_router(state: Arc<AppState>) -> Router {
    // Browsers need Content-Disposition exposed to read the file name
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([header::CONTENT_DISPOSITION]);

    Router::new()
        // Health and info endpoints
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/version", get(handlers::version))
        // Core API endpoints
        .route("/api/v1/layouts/:name", get(handlers::layout))
        .route("/api/v1/render", post(handlers::render))
        .route("/api/v1/render/upload", post(handlers::render_upload))
        // State and middleware
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Run the API server
pub async fn run_api_server(config: ApiConfig) -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quoteforge=info,tower_http=info".into()),
        )
        .init();

    let state = Arc::new(AppState::new(config.default_template.clone()));
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("🧾 Quoteforge API Server starting on http://{}", addr);
    info!("   Endpoints: /api/v1/render, /api/v1/render/upload, /api/v1/layouts/:name");
    info!("   Default template: {}", config.default_template.display());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Quoteforge API Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, stopping server...");
}
