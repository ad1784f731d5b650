//! HTTP proxy that holds the DeepL API key and exposes the `/api/*`
//! endpoints the editor talks to.

mod deepl;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::{get, post};
pub use deepl::DeeplClient;
use redraft_core::config::ServerConfig;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::info;

#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub addr: SocketAddr,
    pub api_key: Option<String>,
    pub deepl_base_url: String,
    pub timeout: Duration,
}

impl ProxyConfig {
    /// Resolves the `[server]` section (env overrides applied).
    ///
    /// # Errors
    /// Returns an error if the address or DeepL URL is invalid.
    pub fn from_server_config(server: &ServerConfig, timeout: Duration) -> Result<Self> {
        Ok(Self {
            addr: server.socket_addr()?,
            api_key: server.resolve_api_key(),
            deepl_base_url: server.resolve_deepl_base_url()?,
            timeout,
        })
    }
}

pub struct ProxyState {
    pub api_key: Option<String>,
    pub deepl: DeeplClient,
}

pub type SharedState = Arc<ProxyState>;

/// Builds the `/api` router.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route(
            "/api/rephrase",
            post(routes::rephrase).fallback(routes::method_not_allowed),
        )
        .route(
            "/api/translate",
            post(routes::translate).fallback(routes::method_not_allowed),
        )
        .route(
            "/api/usage",
            get(routes::usage).fallback(routes::method_not_allowed),
        )
        .route(
            "/api/hello",
            get(routes::hello).fallback(routes::method_not_allowed),
        )
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new())
                .on_response(DefaultOnResponse::new()),
        )
}

/// Serves until Ctrl+C or SIGTERM.
///
/// # Errors
/// Returns an error if the listener cannot be bound.
pub async fn serve(config: ProxyConfig) -> Result<()> {
    if config.api_key.is_none() {
        tracing::warn!("no DeepL API key configured; rephrase/translate/usage will fail");
    }
    let state = Arc::new(ProxyState {
        api_key: config.api_key.clone(),
        deepl: DeeplClient::new(&config.deepl_base_url, config.timeout)?,
    });
    let router = build_router(state);

    info!(addr = %config.addr, deepl = %config.deepl_base_url, "Binding HTTP listener");
    let listener = TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.addr))?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;
    info!("HTTP server exited");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = signal::ctrl_c().await;
    };
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        if let Ok(mut stream) = signal(SignalKind::terminate()) {
            let _ = stream.recv().await;
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutdown signal received");
}
