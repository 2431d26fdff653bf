pub mod answer_routes;
pub mod auth_request;
pub mod error;
pub mod pdf_request;
pub mod pregunta_request;
pub mod proxy_routes;
pub mod responses;

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tutor_system::{AnswerService, CredentialStore, ProxyService, Settings, TutorResult};

/// Shared state of the answer service. Everything in it is read-only.
#[derive(Clone)]
pub struct AnswerState {
    pub credentials: Arc<CredentialStore>,
    pub answers: Arc<AnswerService>,
}

impl AnswerState {
    pub fn new(credentials: CredentialStore, answers: AnswerService) -> Self {
        Self {
            credentials: Arc::new(credentials),
            answers: Arc::new(answers),
        }
    }

    pub fn from_settings(settings: &Settings) -> TutorResult<Self> {
        Ok(Self::new(
            settings.credentials.clone(),
            AnswerService::from_settings(settings)?,
        ))
    }
}

#[derive(Clone)]
pub struct ProxyState {
    pub proxy: Arc<ProxyService>,
}

impl ProxyState {
    pub fn new(proxy: ProxyService) -> Self {
        Self {
            proxy: Arc::new(proxy),
        }
    }

    pub fn from_settings(settings: &Settings) -> TutorResult<Self> {
        Ok(Self::new(ProxyService::from_settings(settings)?))
    }
}

pub fn answer_router(state: AnswerState) -> Router {
    Router::new()
        .route("/", get(answer_routes::root))
        .route("/estado", get(answer_routes::estado))
        .route("/preguntar", post(answer_routes::preguntar))
        .route("/n8n-autenticar", post(answer_routes::n8n_autenticar))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub fn proxy_router(state: ProxyState) -> Router {
    Router::new()
        .route("/", get(proxy_routes::root))
        .route("/buscar-pdf", post(proxy_routes::buscar_pdf))
        .route("/archivos-disponibles", get(proxy_routes::archivos_disponibles))
        .route("/test-ngrok", get(proxy_routes::test_ngrok))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Binds `0.0.0.0:{port}` and serves until Ctrl+C.
pub async fn serve(app: Router, port: u16) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    log::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
    }
    log::info!("Shutting down");
}
