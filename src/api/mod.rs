pub mod events;
pub mod health;
pub mod import;
pub mod report;
pub mod trades;

use crate::config::Config;
use crate::session::Session;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    session: Arc<RwLock<Arc<Session>>>,
}

impl AppState {
    pub fn new(config: Config, session: Session) -> Self {
        Self {
            config,
            session: Arc::new(RwLock::new(Arc::new(session))),
        }
    }

    /// Snapshot of the current session.
    pub async fn session(&self) -> Arc<Session> {
        self.session.read().await.clone()
    }

    /// Swap in a fully rendered session, dropping the previous one.
    pub async fn replace_session(&self, session: Session) {
        *self.session.write().await = Arc::new(session);
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/v1/events", get(events::get_events))
        .route("/v1/trades", get(trades::get_trades))
        .route("/v1/stats", get(report::get_stats))
        .route("/v1/table", get(report::get_table))
        .route("/v1/charts", get(report::get_charts))
        .route("/v1/import", post(import::post_import))
        .layer(cors)
        .with_state(state)
}
