use axum::{Json, Router, routing::get};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use std::{io, sync::Arc};

use crate::{expenses, summary};
use api_types::ServiceInfo;
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

async fn info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Expense Tracker API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Builds the HTTP API around `engine`.
///
/// The frontend is served from another origin, so every route answers CORS
/// requests from any origin.
pub fn router(engine: Arc<Engine>) -> Router {
    let state = ServerState { engine };

    Router::new()
        .route("/", get(info))
        .route("/api/expenses", get(expenses::list).post(expenses::create))
        .route("/api/expenses/summary", get(summary::get_summary))
        .route("/api/expenses/{id}", get(expenses::get).delete(expenses::delete))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds `port`, or the first free port among the following `attempts - 1`
/// ones when it is already in use.
pub async fn bind_listener(bind: &str, port: u16, attempts: u16) -> io::Result<TcpListener> {
    let mut last_err = None;

    for candidate in (port..=u16::MAX).take(usize::from(attempts.max(1))) {
        match TcpListener::bind((bind, candidate)).await {
            Ok(listener) => {
                if candidate != port {
                    tracing::warn!("port {port} is in use, falling back to {candidate}");
                }
                return Ok(listener);
            }
            Err(err) if err.kind() == io::ErrorKind::AddrInUse => {
                tracing::debug!("port {candidate} is in use");
                last_err = Some(err);
            }
            Err(err) => return Err(err),
        }
    }

    Err(last_err.unwrap_or_else(|| io::Error::new(io::ErrorKind::AddrInUse, "no free port found")))
}

pub async fn run_with_listener(engine: Engine, listener: TcpListener) -> io::Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(Arc::new(engine))).await
}
