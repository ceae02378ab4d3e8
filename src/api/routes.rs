//! Router assembly and server lifecycle.

use std::sync::Arc;

use axum::extract::Request;
use axum::http::header::{self, HeaderValue};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::store::TaskStore;

use super::tasks;

/// Shared application state.
pub struct AppState {
    pub store: TaskStore,
}

/// Build the application router around the given state.
///
/// Separated from [`serve`] so tests can drive the router directly with a
/// fresh store.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/tasks/", get(tasks::list_tasks))
        .route("/tasks/", post(tasks::add_task))
        .route("/tasks/", put(tasks::update_task))
        .route("/tasks/:id", get(tasks::get_task))
        .route("/tasks/:id", delete(tasks::delete_task))
        .layer(middleware::from_fn(set_json_content_type))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Stamp `Content-Type: application/json` on every response.
///
/// Runs after the handler, so the header also lands on plain-text error
/// bodies. Existing clients depend on that combination.
async fn set_json_content_type(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
}

/// Start the HTTP server.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let state = Arc::new(AppState {
        store: TaskStore::seeded(),
    });

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for a shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
