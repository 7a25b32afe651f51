use std::{future::Future, sync::Arc, time::Duration};

use axum::{routing::get, Router};
use tokio::{net::TcpListener, signal::ctrl_c};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, Level};

pub mod error;
pub mod routes;
pub mod session;
pub mod state;
pub mod views;

use crate::core::{catalog::Catalog, ConfigProvider};
use crate::utils::error::Result;
use routes::{
    add_to_cart, checkout, index, list_melons, process_login, shopping_cart, show_login, show_melon,
};
pub use state::AppState;

const PRUNE_INTERVAL: Duration = Duration::from_secs(60);

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/melons", get(list_melons))
        .route("/melon/{id}", get(show_melon))
        .route("/add_to_cart/{id}", get(add_to_cart))
        .route("/cart", get(shopping_cart))
        .route("/login", get(show_login).post(process_login))
        .route("/checkout", get(checkout))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// Binds the configured address and serves until Ctrl+C or SIGTERM.
pub async fn start_server<C: ConfigProvider + ?Sized>(config: &C, catalog: Catalog) -> Result<()> {
    info!("Initializing state...");
    let state = AppState::new(config, catalog)?;

    let address = config.bind_address();
    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await?;

    serve(listener, state, shutdown_signal()).await?;

    info!("Server shut down");
    Ok(())
}

/// Serves on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let pruner = tokio::spawn(prune_sessions(state.clone()));

    info!("Server running on {}", listener.local_addr()?);
    let result = axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await;

    pruner.abort();
    Ok(result?)
}

async fn prune_sessions(state: Arc<AppState>) {
    let mut ticker = tokio::time::interval(PRUNE_INTERVAL);
    loop {
        ticker.tick().await;
        match state.sessions.prune_expired().await {
            Ok(0) => {}
            Ok(removed) => tracing::debug!("Pruned {removed} expired sessions"),
            Err(e) => tracing::warn!("Session pruning failed: {e}"),
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {e}");
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
}
