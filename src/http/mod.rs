// HTTP surface: routing, identity extraction and error mapping. All
// decisions live in the core workflow; handlers only translate.

mod error;
mod extract;
mod routes;
mod state;

pub use extract::{GROUPS_HEADER, USER_HEADER};
pub use state::AppState;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::signal::{
    ctrl_c,
    unix::{signal, SignalKind},
};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::utils::error::Result;
use routes::{list_portals, render_print, selection_form, submit_selection};

/// Builds the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/portals", get(list_portals))
        .route(
            "/portals/{portal_id}/print-selection",
            get(selection_form).post(submit_selection),
        )
        .route(
            "/portals/{portal_id}/rolls/{roll_id}/print/{printer_type}",
            get(render_print),
        )
        .layer(cors)
        .with_state(state)
}

/// Binds and serves until Ctrl+C or SIGTERM.
pub async fn serve(state: Arc<AppState>, address: &str) -> Result<()> {
    let app = router(state);

    let listener = TcpListener::bind(address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
