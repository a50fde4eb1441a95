use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{Extension, Router, routing::get};
use tokio::{net::TcpListener, sync::oneshot};

use crate::{Res, api, api::CallbackState, error::PlayError};

pub fn router(state: Arc<CallbackState>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route(
            "/callback",
            get(api::callback)
                .post(api::callback)
                .layer(Extension(state)),
        )
}

/// Binds the callback listener. Binding happens before the authorization
/// URL is shown so a busy port fails the login immediately.
pub async fn bind(address: &str) -> Res<TcpListener> {
    let addr = SocketAddr::from_str(address)
        .map_err(|e| PlayError::Config(format!("invalid server address {address}: {e}")))?;
    Ok(TcpListener::bind(addr).await?)
}

/// Serves the callback routes until `shutdown` fires.
pub async fn start_api_server(
    listener: TcpListener,
    state: Arc<CallbackState>,
    shutdown: oneshot::Receiver<()>,
) -> Res<()> {
    tracing::debug!(addr = ?listener.local_addr().ok(), "callback listener started");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = shutdown.await;
        })
        .await?;
    Ok(())
}
