use std::{collections::HashMap, sync::Arc};

use axum::{
    Extension,
    extract::Query,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tokio::sync::{Mutex, oneshot};

use crate::{
    Res, config::Settings, error::PlayError, management::TokenStore, spotify, types::Token,
};

/// Everything the callback handler needs for one login attempt.
///
/// `done` is the single-use rendezvous with the waiting login flow: the first
/// callback takes the sender and reports its outcome through it.
pub struct CallbackState {
    pub settings: Settings,
    pub store: TokenStore,
    pub http: reqwest::Client,
    done: Mutex<Option<oneshot::Sender<Res<Token>>>>,
}

impl CallbackState {
    pub fn new(
        settings: Settings,
        store: TokenStore,
        http: reqwest::Client,
    ) -> (Arc<Self>, oneshot::Receiver<Res<Token>>) {
        let (tx, rx) = oneshot::channel();
        let state = CallbackState {
            settings,
            store,
            http,
            done: Mutex::new(Some(tx)),
        };
        (Arc::new(state), rx)
    }
}

/// Completes the pending login. Only the first callback is served: it takes
/// the rendezvous sender, so later redirects get a 404 and never reach the
/// token endpoint.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared): Extension<Arc<CallbackState>>,
) -> Response {
    let Some(done) = shared.done.lock().await.take() else {
        tracing::debug!("login already completed, ignoring callback");
        return (StatusCode::NOT_FOUND, "404 page not found").into_response();
    };

    let received = params.get("state").map(String::as_str).unwrap_or_default();
    if received != shared.settings.state {
        let _ = done.send(Err(PlayError::StateMismatch {
            received: received.to_string(),
            expected: shared.settings.state.clone(),
        }));
        return (StatusCode::NOT_FOUND, "404 page not found").into_response();
    }

    let outcome = match (params.get("code"), params.get("error")) {
        (_, Some(err)) => Err(PlayError::TokenExchange(err.clone())),
        (None, None) => Err(PlayError::TokenExchange("missing code".to_string())),
        (Some(code), None) => {
            spotify::auth::exchange_code(&shared.http, &shared.settings, code).await
        }
    };

    let token = match outcome {
        Ok(token) => token,
        Err(e) => {
            tracing::debug!(error = %e, "code exchange failed");
            let _ = done.send(Err(e));
            return (StatusCode::FORBIDDEN, "Couldn't get token").into_response();
        }
    };

    if let Err(e) = shared.store.save(&token).await {
        let _ = done.send(Err(e));
        return (StatusCode::INTERNAL_SERVER_ERROR, "Couldn't save token").into_response();
    }

    let _ = done.send(Ok(token));
    Html("<script>close();</script>").into_response()
}
