use std::time::Duration;

use reqwest::{Client, Response, Url};
use tokio::sync::oneshot;

use crate::{
    Res,
    api::CallbackState,
    config::Settings,
    error::PlayError,
    info,
    management::TokenStore,
    server,
    types::{Token, TokenResponse},
    warning,
};

/// Runs the authorization-code login and returns the saved token.
///
/// 1. Binds the callback listener on `settings.server_address`
/// 2. Prints the authorization URL and tries to open it in a browser
/// 3. Waits for the callback handler to report through a one-shot channel
/// 4. Stops the listener
///
/// The callback handler saves the token before the flow is released, so a
/// successful return means the token file has been replaced.
///
/// # Errors
///
/// - [`PlayError::StateMismatch`] when the redirect carries a foreign `state`
/// - [`PlayError::TokenExchange`] when Spotify refuses the code
/// - [`PlayError::LoginTimeout`] when `timeout` elapses first
pub async fn login(settings: &Settings, timeout: Option<Duration>) -> Res<Token> {
    let store = TokenStore::new(&settings.token_path);
    let listener = server::bind(&settings.server_address).await?;
    let (state, done) = CallbackState::new(settings.clone(), store, Client::new());

    let (stop_tx, stop_rx) = oneshot::channel();
    let server = tokio::spawn(server::start_api_server(listener, state, stop_rx));

    let auth_url = authorize_url(settings)?;
    info!(
        "Please log in to Spotify by visiting the following page in your browser: {}",
        auth_url
    );
    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!("Failed to open browser. Please open the URL above manually.");
    }

    let outcome = wait_for_token(done, timeout).await;

    let _ = stop_tx.send(());
    match server.await {
        Ok(Err(e)) => tracing::warn!(error = %e, "callback listener failed"),
        Err(e) => tracing::warn!(error = %e, "callback listener panicked"),
        Ok(Ok(())) => {}
    }

    outcome
}

/// Blocks until the callback handler reports, optionally bounded by `timeout`.
pub async fn wait_for_token(
    done: oneshot::Receiver<Res<Token>>,
    timeout: Option<Duration>,
) -> Res<Token> {
    let received = match timeout {
        Some(limit) => tokio::time::timeout(limit, done)
            .await
            .map_err(|_| PlayError::LoginTimeout(limit.as_secs()))?,
        None => done.await,
    };

    received.map_err(|_| PlayError::CallbackClosed)?
}

/// Builds the Spotify authorization URL for the configured app.
pub fn authorize_url(settings: &Settings) -> Res<Url> {
    Url::parse_with_params(
        &settings.auth_url,
        &[
            ("client_id", settings.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", settings.redirect_uri.as_str()),
            ("scope", settings.scope().as_str()),
            ("state", settings.state.as_str()),
        ],
    )
    .map_err(|e| {
        PlayError::Config(format!(
            "invalid authorization URL {}: {e}",
            settings.auth_url
        ))
    })
}

/// Exchanges an authorization code for a token.
pub async fn exchange_code(http: &Client, settings: &Settings, code: &str) -> Res<Token> {
    tracing::debug!(url = %settings.token_url, "exchanging authorization code");
    let res = http
        .post(&settings.token_url)
        .basic_auth(&settings.client_id, Some(&settings.client_secret))
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", settings.redirect_uri.as_str()),
        ])
        .send()
        .await
        .map_err(|e| PlayError::TokenExchange(e.to_string()))?;

    token_from_response(res, None).await
}

/// Trades a refresh token for a fresh access token.
///
/// Spotify does not always rotate the refresh token; when the response
/// carries none, the one passed in is kept.
pub async fn refresh_token(http: &Client, settings: &Settings, refresh_token: &str) -> Res<Token> {
    tracing::debug!(url = %settings.token_url, "refreshing access token");
    let res = http
        .post(&settings.token_url)
        .basic_auth(&settings.client_id, Some(&settings.client_secret))
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .send()
        .await
        .map_err(|e| PlayError::TokenExchange(e.to_string()))?;

    token_from_response(res, Some(refresh_token)).await
}

async fn token_from_response(res: Response, previous_refresh: Option<&str>) -> Res<Token> {
    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        return Err(PlayError::TokenExchange(format!("{status}: {body}")));
    }

    let body: TokenResponse = res
        .json()
        .await
        .map_err(|e| PlayError::TokenExchange(e.to_string()))?;
    Ok(body.into_token(previous_refresh))
}
