use thiserror::Error;

/// Every failure the library can report to the dispatcher.
///
/// The binary maps these to exit codes: [`PlayError::NotLoggedIn`] is a
/// graceful exit, everything else terminates with a non-zero status.
#[derive(Debug, Error)]
pub enum PlayError {
    #[error("no usable token at {path}: {reason}")]
    NotLoggedIn { path: String, reason: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("state mismatch: {received} != {expected}")]
    StateMismatch { received: String, expected: String },

    #[error("couldn't get token: {0}")]
    TokenExchange(String),

    #[error("Spotify API request failed: {0}")]
    Api(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("invalid selection {input:?}, expected a number between 0 and {max}")]
    InvalidSelection { input: String, max: usize },

    #[error("login was not completed within {0} seconds")]
    LoginTimeout(u64),

    #[error("callback listener stopped before login completed")]
    CallbackClosed,
}

impl PlayError {
    /// Whether the dispatcher should treat this as a clean exit.
    pub fn is_graceful(&self) -> bool {
        matches!(self, PlayError::NotLoggedIn { .. })
    }
}
