//! Configuration management for playcli.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. Everything the rest of the crate needs
//! is collected once into [`Settings`] and passed down explicitly.
//!
//! The lookup order is:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (for everything except the API credentials)

use std::{env, path::PathBuf};

use crate::{Res, error::PlayError};

/// OAuth `state` sent with the authorization request and expected back.
pub const OAUTH_STATE: &str = "playcli";

/// Number of tracks requested per search.
pub const SEARCH_LIMIT: u32 = 10;

/// Permissions requested during login.
pub const SCOPES: &[&str] = &[
    "user-read-private",
    "user-read-playback-state",
    "user-modify-playback-state",
];

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:8080/callback";
/// Unspecified IPv6 address; on dual-stack hosts this also accepts IPv4, so
/// `localhost` in the redirect URI works whichever family it resolves to.
pub const DEFAULT_SERVER_ADDRESS: &str = "[::]:8080";

const TOKEN_FILE_NAME: &str = "spotify_token.json";

/// Loads environment variables from `<data_local_dir>/playcli/.env`.
///
/// A missing file is fine: the credentials may already be exported in the
/// shell. Variables that are already set are never overwritten.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/playcli/.env`
/// - macOS: `~/Library/Application Support/playcli/.env`
/// - Windows: `%LOCALAPPDATA%/playcli/.env`
pub fn load_env() -> Option<PathBuf> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("playcli/.env");
    match dotenv::from_path(&path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "loaded .env file");
            Some(path)
        }
        Err(_) => None,
    }
}

/// Runtime configuration shared by every command.
#[derive(Debug, Clone)]
pub struct Settings {
    pub client_id: String,
    pub client_secret: String,
    pub api_url: String,
    pub auth_url: String,
    pub token_url: String,
    pub redirect_uri: String,
    pub server_address: String,
    pub token_path: PathBuf,
    pub state: String,
}

impl Settings {
    /// Builds settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError::Config`] when `CLIENT_ID` or `SECRET_KEY` is
    /// missing, or when no home directory can be found for the token file.
    pub fn from_env() -> Res<Self> {
        Ok(Settings {
            client_id: required("CLIENT_ID")?,
            client_secret: required("SECRET_KEY")?,
            api_url: optional("SPOTIFY_API_URL", DEFAULT_API_URL),
            auth_url: optional("SPOTIFY_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: optional("SPOTIFY_TOKEN_URL", DEFAULT_TOKEN_URL),
            redirect_uri: optional("PLAYCLI_REDIRECT_URI", DEFAULT_REDIRECT_URI),
            server_address: optional("PLAYCLI_SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            token_path: match env::var_os("PLAYCLI_TOKEN_PATH") {
                Some(path) => PathBuf::from(path),
                None => default_token_path()?,
            },
            state: OAUTH_STATE.to_string(),
        })
    }

    /// Settings pointing every URL at `base`, used against local mock servers.
    pub fn for_base_url(base: &str, token_path: PathBuf) -> Self {
        let base = base.trim_end_matches('/');
        Settings {
            client_id: "client-id".to_string(),
            client_secret: "client-secret".to_string(),
            api_url: format!("{base}/v1"),
            auth_url: format!("{base}/authorize"),
            token_url: format!("{base}/api/token"),
            redirect_uri: format!("{base}/callback"),
            server_address: "127.0.0.1:0".to_string(),
            token_path,
            state: OAUTH_STATE.to_string(),
        }
    }

    pub fn scope(&self) -> String {
        SCOPES.join(" ")
    }
}

/// `<home>/spotify_token.json`
pub fn default_token_path() -> Res<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| PlayError::Config("cannot locate home directory".to_string()))?;
    Ok(home.join(TOKEN_FILE_NAME))
}

fn required(key: &str) -> Res<String> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(PlayError::Config(format!("{key} must be set"))),
    }
}

fn optional(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
