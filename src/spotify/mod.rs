//! # Spotify Integration Module
//!
//! Thin client for the parts of the Spotify Web API that playcli uses.
//!
//! ```text
//! cli (login / player / search)
//!          ↓
//! spotify::auth     spotify::Session
//!   authorize URL     search, play, resume
//!   code exchange     devices, transfer playback
//!   token refresh     album art download
//!          ↓
//! reqwest → accounts.spotify.com / api.spotify.com
//! ```
//!
//! - [`auth`] - Authorization-code login with a local callback listener,
//!   code exchange and refresh. The client secret is sent with HTTP basic
//!   auth, so no PKCE verifier is involved.
//! - [`Session`] - An authenticated handle built from a stored token. Every
//!   call checks the token first and refreshes it when it is about to expire.
//!
//! Errors are returned as [`crate::PlayError`]; nothing here retries.

pub mod auth;
mod session;

pub use session::Session;
