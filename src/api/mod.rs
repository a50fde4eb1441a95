//! # API Module
//!
//! HTTP handlers served by the short-lived login listener.
//!
//! ## Endpoints
//!
//! - [`callback`] - Receives Spotify's redirect after the user authorizes the
//!   app. It checks the `state` parameter, exchanges the `code` for a token,
//!   saves the token and hands the result to the waiting login flow.
//! - [`health`] - Reports that the listener is up, with the crate version.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Extension, Router, routing::get};
//! use playcli::api::{CallbackState, callback, health};
//!
//! let (state, done) = CallbackState::new(settings, store, http);
//! let app = Router::new()
//!     .route("/callback", get(callback).post(callback).layer(Extension(state)))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::CallbackState;
pub use callback::callback;
pub use health::health;
