//! Spotify Search-and-Play CLI Library
//!
//! This library provides the pieces behind the `playcli` binary: a one-shot
//! OAuth login with a local callback listener, a token file on disk, an
//! authenticated session against the Spotify Web API, and the console
//! presentation used to pick tracks and devices.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the local callback server
//! - `cli` - Command implementations (login, player selection, search and play)
//! - `config` - Environment loading and the `Settings` struct
//! - `error` - The crate-wide `PlayError` type
//! - `management` - Token persistence
//! - `presenter` - Console rendering and numeric prompts
//! - `server` - Local HTTP server for the OAuth callback
//! - `spotify` - Spotify Web API client
//! - `types` - Data structures and wire types

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod presenter;
pub mod server;
pub mod spotify;
pub mod types;

pub use error::PlayError;

/// Result alias used across the library.
pub type Res<T> = std::result::Result<T, PlayError>;

/// Prints an informational message with a blue bullet point.
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates the process with exit code 1. Library code returns
/// [`PlayError`] instead; only the binary decides to exit.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
