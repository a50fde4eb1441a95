//! # CLI Module
//!
//! Command implementations behind the `playcli` binary. Each command runs
//! once per process and returns a [`crate::Res`]; the binary turns the
//! outcome into an exit code.
//!
//! ## Commands
//!
//! - [`login`] - Runs the browser login and replaces the token file
//! - [`select_player`] - Lists devices and transfers playback to the chosen one
//! - [`search_and_play`] - Searches tracks and plays the first or chosen result
//!
//! ## Usage Patterns
//!
//! ```bash
//! playcli -login                 # Authenticate with Spotify
//! playcli -p                     # Pick the device to play on
//! playcli beatles yesterday      # Play the best match
//! playcli -l beatles yesterday   # Choose from the top results
//! ```

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

mod auth;
mod play;
mod player;

pub use auth::login;
pub use play::search_and_play;
pub use player::select_player;

/// Rewrites the legacy single-dash `-login` flag to `--login` so clap does
/// not read it as a bundle of short flags.
pub fn normalize_args(args: impl IntoIterator<Item = String>) -> Vec<String> {
    args.into_iter()
        .map(|arg| {
            if arg == "-login" {
                "--login".to_string()
            } else {
                arg
            }
        })
        .collect()
}

/// Rebuilds the search query from the raw argument vector.
///
/// Words are taken from index 1 onward, or from index 2 onward when the
/// result list was requested with `-l`, matching how the flag is expected
/// to lead the command line.
pub fn query_from_args(args: &[String], list: bool) -> String {
    let start = if list { 2 } else { 1 };
    args.get(start..).unwrap_or_default().join(" ")
}

fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
