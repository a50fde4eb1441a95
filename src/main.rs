use std::{io, time::Duration};

use clap::{
    CommandFactory, Parser,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::EnvFilter;

use playcli::{cli, config, config::Settings, error, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Regenerate OAuth2 token
    #[clap(long)]
    login: bool,

    /// List songs before playing
    #[clap(short = 'l', long = "list")]
    list: bool,

    /// Select active player
    #[clap(short = 'p', long = "player")]
    player: bool,

    /// Stop waiting for the browser login after this many seconds
    #[clap(long, value_name = "SECS")]
    login_timeout: Option<u64>,

    /// Print shell completions and exit
    #[clap(long, value_name = "SHELL", hide = true)]
    completions: Option<Shell>,

    /// Words to search for
    #[clap(trailing_var_arg = true, allow_hyphen_values = true)]
    query: Vec<String>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    config::load_env();

    let raw_args: Vec<String> = std::env::args().collect();
    let opts = Cli::parse_from(cli::normalize_args(raw_args.clone()));

    if let Some(shell) = opts.completions {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!("Cannot load configuration. Err: {}", e),
    };

    let outcome = if opts.login {
        let timeout = opts.login_timeout.map(Duration::from_secs);
        cli::login(&settings, timeout).await
    } else if opts.player {
        cli::select_player(settings, &mut io::stdout(), &mut io::stdin().lock()).await
    } else {
        let query = cli::query_from_args(&raw_args, opts.list);
        cli::search_and_play(
            settings,
            &query,
            opts.list,
            &mut io::stdout(),
            &mut io::stdin().lock(),
        )
        .await
    };

    match outcome {
        Ok(()) => {}
        Err(e) if e.is_graceful() => {
            tracing::debug!(error = %e, "no usable token");
            warning!("No token detected. Please run with -login flag.");
        }
        Err(e) => error!("{}", e),
    }
}
