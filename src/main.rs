//! # kedit
//!
//! A small desktop text editor with a custom titlebar.
//!
//! ```bash
//! # Open an empty buffer
//! cargo run --features sdl
//!
//! # Open a file
//! cargo run --features sdl -- notes.txt
//! ```

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kedit_core::Config;
use kedit_ui::{run, Flags};

/// kedit - a small desktop text editor
#[derive(Parser, Debug)]
#[command(name = "kedit")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File to open
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    tracing::info!("starting kedit v{}", env!("CARGO_PKG_VERSION"));

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };

    let flags = Flags {
        file: args.file,
        config,
    };

    run(flags)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invocation_parses() {
        let args = Args::parse_from(["kedit"]);
        assert!(args.file.is_none());
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn file_and_verbosity_parse() {
        let args = Args::parse_from(["kedit", "-vv", "notes.txt"]);
        assert_eq!(args.file, Some(PathBuf::from("notes.txt")));
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn explicit_config_path_parses() {
        let args = Args::parse_from(["kedit", "--config", "kedit.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("kedit.toml")));
    }
}
