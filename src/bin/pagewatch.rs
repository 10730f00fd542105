//! Query a URL for content, optionally polling it for changes.

use std::time::Duration;

use anyhow::Context;
use clap::{ArgAction, Parser};
use regex::Regex;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use url::Url;

#[cfg(target_os = "macos")]
use pagewatch::SystemSound;
use pagewatch::{ClientConfig, Notifier, PageFetcher, Query, Selector, Watcher};

const EXAMPLES: &str = "\
examples:
  pagewatch \"https://www.rust-lang.org\" -q \".hero h1\"
  pagewatch \"https://www.rust-lang.org\" -r \"Rust [0-9.]+\"
  pagewatch \"https://time.is\" -w -u -i 5
  pagewatch \"https://time.is\" -q time -i 5";

/// Query a URL for content and watch it for changes.
#[derive(Debug, Parser)]
#[command(version, about, after_help = EXAMPLES)]
struct Cli {
    /// An URL to request
    url: Url,

    /// Match the whole response body (ignore --query and --regex)
    #[arg(short, long)]
    whole: bool,

    /// A CSS-like selector to query (supports `tag`, `.class` and `#id`)
    #[arg(short, long, value_name = "SELECTOR")]
    query: Option<String>,

    /// A regular expression, standalone or filtering the queried node
    #[arg(short, long, value_name = "REGEX")]
    regex: Option<Regex>,

    /// Interval between queries in seconds; omit to query once
    #[arg(short, long, value_name = "SECONDS")]
    interval: Option<u64>,

    /// Retry until the match changes, then exit
    #[arg(short, long)]
    until_change: bool,

    /// Sound to play on change (see `ls /System/Library/Sounds`)
    #[cfg(target_os = "macos")]
    #[arg(short, long, default_value = "pop")]
    sound: SystemSound,

    /// Verbose output (repeat for debug logging)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Three tiers: plain messages, timestamped info, timestamped debug.
/// `RUST_LOG` overrides the level when set.
fn init_logging(verbosity: u8) {
    let default_directive = if verbosity >= 2 { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);
    if verbosity == 0 {
        builder.without_time().init();
    } else {
        builder.init();
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    debug!("{cli:?}");

    #[cfg(target_os = "macos")]
    let sound = Some(cli.sound);
    #[cfg(not(target_os = "macos"))]
    let sound = None;

    let fetcher =
        PageFetcher::new(&ClientConfig::default()).context("could not set up the HTTP client")?;
    let query = Query {
        whole_body: cli.whole,
        selector: cli.query.as_deref().map(Selector::parse),
        regex: cli.regex,
    };
    let watcher = Watcher::new(
        fetcher,
        query,
        Notifier::new(sound),
        cli.url,
        cli.interval.map(Duration::from_secs),
        cli.until_change,
    );
    watcher.run()?;
    Ok(())
}
