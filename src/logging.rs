use std::str::FromStr;

use clap::Args;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

#[derive(Args, Clone, Copy, Debug, Default)]
#[command(next_help_heading = "Log Options")]
pub struct LogArgs {
    /// Increase logging verbosity (-v INFO, -vv DEBUG, -vvv TRACE)
    ///
    /// `RUST_LOG` takes precedence when it names a valid level.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbosity: u8,

    /// Only log errors; overrides --verbosity and `RUST_LOG`
    #[arg(short, long, global = true)]
    quiet: bool,
}

fn log_level(args: LogArgs, rust_log: Option<&str>) -> LevelFilter {
    if args.quiet {
        return LevelFilter::ERROR;
    }

    if let Some(level) = rust_log.and_then(|value| LevelFilter::from_str(value).ok()) {
        return level;
    }

    match args.verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Sends diagnostics to stderr so stdout carries only command output.
pub fn init(args: LogArgs) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let level = log_level(args, rust_log.as_deref());

    tracing_subscriber::fmt()
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
