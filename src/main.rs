use anyhow::{Context as _, Result};
use clap::Parser;
use colored::Colorize;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use fitclock::cli::args::{Cli, Commands};
use fitclock::cli::commands::{self, Context};
use fitclock::config::{Config, Paths};

/// Environment variable holding a tracing filter, e.g. `fitclock=debug`.
const LOG_ENV: &str = "FITCLOCK_LOG";

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let paths = Paths::new()?;
    paths.ensure_dirs()?;
    let config = Config::load_from_path(&paths.config_file)
        .with_context(|| format!("loading {}", paths.config_file.display()))?;
    config.general.color.apply();

    let _guard = init_logging(&paths, &config, cli.verbose);

    let format = cli.output.unwrap_or(config.general.default_output);
    let ctx = Context::new(paths, config, format);
    tracing::debug!(?format, "dispatching command");

    let output = match cli.command {
        Commands::Workout(args) => commands::workout(&ctx, args.command)?,
        Commands::Plan(args) => commands::plan(&ctx, args.command)?,
        Commands::Exercise(args) => commands::exercise(&ctx, args.command)?,
        Commands::History(args) => commands::history(&ctx, args.command)?,
        Commands::Profile(args) => commands::profile(&ctx, args.command)?,
        Commands::Completions { shell } => commands::completions(shell),
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

/// Log to a daily file under the data root. The terminal belongs to the timer.
fn init_logging(paths: &Paths, config: &Config, verbose: bool) -> WorkerGuard {
    let file_appender = tracing_appender::rolling::daily(&paths.logs, "fitclock.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("fitclock=debug")
        } else {
            EnvFilter::try_new(&config.general.log_level).unwrap_or_else(|_| EnvFilter::new("info"))
        }
    });

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(filter)
        .init();

    guard
}
