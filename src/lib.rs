pub mod cli;
pub mod commands;
pub mod core;

use std::process::ExitCode;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::Cli;
use crate::core::state::{default_base_dir, AppState, PublicPaths};

/// Console on stderr plus a daily log file under `log/`.
fn init_logging(paths: &PublicPaths, verbose: bool) -> Option<WorkerGuard> {
    let default_filter = if verbose {
        "info,analyzer_lib=debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    let log_dir = paths.log_dir();
    let file = match std::fs::create_dir_all(&log_dir) {
        Ok(()) => {
            let appender = tracing_appender::rolling::daily(&log_dir, "analyzer.log");
            Some(tracing_appender::non_blocking(appender))
        }
        Err(e) => {
            eprintln!("Cannot create log directory {:?}: {e}", log_dir);
            None
        }
    };

    let (file_layer, guard) = match file {
        Some((writer, guard)) => (
            Some(fmt::layer().with_ansi(false).with_writer(writer)),
            Some(guard),
        ),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .init();

    guard
}

pub async fn run(cli: Cli) -> ExitCode {
    let paths = PublicPaths::new(cli.base_dir.clone().unwrap_or_else(default_base_dir));
    let _guard = init_logging(&paths, cli.verbose);

    tracing::info!("Analyzer starting (base dir {:?})", paths.base_dir);

    let state = match AppState::load(paths) {
        Ok(state) => state,
        Err(e) => {
            commands::report_failure(&e);
            return ExitCode::FAILURE;
        }
    };

    match commands::install(&state, &cli).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            commands::report_failure(&e);
            ExitCode::FAILURE
        }
    }
}
