use std::process::ExitCode;

use analyzer_lib::cli::Cli;
use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    analyzer_lib::run(Cli::parse()).await
}
