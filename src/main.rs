use std::process::ExitCode;

use clap::Parser;
use restful::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    match restful::cmd::run::execute(Cli::parse().run).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
