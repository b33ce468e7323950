use clap::Parser;
use std::process::ExitCode;
use urlguard_runtime::cli::{self, output::Styled, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli::dispatch(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("  {} {e:#}", Styled::new().fail_sym());
            ExitCode::FAILURE
        }
    }
}
