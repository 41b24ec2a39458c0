//! tabsmith CLI
//!
//! Command-line interface for the tabsmith bash completion generator.

use clap::Parser;
use tabsmith_cli::{Cli, Commands};
use tabsmith_core::TabsmithError;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        if e.is_model_error() {
            eprintln!("The command model was rejected; nothing was written.");
        }
        std::process::exit(e.exit_code());
    }
}

fn run() -> Result<(), TabsmithError> {
    let cli = Cli::parse();

    // Initialize logging; stdout may carry a generated script
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Execute command
    match cli.command {
        Commands::Generate(cmd) => {
            cmd.execute()?;
        }
        Commands::Init(cmd) => {
            cmd.execute()?;
        }
        Commands::Completion(cmd) => {
            cmd.execute()?;
        }
    }

    Ok(())
}
