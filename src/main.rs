//
//  github-explorer
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use github_explorer::cli::Cli;
use github_explorer::exit_codes;

#[tokio::main]
async fn main() {
    // Initialize logging
    init_logging();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Run the report and exit
    match cli.run().await {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            if console::colors_enabled_stderr() {
                eprintln!("{} {e:#}", console::style("Error:").red().bold());
            } else {
                eprintln!("Error: {e:#}");
            }
            std::process::exit(exit_codes::ERROR);
        }
    }
}

/// Initialize logging from `EXPLORER_LOG`, defaulting to `info`, on stderr.
fn init_logging() {
    let filter = EnvFilter::try_from_env("EXPLORER_LOG")
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
