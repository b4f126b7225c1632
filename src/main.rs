//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `wire_client` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Options file loading
//! - Printing the response
//!
//! All request handling is implemented in the library crate.

use std::io::Write;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use wire_client::config::Cli;
use wire_client::initialization::{init_logger_with, load_client_options};
use wire_client::{ClientOptions, HttpClient, ReqwestTransport};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    let base = match &cli.options {
        Some(path) => load_client_options(path)
            .with_context(|| format!("Failed to load options from {}", path.display()))?,
        None => ClientOptions::default(),
    };
    let options = cli.client_options(base);
    let request = cli.build_request().context("Invalid request")?;

    let client = HttpClient::new(ReqwestTransport::new(), options);
    let response = match client.send(request).await {
        Ok(response) => response,
        Err(e) => {
            eprintln!("wire_client error: {:#}", e);
            process::exit(1);
        }
    };
    client.stats().log_summary();

    let mut stdout = std::io::stdout().lock();
    if cli.include {
        writeln!(
            stdout,
            "HTTP/{} {} {}",
            response.protocol_version(),
            response.status_code(),
            response.reason_phrase()
        )?;
        for (name, value) in response.headers().pairs() {
            writeln!(stdout, "{}: {}", name, value)?;
        }
        writeln!(stdout)?;
    }
    stdout.write_all(response.body().as_bytes())?;
    stdout.flush()?;

    Ok(())
}
