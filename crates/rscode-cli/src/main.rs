//! Reed-Solomon FEC CLI
//!
//! Protects hex telemetry payloads for the ground-station link.
//!
//! Usage:
//!   rscode encode <hex_payload>
//!   rscode decode <hex_codeword> <num_parity_bytes> [--prefix-bytes N] [--json]
//!
//! Exit codes: 0 success, 1 invalid hex, 2 too corrupt to correct,
//! 3 inconsistent sizes, 64 usage error, 74 stdout write failure.

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use fec_orchestrator::ExitSignal;
use std::io;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

use commands::Cli;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitSignal::Success,
                _ => ExitSignal::Usage,
            }
            .into();
        }
    };

    if let Err(err) = init_tracing(cli.verbose) {
        eprintln!("logging unavailable: {err:#}");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::run(&cli, &mut out).into()
}

/// Diagnostics go to stderr so stdout carries nothing but the result.
fn init_tracing(verbose: bool) -> Result<()> {
    let default = if verbose {
        "debug"
    } else {
        "rscode=info,fec_orchestrator=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false),
        )
        .try_init()?;
    Ok(())
}
