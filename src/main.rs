//! nvme-target-control CLI
//!
//! Usage:
//!   nvme-target-control setup --subsysnqn S --subsys-uuid U --hostnqn H [--ctrlkey K] [--hostkey K]
//!   nvme-target-control cleanup --subsysnqn S
//!   nvme-target-control config --show-<field>

use std::io;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use nvme_target_control::Cli;

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr, stdout is reserved for `config` output
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = nvme_target_control::run(&cli, &mut io::stdout().lock()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
