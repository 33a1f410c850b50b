//! netchange: network change monitor
//!
//! Logs every IP address or routing table change the operating system
//! reports, until Ctrl+C or the configured event limit.

use std::path::Path;
use std::process::ExitCode;

use netchange::config::{Cli, Command, ConfigError, ValidatedConfig, write_default_config};

mod app;
mod run;

use app::{exit_code, print_config_hint, setup_tracing};

#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match &cli.command {
        Some(Command::Init { output }) => init(output),
        None => match ValidatedConfig::load(&cli) {
            Ok(config) => start(config),
            Err(e) => config_failure(&e),
        },
    }
}

/// Writes the configuration template for `netchange init`.
fn init(output: &Path) -> ExitCode {
    if let Err(e) = write_default_config(output) {
        return config_failure(&e);
    }

    println!("Configuration template written to: {}", output.display());
    exit_code::SUCCESS
}

fn config_failure(error: &ConfigError) -> ExitCode {
    eprintln!("Configuration error: {error}");
    print_config_hint(error);
    exit_code::CONFIG_ERROR
}

/// Installs logging, builds the runtime and runs the monitor to completion.
///
/// Excluded from coverage - requires async runtime.
#[cfg(not(tarpaulin_include))]
fn start(config: ValidatedConfig) -> ExitCode {
    setup_tracing(config.verbose);
    tracing::info!("{config}");

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Failed to create Tokio runtime: {e}");
            return exit_code::runtime_error();
        }
    };

    if let Err(e) = runtime.block_on(run::execute(config)) {
        tracing::error!("{e}");
        return exit_code::runtime_error();
    }

    exit_code::SUCCESS
}
