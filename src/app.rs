//! Process-level helpers for the entry point: exit codes, logging, hints.

use netchange::config::ConfigError;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1).
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2): registration failure, unsupported platform.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Points the user at `netchange init` when the config file is the problem.
pub fn print_config_hint(error: &ConfigError) {
    match error {
        ConfigError::FileRead { .. } => {
            eprintln!("\nRun 'netchange init' to generate a configuration template.");
        }
        ConfigError::TomlParse(_) => {
            eprintln!("\nCompare with the template written by 'netchange init'.");
        }
        _ => {}
    }
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` overrides the level chosen by `verbose`. Thread ids are shown
/// because change callbacks arrive on OS-owned threads.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(verbose)
        .init();
}
