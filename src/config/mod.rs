//! Configuration for the netchange binary.
//!
//! Settings come from three places; the first one that has a value wins:
//!
//! 1. Command-line flags ([`Cli`])
//! 2. The `[monitor]` table of an optional TOML file ([`TomlConfig`])
//! 3. Built-in values ([`defaults`])
//!
//! The merged result is a [`ValidatedConfig`]. `netchange init` writes a
//! commented template via [`write_default_config`].
//!
//! `--verbose` exists only on the command line. The event queue holds a
//! single pending event and has no setting.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod cli_tests;
#[cfg(test)]
mod toml_tests;

pub use cli::{Cli, Command};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
