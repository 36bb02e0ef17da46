//! CLI argument models and config-file loading for the console auth bootstrap.
//!
//! Exposes the clap-backed flag surface and the helpers that merge flags with
//! the server config file into raw user-auth options.

pub mod auth_options;
pub mod cli_args;
pub mod cli_types;
pub mod config_file;

pub use auth_options::*;
pub use cli_args::{Cli, CliUserAuthFlags, DEFAULT_K8S_IN_CLUSTER_ENDPOINT};
pub use cli_types::*;
pub use config_file::*;
