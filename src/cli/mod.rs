//! # CLI Module
//!
//! Command-line front end for the `daogen` binary.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! ```bash
//! daogen generate schema.sql --lang go --output internal/store --name billing-api
//! ```
//!
//! Options:
//! - `--lang <LANG>` - rust, cpp, python or go (aliases: rs, c++, py, golang)
//! - `--output <DIR>` - output directory (default: `./src`)
//! - `--name <NAME>` - service/module name (default: `service`)
//! - `--config <FILE>` - `daogen.toml` to use instead of the one next to the schema
//! - `--continue-on-error` - report every failed write instead of stopping at the first
//! - `--dry-run` - list the files that would be written
//!
//! ### `inspect`
//!
//! ```bash
//! daogen inspect schema.sql --format yaml
//! ```
//!
//! ### `backends`
//!
//! Lists each backend with its type catalog.
//!
//! ## Exit Codes
//!
//! - `0` - success
//! - `1` - render or write failure
//! - `2` - bad arguments: missing schema, unsupported language
//! - `130` - interrupted between tables

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{describe_backends, render_inspect, run_cli, Cli, Commands, InspectFormat};
