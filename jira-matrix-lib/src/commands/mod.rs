//! Command-line interface and orchestration for jira-matrix
//!
//! This module implements the CLI commands and ties the other modules together
//! to perform the end-to-end fetch, aggregation, and report generation.
//!
//! # Commands
//!
//! - **report**: Run the four configured Jira queries one after another, count the
//!   matching issues by type, build the status matrix, and write it to an Excel file
//! - **init**: Generate a default configuration file
//! - **validate**: Check a configuration file for syntax and value errors
//!
//! ## Execution Flow
//!
//! The `run` function parses command-line arguments using clap and routes
//! to the appropriate command handler. The report command follows these steps:
//!
//! 1. Set up logging and load configuration
//! 2. Fetch the issue type counts for each query set
//! 3. Derive the Reviewed, Pending, and Overall aggregates
//! 4. Render and save the spreadsheet
//!
//! Configuration is a TOML file holding the Jira base URL, the four JQL queries, and
//! the presentation settings. The Jira token only ever comes from the command line
//! or the `JIRA_TOKEN` environment variable.

mod common;
mod config;
mod host;
mod init;
mod report;
mod run;
mod validate;

pub use common::LogLevel;
pub use config::{Config, DEFAULT_CONFIG_FILE, DEFAULT_CONFIG_TOML, Queries};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use report::{ReportArgs, generate_report};
pub use run::run;
pub use validate::{ValidateArgs, validate_config};
