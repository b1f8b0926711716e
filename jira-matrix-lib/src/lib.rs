#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for jira-matrix
//!
//! This library holds all of the functionality of the jira-matrix tool, which counts
//! the issues matched by four fixed Jira queries, groups them by issue type, and
//! renders the result as an Excel status matrix.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and orchestration
//! - [`tracker`]: Jira search client and the paginated issue-type fetcher
//! - [`matrix`]: Count mappings, the issue type universe, and derived rows
//! - [`reports`]: Spreadsheet generation

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod commands;
pub mod matrix;
pub mod reports;
pub mod tracker;

pub use crate::commands::{Host, run};
