//! orguser CLI library.
//!
//! Command-line surface, HTTP client and local state for managing users,
//! permission sets and passwords in an org.

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod store;

pub use client::OrgClient;
pub use config::Config;
pub use error::{CliError, Result};
