//! # trustsync-cli
//!
//! Command-line front end for the trustsync reconciliation engine.
//!
//! ## Features
//!
//! - **install / uninstall**: add or remove a CA in every browser NSS database
//! - **check**: report whether any database already trusts a CA
//! - **stores**: list the NSS databases that would be touched
//! - **Multiple output formats**: pretty, JSON, YAML

pub mod cli;
pub mod config;
pub mod logging;
pub mod output;

pub use cli::run;
