//! Core types and errors for trustsync.
//!
//! This crate provides the foundational types shared by the reconciliation
//! engine and the command-line front end:
//!
//! - **Types**: platforms, browser profiles, classified NSS databases, and
//!   the records kept for every external command invocation
//! - **Errors**: the [`TrustError`] taxonomy and its [`Result`] alias
//!
//! # Example
//!
//! ```rust
//! use trustsync_core::{DbFormat, NssDatabase, StoreKind};
//!
//! let db = NssDatabase::new("/home/dev/.pki/nssdb", DbFormat::Sql, StoreKind::Shared);
//! assert_eq!(db.reference(), "sql:/home/dev/.pki/nssdb");
//! ```

#![doc(html_root_url = "https://docs.rs/trustsync-core/0.1.0")]

mod error;
pub mod types;

pub use error::{Result, TrustError};
pub use types::*;
