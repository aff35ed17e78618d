//! # trustsync
//!
//! Makes a locally generated development root CA trusted by Firefox,
//! Chromium-family browsers and the per-user shared NSS database, without
//! importing it by hand in every browser.
//!
//! ## Data Flow
//!
//! ```text
//! ProfileLocator (firefox / chromium / ~/.pki/nssdb)
//!   -> classify() each candidate (cert9.db => sql:, cert8.db => dbm:)
//!   -> working set of NssDatabase
//!
//! read_certificate() -> CertificateInfo::identity()  (issuer DN + serial)
//!
//! TrustReconciler
//!   UtilityResolver (certutil, memoised)
//!   is_trusted / install / remove across the working set
//!   every certutil run appended to the CommandLog
//! ```
//!
//! Each database is mutated independently. There is no transaction across
//! the working set: a failure on one database is logged and the others are
//! still processed.
//!
//! ## Example
//!
//! ```rust,no_run
//! use trustsync::{SystemRunner, TrustReconciler};
//!
//! let reconciler = TrustReconciler::for_current_user(SystemRunner)?;
//! if !reconciler.reconcile("rootCA.pem".as_ref()) {
//!     eprintln!("browsers will not trust the development CA");
//! }
//! # Ok::<(), trustsync::TrustError>(())
//! ```

#![doc(html_root_url = "https://docs.rs/trustsync/0.1.0")]

pub mod audit;
pub mod certificate;
pub mod discovery;
pub mod reconcile;
pub mod resolver;
pub mod runner;

pub use audit::CommandLog;
pub use certificate::{identity, read_certificate, CertificateInfo};
pub use discovery::{classify, ProfileLocator};
pub use reconcile::{Reconciliation, TrustReconciler, Uninstallation};
pub use resolver::{resolve_utility, shared_resolver, UtilityResolver};
pub use runner::{CommandRunner, SystemRunner};

// Re-export core types
pub use trustsync_core::*;
