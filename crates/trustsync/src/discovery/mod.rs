//! Trust store discovery: browser profiles and NSS database classification.

pub mod classify;
pub mod profiles;

pub use classify::{classify, classify_path};
pub use profiles::{ProfileLocator, SHARED_NSSDB};
