//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Make Firefox and Chromium trust your development CA
///
/// Finds every NSS certificate database under your home directory and
/// installs, checks or removes a root certificate with certutil.
#[derive(Parser, Debug)]
#[command(name = "trustsync")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Home directory to search for browser profiles
    #[arg(long, env = "TRUSTSYNC_HOME", global = true)]
    pub home: Option<PathBuf>,

    /// Path to certutil, tried before the built-in locations
    #[arg(long, env = "TRUSTSYNC_CERTUTIL", global = true)]
    pub certutil: Option<PathBuf>,

    /// Log filter (trace, debug, info, warn, error)
    #[arg(long, env = "TRUSTSYNC_LOG", default_value = "info", global = true)]
    pub log_level: String,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install a CA certificate into every browser NSS database
    Install(CertArgs),

    /// Check whether any NSS database already trusts a CA certificate
    Check(CertArgs),

    /// Remove a CA certificate from every browser NSS database
    Uninstall(CertArgs),

    /// List the NSS databases that would be touched
    Stores,

    /// Print the nickname a certificate is stored under
    Identity(CertArgs),

    /// Show the effective settings
    Settings,
}

#[derive(Args, Debug)]
pub struct CertArgs {
    /// PEM or DER encoded CA certificate
    pub cert: PathBuf,
}
