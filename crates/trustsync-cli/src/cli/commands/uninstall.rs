//! `trustsync uninstall` - remove a CA from every browser NSS database.

use anyhow::Result;
use colored::Colorize;

use trustsync::{TrustError, Uninstallation};

use super::Context;
use crate::cli::args::CertArgs;

pub fn execute(ctx: &Context, args: &CertArgs) -> Result<()> {
    let outcome = ctx.reconciler().uninstall(&args.cert);

    if !ctx.output_format().print_structured(&outcome)? {
        print_pretty(ctx, &outcome);
    }

    if outcome.is_success() {
        return Ok(());
    }
    match outcome {
        Uninstallation::ToolUnavailable => Err(TrustError::ToolUnavailable.into()),
        Uninstallation::InvalidCertificate { path, reason } => {
            Err(TrustError::Certificate { path, reason }.into())
        }
        Uninstallation::UnsupportedPlatform | Uninstallation::Removed { .. } => {
            anyhow::bail!("the CA could not be removed from any NSS database")
        }
    }
}

fn print_pretty(ctx: &Context, outcome: &Uninstallation) {
    match outcome {
        Uninstallation::UnsupportedPlatform => {
            println!(
                "No browser trust stores to update on {}.",
                ctx.settings.platform.to_string().cyan()
            );
        }
        Uninstallation::ToolUnavailable => {
            println!(
                "{} certutil not found. Install it with: {}",
                "Warning:".yellow().bold(),
                ctx.settings.platform.certutil_hint()
            );
        }
        Uninstallation::InvalidCertificate { path, reason } => {
            println!("{} {}: {reason}", "Error:".red().bold(), path.display());
        }
        Uninstallation::Removed { removed, failed } => {
            if removed.is_empty() && failed.is_empty() {
                println!("No NSS databases found.");
            }
            for db in removed {
                println!("  {} {}", "removed".green(), db.reference());
            }
            for db in failed {
                println!("  {} {}", "failed ".red(), db.reference());
            }
        }
    }
}
