//! `trustsync install` - add a CA to every browser NSS database.

use anyhow::Result;
use colored::Colorize;

use trustsync::Reconciliation;

use super::Context;
use crate::cli::args::CertArgs;

pub fn execute(ctx: &Context, args: &CertArgs) -> Result<()> {
    let reconciler = ctx.reconciler();
    let outcome = reconciler.reconcile_to(&args.cert, &mut std::io::stderr().lock());

    if !ctx.output_format().print_structured(&outcome)? {
        print_pretty(ctx, &outcome);
    }

    match outcome.error() {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

fn print_pretty(ctx: &Context, outcome: &Reconciliation) {
    match outcome {
        Reconciliation::UnsupportedPlatform => {
            println!(
                "No browser trust stores to update on {}.",
                ctx.settings.platform.to_string().cyan()
            );
        }
        Reconciliation::AlreadyTrusted => {
            println!("{} The CA is already trusted by your browsers.", "✓".green().bold());
        }
        Reconciliation::Installed { databases } => {
            println!(
                "{} Installed the CA in {} NSS database(s):",
                "✓".green().bold(),
                databases.len()
            );
            for db in databases {
                println!("  {:<9} {}", db.kind.to_string().cyan(), db.reference());
            }
            println!(
                "{}",
                "Restart Firefox/Chromium for the change to take effect.".dimmed()
            );
        }
        Reconciliation::ToolUnavailable => {
            println!(
                "{} certutil not found. Install it with: {}",
                "Warning:".yellow().bold(),
                ctx.settings.platform.certutil_hint()
            );
        }
        Reconciliation::InvalidCertificate { path, reason } => {
            println!("{} {}: {reason}", "Error:".red().bold(), path.display());
        }
        Reconciliation::NoTrustStoresFound => {
            println!(
                "{} No NSS database accepted the CA. If certutil is missing, install it with: {}",
                "Error:".red().bold(),
                ctx.settings.platform.certutil_hint()
            );
        }
    }
}
