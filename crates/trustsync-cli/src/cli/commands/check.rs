//! `trustsync check` - is the CA trusted anywhere?

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use trustsync::{read_certificate, TrustError};

use super::Context;
use crate::cli::args::CertArgs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Trusted,
    NotTrusted,
    UnsupportedPlatform,
    ToolUnavailable,
}

#[derive(Serialize)]
struct CheckReport {
    identity: String,
    status: CheckStatus,
    trusted: bool,
    databases: usize,
    certutil: Option<String>,
}

pub fn execute(ctx: &Context, args: &CertArgs) -> Result<()> {
    let cert = read_certificate(&args.cert)?;
    let reconciler = ctx.reconciler();
    let platform = &ctx.settings.platform;

    let certutil = reconciler.utility().map(|p| p.display().to_string());
    let status = if !platform.is_supported() {
        CheckStatus::UnsupportedPlatform
    } else if certutil.is_none() {
        tracing::warn!(
            hint = platform.certutil_hint(),
            "certutil not found, cannot check browser trust stores"
        );
        CheckStatus::ToolUnavailable
    } else if reconciler.is_trusted(&cert) {
        CheckStatus::Trusted
    } else {
        CheckStatus::NotTrusted
    };

    let report = CheckReport {
        identity: cert.identity(),
        status,
        trusted: status == CheckStatus::Trusted,
        databases: reconciler.databases().len(),
        certutil,
    };

    if !ctx.output_format().print_structured(&report)? {
        print_pretty(ctx, &report);
    }

    match status {
        CheckStatus::Trusted | CheckStatus::UnsupportedPlatform => Ok(()),
        CheckStatus::ToolUnavailable => Err(TrustError::ToolUnavailable.into()),
        CheckStatus::NotTrusted => anyhow::bail!(
            "certificate is not trusted; run `trustsync install {}`",
            args.cert.display()
        ),
    }
}

fn print_pretty(ctx: &Context, report: &CheckReport) {
    match report.status {
        CheckStatus::Trusted => {
            println!("{} {} is trusted.", "✓".green().bold(), report.identity.cyan());
        }
        CheckStatus::NotTrusted => {
            println!(
                "{} {} is not trusted by any of {} NSS database(s).",
                "✗".red().bold(),
                report.identity.cyan(),
                report.databases
            );
        }
        CheckStatus::UnsupportedPlatform => {
            println!(
                "No browser trust stores to check on {}.",
                ctx.settings.platform.to_string().cyan()
            );
        }
        CheckStatus::ToolUnavailable => {
            println!(
                "{} certutil not found, so trust could not be checked. Install it with: {}",
                "Warning:".yellow().bold(),
                ctx.settings.platform.certutil_hint()
            );
        }
    }
}
