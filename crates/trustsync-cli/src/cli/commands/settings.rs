//! `trustsync settings` - show the effective settings.

use anyhow::Result;
use colored::Colorize;

use super::Context;

pub fn execute(ctx: &Context) -> Result<()> {
    let settings = &ctx.settings;
    if ctx.output_format().print_structured(settings)? {
        return Ok(());
    }

    println!("{}", "Current Settings:".bold());
    println!();
    println!("  {} {}", "home:".bold(), settings.home.display());
    let certutil = settings.certutil.as_ref().map_or_else(
        || "(auto-detect)".dimmed().to_string(),
        |p| p.display().to_string(),
    );
    println!("  {} {}", "certutil:".bold(), certutil);
    println!("  {} {}", "log_level:".bold(), settings.log_level);
    println!("  {} {}", "output_format:".bold(), settings.output_format);
    println!("  {} {}", "platform:".bold(), settings.platform);
    Ok(())
}
