//! `trustsync stores` - list the working set.

use anyhow::Result;
use colored::Colorize;

use super::Context;

pub fn execute(ctx: &Context) -> Result<()> {
    let databases = ctx.reconciler().databases();

    if ctx.output_format().print_structured(&databases)? {
        return Ok(());
    }

    if databases.is_empty() {
        println!("No NSS databases found under {}.", ctx.settings.home.display());
        println!();
        println!(
            "{}",
            "Start Firefox or Chromium once to create a profile.".dimmed()
        );
        return Ok(());
    }

    println!("{}", "NSS Databases:".bold());
    for db in &databases {
        println!(
            "  {:<9} {:<4} {}",
            db.kind.to_string().cyan(),
            db.format.prefix().trim_end_matches(':'),
            db.path.display()
        );
    }
    Ok(())
}
