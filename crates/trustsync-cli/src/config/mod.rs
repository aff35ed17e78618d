//! Effective settings.
//!
//! There is no configuration file: every setting comes from a flag or its
//! environment variable, with home directory and platform detected when
//! not given.

use anyhow::Result;
use directories::BaseDirs;
use serde::Serialize;
use std::path::PathBuf;

use trustsync::{Platform, ProfileLocator, TrustReconciler, UtilityResolver};

use crate::cli::args::Cli;
use crate::output::OutputFormat;

/// Settings after layering flags, environment and detection.
#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    /// Home directory searched for browser profiles.
    pub home: PathBuf,

    /// Explicit certutil path, if any.
    pub certutil: Option<PathBuf>,

    /// Tracing filter.
    pub log_level: String,

    /// Output format.
    pub output_format: OutputFormat,

    /// Detected platform.
    pub platform: Platform,
}

impl Settings {
    /// Build settings from parsed arguments.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let home = match &cli.home {
            Some(home) => home.clone(),
            None => default_home()?,
        };

        Ok(Self {
            home,
            certutil: cli.certutil.clone(),
            log_level: cli.log_level.clone(),
            output_format: cli.output.unwrap_or_default(),
            platform: Platform::current(),
        })
    }

    /// A reconciler over this user's databases.
    ///
    /// Without `--certutil` the process-wide resolver is used.
    pub fn reconciler(&self) -> TrustReconciler {
        let reconciler = TrustReconciler::new(
            ProfileLocator::new(&self.home, self.platform.clone()),
            trustsync::SystemRunner,
        );
        match &self.certutil {
            Some(path) => reconciler.with_resolver(UtilityResolver::with_override(path)),
            None => reconciler,
        }
    }
}

fn default_home() -> Result<PathBuf> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| anyhow::anyhow!("Could not determine home directory; pass --home"))?;
    Ok(dirs.home_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn flags_override_detection() {
        let cli = Cli::try_parse_from([
            "trustsync",
            "--home",
            "/home/dev",
            "--certutil",
            "/opt/nss/bin/certutil",
            "--output",
            "json",
            "stores",
        ])
        .unwrap();
        let settings = Settings::resolve(&cli).unwrap();
        assert_eq!(settings.home, PathBuf::from("/home/dev"));
        assert_eq!(
            settings.certutil,
            Some(PathBuf::from("/opt/nss/bin/certutil"))
        );
        assert_eq!(settings.output_format, OutputFormat::Json);
        assert_eq!(settings.platform, Platform::current());
    }

    #[test]
    fn reconciler_uses_configured_home() {
        let cli = Cli::try_parse_from(["trustsync", "--home", "/srv/u", "settings"]).unwrap();
        let settings = Settings::resolve(&cli).unwrap();
        let reconciler = settings.reconciler();
        assert_eq!(reconciler.locator().home(), std::path::Path::new("/srv/u"));
        assert!(std::ptr::eq(
            reconciler.resolver(),
            trustsync::shared_resolver()
        ));
    }

    #[test]
    fn certutil_flag_gets_its_own_resolver() {
        let cli = Cli::try_parse_from([
            "trustsync",
            "--home",
            "/srv/u",
            "--certutil",
            "/opt/certutil",
            "stores",
        ])
        .unwrap();
        let settings = Settings::resolve(&cli).unwrap();
        let reconciler = settings.reconciler();
        assert!(!std::ptr::eq(
            reconciler.resolver(),
            trustsync::shared_resolver()
        ));
    }
}
