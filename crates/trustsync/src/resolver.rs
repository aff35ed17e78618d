//! Locating the `certutil` binary.
//!
//! Probe order, first hit wins:
//!
//! 1. an explicit override path, when configured
//! 2. `certutil` on `PATH` (kept as the bare name)
//! 3. [`HOMEBREW_CERTUTIL`]
//! 4. `brew --prefix nss`, then `<prefix>/bin/certutil`
//!
//! A probe that errors counts as a miss. Finding nothing is a normal
//! outcome on hosts without the NSS tools.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, info};

use crate::runner::{is_executable, CommandRunner, SystemRunner};

/// Name of the NSS certificate database tool.
pub const CERTUTIL: &str = "certutil";

/// Where Homebrew links the `nss` keg's tools on Intel macOS.
pub const HOMEBREW_CERTUTIL: &str = "/usr/local/opt/nss/bin/certutil";

/// Resolves the utility path once and caches the answer, found or not.
#[derive(Debug, Default)]
pub struct UtilityResolver {
    override_path: Option<PathBuf>,
    resolved: OnceLock<Option<PathBuf>>,
}

impl UtilityResolver {
    /// Resolver using the built-in probe list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Probe `path` before the built-in list. It is only accepted if it exists.
    #[must_use]
    pub fn with_override(path: impl Into<PathBuf>) -> Self {
        Self {
            override_path: Some(path.into()),
            resolved: OnceLock::new(),
        }
    }

    /// A resolver whose answer is already known. No probing will happen.
    #[must_use]
    pub fn preset(path: Option<PathBuf>) -> Self {
        Self {
            override_path: None,
            resolved: OnceLock::from(path),
        }
    }

    /// The utility path, probing with `runner` on first call only.
    pub fn resolve(&self, runner: &dyn CommandRunner) -> Option<&Path> {
        self.resolved
            .get_or_init(|| {
                let found = self.probe(runner);
                match &found {
                    Some(path) => info!(path = %path.display(), "using certutil"),
                    None => debug!("certutil not found in any known location"),
                }
                found
            })
            .as_deref()
    }

    /// Whether resolution has already happened.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.resolved.get().is_some()
    }

    fn probe(&self, runner: &dyn CommandRunner) -> Option<PathBuf> {
        if let Some(path) = &self.override_path {
            if path.exists() {
                return Some(path.clone());
            }
            debug!(path = %path.display(), "configured certutil does not exist");
        }

        if runner.command_exists(CERTUTIL) {
            return Some(PathBuf::from(CERTUTIL));
        }

        let homebrew = Path::new(HOMEBREW_CERTUTIL);
        if is_executable(homebrew) {
            return Some(homebrew.to_path_buf());
        }

        brew_prefix(runner)
            .map(|prefix| prefix.join("bin").join(CERTUTIL))
            .filter(|candidate| is_executable(candidate))
    }
}

/// `brew --prefix nss`, or `None` if brew is missing or the lookup fails.
fn brew_prefix(runner: &dyn CommandRunner) -> Option<PathBuf> {
    let args = ["--prefix".to_string(), "nss".to_string()];
    match runner.run(Path::new("brew"), &args) {
        Ok(out) if out.success() => {
            let prefix = out.stdout.trim();
            (!prefix.is_empty()).then(|| PathBuf::from(prefix))
        }
        Ok(out) => {
            debug!(code = ?out.code, "brew --prefix nss failed");
            None
        }
        Err(e) => {
            debug!(error = %e, "brew not available");
            None
        }
    }
}

/// The resolver shared by every default [`TrustReconciler`](crate::TrustReconciler)
/// in the process.
pub fn shared_resolver() -> &'static UtilityResolver {
    static GLOBAL: OnceLock<UtilityResolver> = OnceLock::new();
    GLOBAL.get_or_init(UtilityResolver::new)
}

/// Process-wide utility path, resolved with the system runner on first use.
pub fn resolve_utility() -> Option<&'static Path> {
    shared_resolver().resolve(&SystemRunner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::io;
    use trustsync_core::CommandOutput;

    #[derive(Default)]
    struct ProbeRunner {
        on_path: bool,
        brew_prefix: Option<PathBuf>,
        probes: Cell<usize>,
        runs: RefCell<Vec<PathBuf>>,
    }

    impl CommandRunner for ProbeRunner {
        fn run(&self, program: &Path, _args: &[String]) -> io::Result<CommandOutput> {
            self.runs.borrow_mut().push(program.to_path_buf());
            match &self.brew_prefix {
                Some(prefix) => Ok(CommandOutput {
                    code: Some(0),
                    stdout: format!("{}\n", prefix.display()),
                    stderr: String::new(),
                }),
                None => Err(io::Error::new(io::ErrorKind::NotFound, "brew")),
            }
        }

        fn command_exists(&self, _name: &str) -> bool {
            self.probes.set(self.probes.get() + 1);
            self.on_path
        }
    }

    #[test]
    fn bare_name_when_on_path() {
        let runner = ProbeRunner {
            on_path: true,
            ..Default::default()
        };
        let resolver = UtilityResolver::new();
        assert_eq!(resolver.resolve(&runner), Some(Path::new("certutil")));
        assert!(runner.runs.borrow().is_empty());
    }

    #[test]
    fn resolution_is_memoised() {
        let runner = ProbeRunner {
            on_path: true,
            ..Default::default()
        };
        let resolver = UtilityResolver::new();
        assert!(!resolver.is_resolved());
        resolver.resolve(&runner);
        resolver.resolve(&runner);
        assert_eq!(runner.probes.get(), 1);
        assert!(resolver.is_resolved());
    }

    #[test]
    fn absence_is_memoised_too() {
        let runner = ProbeRunner::default();
        let resolver = UtilityResolver::new();
        let first = resolver.resolve(&runner).map(Path::to_path_buf);
        let second = resolver.resolve(&runner).map(Path::to_path_buf);
        assert_eq!(first, second);
        assert_eq!(runner.probes.get(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn falls_back_to_brew_prefix() {
        use std::os::unix::fs::PermissionsExt;

        if Path::new(HOMEBREW_CERTUTIL).exists() {
            return;
        }
        let prefix = tempfile::tempdir().unwrap();
        let bin = prefix.path().join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        let exe = bin.join("certutil");
        std::fs::write(&exe, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&exe, std::fs::Permissions::from_mode(0o755)).unwrap();

        let runner = ProbeRunner {
            brew_prefix: Some(prefix.path().to_path_buf()),
            ..Default::default()
        };
        let resolver = UtilityResolver::new();
        assert_eq!(resolver.resolve(&runner), Some(exe.as_path()));
        assert_eq!(runner.runs.borrow().as_slice(), &[PathBuf::from("brew")]);
    }

    #[test]
    fn brew_prefix_without_certutil_is_a_miss() {
        if Path::new(HOMEBREW_CERTUTIL).exists() {
            return;
        }
        let prefix = tempfile::tempdir().unwrap();
        let runner = ProbeRunner {
            brew_prefix: Some(prefix.path().to_path_buf()),
            ..Default::default()
        };
        assert!(UtilityResolver::new().resolve(&runner).is_none());
    }

    #[test]
    fn existing_override_wins() {
        let dir = tempfile::tempdir().unwrap();
        let custom = dir.path().join("certutil");
        std::fs::write(&custom, b"").unwrap();

        let runner = ProbeRunner {
            on_path: true,
            ..Default::default()
        };
        let resolver = UtilityResolver::with_override(&custom);
        assert_eq!(resolver.resolve(&runner), Some(custom.as_path()));
        assert_eq!(runner.probes.get(), 0);
    }

    #[test]
    fn missing_override_falls_through() {
        let runner = ProbeRunner {
            on_path: true,
            ..Default::default()
        };
        let resolver = UtilityResolver::with_override("/nonexistent/certutil");
        assert_eq!(resolver.resolve(&runner), Some(Path::new("certutil")));
    }

    #[test]
    fn process_wide_resolver_is_a_singleton() {
        let found = resolve_utility().map(Path::to_path_buf);
        assert!(shared_resolver().is_resolved());
        assert!(std::ptr::eq(shared_resolver(), shared_resolver()));
        assert_eq!(resolve_utility().map(Path::to_path_buf), found);
    }

    #[test]
    fn preset_never_probes() {
        let runner = ProbeRunner::default();
        let resolver = UtilityResolver::preset(None);
        assert!(resolver.is_resolved());
        assert!(resolver.resolve(&runner).is_none());
        assert_eq!(runner.probes.get(), 0);
    }
}
