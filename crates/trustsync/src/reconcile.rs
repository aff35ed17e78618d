//! Trust reconciliation across every discovered NSS database.
//!
//! Each operation walks the full working set and runs `certutil` once per
//! database, strictly in discovery order. Databases are independent: a
//! non-zero exit on one is logged and the next one is still processed.
//! Nothing is retried.

use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use trustsync_core::{CommandLogEntry, CommandOutput, NssDatabase, Platform, Result, TrustError};

use crate::audit::CommandLog;
use crate::certificate::{read_certificate, CertificateInfo};
use crate::discovery::ProfileLocator;
use crate::resolver::{shared_resolver, UtilityResolver};
use crate::runner::{CommandRunner, SystemRunner};

/// Trust flags for `certutil -t`: valid CA for SSL, no peer or email trust.
pub const TRUST_FLAGS: &str = "C,,";

/// Outcome of [`TrustReconciler::reconcile_to`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Reconciliation {
    /// Not Linux or macOS; nothing to do
    UnsupportedPlatform,
    /// `certutil` was not found; nothing was attempted
    ToolUnavailable,
    /// The certificate file could not be read
    InvalidCertificate {
        /// Certificate path
        path: PathBuf,
        /// Why it could not be read
        reason: String,
    },
    /// At least one database already trusts the certificate
    AlreadyTrusted,
    /// `certutil -A` was run against these databases
    Installed {
        /// Databases an add was attempted on
        databases: Vec<NssDatabase>,
    },
    /// The working set was empty or every invocation was skipped
    NoTrustStoresFound,
}

impl Reconciliation {
    /// The boolean result of reconciliation.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedPlatform | Self::AlreadyTrusted | Self::Installed { .. }
        )
    }

    /// The error behind a failed outcome.
    #[must_use]
    pub fn error(&self) -> Option<TrustError> {
        match self {
            Self::ToolUnavailable => Some(TrustError::ToolUnavailable),
            Self::NoTrustStoresFound => Some(TrustError::NoTrustStoresFound),
            Self::InvalidCertificate { path, reason } => Some(TrustError::Certificate {
                path: path.clone(),
                reason: reason.clone(),
            }),
            Self::UnsupportedPlatform | Self::AlreadyTrusted | Self::Installed { .. } => None,
        }
    }
}

/// Outcome of [`TrustReconciler::uninstall`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Uninstallation {
    /// Not Linux or macOS; nothing to do
    UnsupportedPlatform,
    /// `certutil` was not found; nothing was attempted
    ToolUnavailable,
    /// The certificate file could not be read
    InvalidCertificate {
        /// Certificate path
        path: PathBuf,
        /// Why it could not be read
        reason: String,
    },
    /// `certutil -D` ran against the working set
    Removed {
        /// Databases where the delete exited zero
        removed: Vec<NssDatabase>,
        /// Databases where the delete failed or could not be launched
        failed: Vec<NssDatabase>,
    },
}

impl Uninstallation {
    /// Success when at least one delete worked, or there was nothing to delete.
    #[must_use]
    pub fn is_success(&self) -> bool {
        match self {
            Self::UnsupportedPlatform => true,
            Self::Removed { removed, failed } => !removed.is_empty() || failed.is_empty(),
            Self::ToolUnavailable | Self::InvalidCertificate { .. } => false,
        }
    }
}

/// Where a reconciler gets its `certutil` path from.
#[derive(Debug)]
enum ResolverSlot {
    /// The process-wide resolver, probed with the system runner
    Shared,
    /// A resolver owned by this reconciler, probed with its runner
    Owned(UtilityResolver),
}

/// Installs, verifies and removes one certificate across all NSS databases
/// of a user.
#[derive(Debug)]
pub struct TrustReconciler<R = SystemRunner> {
    locator: ProfileLocator,
    resolver: ResolverSlot,
    runner: R,
    log: CommandLog,
}

impl TrustReconciler<SystemRunner> {
    /// Reconciler for the current user and platform.
    pub fn for_current_user(runner: SystemRunner) -> Result<Self> {
        Ok(Self::new(ProfileLocator::for_current_user()?, runner))
    }
}

impl<R: CommandRunner> TrustReconciler<R> {
    /// Create a reconciler over `locator`'s databases using `runner`.
    ///
    /// `certutil` is located through [`shared_resolver`], so every default
    /// reconciler in the process probes at most once between them.
    pub fn new(locator: ProfileLocator, runner: R) -> Self {
        Self {
            locator,
            resolver: ResolverSlot::Shared,
            runner,
            log: CommandLog::new(),
        }
    }

    /// Use a private resolver instead of the process-wide one. It probes
    /// with this reconciler's runner.
    #[must_use]
    pub fn with_resolver(mut self, resolver: UtilityResolver) -> Self {
        self.resolver = ResolverSlot::Owned(resolver);
        self
    }

    /// The resolver `utility()` consults.
    #[must_use]
    pub fn resolver(&self) -> &UtilityResolver {
        match &self.resolver {
            ResolverSlot::Shared => shared_resolver(),
            ResolverSlot::Owned(resolver) => resolver,
        }
    }

    /// Platform the reconciler targets.
    #[must_use]
    pub const fn platform(&self) -> &Platform {
        self.locator.platform()
    }

    /// Profile locator in use.
    #[must_use]
    pub const fn locator(&self) -> &ProfileLocator {
        &self.locator
    }

    /// Every `certutil` run so far.
    #[must_use]
    pub const fn log(&self) -> &CommandLog {
        &self.log
    }

    /// The working set, discovered fresh on every call.
    pub fn databases(&self) -> Vec<NssDatabase> {
        self.locator.working_set()
    }

    /// Resolved `certutil`, probing on first call.
    pub fn utility(&self) -> Option<&Path> {
        match &self.resolver {
            ResolverSlot::Shared => shared_resolver().resolve(&SystemRunner),
            ResolverSlot::Owned(resolver) => resolver.resolve(&self.runner),
        }
    }

    /// Run `certutil` with `args` and record the result.
    ///
    /// Returns `None` without launching anything when there is no utility.
    /// A process that could not be started is recorded with no exit code and
    /// the launch error as stderr, and also yields `None`.
    fn run_certutil(&self, args: Vec<String>) -> Option<CommandOutput> {
        let program = self.utility()?;
        match self.runner.run(program, &args) {
            Ok(output) => {
                debug!(args = ?args, code = ?output.code, "certutil finished");
                self.log.record(CommandLogEntry::new(program, args, &output));
                Some(output)
            }
            Err(e) => {
                warn!(program = %program.display(), error = %e, "failed to launch certutil");
                let output = CommandOutput {
                    code: None,
                    stdout: String::new(),
                    stderr: format!("failed to launch {}: {e}\n", program.display()),
                };
                self.log.record(CommandLogEntry::new(program, args, &output));
                None
            }
        }
    }

    /// True if `certutil -V` succeeds against at least one database.
    ///
    /// Read-only. Every database is checked.
    pub fn is_trusted(&self, cert: &CertificateInfo) -> bool {
        let identity = cert.identity();
        let mut trusted = false;
        for db in self.databases() {
            let args = vec![
                "-V".into(),
                "-d".into(),
                db.reference(),
                "-u".into(),
                "L".into(),
                "-n".into(),
                identity.clone(),
            ];
            if self.run_certutil(args).is_some_and(|out| out.success()) {
                debug!(database = %db, identity = %identity, "certificate verified");
                trusted = true;
            }
        }
        trusted
    }

    /// Run `certutil -A` against every database.
    ///
    /// Returns the databases an add was attempted on, whatever its exit
    /// status, or `None` if there were none. Per-database exit codes are in
    /// the [`CommandLog`].
    pub fn install(&self, cert: &CertificateInfo) -> Option<Vec<NssDatabase>> {
        let identity = cert.identity();
        let mut attempted = Vec::new();
        for db in self.databases() {
            let args = vec![
                "-A".into(),
                "-d".into(),
                db.reference(),
                "-t".into(),
                TRUST_FLAGS.into(),
                "-n".into(),
                identity.clone(),
                "-i".into(),
                cert.path.display().to_string(),
            ];
            let Some(output) = self.run_certutil(args) else {
                continue;
            };
            if let Some(err) = invocation_error(&db, &output) {
                warn!(error = %err, "certutil add failed");
            }
            attempted.push(db);
        }
        (!attempted.is_empty()).then_some(attempted)
    }

    /// Run `certutil -D` against every database and return the raw results,
    /// `None` for each database where nothing could be run.
    pub fn remove(&self, cert: &CertificateInfo) -> Vec<Option<CommandOutput>> {
        self.remove_each(cert)
            .into_iter()
            .map(|(_, output)| output)
            .collect()
    }

    fn remove_each(&self, cert: &CertificateInfo) -> Vec<(NssDatabase, Option<CommandOutput>)> {
        let identity = cert.identity();
        self.databases()
            .into_iter()
            .map(|db| {
                let args = vec![
                    "-D".into(),
                    "-d".into(),
                    db.reference(),
                    "-n".into(),
                    identity.clone(),
                ];
                let output = self.run_certutil(args);
                (db, output)
            })
            .collect()
    }

    /// Make browsers trust the certificate at `cert_path`.
    ///
    /// On failure the command log is dumped to stderr.
    pub fn reconcile(&self, cert_path: &Path) -> bool {
        self.reconcile_to(cert_path, &mut io::stderr().lock()).is_success()
    }

    /// [`reconcile`](Self::reconcile), dumping the command log to `console`
    /// when no database accepted the certificate.
    pub fn reconcile_to<W: Write>(&self, cert_path: &Path, console: &mut W) -> Reconciliation {
        let platform = self.platform();
        if !platform.is_supported() {
            debug!(%platform, "no browser trust stores on this platform, skipping");
            return Reconciliation::UnsupportedPlatform;
        }

        if self.utility().is_none() {
            warn!(
                hint = platform.certutil_hint(),
                "certutil is not available, so the CA was not installed in Firefox or Chromium; install it and run again"
            );
            return Reconciliation::ToolUnavailable;
        }

        let cert = match read_certificate(cert_path) {
            Ok(cert) => cert,
            Err(e) => {
                error!(path = %cert_path.display(), error = %e, "cannot read certificate");
                return Reconciliation::InvalidCertificate {
                    path: cert_path.to_path_buf(),
                    reason: e.to_string(),
                };
            }
        };

        if self.is_trusted(&cert) {
            info!(identity = %cert.identity(), "certificate is already trusted by browser NSS databases");
            return Reconciliation::AlreadyTrusted;
        }

        if let Some(databases) = self.install(&cert) {
            for db in &databases {
                info!(database = %db.reference(), kind = %db.kind, "installed CA in NSS database");
            }
            return Reconciliation::Installed { databases };
        }

        if let Err(e) = self.log.dump(console) {
            warn!(error = %e, "could not write command log");
        }
        error!(
            hint = platform.certutil_hint(),
            "no NSS database accepted the certificate; make sure certutil works and a browser profile exists"
        );
        Reconciliation::NoTrustStoresFound
    }

    /// Remove the certificate at `cert_path` from every database.
    pub fn uninstall(&self, cert_path: &Path) -> Uninstallation {
        let platform = self.platform();
        if !platform.is_supported() {
            return Uninstallation::UnsupportedPlatform;
        }

        if self.utility().is_none() {
            warn!(
                hint = platform.certutil_hint(),
                "certutil is not available, so the CA was not removed from Firefox or Chromium"
            );
            return Uninstallation::ToolUnavailable;
        }

        let cert = match read_certificate(cert_path) {
            Ok(cert) => cert,
            Err(e) => {
                error!(path = %cert_path.display(), error = %e, "cannot read certificate");
                return Uninstallation::InvalidCertificate {
                    path: cert_path.to_path_buf(),
                    reason: e.to_string(),
                };
            }
        };

        let mut removed = Vec::new();
        let mut failed = Vec::new();
        for (db, output) in self.remove_each(&cert) {
            match output {
                Some(out) if out.success() => {
                    info!(database = %db.reference(), "removed CA from NSS database");
                    removed.push(db);
                }
                Some(out) => {
                    if let Some(err) = invocation_error(&db, &out) {
                        warn!(error = %err, "certutil delete failed");
                    }
                    failed.push(db);
                }
                None => failed.push(db),
            }
        }
        Uninstallation::Removed { removed, failed }
    }
}

/// Non-zero exit on one database, as an error value for logging.
fn invocation_error(db: &NssDatabase, output: &CommandOutput) -> Option<TrustError> {
    (!output.success()).then(|| TrustError::InvocationFailed {
        database: db.reference(),
        code: output.code,
        stderr: output.stderr.trim().to_string(),
    })
}
