//! Command implementations.

pub mod check;
pub mod identity;
pub mod install;
pub mod settings;
pub mod stores;
pub mod uninstall;

use trustsync::TrustReconciler;

use crate::config::Settings;
use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Effective settings
    pub settings: Settings,
}

impl Context {
    /// Wrap resolved settings.
    pub const fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Output format for this invocation.
    pub const fn output_format(&self) -> OutputFormat {
        self.settings.output_format
    }

    /// Reconciler over the configured home directory.
    pub fn reconciler(&self) -> TrustReconciler {
        self.settings.reconciler()
    }
}
