//! Append-only record of every `certutil` invocation.
//!
//! Owned by a [`TrustReconciler`](crate::TrustReconciler) rather than kept
//! as a global, so each reconciler (and each test) sees only its own runs.

use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

use trustsync_core::CommandLogEntry;

/// Command audit log. Entries are never removed.
#[derive(Debug, Default)]
pub struct CommandLog {
    entries: Mutex<Vec<CommandLogEntry>>,
}

impl CommandLog {
    /// Empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<CommandLogEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append an entry.
    pub fn record(&self, entry: CommandLogEntry) {
        self.lock().push(entry);
    }

    /// Snapshot of all entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<CommandLogEntry> {
        self.lock().clone()
    }

    /// Number of recorded invocations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True if nothing has been run yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// How many recorded invocations used `action` as their first argument
    /// (`-V`, `-A` or `-D`).
    #[must_use]
    pub fn count_action(&self, action: &str) -> usize {
        self.lock()
            .iter()
            .filter(|entry| entry.args.first().is_some_and(|a| a == action))
            .count()
    }

    /// Write every entry as `$ program args...` followed by its stdout and
    /// stderr, verbatim.
    pub fn dump<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for entry in self.lock().iter() {
            writeln!(out, "{}", entry.echo_line())?;
            out.write_all(entry.stdout.as_bytes())?;
            out.write_all(entry.stderr.as_bytes())?;
        }
        out.flush()
    }
}
