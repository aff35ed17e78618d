//! Blocking subprocess execution.
//!
//! The reconciler never spawns processes directly; it goes through a
//! [`CommandRunner`] so tests can script `certutil` without touching the host.

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use trustsync_core::CommandOutput;

/// Runs external programs to completion.
pub trait CommandRunner {
    /// Run `program` with `args`, blocking until it exits.
    ///
    /// `Err` means the process could not be launched at all. A launched
    /// process that fails is `Ok` with a non-zero code.
    fn run(&self, program: &Path, args: &[String]) -> io::Result<CommandOutput>;

    /// Whether `name` resolves to an executable on `PATH`.
    fn command_exists(&self, name: &str) -> bool {
        find_in_path(name).is_some()
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, program: &Path, args: &[String]) -> io::Result<CommandOutput> {
        (**self).run(program, args)
    }

    fn command_exists(&self, name: &str) -> bool {
        (**self).command_exists(name)
    }
}

/// [`CommandRunner`] backed by `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &Path, args: &[String]) -> io::Result<CommandOutput> {
        let output = Command::new(program).args(args).output()?;
        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// First executable named `name` in the `PATH` directories.
pub(crate) fn find_in_path(name: &str) -> Option<PathBuf> {
    let paths = std::env::var_os("PATH")?;
    find_in(name, std::env::split_paths(&paths))
}

fn find_in(name: &str, dirs: impl IntoIterator<Item = PathBuf>) -> Option<PathBuf> {
    dirs.into_iter()
        .map(|dir| dir.join(OsStr::new(name)))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
pub(crate) fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;
    std::fs::metadata(path).is_ok_and(|meta| meta.is_file() && meta.mode() & 0o111 != 0)
}

#[cfg(not(unix))]
pub(crate) fn is_executable(path: &Path) -> bool {
    path.is_file()
}
