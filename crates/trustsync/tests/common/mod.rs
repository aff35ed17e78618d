//! Shared fixtures for reconciler integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use rcgen::{BasicConstraints, CertificateParams, DistinguishedName, DnType, IsCa, KeyPair};
use trustsync::{CommandOutput, CommandRunner};

/// Scripted stand-in for `certutil`. Exit codes are chosen per action flag.
#[derive(Default)]
pub struct FakeCertutil {
    codes: RefCell<HashMap<String, i32>>,
    launch_fails: Cell<bool>,
    calls: RefCell<Vec<Vec<String>>>,
}

impl FakeCertutil {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exit code returned for `-V`, `-A` or `-D`. Unscripted actions exit 0.
    pub fn set_code(&self, action: &str, code: i32) {
        self.codes.borrow_mut().insert(action.to_string(), code);
    }

    /// Make every launch fail as if the binary vanished.
    pub fn fail_launches(&self) {
        self.launch_fails.set(true);
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, action: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|args| args.first().is_some_and(|a| a == action))
            .count()
    }
}

impl CommandRunner for FakeCertutil {
    fn run(&self, _program: &Path, args: &[String]) -> io::Result<CommandOutput> {
        self.calls.borrow_mut().push(args.to_vec());
        if self.launch_fails.get() {
            return Err(io::Error::new(io::ErrorKind::NotFound, "certutil"));
        }
        let action = args.first().cloned().unwrap_or_default();
        let code = self.codes.borrow().get(&action).copied().unwrap_or(0);
        Ok(CommandOutput {
            code: Some(code),
            stdout: String::new(),
            stderr: if code == 0 {
                String::new()
            } else {
                format!("certutil: {action} failed\n")
            },
        })
    }

    fn command_exists(&self, _name: &str) -> bool {
        false
    }
}

/// Create an empty marker file, including parent directories.
pub fn touch(path: &Path) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, b"").unwrap();
}

/// Write a self-signed CA certificate into `dir` and return its path.
pub fn write_ca(dir: &Path) -> PathBuf {
    let mut params = CertificateParams::default();
    let mut dn = DistinguishedName::new();
    dn.push(DnType::CommonName, "trustsync development CA");
    params.distinguished_name = dn;
    params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    params.serial_number = Some(vec![0x05, 0x39].into());

    let key = KeyPair::generate().unwrap();
    let cert = params.self_signed(&key).unwrap();
    let path = dir.join("rootCA.pem");
    std::fs::write(&path, cert.pem()).unwrap();
    path
}

/// Nickname `write_ca` certificates are stored under.
pub const CA_IDENTITY: &str = "trustsync development CA 1337";
