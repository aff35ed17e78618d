//! Browser profile discovery.
//!
//! Each browser family has a per-platform root directory. Platforms without
//! a known layout have no root and therefore no profiles. A missing root is
//! not an error either: the browser is simply not installed.

use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use trustsync_core::{NssDatabase, Platform, Profile, Result, StoreKind, TrustError};

use super::classify::classify;

/// Shared per-user NSS database, relative to the home directory.
pub const SHARED_NSSDB: &str = ".pki/nssdb";

/// Maps a home directory to a browser's profile root.
type RootFn = fn(&Path) -> Option<PathBuf>;

fn macos_firefox(home: &Path) -> Option<PathBuf> {
    Some(home.join("Library/Application Support/Firefox/Profiles"))
}

fn linux_firefox(home: &Path) -> Option<PathBuf> {
    Some(home.join(".mozilla/firefox"))
}

fn linux_chromium(home: &Path) -> Option<PathBuf> {
    Some(home.join("snap/chromium"))
}

const fn no_root(_home: &Path) -> Option<PathBuf> {
    None
}

fn firefox_root(platform: &Platform) -> RootFn {
    match platform {
        Platform::MacOs => macos_firefox,
        Platform::Linux => linux_firefox,
        Platform::Windows | Platform::Other(_) => no_root,
    }
}

fn chromium_root(platform: &Platform) -> RootFn {
    match platform {
        Platform::Linux => linux_chromium,
        Platform::MacOs | Platform::Windows | Platform::Other(_) => no_root,
    }
}

/// Finds candidate NSS database directories under one user's home.
#[derive(Debug, Clone)]
pub struct ProfileLocator {
    home: PathBuf,
    platform: Platform,
}

impl ProfileLocator {
    /// Create a locator for an explicit home directory and platform.
    pub fn new(home: impl Into<PathBuf>, platform: Platform) -> Self {
        Self {
            home: home.into(),
            platform,
        }
    }

    /// Locator for the current user on the current platform.
    pub fn for_current_user() -> Result<Self> {
        let dirs = directories::BaseDirs::new()
            .ok_or_else(|| TrustError::Config("could not determine home directory".into()))?;
        Ok(Self::new(dirs.home_dir(), Platform::current()))
    }

    /// Home directory all roots are resolved against.
    #[must_use]
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Platform the roots are chosen for.
    #[must_use]
    pub const fn platform(&self) -> &Platform {
        &self.platform
    }

    /// Firefox profile root for this platform, if it has one.
    #[must_use]
    pub fn firefox_root(&self) -> Option<PathBuf> {
        firefox_root(&self.platform)(&self.home)
    }

    /// Chromium-family root for this platform, if it has one.
    #[must_use]
    pub fn chromium_root(&self) -> Option<PathBuf> {
        chromium_root(&self.platform)(&self.home)
    }

    /// Every immediate subdirectory of the Firefox root.
    pub fn firefox_profiles(&self) -> Vec<Profile> {
        self.firefox_root()
            .map(|root| subdirectories(&root))
            .unwrap_or_default()
            .into_iter()
            .map(|dir| Profile::new(dir, StoreKind::Firefox))
            .collect()
    }

    /// `<instance>/.pki/nssdb` for every Chromium instance that has one.
    pub fn chromium_profiles(&self) -> Vec<Profile> {
        self.chromium_root()
            .map(|root| subdirectories(&root))
            .unwrap_or_default()
            .into_iter()
            .map(|instance| instance.join(SHARED_NSSDB))
            .filter(|nssdb| nssdb.is_dir())
            .map(|nssdb| Profile::new(nssdb, StoreKind::Chromium))
            .collect()
    }

    /// The per-user `~/.pki/nssdb`, considered on every platform.
    #[must_use]
    pub fn shared_profile(&self) -> Profile {
        Profile::new(self.home.join(SHARED_NSSDB), StoreKind::Shared)
    }

    /// Classified databases in discovery order: Firefox, Chromium, shared.
    ///
    /// No deduplication is done; the same physical directory reached twice
    /// is processed twice.
    pub fn working_set(&self) -> Vec<NssDatabase> {
        let databases: Vec<NssDatabase> = self
            .firefox_profiles()
            .into_iter()
            .chain(self.chromium_profiles())
            .chain(std::iter::once(self.shared_profile()))
            .filter_map(|profile| classify(&profile))
            .collect();

        debug!(count = databases.len(), home = %self.home.display(), "discovered NSS databases");
        databases
    }
}

/// Immediate subdirectories of `root`, sorted by name. Empty if `root` is missing.
fn subdirectories(root: &Path) -> Vec<PathBuf> {
    if !root.is_dir() {
        debug!(path = %root.display(), "profile root not found, skipping");
        return Vec::new();
    }

    WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!(root = %root.display(), error = %e, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_dir())
        .map(walkdir::DirEntry::into_path)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn missing_roots_yield_no_profiles() {
        let home = tempfile::tempdir().unwrap();
        let locator = ProfileLocator::new(home.path(), Platform::Linux);
        assert!(locator.firefox_profiles().is_empty());
        assert!(locator.chromium_profiles().is_empty());
        assert!(locator.working_set().is_empty());
    }

    #[test]
    fn unknown_platform_has_no_roots() {
        let home = tempfile::tempdir().unwrap();
        fs::create_dir_all(home.path().join(".mozilla/firefox/abc.default")).unwrap();
        let locator = ProfileLocator::new(home.path(), Platform::Other("haiku".into()));
        assert!(locator.firefox_root().is_none());
        assert!(locator.firefox_profiles().is_empty());
    }

    #[test]
    fn every_firefox_subdirectory_is_a_profile() {
        let home = tempfile::tempdir().unwrap();
        let root = home.path().join(".mozilla/firefox");
        fs::create_dir_all(root.join("abc.default")).unwrap();
        fs::create_dir_all(root.join("xyz.dev-edition")).unwrap();
        touch(&root.join("profiles.ini"));

        let locator = ProfileLocator::new(home.path(), Platform::Linux);
        let profiles = locator.firefox_profiles();
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].path, root.join("abc.default"));
        assert_eq!(profiles[1].path, root.join("xyz.dev-edition"));
        assert!(profiles.iter().all(|p| p.kind == StoreKind::Firefox));
    }

    #[test]
    fn macos_firefox_root() {
        let locator = ProfileLocator::new("/Users/dev", Platform::MacOs);
        assert_eq!(
            locator.firefox_root(),
            Some(PathBuf::from(
                "/Users/dev/Library/Application Support/Firefox/Profiles"
            ))
        );
        assert!(locator.chromium_root().is_none());
    }

    #[test]
    fn chromium_instances_need_nssdb_directory() {
        let home = tempfile::tempdir().unwrap();
        let root = home.path().join("snap/chromium");
        fs::create_dir_all(root.join("2035/.pki/nssdb")).unwrap();
        fs::create_dir_all(root.join("common")).unwrap();
        touch(&root.join("1999/.pki/nssdb"));

        let locator = ProfileLocator::new(home.path(), Platform::Linux);
        let profiles = locator.chromium_profiles();
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].path, root.join("2035/.pki/nssdb"));
        assert_eq!(profiles[0].kind, StoreKind::Chromium);
    }

    #[test]
    fn working_set_is_in_discovery_order() {
        let home = tempfile::tempdir().unwrap();
        touch(&home.path().join(".mozilla/firefox/abc.default/cert9.db"));
        touch(&home.path().join(".mozilla/firefox/old.default/cert8.db"));
        fs::create_dir_all(home.path().join(".mozilla/firefox/Crash Reports")).unwrap();
        touch(&home.path().join("snap/chromium/2035/.pki/nssdb/cert9.db"));
        touch(&home.path().join(".pki/nssdb/cert9.db"));

        let locator = ProfileLocator::new(home.path(), Platform::Linux);
        let set = locator.working_set();
        let kinds: Vec<StoreKind> = set.iter().map(|db| db.kind).collect();
        assert_eq!(
            kinds,
            vec![
                StoreKind::Firefox,
                StoreKind::Firefox,
                StoreKind::Chromium,
                StoreKind::Shared
            ]
        );
        assert!(set[0].reference().starts_with("sql:"));
        assert!(set[1].reference().starts_with("dbm:"));
    }

    #[test]
    fn shared_database_considered_on_any_platform() {
        let home = tempfile::tempdir().unwrap();
        touch(&home.path().join(".pki/nssdb/cert9.db"));

        let locator = ProfileLocator::new(home.path(), Platform::Windows);
        let set = locator.working_set();
        assert_eq!(set.len(), 1);
        assert_eq!(set[0].kind, StoreKind::Shared);
    }
}
