//! NSS database format detection.

use std::path::Path;
use tracing::debug;

use trustsync_core::{DbFormat, NssDatabase, Profile};

/// Detect the database format stored in `dir`.
///
/// `cert9.db` wins over `cert8.db` when both are present.
pub fn classify_path(dir: &Path) -> Option<DbFormat> {
    [DbFormat::Sql, DbFormat::Dbm]
        .into_iter()
        .find(|format| dir.join(format.marker()).exists())
}

/// Classify a discovered profile, dropping directories with no database.
pub fn classify(profile: &Profile) -> Option<NssDatabase> {
    let Some(format) = classify_path(&profile.path) else {
        debug!(path = %profile.path.display(), kind = %profile.kind, "no NSS database, skipping");
        return None;
    };
    Some(NssDatabase::new(profile.path.clone(), format, profile.kind))
}
