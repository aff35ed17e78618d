//! trustsync - make browsers trust your development CA
//!
//! Installs a local root certificate into Firefox, Chromium and the shared
//! NSS database using `certutil`.

use anyhow::Result;

fn main() -> Result<()> {
    trustsync_cli::run()
}
