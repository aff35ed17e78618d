//! `trustsync identity` - show the NSS nickname for a certificate.

use anyhow::Result;
use serde::Serialize;

use trustsync::read_certificate;

use super::Context;
use crate::cli::args::CertArgs;

#[derive(Serialize)]
struct IdentityReport {
    identity: String,
    issuer: String,
    subject: String,
    serial: String,
}

pub fn execute(ctx: &Context, args: &CertArgs) -> Result<()> {
    let cert = read_certificate(&args.cert)?;
    let report = IdentityReport {
        identity: cert.identity(),
        issuer: cert.issuer,
        subject: cert.subject,
        serial: cert.serial,
    };

    if !ctx.output_format().print_structured(&report)? {
        println!("{}", report.identity);
    }
    Ok(())
}
