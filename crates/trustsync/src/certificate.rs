//! Certificate loading and the NSS nickname derived from it.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::debug;
use x509_parser::objects::{oid2abbrev, oid_registry};
use x509_parser::x509::{AttributeTypeAndValue, X509Name};

use trustsync_core::{Result, TrustError};

/// The fields of a CA certificate that reconciliation needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateInfo {
    /// PEM file handed to `certutil -i`
    pub path: PathBuf,
    /// Issuer distinguished name, most specific part first, e.g. `CN=dev CA, O=Acme, C=US`
    pub issuer: String,
    /// Subject distinguished name, same ordering as `issuer`
    pub subject: String,
    /// Serial number (decimal)
    pub serial: String,
}

impl CertificateInfo {
    /// Nickname under which the certificate is stored in every NSS database.
    ///
    /// The issuer DN loses its leading three characters (the `CN=` type tag)
    /// and is joined to the serial with a single space. The result depends only
    /// on certificate content, so a later run finds what an earlier run installed.
    #[must_use]
    pub fn identity(&self) -> String {
        let issuer: String = self.issuer.chars().skip(3).collect();
        format!("{issuer} {}", self.serial)
    }
}

/// Read a certificate from a PEM (first `CERTIFICATE` block) or DER file.
pub fn read_certificate(path: &Path) -> Result<CertificateInfo> {
    let bytes = std::fs::read(path).map_err(|e| TrustError::io(path, e))?;

    let der = match pem::parse_many(&bytes) {
        Ok(blocks) => blocks
            .into_iter()
            .find(|p| p.tag() == "CERTIFICATE")
            .map(pem::Pem::into_contents),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "not PEM, trying DER");
            None
        }
    }
    .unwrap_or(bytes);

    let (_, cert) =
        x509_parser::parse_x509_certificate(&der).map_err(|e| TrustError::Certificate {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    Ok(CertificateInfo {
        path: path.to_path_buf(),
        issuer: render_name(cert.issuer()),
        subject: render_name(cert.subject()),
        serial: cert.tbs_certificate.serial.to_string(),
    })
}

/// Render a distinguished name the RFC 4514 way: RDNs in reverse of their
/// encoded order, so the common name of a typical CA comes first.
///
/// Multi-valued RDNs join their attributes with `+`. Values that are not
/// strings are written as `#` followed by the hex of their content octets.
fn render_name(name: &X509Name<'_>) -> String {
    let rdns: Vec<_> = name.iter_rdn().collect();
    rdns.into_iter()
        .rev()
        .map(|rdn| {
            rdn.iter()
                .map(render_attribute)
                .collect::<Vec<_>>()
                .join("+")
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_attribute(attr: &AttributeTypeAndValue<'_>) -> String {
    let oid = attr.attr_type();
    let key = oid2abbrev(oid, oid_registry())
        .map_or_else(|_| oid.to_id_string(), ToString::to_string);
    let value = match attr.as_str() {
        Ok(value) => value.to_string(),
        Err(_) => attr
            .attr_value()
            .data
            .iter()
            .fold(String::from("#"), |mut hex, byte| {
                let _ = write!(hex, "{byte:02x}");
                hex
            }),
    };
    format!("{key}={value}")
}

/// Shorthand for `read_certificate(path)?.identity()`.
pub fn identity(path: &Path) -> Result<String> {
    read_certificate(path).map(|cert| cert.identity())
}
