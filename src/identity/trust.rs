use crate::identity::error::IdentityError;
use log::debug;
use native_tls::Certificate;
use openssl::x509::X509;
use std::path::Path;

/// Read a PEM bundle of CA certificates used to verify origins.
pub fn load_trust_store(path: impl AsRef<Path>) -> Result<Vec<Certificate>, IdentityError> {
    let path = path.as_ref();
    let trust_error = |reason: String| IdentityError::TrustStore { path: path.to_owned(), reason };

    let pem = std::fs::read(path).map_err(|e| trust_error(e.to_string()))?;
    let stack = X509::stack_from_pem(&pem).map_err(|e| trust_error(e.to_string()))?;
    if stack.is_empty() {
        return Err(trust_error("no PEM certificates found".to_string()));
    }

    let mut certificates = Vec::with_capacity(stack.len());
    for cert in stack {
        let der = cert.to_der().map_err(|e| trust_error(e.to_string()))?;
        certificates.push(Certificate::from_der(&der).map_err(|e| trust_error(e.to_string()))?);
    }
    debug!("Loaded {} CA certificate(s) from {}", certificates.len(), path.display());
    Ok(certificates)
}
