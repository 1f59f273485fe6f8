use crate::identity::error::IdentityError;
use log::{debug, info, warn};
use native_tls::Identity;
use openssl::asn1::Asn1Time;
use openssl::nid::Nid;
use openssl::pkcs12::Pkcs12;
use openssl::pkey::{PKey, Private};
use openssl::provider::Provider;
use openssl::x509::X509;
use std::path::Path;
use std::sync::Once;

/// The certificate/key pair presented to origins during the TLS handshake.
#[derive(Clone)]
pub struct ClientIdentity {
    identity: Identity,
    subject: String,
}

impl ClientIdentity {
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }
}

impl std::fmt::Debug for ClientIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientIdentity").field("subject", &self.subject).finish_non_exhaustive()
    }
}

/// Read and decrypt a PKCS#12 bundle into a client identity.
///
/// Only the leaf certificate and its key are used. CA certificates carried inside
/// the bundle are ignored; origin trust comes from the separate CA file.
pub fn load_identity(path: impl AsRef<Path>, passphrase: &str) -> Result<ClientIdentity, IdentityError> {
    let path = path.as_ref();
    debug!("Loading PKCS#12 bundle from: {}", path.display());
    let der = std::fs::read(path).map_err(|source| IdentityError::Io { path: path.to_owned(), source })?;

    enable_legacy_algorithms();
    let parsed = Pkcs12::from_der(&der)
        .and_then(|bundle| bundle.parse2(passphrase))
        .map_err(|source| IdentityError::Decryption { path: path.to_owned(), source })?;

    if let Some(ca) = parsed.ca.as_ref().filter(|ca| !ca.is_empty()) {
        debug!("Ignoring {} CA certificate(s) embedded in {}", ca.len(), path.display());
    }

    let identity = pair_credentials(parsed.cert, parsed.pkey)?;
    info!("Loaded client certificate {}", identity.subject());
    Ok(identity)
}

/// Make the legacy OpenSSL provider available for the rest of the process.
///
/// Bundles exported by OpenSSL 1.x, Windows and Java commonly encrypt the certificate bag
/// with RC2-40, which OpenSSL 3 only offers through that provider.
pub(crate) fn enable_legacy_algorithms() {
    static LEGACY: Once = Once::new();
    LEGACY.call_once(|| match Provider::try_load(None, "legacy", true) {
        Ok(provider) => {
            debug!("Loaded OpenSSL legacy provider for PKCS#12 decoding");
            std::mem::forget(provider);
        }
        Err(e) => warn!("OpenSSL legacy provider unavailable; RC2/3DES-encrypted bundles will not load: {}", e),
    });
}

/// Check the key belongs to the certificate, then pair their PEM encodings.
pub(crate) fn pair_credentials(cert: Option<X509>, key: Option<PKey<Private>>) -> Result<ClientIdentity, IdentityError> {
    let cert = cert.ok_or_else(|| IdentityError::Credential("no certificate in bundle".to_string()))?;
    let key = key.ok_or_else(|| IdentityError::Credential("no private key in bundle".to_string()))?;

    let public = cert.public_key().map_err(|e| IdentityError::Credential(format!("unreadable certificate public key: {e}")))?;
    if !public.public_eq(&key) {
        return Err(IdentityError::Credential("private key does not match certificate".to_string()));
    }

    let cert_pem = cert.to_pem().map_err(|e| IdentityError::Credential(format!("certificate PEM encoding failed: {e}")))?;
    let key_pem = key.private_key_to_pem_pkcs8().map_err(|e| IdentityError::Credential(format!("private key PEM encoding failed: {e}")))?;
    let identity = Identity::from_pkcs8(&cert_pem, &key_pem).map_err(|e| IdentityError::Credential(e.to_string()))?;

    warn_if_expired(&cert);
    Ok(ClientIdentity { identity, subject: subject_of(&cert) })
}

fn subject_of(cert: &X509) -> String {
    cert.subject_name()
        .entries_by_nid(Nid::COMMONNAME)
        .next()
        .and_then(|entry| entry.data().as_utf8().ok())
        .map(|cn| format!("CN={}", cn))
        .unwrap_or_else(|| "(no common name)".to_string())
}

fn warn_if_expired(cert: &X509) {
    #[allow(clippy::collapsible_if)]
    if let Ok(now) = Asn1Time::days_from_now(0) {
        if cert.not_after() < now {
            warn!("Client certificate expired on {}; origins will likely reject it", cert.not_after());
        }
    }
}
