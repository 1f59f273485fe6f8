// Identity module
//
// This module turns the operator's certificate material into TLS client settings:
// - error: Distinguishable startup failures
// - pkcs12: Decrypting the PKCS#12 bundle into a client identity
// - trust: Loading the optional CA bundle used to verify origins

pub mod error;
pub mod pkcs12;
pub mod trust;

pub use error::IdentityError;
pub use pkcs12::{ClientIdentity, load_identity};
pub use trust::load_trust_store;

use crate::config::ProxyConfig;
use log::warn;
use native_tls::{Certificate, TlsConnector};

/// TLS material shared by every outbound connection. Immutable once built.
#[derive(Clone, Default)]
pub struct TlsSettings {
    pub identity: Option<ClientIdentity>,
    pub root_certificates: Vec<Certificate>,
    pub insecure: bool,
}

impl TlsSettings {
    /// Load the client identity and CA bundle named by the configuration.
    ///
    /// `passphrase` is only consulted when mutual TLS is enabled.
    pub fn from_config(config: &ProxyConfig, passphrase: Option<&str>) -> Result<Self, IdentityError> {
        let identity = match config.identity_path() {
            Some(path) => Some(load_identity(path, passphrase.unwrap_or_default())?),
            None => None,
        };
        let root_certificates = match &config.ca_cert {
            Some(path) => load_trust_store(path)?,
            None => Vec::new(),
        };
        if config.insecure {
            warn!("--insecure is set: origin certificates and hostnames will NOT be verified");
        }
        Ok(Self { identity, root_certificates, insecure: config.insecure })
    }

    /// Build the connector used for every origin handshake.
    ///
    /// A supplied CA bundle replaces the built-in roots rather than extending them.
    pub fn connector(&self) -> Result<TlsConnector, IdentityError> {
        let mut builder = TlsConnector::builder();
        if let Some(identity) = &self.identity {
            builder.identity(identity.identity().clone());
        }
        if !self.root_certificates.is_empty() {
            builder.disable_built_in_roots(true);
            for cert in &self.root_certificates {
                builder.add_root_certificate(cert.clone());
            }
        }
        if self.insecure {
            builder.danger_accept_invalid_certs(true);
            builder.danger_accept_invalid_hostnames(true);
        }
        Ok(builder.build()?)
    }
}

impl std::fmt::Debug for TlsSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlsSettings")
            .field("identity", &self.identity)
            .field("root_certificates", &self.root_certificates.len())
            .field("insecure", &self.insecure)
            .finish()
    }
}
