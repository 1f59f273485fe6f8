use openssl::error::ErrorStack;
use std::path::PathBuf;
use thiserror::Error;

/// Startup failures while building the TLS identity. Each is fatal.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Failed to read certificate bundle {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to decrypt {}: wrong passphrase or malformed PKCS#12 ({source})", .path.display())]
    Decryption {
        path: PathBuf,
        #[source]
        source: ErrorStack,
    },
    #[error("Invalid client credential: {0}")]
    Credential(String),
    #[error("Invalid CA bundle {}: {reason}", .path.display())]
    TrustStore { path: PathBuf, reason: String },
    #[error("Failed to build TLS connector: {0}")]
    Connector(#[from] native_tls::Error),
}
