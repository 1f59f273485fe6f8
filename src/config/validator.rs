use crate::config::types::ProxyConfig;
use log::warn;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("--cert flag is required unless --no-mtls is specified")]
    MissingCertificate,
    #[error("Port must be between 1 and 65535")]
    InvalidPort,
    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

impl ProxyConfig {
    /// Check the configuration before any file or socket is touched
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mtls_enabled() && self.cert.as_ref().is_none_or(|p| p.as_os_str().is_empty()) {
            return Err(ConfigError::MissingCertificate);
        }
        if self.no_mtls && self.cert.is_some() {
            warn!("--no-mtls is set; ignoring --cert");
        }
        if self.port == 0 {
            return Err(ConfigError::InvalidPort);
        }
        if self.timeout == Some(Duration::ZERO) {
            return Err(ConfigError::ZeroTimeout("--timeout"));
        }
        if self.connect_timeout == Some(Duration::ZERO) {
            return Err(ConfigError::ZeroTimeout("--connect-timeout"));
        }
        Ok(())
    }
}
