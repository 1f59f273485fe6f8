use log::LevelFilter;
use std::convert::Infallible;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 5000;

/// Verbosity of the proxy. `Debug` also turns on per-header dumps in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn is_debug(&self) -> bool {
        *self == LogLevel::Debug
    }
}

impl FromStr for LogLevel {
    type Err = Infallible;

    /// Unknown names fall back to `Info` rather than failing startup.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "debug" => LogLevel::Debug,
            "warn" => LogLevel::Warn,
            "error" => LogLevel::Error,
            _ => LogLevel::Info,
        })
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        f.write_str(name)
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
        }
    }
}

/// Everything the proxy needs at startup. Built once and passed by reference.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub cert: Option<PathBuf>,
    pub ca_cert: Option<PathBuf>,
    pub port: u16,
    pub insecure: bool,
    pub no_mtls: bool,
    pub log_level: LogLevel,
    pub plain: bool,
    pub timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
    pub upstream_proxy: bool,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            cert: None,
            ca_cert: None,
            port: DEFAULT_PORT,
            insecure: false,
            no_mtls: false,
            log_level: LogLevel::default(),
            plain: false,
            timeout: None,
            connect_timeout: None,
            upstream_proxy: true,
        }
    }
}

impl ProxyConfig {
    /// True when a client certificate will be presented to origins.
    pub fn mtls_enabled(&self) -> bool {
        !self.no_mtls
    }

    /// The PKCS#12 bundle to load, if mutual TLS is enabled.
    pub fn identity_path(&self) -> Option<&Path> {
        if self.no_mtls { None } else { self.cert.as_deref() }
    }
}
