use clap::{ArgAction, Parser};
use mtls_forward::config::{LogLevel, ProxyConfig};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "mtls-forward",
    about,
    author,
    version,
    long_about = "Forward proxy for mutual TLS. Requests to http://localhost:<port>/{host}/{path} are sent to https://{host}/{path} \
                  using the client certificate from a password-protected .p12 bundle.",
    after_help = "Usage: mtls-forward --cert /path/to/my.p12 [options] or mtls-forward --no-mtls [options]"
)]
pub struct ProxyArguments {
    #[arg(long = "cert", value_name = "PATH", help = "Path to the .p12 certificate file")]
    pub(crate) cert: Option<PathBuf>,
    #[arg(long = "cacert", value_name = "PATH", help = "Path to the CA certificate file for server verification")]
    pub(crate) ca_cert: Option<PathBuf>,
    #[arg(short = 'p', long = "port", default_value_t = 5000, help = "Port to listen on")]
    pub(crate) port: u16,
    #[arg(long = "insecure", action = ArgAction::SetTrue, help = "Skip verification of the target server's certificate")]
    pub(crate) insecure: bool,
    #[arg(long = "no-mtls", action = ArgAction::SetTrue, help = "Run without mutual TLS (no .p12 required)")]
    pub(crate) no_mtls: bool,
    #[arg(short = 'l', long = "log-level", default_value = "info", help = "Log level (debug, info, warn, error)")]
    pub(crate) log_level: LogLevel,
    #[arg(long = "plain", action = ArgAction::SetTrue, help = "Disable pretty printing (colors, etc.)")]
    pub(crate) plain: bool,
    #[arg(long = "timeout", value_name = "SECS", help = "Give up on an origin whose response headers have not arrived within this many seconds")]
    pub(crate) timeout: Option<u64>,
    #[arg(long = "connect-timeout", value_name = "SECS", help = "Give up connecting to an origin after this many seconds")]
    pub(crate) connect_timeout: Option<u64>,
    #[arg(long = "no-upstream-proxy", action = ArgAction::SetTrue, help = "Ignore HTTPS_PROXY/ALL_PROXY and connect to origins directly")]
    pub(crate) no_upstream_proxy: bool,
}

impl ProxyArguments {
    pub fn into_config(self) -> ProxyConfig {
        ProxyConfig {
            cert: self.cert,
            ca_cert: self.ca_cert,
            port: self.port,
            insecure: self.insecure,
            no_mtls: self.no_mtls,
            log_level: self.log_level,
            plain: self.plain,
            timeout: self.timeout.map(Duration::from_secs),
            connect_timeout: self.connect_timeout.map(Duration::from_secs),
            upstream_proxy: !self.no_upstream_proxy,
        }
    }
}
