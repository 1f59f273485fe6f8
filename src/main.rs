mod cli;

use crate::cli::ProxyArguments;
use anyhow::{Context, Result};
use clap::Parser;
use log::{info, trace};
use mtls_forward::identity::TlsSettings;
use mtls_forward::proxy::{HyperTransport, ProxyEngine, start_proxy_server};
use mtls_forward::utils::logging::init_logging;
use mtls_forward::utils::prompt::prompt_passphrase;
use std::net::SocketAddr;
use std::sync::Arc;

const TARGET_SCHEME: &str = "https";

#[tokio::main]
async fn main() -> Result<()> {
    let config = ProxyArguments::parse().into_config();
    init_logging(config.log_level, config.plain);
    trace!("Configuration: {:#?}", config);
    config.validate()?;

    let passphrase = match config.identity_path() {
        Some(path) => Some(prompt_passphrase(path)?),
        None => None,
    };
    let tls = TlsSettings::from_config(&config, passphrase.as_deref()).context("Error loading TLS identity")?;
    drop(passphrase);

    let transport = HyperTransport::new(&tls, &config)?;
    let engine = Arc::new(ProxyEngine::new(transport, TARGET_SCHEME, config.log_level.is_debug()));

    info!("Starting mtls-forward (mutual TLS {})", if config.mtls_enabled() { "enabled" } else { "disabled" });
    start_proxy_server(SocketAddr::from(([0, 0, 0, 0], config.port)), engine).await
}
