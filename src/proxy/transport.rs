use crate::config::ProxyConfig;
use crate::identity::{IdentityError, TlsSettings};
use crate::proxy::tunnel::{TunnelConnector, UpstreamProxy};
use hyper::client::HttpConnector;
use hyper::{Body, Client, Request, Response};
use hyper_tls::HttpsConnector;
use log::{debug, info};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{0}")]
    Http(#[from] hyper::Error),
    #[error("no response from origin within {0:?}")]
    Timeout(Duration),
}

/// Executes one outbound request and yields the origin's response.
///
/// The engine only depends on this capability, so tests can substitute a fake origin.
pub trait Transport: Send + Sync + 'static {
    fn execute(&self, request: Request<Body>) -> impl Future<Output = Result<Response<Body>, TransportError>> + Send;
}

/// The production transport: hyper's client over a TLS connector carrying the client identity.
#[derive(Clone)]
pub struct HyperTransport {
    client: Client<HttpsConnector<TunnelConnector>, Body>,
    timeout: Option<Duration>,
}

impl HyperTransport {
    pub fn new(tls: &TlsSettings, config: &ProxyConfig) -> Result<Self, IdentityError> {
        let proxy = if config.upstream_proxy { UpstreamProxy::from_env() } else { None };
        if let Some(proxy) = &proxy {
            info!("Routing outbound connections through upstream proxy {}", proxy.authority());
        }

        let mut http = HttpConnector::new();
        http.enforce_http(false);
        http.set_connect_timeout(config.connect_timeout);

        let tls_connector = tokio_native_tls::TlsConnector::from(tls.connector()?);
        let https = HttpsConnector::from((TunnelConnector::new(http, proxy), tls_connector));
        let client = Client::builder().build::<_, Body>(https);
        debug!("Outbound client ready (timeout: {:?}, connect timeout: {:?})", config.timeout, config.connect_timeout);

        Ok(Self { client, timeout: config.timeout })
    }
}

impl Transport for HyperTransport {
    fn execute(&self, request: Request<Body>) -> impl Future<Output = Result<Response<Body>, TransportError>> + Send {
        let call = self.client.request(request);
        let timeout = self.timeout;
        async move {
            match timeout {
                Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_| TransportError::Timeout(limit))?.map_err(TransportError::from),
                None => call.await.map_err(TransportError::from),
            }
        }
    }
}
