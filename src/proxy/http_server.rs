use crate::proxy::request_handler::ProxyEngine;
use crate::proxy::transport::Transport;
use anyhow::{Context, Result};
use hyper::server::conn::AddrStream;
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Request};
use log::{error, info, trace};
use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

/// Bind the inbound listener and return its address with the future that serves it.
///
/// Each connection runs in its own task. A failed bind is returned to the caller, which
/// treats it as fatal.
pub fn bind_proxy_server<T: Transport>(
    addr: SocketAddr,
    engine: Arc<ProxyEngine<T>>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(SocketAddr, impl Future<Output = Result<()>> + Send)> {
    let make_svc = make_service_fn(move |conn: &AddrStream| {
        let engine = engine.clone();
        let remote_addr = conn.remote_addr();
        async move {
            Ok::<_, Infallible>(service_fn(move |req: Request<Body>| {
                let engine = engine.clone();
                async move {
                    trace!("Connection {} sent {} {}", remote_addr, req.method(), req.uri());
                    Ok::<_, Infallible>(engine.handle(req).await)
                }
            }))
        }
    });

    let builder = hyper::Server::try_bind(&addr).with_context(|| format!("Failed to bind proxy listener on {}", addr))?;
    let server = builder.http1_only(true).serve(make_svc);
    let local_addr = server.local_addr();
    let server = server.with_graceful_shutdown(shutdown);

    Ok((local_addr, async move { server.await.context("Proxy server error") }))
}

/// Start the proxy on `addr` and serve until ctrl-c.
pub async fn start_proxy_server<T: Transport>(addr: SocketAddr, engine: Arc<ProxyEngine<T>>) -> Result<()> {
    let (local_addr, server) = bind_proxy_server(addr, engine, shutdown_signal())?;
    info!("Proxy listening on http://localhost:{}", local_addr.port());
    server.await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
