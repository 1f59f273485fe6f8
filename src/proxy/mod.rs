// Proxy module
//
// This module contains the forwarding engine split into focused submodules:
// - http_server: Inbound listener setup
// - request_handler: The forwarding engine (routing, header relay, error translation)
// - target: Resolving `/{host}/{path}` into the origin URL
// - transport: The outbound request capability and its hyper implementation
// - tunnel: CONNECT tunnelling through an upstream network proxy
// - relay: Streaming origin bodies back to the caller

pub mod http_server;
pub mod relay;
pub mod request_handler;
pub mod target;
pub mod transport;
pub mod tunnel;

pub use http_server::{bind_proxy_server, start_proxy_server};
pub use request_handler::ProxyEngine;
pub use transport::{HyperTransport, Transport, TransportError};
