use crate::proxy::relay::RelayBody;
use crate::proxy::target::{INVALID_FORMAT_MESSAGE, Target};
use crate::proxy::transport::Transport;
use hyper::header::{self, HeaderMap, HeaderValue};
use hyper::{Body, Method, Request, Response, StatusCode};
use log::{debug, error, info};

/// Maps `/{host}/{path}` requests onto the origin and relays the answer.
///
/// Holds no mutable state, so one instance is shared by every connection.
pub struct ProxyEngine<T> {
    transport: T,
    scheme: String,
    debug: bool,
}

impl<T: Transport> ProxyEngine<T> {
    pub fn new(transport: T, scheme: impl Into<String>, debug: bool) -> Self {
        Self { transport, scheme: scheme.into(), debug }
    }

    /// Handle a single inbound request. Failures are turned into 400/500/502 responses.
    pub async fn handle(&self, req: Request<Body>) -> Response<Body> {
        let (parts, body) = req.into_parts();
        let original = parts.uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/").to_string();

        let target = match Target::resolve(&self.scheme, &parts.uri) {
            Ok(target) => target,
            Err(e) => {
                debug!("Rejecting {} {}: {}", parts.method, original, e);
                return plain_response(StatusCode::BAD_REQUEST, INVALID_FORMAT_MESSAGE);
            }
        };

        info!("{} {} -> {}", parts.method, original, target);
        if self.debug {
            dump_headers("Request Headers:", &parts.headers);
        }

        let outbound = match build_outbound(parts.method.clone(), &parts.headers, body, &target) {
            Ok(outbound) => outbound,
            Err(e) => {
                error!("Failed to create request: {}", e);
                return plain_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create request");
            }
        };

        let response = match self.transport.execute(outbound).await {
            Ok(response) => response,
            Err(e) => {
                error!("Failed to forward request: {}", e);
                return plain_response(StatusCode::BAD_GATEWAY, &format!("Failed to forward request: {}", e));
            }
        };

        let status = response.status();
        info!("{} {} -> {} {}", parts.method, target, status.as_u16(), status.canonical_reason().unwrap_or_default());
        if self.debug {
            dump_headers("Response Headers:", response.headers());
        }

        let (origin, origin_body) = response.into_parts();
        let mut relayed = Response::new(RelayBody::new(origin_body, target.url()).into_body());
        *relayed.status_mut() = origin.status;
        copy_headers(&origin.headers, relayed.headers_mut());
        relayed
    }
}

/// Build the outbound request for `target`, carrying the inbound method, headers and body.
///
/// `Host` is left for the client to derive from the target URL.
pub fn build_outbound(method: Method, headers: &HeaderMap, body: Body, target: &Target) -> Result<Request<Body>, hyper::http::Error> {
    let mut outbound = Request::builder().method(method).uri(target.url()).body(body)?;
    for (name, value) in headers {
        if name == header::HOST {
            continue;
        }
        outbound.headers_mut().append(name, value.clone());
    }
    Ok(outbound)
}

fn copy_headers(from: &HeaderMap, to: &mut HeaderMap) {
    for (name, value) in from {
        to.append(name, value.clone());
    }
}

fn dump_headers(title: &str, headers: &HeaderMap) {
    debug!("{}", title);
    for (name, value) in headers {
        debug!("  {}: {}", name, String::from_utf8_lossy(value.as_bytes()));
    }
}

fn plain_response(status: StatusCode, message: &str) -> Response<Body> {
    let mut response = Response::new(Body::from(format!("{}\n", message)));
    *response.status_mut() = status;
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));
    headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    response
}
