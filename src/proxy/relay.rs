use hyper::Body;
use hyper::body::Bytes;
use log::debug;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio_stream::Stream;

/// Streams an origin body to the caller chunk by chunk.
///
/// Nothing is accumulated: each chunk is handed on as soon as the origin yields it.
/// The origin body is released when this is dropped, whether the relay finished or
/// either side hung up.
pub struct RelayBody {
    inner: Body,
    target: String,
    relayed: u64,
    finished: bool,
}

impl RelayBody {
    pub fn new(inner: Body, target: impl Into<String>) -> Self {
        Self { inner, target: target.into(), relayed: 0, finished: false }
    }

    pub fn into_body(self) -> Body {
        Body::wrap_stream(self)
    }
}

impl Stream for RelayBody {
    type Item = Result<Bytes, hyper::Error>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match Pin::new(&mut self.inner).poll_next(cx) {
            Poll::Ready(Some(Ok(chunk))) => {
                self.relayed += chunk.len() as u64;
                Poll::Ready(Some(Ok(chunk)))
            }
            Poll::Ready(None) => {
                self.finished = true;
                Poll::Ready(None)
            }
            other => other,
        }
    }
}

impl Drop for RelayBody {
    fn drop(&mut self) {
        if self.finished {
            debug!("Relayed {} bytes from {}", self.relayed, self.target);
        } else {
            debug!("Relay from {} aborted after {} bytes", self.target, self.relayed);
        }
    }
}
