//! A forward proxy for mTLS-protected origins.
//!
//! Inbound requests of the form `/{host}/{path}?{query}` are replayed against
//! `https://{host}/{path}?{query}` using a client identity decrypted from a PKCS#12
//! bundle, and the origin's response is streamed back unchanged.

pub mod config;
pub mod identity;
pub mod proxy;
pub mod utils;
