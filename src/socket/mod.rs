//! Socket and connection management.
//!
//! Mirrors the parts of Chromium's `net/socket/` a single-request client
//! needs:
//! - [`connectjob`]: DNS → TCP → TLS connection flow
//! - [`client`]: the connected socket type (plain TCP or TLS)
//! - [`tls`]: TLS configuration with BoringSSL

pub mod client;
pub mod connectjob;
pub mod tls;
