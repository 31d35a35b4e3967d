//! HTTP middleware.

pub mod security;

pub use security::with_security_headers;
