//! Host APIs for reaching the reporting backend.
//!
//! - [`http`] - HTTP transport with tracing and the backend's fixed headers

pub mod http;

// Re-export key types
pub use http::{HttpTransport, HttpTransportBuilder};
