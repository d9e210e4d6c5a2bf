// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # WDC Bridge Fetch
//!
//! Request/response plumbing between the connector and the reporting
//! backend.
//!
//! The connector never talks HTTP directly. It is handed a [`Transport`],
//! which POSTs a pre-serialized body to one of the fixed [`Endpoint`]s and
//! returns the decoded JSON response or a [`TransportError`] carrying status
//! detail.
//!
//! ## Host APIs
//!
//! - [`host::http`] - reqwest-backed transport with the backend's fixed
//!   headers and no request timeout by default
//!
//! ## Example
//!
//! ```ignore
//! use wdcbridge_fetch::{Endpoint, HttpTransport, Transport};
//!
//! let transport = HttpTransport::new("http://localhost:9001")?;
//! let token = transport
//!     .post(Endpoint::Tokenize, r#"{"code":"4/abc"}"#.to_string())
//!     .await?;
//! ```

pub mod endpoint;
pub mod error;
pub mod host;
pub mod transport;

// Re-export key types at crate root
pub use endpoint::Endpoint;
pub use error::{ErrorCategory, TransportError};
pub use host::http::{HttpTransport, HttpTransportBuilder};
pub use transport::{Transport, encode_body};
