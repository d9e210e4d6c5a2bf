// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # WDC Bridge Connector
//!
//! The connector a reporting host drives through its lifecycle.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          Connector                           │
//! │   setup(phase) · teardown · column_headers · table_data      │
//! └───────┬──────────────────────┬──────────────────────┬────────┘
//!         │                      │                      │
//!         ▼                      ▼                      ▼
//! ┌──────────────┐      ┌─────────────────┐    ┌────────────────┐
//! │   AuthFlow   │      │ SchemaRegistrar │    │ DataRetrieval  │
//! │ (interactive)│      │   /headers      │    │    /data       │
//! └──────┬───────┘      └────────┬────────┘    └───────┬────────┘
//!        │ /tokenize /reports    │                     │
//!        └───────────────────────┴──────────┬──────────┘
//!                                           ▼
//!                                 ┌──────────────────┐
//!                                 │    Transport     │
//!                                 │ (wdcbridge-fetch)│
//!                                 └──────────────────┘
//! ```
//!
//! The host supplies its collaborators through traits in [`host`]:
//! a [`CredentialStore`](wdcbridge_core::CredentialStore), an
//! [`InteractiveUi`], a [`Browser`] and a [`HostChannel`].
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use wdcbridge_connector::Connector;
//! use wdcbridge_core::Phase;
//! use wdcbridge_fetch::HttpTransport;
//!
//! let transport = Arc::new(HttpTransport::new("http://localhost:9001")?);
//! let connector = Connector::builder(transport).build();
//!
//! connector.setup(Phase::Interactive, || println!("setup done"));
//! let state = connector.wait_for_auth().await;
//! ```

pub mod auth;
pub mod connector;
pub mod data;
pub mod error;
pub mod headless;
pub mod host;
pub mod payload;
pub mod schema;

pub use auth::{AUTH_ERROR_MESSAGE, AuthFlow, AuthState, DEFAULT_ERROR_DISMISS_DELAY};
pub use connector::{Connector, ConnectorBuilder, ConnectorOptions};
pub use data::DataRetrieval;
pub use error::ConnectorError;
pub use headless::{BLANK_PAGE, HeadlessBrowser, HeadlessUi, TracingHost};
pub use host::{Browser, HostChannel, InteractiveUi, SignInHandler};
pub use payload::{ReportRequest, TokenizeRequest};
pub use schema::SchemaRegistrar;
