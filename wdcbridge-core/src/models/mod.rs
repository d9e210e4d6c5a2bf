//! Domain models for WDC Bridge.
//!
//! This module contains the data structures exchanged between the host,
//! the connector, and the reporting backend.
//!
//! ## Submodules
//!
//! - [`phase`] - Lifecycle phases declared by the host
//! - [`credential`] - Credentials, OAuth callbacks, in-memory store
//! - [`report`] - Connection data and report listings
//! - [`schema`] - Column descriptors and schema validation
//! - [`data`] - Rows and data pages

mod credential;
mod data;
mod phase;
mod report;
mod schema;

// Re-export everything at the models level
pub use credential::{Credential, MemoryCredentialStore, OAuthCallbackParams};
pub use data::{DataPage, Row};
pub use phase::Phase;
pub use report::{ConnectionConfig, ReportItem, ReportList};
pub use schema::{ColumnDescriptor, ColumnType, validate_schema};
