// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # WDC Bridge Core
//!
//! Core types, models, and traits shared by every WDC Bridge crate.
//!
//! This crate provides the foundational abstractions for the connector:
//!
//! - Domain models (phases, credentials, schemas, data pages, reports)
//! - Error types
//! - The [`CredentialStore`] seam through which hosts own credential state
//!
//! ## Key Types
//!
//! ### Lifecycle
//! - [`Phase`] - Host-declared execution context
//!
//! ### Authentication
//! - [`Credential`] - Opaque token plus profile identifier
//! - [`OAuthCallbackParams`] - Query parameters of an OAuth redirect
//! - [`MemoryCredentialStore`] - In-process credential store
//!
//! ### Reports & Schema
//! - [`ConnectionConfig`] - Host connection data (selected report)
//! - [`ReportList`] / [`ReportItem`] - Reports available to a credential
//! - [`ColumnDescriptor`] / [`ColumnType`] - Column schema
//!
//! ### Data
//! - [`DataPage`] - Rows plus optional continuation token
//! - [`Row`] - Column name to scalar value mapping

pub mod error;
pub mod models;
pub mod traits;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Lifecycle
    Phase,
    // Authentication
    Credential,
    MemoryCredentialStore,
    OAuthCallbackParams,
    // Reports & schema
    ColumnDescriptor,
    ColumnType,
    ConnectionConfig,
    ReportItem,
    ReportList,
    validate_schema,
    // Data
    DataPage,
    Row,
};

// Re-export traits
pub use traits::CredentialStore;
