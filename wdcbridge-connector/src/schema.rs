//! Schema registration.

use std::sync::Arc;

use tracing::{debug, instrument};
use wdcbridge_core::{ColumnDescriptor, CredentialStore};
use wdcbridge_fetch::{Endpoint, Transport, encode_body};

use crate::error::ConnectorError;
use crate::payload::ReportRequest;

/// Fetches the column schema of the selected report.
///
/// The backend's answer is trusted: descriptors come back in backend order
/// and are not validated.
#[derive(Clone)]
pub struct SchemaRegistrar {
    transport: Arc<dyn Transport>,
    store: Arc<dyn CredentialStore>,
}

impl SchemaRegistrar {
    /// Creates a registrar.
    pub fn new(transport: Arc<dyn Transport>, store: Arc<dyn CredentialStore>) -> Self {
        Self { transport, store }
    }

    /// Issues one `/headers` request.
    #[instrument(skip(self))]
    pub async fn fetch(&self) -> Result<Vec<ColumnDescriptor>, ConnectorError> {
        let request = ReportRequest::from_store(self.store.as_ref())?;
        debug!(report = %request.report_id, "Requesting column headers");

        let response = self
            .transport
            .post(Endpoint::Headers, encode_body(&request)?)
            .await?;

        let headers: Vec<ColumnDescriptor> = serde_json::from_value(response)
            .map_err(|e| ConnectorError::decode(Endpoint::Headers, &e))?;

        debug!(columns = headers.len(), "Column headers received");
        Ok(headers)
    }
}
