//! Data retrieval.
//!
//! The `/data` request body carries no continuation token and the response
//! carries none either, so every call returns the complete row set as a
//! single final page. A `lastRecord` handed in by the host is logged and
//! otherwise ignored.
// TODO: thread `lastRecord` into the `/data` body once the backend accepts
// a resume marker, and surface its next-page token from the response.

use std::sync::Arc;

use tracing::{debug, instrument};
use wdcbridge_core::{CredentialStore, DataPage, Row};
use wdcbridge_fetch::{Endpoint, Transport, encode_body};

use crate::error::ConnectorError;
use crate::payload::ReportRequest;

/// Fetches rows of the selected report.
#[derive(Clone)]
pub struct DataRetrieval {
    transport: Arc<dyn Transport>,
    store: Arc<dyn CredentialStore>,
}

impl DataRetrieval {
    /// Creates a retriever.
    pub fn new(transport: Arc<dyn Transport>, store: Arc<dyn CredentialStore>) -> Self {
        Self { transport, store }
    }

    /// Issues one `/data` request.
    #[instrument(skip(self))]
    pub async fn fetch_page(&self, last_record: Option<&str>) -> Result<DataPage, ConnectorError> {
        let request = ReportRequest::from_store(self.store.as_ref())?;

        if let Some(token) = last_record.filter(|t| !t.is_empty()) {
            debug!(last_record = %token, "Continuation token not forwarded to /data");
        }
        debug!(report = %request.report_id, "Requesting data");

        let response = self
            .transport
            .post(Endpoint::Data, encode_body(&request)?)
            .await?;

        let rows: Vec<Row> = serde_json::from_value(response)
            .map_err(|e| ConnectorError::decode(Endpoint::Data, &e))?;

        debug!(rows = rows.len(), "Data received");
        Ok(DataPage::complete(rows))
    }
}
