//! Transport trait.
//!
//! A transport is the connector's only way to reach the backend. Every call
//! is a single attempt: no retries, no implicit timeout.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::endpoint::Endpoint;
use crate::error::TransportError;

/// Issues requests against the reporting backend.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POSTs `body` (already serialized) to `endpoint` and returns the
    /// decoded JSON response.
    async fn post(&self, endpoint: Endpoint, body: String) -> Result<Value, TransportError>;

    /// Returns the absolute URL of an endpoint, used for navigations.
    fn endpoint_url(&self, endpoint: Endpoint) -> String;
}

/// Serializes a request body to JSON text.
pub fn encode_body<T: Serialize + ?Sized>(body: &T) -> Result<String, TransportError> {
    serde_json::to_string(body).map_err(|e| TransportError::aborted(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_encode_body() {
        let body = encode_body(&json!({"code": "4/abc"})).unwrap();
        assert_eq!(body, r#"{"code":"4/abc"}"#);
    }
}
