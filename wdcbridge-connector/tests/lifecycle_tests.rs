//! Integration tests for the phase controller, schema, and data protocols.

mod common;

use std::sync::Arc;

use common::{MockTransport, RecordingHost, RecordingUi};
use serde_json::{Value, json};
use wdcbridge_connector::{AuthState, Connector};
use wdcbridge_core::{
    ColumnDescriptor, ColumnType, ConnectionConfig, Credential, CredentialStore,
    MemoryCredentialStore, Phase, Row, validate_schema,
};
use wdcbridge_fetch::{Endpoint, TransportError};

fn selected_report_store() -> MemoryCredentialStore {
    MemoryCredentialStore::with_credential(Credential::new(
        r#"{"access_token":"ya29"}"#,
        Some("p1".to_string()),
    ))
    .with_report("r1")
}

fn connector_with(
    transport: &Arc<MockTransport>,
    store: MemoryCredentialStore,
    host: &Arc<RecordingHost>,
) -> Connector {
    Connector::builder(transport.clone())
        .store(Arc::new(store))
        .host(host.clone())
        .build()
}

fn expected_report_body() -> Value {
    json!({
        "auth": {"access_token": "ya29"},
        "reportId": "r1",
        "profileId": "p1"
    })
}

// ============================================================================
// Phase Controller
// ============================================================================

#[tokio::test]
async fn test_non_interactive_setup_has_no_side_effects() {
    let transport = MockTransport::new();
    let ui = RecordingUi::new();
    let store = Arc::new(selected_report_store());
    let connector = Connector::builder(transport.clone())
        .store(store.clone())
        .ui(ui.clone())
        .build();

    for phase in [Phase::GatherData, Phase::Auth] {
        let mut completions = 0;
        connector.setup(phase, || completions += 1);
        assert_eq!(completions, 1);
    }

    assert!(!connector.is_initialized());
    assert_eq!(connector.wait_for_auth().await, None);
    assert_eq!(connector.auth_state(), AuthState::NoCredential);
    assert!(transport.calls().is_empty());
    assert!(ui.events().is_empty());

    assert_eq!(store.password().as_deref(), Some(r#"{"access_token":"ya29"}"#));
    assert_eq!(store.username().as_deref(), Some("p1"));
    assert_eq!(store.connection_data(), ConnectionConfig::for_report("r1"));
}

#[tokio::test]
async fn test_teardown_completes_immediately() {
    let connector = Connector::builder(MockTransport::new()).build();

    let mut completions = 0;
    connector.teardown(|| completions += 1);

    assert_eq!(completions, 1);
}

#[test]
fn test_setup_outside_runtime_still_completes() {
    let connector = Connector::builder(MockTransport::new()).build();

    let mut completed = false;
    connector.setup(Phase::Interactive, || completed = true);

    assert!(completed);
    assert!(!connector.is_initialized());
}

// ============================================================================
// Schema
// ============================================================================

#[tokio::test]
async fn test_column_headers_pass_through_unmodified() {
    let transport = MockTransport::new();
    let host = RecordingHost::new();
    let connector = connector_with(&transport, selected_report_store(), &host);
    transport.respond(
        Endpoint::Headers,
        json!([
            {"name": "date", "type": "date", "incrementalRefresh": true},
            {"name": "sessions", "type": "int"},
            {"name": "source", "type": "string"}
        ]),
    );

    let mut registered = None;
    connector
        .column_headers(|headers| registered = Some(headers))
        .await;

    let headers = registered.unwrap();
    assert_eq!(
        headers,
        vec![
            ColumnDescriptor::new("date", ColumnType::Date).incremental(),
            ColumnDescriptor::new("sessions", ColumnType::Int),
            ColumnDescriptor::new("source", ColumnType::String),
        ]
    );
    assert!(validate_schema(&headers).is_ok());

    let bodies = transport.calls_to(Endpoint::Headers);
    assert_eq!(bodies.len(), 1);
    let body: Value = serde_json::from_str(&bodies[0]).unwrap();
    assert_eq!(body, expected_report_body());
    assert!(host.errors().is_empty());
}

#[tokio::test]
async fn test_column_headers_keep_backend_extras() {
    let transport = MockTransport::new();
    let host = RecordingHost::new();
    let connector = connector_with(&transport, selected_report_store(), &host);
    let sent = json!([
        {"name": "Date", "type": "date", "incrementalRefresh": true, "alias": "Day"},
        {"name": "Area", "type": "geometry"}
    ]);
    transport.respond(Endpoint::Headers, sent.clone());

    let mut registered = None;
    connector
        .column_headers(|headers| registered = Some(headers))
        .await;

    let headers = registered.unwrap();
    assert_eq!(serde_json::to_value(&headers).unwrap(), sent);
    assert_eq!(headers[1].column_type.as_str(), "geometry");
    assert!(host.errors().is_empty());
}

#[tokio::test]
async fn test_column_headers_failure_goes_to_error_handler() {
    let transport = MockTransport::new();
    let host = RecordingHost::new();
    let connector = connector_with(&transport, selected_report_store(), &host);
    transport.fail(
        Endpoint::Headers,
        TransportError::http_status(500, Some("Internal Server Error"), "boom"),
    );

    let mut called = false;
    connector.column_headers(|_| called = true).await;

    assert!(!called);
    assert_eq!(host.errors().len(), 1);
    assert!(host.aborts().is_empty());
}

#[tokio::test]
async fn test_column_headers_without_report_selection() {
    let transport = MockTransport::new();
    let host = RecordingHost::new();
    let store = MemoryCredentialStore::with_credential(Credential::new("{}", None));
    let connector = connector_with(&transport, store, &host);

    let mut called = false;
    connector.column_headers(|_| called = true).await;

    assert!(!called);
    assert!(transport.calls().is_empty());
    assert_eq!(host.errors(), vec!["No report selected".to_string()]);
}

// ============================================================================
// Data
// ============================================================================

#[tokio::test]
async fn test_table_data_passes_rows_through() {
    let transport = MockTransport::new();
    let host = RecordingHost::new();
    let connector = connector_with(&transport, selected_report_store(), &host);
    let rows = json!([
        {"date": "2024-01-01", "sessions": 5, "source": "google"},
        {"date": "2024-01-02", "sessions": 7, "source": null}
    ]);
    transport.respond(Endpoint::Data, rows.clone());

    let mut registered: Option<(Vec<Row>, Option<String>)> = None;
    connector
        .table_data(|rows, token| registered = Some((rows, token)), None)
        .await;

    let (got, token) = registered.unwrap();
    assert_eq!(serde_json::to_value(&got).unwrap(), rows);
    assert_eq!(token, None);

    let body: Value = serde_json::from_str(&transport.calls_to(Endpoint::Data)[0]).unwrap();
    assert_eq!(body, expected_report_body());
    assert!(host.aborts().is_empty());
}

#[tokio::test]
async fn test_table_data_ignores_last_record() {
    let transport = MockTransport::new();
    let host = RecordingHost::new();
    let connector = connector_with(&transport, selected_report_store(), &host);
    transport.respond(Endpoint::Data, json!([]));

    let mut token = Some("unset".to_string());
    connector
        .table_data(|_, next| token = next, Some("row-100"))
        .await;

    assert_eq!(token, None);
    let body: Value = serde_json::from_str(&transport.calls_to(Endpoint::Data)[0]).unwrap();
    assert_eq!(body, expected_report_body());
}

#[tokio::test]
async fn test_table_data_failure_aborts_with_diagnostic() {
    let transport = MockTransport::new();
    let host = RecordingHost::new();
    let connector = connector_with(&transport, selected_report_store(), &host);
    transport.fail(
        Endpoint::Data,
        TransportError::http_status(500, Some("Internal Server Error"), "boom"),
    );

    let mut called = false;
    connector.table_data(|_, _| called = true, None).await;

    assert!(!called);
    let aborts = host.aborts();
    assert_eq!(aborts, vec![r#"["500 Internal Server Error","error","boom"]"#]);
    let parts: Vec<String> = serde_json::from_str(&aborts[0]).unwrap();
    assert_eq!(parts.len(), 3);
    assert!(host.errors().is_empty());
}

#[tokio::test]
async fn test_table_data_non_array_response_aborts() {
    let transport = MockTransport::new();
    let host = RecordingHost::new();
    let connector = connector_with(&transport, selected_report_store(), &host);
    transport.respond(Endpoint::Data, json!({"rows": []}));

    connector.table_data(|_, _| {}, None).await;

    let aborts = host.aborts();
    assert_eq!(aborts.len(), 1);
    let parts: Vec<String> = serde_json::from_str(&aborts[0]).unwrap();
    assert_eq!(parts[1], "parsererror");
}

// ============================================================================
// End to End
// ============================================================================

#[tokio::test]
async fn test_gather_data_after_interactive_sign_in() {
    let transport = MockTransport::new();
    let host = RecordingHost::new();
    let store = Arc::new(MemoryCredentialStore::with_credential(Credential::new(
        r#"{"access_token":"ya29"}"#,
        None,
    )));
    transport
        .respond(
            Endpoint::Reports,
            json!({"profileId": "p1", "items": [{"id": "r1", "name": "Report One"}]}),
        )
        .respond(
            Endpoint::Headers,
            json!([{"name": "date", "type": "date", "incrementalRefresh": true}]),
        )
        .respond(Endpoint::Data, json!([{"date": "2024-01-01"}]));

    let interactive = Connector::builder(transport.clone())
        .store(store.clone())
        .host(host.clone())
        .build();
    interactive.setup(Phase::Interactive, || {});
    assert_eq!(interactive.wait_for_auth().await, Some(AuthState::Ready));

    // The user picks a report; the host carries the store into gatherData.
    store.set_connection_data(ConnectionConfig::for_report("r1"));
    let gather = Connector::builder(transport.clone())
        .store(store.clone())
        .host(host.clone())
        .build();
    gather.setup(Phase::GatherData, || {});

    let mut headers = Vec::new();
    gather.column_headers(|h| headers = h).await;
    assert_eq!(headers.len(), 1);
    assert!(headers[0].is_incremental());

    let mut rows = Vec::new();
    gather.table_data(|r, _| rows = r, None).await;
    assert_eq!(rows.len(), 1);

    let body: Value = serde_json::from_str(&transport.calls_to(Endpoint::Data)[0]).unwrap();
    assert_eq!(body, expected_report_body());
}
