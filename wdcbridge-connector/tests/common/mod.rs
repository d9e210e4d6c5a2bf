//! Test doubles for the connector's collaborators.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use tokio::time::Instant;
use wdcbridge_connector::{Browser, ConnectorError, HostChannel, InteractiveUi, SignInHandler};
use wdcbridge_core::ReportItem;
use wdcbridge_fetch::{Endpoint, Transport, TransportError};

pub const BASE_URL: &str = "http://localhost:9001";

// ============================================================================
// Transport
// ============================================================================

/// Transport answering from per-endpoint queues and recording every call.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<HashMap<Endpoint, VecDeque<Result<Value, TransportError>>>>,
    calls: Mutex<Vec<(Endpoint, String)>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, endpoint: Endpoint, value: Value) -> &Self {
        self.enqueue(endpoint, Ok(value))
    }

    pub fn fail(&self, endpoint: Endpoint, err: TransportError) -> &Self {
        self.enqueue(endpoint, Err(err))
    }

    fn enqueue(&self, endpoint: Endpoint, result: Result<Value, TransportError>) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .entry(endpoint)
            .or_default()
            .push_back(result);
        self
    }

    pub fn calls(&self) -> Vec<(Endpoint, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, endpoint: Endpoint) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|(e, _)| *e == endpoint)
            .map(|(_, body)| body)
            .collect()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post(&self, endpoint: Endpoint, body: String) -> Result<Value, TransportError> {
        self.calls.lock().unwrap().push((endpoint, body));
        self.responses
            .lock()
            .unwrap()
            .get_mut(&endpoint)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(TransportError::network(format!("no response for {endpoint}"))))
    }

    fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{BASE_URL}/{}", endpoint.path())
    }
}

// ============================================================================
// UI
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    ShowProgress,
    ProgressMessage(String),
    HideProgress,
    SignInRegistered(String),
    HideSignIn,
    ReportOption(ReportItem),
    Username(String),
    Password(String),
    RevealFields,
}

/// UI recording every call with the (possibly paused) Tokio clock.
#[derive(Default)]
pub struct RecordingUi {
    events: Mutex<Vec<(Instant, UiEvent)>>,
    sign_in: Mutex<Option<SignInHandler>>,
}

impl RecordingUi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn record(&self, event: UiEvent) {
        self.events.lock().unwrap().push((Instant::now(), event));
    }

    pub fn events(&self) -> Vec<UiEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|(_, e)| e.clone())
            .collect()
    }

    pub fn timed_events(&self) -> Vec<(Instant, UiEvent)> {
        self.events.lock().unwrap().clone()
    }

    pub fn sign_in_handler(&self) -> Option<SignInHandler> {
        self.sign_in.lock().unwrap().clone()
    }
}

impl InteractiveUi for RecordingUi {
    fn show_progress(&self) {
        self.record(UiEvent::ShowProgress);
    }

    fn set_progress_message(&self, message: &str) {
        self.record(UiEvent::ProgressMessage(message.to_string()));
    }

    fn hide_progress(&self) {
        self.record(UiEvent::HideProgress);
    }

    fn register_sign_in(&self, handler: SignInHandler) {
        self.record(UiEvent::SignInRegistered(handler.authorize_url().to_string()));
        *self.sign_in.lock().unwrap() = Some(handler);
    }

    fn hide_sign_in(&self) {
        self.record(UiEvent::HideSignIn);
    }

    fn add_report_option(&self, report: &ReportItem) {
        self.record(UiEvent::ReportOption(report.clone()));
    }

    fn set_username_field(&self, username: &str) {
        self.record(UiEvent::Username(username.to_string()));
    }

    fn set_password_field(&self, password: &str) {
        self.record(UiEvent::Password(password.to_string()));
    }

    fn reveal_connection_fields(&self) {
        self.record(UiEvent::RevealFields);
    }
}

// ============================================================================
// Browser
// ============================================================================

/// Browser with a fixed page URL.
pub struct MockBrowser {
    location: String,
    navigations: Mutex<Vec<String>>,
    history: Mutex<Vec<String>>,
}

impl MockBrowser {
    pub fn at(location: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            location: location.into(),
            navigations: Mutex::new(Vec::new()),
            history: Mutex::new(Vec::new()),
        })
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().unwrap().clone()
    }

    pub fn history(&self) -> Vec<String> {
        self.history.lock().unwrap().clone()
    }
}

impl Browser for MockBrowser {
    fn current_url(&self) -> String {
        self.location.clone()
    }

    fn navigate(&self, url: &str) {
        self.navigations.lock().unwrap().push(url.to_string());
    }

    fn push_history(&self, url: &str) {
        self.history.lock().unwrap().push(url.to_string());
    }
}

// ============================================================================
// Host
// ============================================================================

/// Host channel collecting reported errors and aborts.
#[derive(Default)]
pub struct RecordingHost {
    errors: Mutex<Vec<String>>,
    aborts: Mutex<Vec<String>>,
}

impl RecordingHost {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }

    pub fn aborts(&self) -> Vec<String> {
        self.aborts.lock().unwrap().clone()
    }
}

impl HostChannel for RecordingHost {
    fn report_error(&self, error: &ConnectorError) {
        self.errors.lock().unwrap().push(error.to_string());
    }

    fn abort_with_error(&self, message: &str) {
        self.aborts.lock().unwrap().push(message.to_string());
    }
}
