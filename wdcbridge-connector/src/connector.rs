//! The host-facing connector.
//!
//! [`Connector`] exposes the four-method lifecycle surface hosts depend on:
//! [`setup`](Connector::setup), [`teardown`](Connector::teardown),
//! [`column_headers`](Connector::column_headers), and
//! [`table_data`](Connector::table_data).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};
use wdcbridge_core::{ColumnDescriptor, CredentialStore, MemoryCredentialStore, Phase, Row};
use wdcbridge_fetch::Transport;

use crate::auth::{AuthFlow, AuthState, DEFAULT_ERROR_DISMISS_DELAY};
use crate::data::DataRetrieval;
use crate::error::ConnectorError;
use crate::headless::{HeadlessBrowser, HeadlessUi, TracingHost};
use crate::host::{Browser, HostChannel, InteractiveUi};
use crate::schema::SchemaRegistrar;

// ============================================================================
// Options
// ============================================================================

/// Tunables for a connector instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorOptions {
    /// How long an authentication failure message stays up.
    pub error_dismiss_delay: Duration,
}

impl Default for ConnectorOptions {
    fn default() -> Self {
        Self {
            error_dismiss_delay: DEFAULT_ERROR_DISMISS_DELAY,
        }
    }
}

// ============================================================================
// Connector
// ============================================================================

/// A connector instance bound to one host session.
///
/// Credential state lives in the host's [`CredentialStore`]; the connector
/// itself only tracks whether the interactive phase has already run.
pub struct Connector {
    transport: Arc<dyn Transport>,
    store: Arc<dyn CredentialStore>,
    ui: Arc<dyn InteractiveUi>,
    browser: Arc<dyn Browser>,
    host: Arc<dyn HostChannel>,
    options: ConnectorOptions,
    initialized: AtomicBool,
    auth_state: Arc<watch::Sender<AuthState>>,
    auth_task: Mutex<Option<JoinHandle<AuthState>>>,
}

impl Connector {
    /// Creates a builder around the backend transport.
    pub fn builder(transport: Arc<dyn Transport>) -> ConnectorBuilder {
        ConnectorBuilder::new(transport)
    }

    /// Returns the host's credential store.
    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Returns the connector options.
    pub fn options(&self) -> &ConnectorOptions {
        &self.options
    }

    /// Returns true once the interactive phase has started the
    /// authentication flow.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    /// Returns the current authentication state.
    pub fn auth_state(&self) -> AuthState {
        *self.auth_state.borrow()
    }

    /// Subscribes to authentication state changes.
    pub fn subscribe_auth(&self) -> watch::Receiver<AuthState> {
        self.auth_state.subscribe()
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Performs phase-specific initialization, then calls `on_complete`
    /// exactly once.
    ///
    /// The interactive phase starts the authentication flow on the current
    /// Tokio runtime, at most once per connector. `on_complete` does not
    /// wait for that flow; use [`wait_for_auth`](Self::wait_for_auth) or
    /// [`subscribe_auth`](Self::subscribe_auth) to follow it.
    #[instrument(skip_all, fields(phase = %phase))]
    pub fn setup<F>(&self, phase: Phase, on_complete: F)
    where
        F: FnOnce(),
    {
        if !phase.is_interactive() {
            debug!("No setup work for this phase");
        } else if self.initialized.swap(true, Ordering::SeqCst) {
            debug!("Interactive phase already initialized");
        } else if let Err(e) = self.start_auth_flow() {
            // Allow a later setup call from inside a runtime.
            self.initialized.store(false, Ordering::SeqCst);
            error!(error = %e, "Could not start authentication flow");
        }

        on_complete();
    }

    /// Calls `on_complete` immediately.
    pub fn teardown<F>(&self, on_complete: F)
    where
        F: FnOnce(),
    {
        debug!("Teardown");
        on_complete();
    }

    fn start_auth_flow(&self) -> Result<(), ConnectorError> {
        let handle = Handle::try_current().map_err(|_| ConnectorError::NoRuntime)?;

        let flow = AuthFlow::new(
            self.transport.clone(),
            self.store.clone(),
            self.ui.clone(),
            self.browser.clone(),
            self.auth_state.clone(),
        )
        .with_error_dismiss_delay(self.options.error_dismiss_delay);

        info!("Starting authentication flow");
        let task = handle.spawn(flow.run());
        *self
            .auth_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(task);
        Ok(())
    }

    /// Waits for the authentication flow started by the interactive phase.
    ///
    /// Returns `None` if no flow was started or it was already awaited.
    pub async fn wait_for_auth(&self) -> Option<AuthState> {
        let task = self
            .auth_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()?;

        match task.await {
            Ok(state) => Some(state),
            Err(e) => {
                warn!(error = %e, "Authentication task did not complete");
                self.auth_state.send_replace(AuthState::Failed);
                Some(AuthState::Failed)
            }
        }
    }

    // ------------------------------------------------------------------------
    // Schema & Data
    // ------------------------------------------------------------------------

    /// Fetches the selected report's schema and hands it to
    /// `register_headers`, unmodified.
    ///
    /// On failure `register_headers` is not called and the error goes to
    /// the host's generic error handler.
    pub async fn column_headers<F>(&self, register_headers: F)
    where
        F: FnOnce(Vec<ColumnDescriptor>),
    {
        let registrar = SchemaRegistrar::new(self.transport.clone(), self.store.clone());
        match registrar.fetch().await {
            Ok(headers) => register_headers(headers),
            Err(e) => {
                warn!(error = %e, "Column header request failed");
                self.host.report_error(&e);
            }
        }
    }

    /// Fetches the selected report's rows and hands them to
    /// `register_data` together with the continuation token (always `None`:
    /// each call returns the complete row set).
    ///
    /// On failure `register_data` is not called and the whole extract is
    /// aborted with a `[status_text, category, detail]` diagnostic.
    pub async fn table_data<F>(&self, register_data: F, last_record: Option<&str>)
    where
        F: FnOnce(Vec<Row>, Option<String>),
    {
        let retrieval = DataRetrieval::new(self.transport.clone(), self.store.clone());
        match retrieval.fetch_page(last_record).await {
            Ok(page) => register_data(page.rows, page.last_record),
            Err(e) => {
                warn!(error = %e, "Data request failed, aborting extract");
                self.host.abort_with_error(&e.diagnostic_json());
            }
        }
    }
}

impl std::fmt::Debug for Connector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connector")
            .field("options", &self.options)
            .field("initialized", &self.is_initialized())
            .field("auth_state", &self.auth_state())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Connector Builder
// ============================================================================

/// Builder for constructing a [`Connector`].
///
/// Every collaborator except the transport defaults to its headless
/// variant, and the credential store defaults to an empty in-memory store.
pub struct ConnectorBuilder {
    transport: Arc<dyn Transport>,
    store: Option<Arc<dyn CredentialStore>>,
    ui: Option<Arc<dyn InteractiveUi>>,
    browser: Option<Arc<dyn Browser>>,
    host: Option<Arc<dyn HostChannel>>,
    options: ConnectorOptions,
}

impl ConnectorBuilder {
    /// Creates a new builder.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            store: None,
            ui: None,
            browser: None,
            host: None,
            options: ConnectorOptions::default(),
        }
    }

    /// Sets the credential store.
    pub fn store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Sets the interactive UI.
    pub fn ui(mut self, ui: Arc<dyn InteractiveUi>) -> Self {
        self.ui = Some(ui);
        self
    }

    /// Sets the browser.
    pub fn browser(mut self, browser: Arc<dyn Browser>) -> Self {
        self.browser = Some(browser);
        self
    }

    /// Sets the host channel.
    pub fn host(mut self, host: Arc<dyn HostChannel>) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets the connector options.
    pub fn options(mut self, options: ConnectorOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the authentication failure dismissal delay.
    pub fn error_dismiss_delay(mut self, delay: Duration) -> Self {
        self.options.error_dismiss_delay = delay;
        self
    }

    /// Builds the connector.
    pub fn build(self) -> Connector {
        let (auth_state, _) = watch::channel(AuthState::NoCredential);
        Connector {
            transport: self.transport,
            store: self
                .store
                .unwrap_or_else(|| Arc::new(MemoryCredentialStore::new())),
            ui: self.ui.unwrap_or_else(|| Arc::new(HeadlessUi)),
            browser: self.browser.unwrap_or_else(|| Arc::new(HeadlessBrowser)),
            host: self.host.unwrap_or_else(|| Arc::new(TracingHost)),
            options: self.options,
            initialized: AtomicBool::new(false),
            auth_state: Arc::new(auth_state),
            auth_task: Mutex::new(None),
        }
    }
}
