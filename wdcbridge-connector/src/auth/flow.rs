//! The authentication state machine.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};
use wdcbridge_core::{Credential, CredentialStore, OAuthCallbackParams, ReportList};
use wdcbridge_fetch::{Endpoint, Transport, encode_body};

use super::state::AuthState;
use crate::error::ConnectorError;
use crate::host::{Browser, InteractiveUi, SignInHandler};
use crate::payload::TokenizeRequest;

// ============================================================================
// Constants
// ============================================================================

/// Progress message shown when authentication fails.
pub const AUTH_ERROR_MESSAGE: &str = "There was a problem authenticating.";

/// How long the failure message stays up before the indicator is dismissed.
pub const DEFAULT_ERROR_DISMISS_DELAY: Duration = Duration::from_millis(2000);

// ============================================================================
// Auth Flow
// ============================================================================

/// One run of the interactive authentication flow.
///
/// The flow is linear: it either reaches [`AuthState::Ready`], stops at
/// [`AuthState::AwaitingUserSignIn`] waiting for the user, or fails.
pub struct AuthFlow {
    transport: Arc<dyn Transport>,
    store: Arc<dyn CredentialStore>,
    ui: Arc<dyn InteractiveUi>,
    browser: Arc<dyn Browser>,
    error_dismiss_delay: Duration,
    state: Arc<watch::Sender<AuthState>>,
}

impl AuthFlow {
    /// Creates a flow publishing its state on `state`.
    pub fn new(
        transport: Arc<dyn Transport>,
        store: Arc<dyn CredentialStore>,
        ui: Arc<dyn InteractiveUi>,
        browser: Arc<dyn Browser>,
        state: Arc<watch::Sender<AuthState>>,
    ) -> Self {
        Self {
            transport,
            store,
            ui,
            browser,
            error_dismiss_delay: DEFAULT_ERROR_DISMISS_DELAY,
            state,
        }
    }

    /// Overrides the failure message dismissal delay.
    pub fn with_error_dismiss_delay(mut self, delay: Duration) -> Self {
        self.error_dismiss_delay = delay;
        self
    }

    /// Runs the flow to its settled state.
    #[instrument(skip(self))]
    pub async fn run(self) -> AuthState {
        let outcome = match self.store.credential() {
            Some(credential) => self.resume(credential).await,
            None => self.sign_in().await,
        };

        let settled = match outcome {
            Ok(state) => state,
            Err(e) => {
                self.recover_from_error(&e).await;
                AuthState::Failed
            }
        };

        self.transition(settled);
        info!(state = %settled, "Authentication flow settled");
        settled
    }

    fn transition(&self, next: AuthState) {
        let previous = self.state.send_replace(next);
        if previous != next {
            debug!(from = %previous, to = %next, "Auth state transition");
        }
    }

    /// Existing-credential path.
    async fn resume(&self, credential: Credential) -> Result<AuthState, ConnectorError> {
        debug!("Credential present, fetching reports");
        self.transition(AuthState::FetchingInitialSchema);
        self.ui.show_progress();

        self.load_reports(credential.token).await?;
        Ok(AuthState::Ready)
    }

    /// No-credential path: bind sign-in, then consume an OAuth callback if
    /// the page carries one.
    async fn sign_in(&self) -> Result<AuthState, ConnectorError> {
        let authorize_url = self.transport.endpoint_url(Endpoint::Authorize);
        self.ui
            .register_sign_in(SignInHandler::new(self.browser.clone(), authorize_url));
        self.transition(AuthState::AwaitingUserSignIn);

        let location = self.browser.current_url();
        let params = match OAuthCallbackParams::from_url(&location) {
            Ok(params) => params,
            Err(e) => {
                debug!(error = %e, "Page URL not parseable, no callback to consume");
                return Ok(AuthState::AwaitingUserSignIn);
            }
        };

        let Some(code) = params.code else {
            if let Some(error) = params.error {
                warn!(error = %error, "OAuth provider returned an error");
            }
            return Ok(AuthState::AwaitingUserSignIn);
        };

        self.transition(AuthState::ExchangingToken);
        self.ui.show_progress();

        let credential = self.exchange_code(&code).await?;

        self.store.set_password(credential.token.clone());
        self.ui.set_password_field(&credential.token);

        // Record the bare page URL so a reload cannot replay the code.
        let bare = OAuthCallbackParams::bare_location(&location)?;
        self.browser.push_history(&bare);

        self.transition(AuthState::FetchingInitialSchema);
        self.load_reports(credential.token).await?;
        Ok(AuthState::Ready)
    }

    async fn exchange_code(&self, code: &str) -> Result<Credential, ConnectorError> {
        debug!("Exchanging authorization code");
        let body = encode_body(&TokenizeRequest { code })?;
        let response = self.transport.post(Endpoint::Tokenize, body).await?;
        Ok(Credential::from_token_response(&response)?)
    }

    /// Fetches `/reports` with the credential text and fills the form.
    async fn load_reports(&self, credential_text: String) -> Result<ReportList, ConnectorError> {
        let response = self
            .transport
            .post(Endpoint::Reports, credential_text)
            .await?;
        let reports: ReportList = serde_json::from_value(response)
            .map_err(|e| ConnectorError::decode(Endpoint::Reports, &e))?;

        debug!(count = reports.items.len(), "Reports received");
        self.populate_form(&reports);
        Ok(reports)
    }

    fn populate_form(&self, reports: &ReportList) {
        self.ui.set_username_field(&reports.profile_id);
        self.store.set_username(reports.profile_id.clone());

        for item in &reports.items {
            self.ui.add_report_option(item);
        }

        self.ui.hide_progress();
        self.ui.hide_sign_in();
        self.ui.reveal_connection_fields();
    }

    async fn recover_from_error(&self, err: &ConnectorError) {
        warn!(error = %err, "Authentication failed");
        self.transition(AuthState::Failed);
        self.ui.set_progress_message(AUTH_ERROR_MESSAGE);
        tokio::time::sleep(self.error_dismiss_delay).await;
        self.ui.hide_progress();
    }
}
