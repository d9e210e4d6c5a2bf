//! Host-side collaborators.
//!
//! The connector drives but does not render anything. Everything visual or
//! host-owned sits behind these traits:
//!
//! - [`InteractiveUi`] - progress modal, sign-in control, configuration form
//! - [`Browser`] - page location, navigation, and history
//! - [`HostChannel`] - the host's error and abort channels
//!
//! Headless defaults live in [`crate::headless`].

use std::fmt;
use std::sync::Arc;

use tracing::debug;
use wdcbridge_core::ReportItem;

use crate::error::ConnectorError;

// ============================================================================
// Interactive UI
// ============================================================================

/// The configuration page shown during the interactive phase.
pub trait InteractiveUi: Send + Sync {
    /// Shows the blocking progress indicator.
    fn show_progress(&self);

    /// Replaces the text of the progress indicator.
    fn set_progress_message(&self, message: &str);

    /// Dismisses the progress indicator.
    fn hide_progress(&self);

    /// Binds the sign-in control. Activating it must call
    /// [`SignInHandler::activate`].
    fn register_sign_in(&self, handler: SignInHandler);

    /// Hides the sign-in control once a credential is usable.
    fn hide_sign_in(&self);

    /// Appends one entry to the report selector.
    fn add_report_option(&self, report: &ReportItem);

    /// Writes the username field and signals a value change.
    fn set_username_field(&self, username: &str);

    /// Writes the password field and signals a value change.
    fn set_password_field(&self, password: &str);

    /// Reveals the remaining connection fields.
    fn reveal_connection_fields(&self);
}

// ============================================================================
// Browser
// ============================================================================

/// The page hosting the connector.
pub trait Browser: Send + Sync {
    /// Returns the current page URL.
    fn current_url(&self) -> String;

    /// Performs a full navigation away from the page.
    fn navigate(&self, url: &str);

    /// Pushes a history entry so the host records `url` as the page location.
    fn push_history(&self, url: &str);
}

// ============================================================================
// Host Channel
// ============================================================================

/// The host application's failure channels.
pub trait HostChannel: Send + Sync {
    /// Generic error handler; signals an unrecoverable error for the
    /// current call.
    fn report_error(&self, error: &ConnectorError);

    /// Aborts the whole data-gathering run with a diagnostic string.
    fn abort_with_error(&self, message: &str);
}

// ============================================================================
// Sign-in Handler
// ============================================================================

/// Activation handler for the sign-in control.
///
/// Activation navigates the page to the backend's `/authorize` endpoint.
/// The OAuth provider eventually redirects back with a `code` parameter,
/// which the next interactive setup picks up.
#[derive(Clone)]
pub struct SignInHandler {
    browser: Arc<dyn Browser>,
    authorize_url: String,
}

impl SignInHandler {
    /// Creates a handler navigating `browser` to `authorize_url`.
    pub fn new(browser: Arc<dyn Browser>, authorize_url: impl Into<String>) -> Self {
        Self {
            browser,
            authorize_url: authorize_url.into(),
        }
    }

    /// Returns the navigation target.
    pub fn authorize_url(&self) -> &str {
        &self.authorize_url
    }

    /// Handles a click or press on the sign-in control.
    pub fn activate(&self) {
        debug!(url = %self.authorize_url, "Sign-in activated");
        self.browser.navigate(&self.authorize_url);
    }
}

impl fmt::Debug for SignInHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInHandler")
            .field("authorize_url", &self.authorize_url)
            .finish_non_exhaustive()
    }
}
