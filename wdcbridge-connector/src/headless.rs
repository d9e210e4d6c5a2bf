//! Headless collaborators.
//!
//! Used when the host runs the connector without a page, as in the
//! `gatherData` and `auth` phases. UI calls are dropped, failures go to the
//! log.

use tracing::{debug, error, warn};
use wdcbridge_core::ReportItem;

use crate::error::ConnectorError;
use crate::host::{Browser, HostChannel, InteractiveUi, SignInHandler};

/// Page location reported by [`HeadlessBrowser`].
pub const BLANK_PAGE: &str = "about:blank";

/// [`InteractiveUi`] that renders nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessUi;

impl InteractiveUi for HeadlessUi {
    fn show_progress(&self) {}

    fn set_progress_message(&self, message: &str) {
        debug!(text = message, "Progress message (headless)");
    }

    fn hide_progress(&self) {}

    fn register_sign_in(&self, handler: SignInHandler) {
        debug!(url = %handler.authorize_url(), "Sign-in available (headless)");
    }

    fn hide_sign_in(&self) {}

    fn add_report_option(&self, _report: &ReportItem) {}

    fn set_username_field(&self, _username: &str) {}

    fn set_password_field(&self, _password: &str) {}

    fn reveal_connection_fields(&self) {}
}

/// [`Browser`] with no page.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessBrowser;

impl Browser for HeadlessBrowser {
    fn current_url(&self) -> String {
        BLANK_PAGE.to_string()
    }

    fn navigate(&self, url: &str) {
        warn!(url, "Navigation requested without a browser");
    }

    fn push_history(&self, _url: &str) {}
}

/// [`HostChannel`] that logs failures.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingHost;

impl HostChannel for TracingHost {
    fn report_error(&self, err: &ConnectorError) {
        error!(error = %err, "Connector error");
    }

    fn abort_with_error(&self, message: &str) {
        error!(diagnostic = %message, "Extract aborted");
    }
}
