//! Terminal implementations of the connector's host collaborators.

use std::sync::{Mutex, PoisonError};

use tracing::debug;
use wdcbridge_connector::{Browser, ConnectorError, HostChannel, InteractiveUi, SignInHandler};
use wdcbridge_core::ReportItem;

// ============================================================================
// Terminal UI
// ============================================================================

/// What the configuration form would show once sign-in completes.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub profile_id: Option<String>,
    pub reports: Vec<ReportItem>,
    pub revealed: bool,
}

/// Renders progress on stderr and records the form.
pub struct TerminalUi {
    quiet: bool,
    form: Mutex<FormState>,
    sign_in: Mutex<Option<SignInHandler>>,
}

impl TerminalUi {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            form: Mutex::new(FormState::default()),
            sign_in: Mutex::new(None),
        }
    }

    pub fn form(&self) -> FormState {
        self.form
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn sign_in_handler(&self) -> Option<SignInHandler> {
        self.sign_in
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn status(&self, message: &str) {
        if !self.quiet {
            eprintln!("{message}");
        }
    }
}

impl InteractiveUi for TerminalUi {
    fn show_progress(&self) {
        self.status("Connecting...");
    }

    fn set_progress_message(&self, message: &str) {
        self.status(message);
    }

    fn hide_progress(&self) {
        debug!("Progress dismissed");
    }

    fn register_sign_in(&self, handler: SignInHandler) {
        *self.sign_in.lock().unwrap_or_else(PoisonError::into_inner) = Some(handler);
    }

    fn hide_sign_in(&self) {
        debug!("Sign-in hidden");
    }

    fn add_report_option(&self, report: &ReportItem) {
        self.form
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .reports
            .push(report.clone());
    }

    fn set_username_field(&self, username: &str) {
        self.form
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .profile_id = Some(username.to_string());
    }

    fn set_password_field(&self, _password: &str) {
        debug!("Password field set");
    }

    fn reveal_connection_fields(&self) {
        self.form
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .revealed = true;
    }
}

// ============================================================================
// Terminal Browser
// ============================================================================

/// A "page" whose URL is whatever the user pasted.
///
/// Navigation cannot happen in a terminal, so it is printed for the user
/// to open.
pub struct TerminalBrowser {
    location: String,
    navigations: Mutex<Vec<String>>,
}

impl TerminalBrowser {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            navigations: Mutex::new(Vec::new()),
        }
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Browser for TerminalBrowser {
    fn current_url(&self) -> String {
        self.location.clone()
    }

    fn navigate(&self, url: &str) {
        self.navigations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.to_string());
    }

    fn push_history(&self, url: &str) {
        debug!(url, "Callback consumed");
    }
}

// ============================================================================
// CLI Host
// ============================================================================

/// Collects connector failures so commands can turn them into exit codes.
#[derive(Default)]
pub struct CliHost {
    errors: Mutex<Vec<String>>,
    aborts: Mutex<Vec<String>>,
}

impl CliHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the first reported failure, abort diagnostics first.
    pub fn first_failure(&self) -> Option<String> {
        let aborts = self.aborts.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(first) = aborts.first() {
            return Some(first.clone());
        }
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .first()
            .cloned()
    }
}

impl HostChannel for CliHost {
    fn report_error(&self, error: &ConnectorError) {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(error.to_string());
    }

    fn abort_with_error(&self, message: &str) {
        self.aborts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_records_reports() {
        let ui = TerminalUi::new(true);
        ui.set_username_field("p1");
        ui.add_report_option(&ReportItem {
            id: "r1".to_string(),
            name: "Report One".to_string(),
        });
        ui.reveal_connection_fields();

        let form = ui.form();
        assert_eq!(form.profile_id.as_deref(), Some("p1"));
        assert_eq!(form.reports.len(), 1);
        assert!(form.revealed);
    }

    #[test]
    fn test_host_prefers_abort_diagnostic() {
        let host = CliHost::new();
        host.report_error(&ConnectorError::MissingReport);
        host.abort_with_error(r#"["500","error","boom"]"#);

        assert_eq!(
            host.first_failure().as_deref(),
            Some(r#"["500","error","boom"]"#)
        );
    }
}
