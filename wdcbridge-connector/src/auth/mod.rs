//! Interactive authentication.
//!
//! ## Flow
//!
//! 1. **Existing credential**: fetch `/reports` with it and populate the
//!    configuration form
//! 2. **No credential**: bind the sign-in control to `/authorize`, then look
//!    for an OAuth `code` in the page URL
//! 3. **Callback**: exchange the code at `/tokenize`, store the token, strip
//!    the callback from history, then fetch `/reports` as in step 1
//!
//! Any request failure ends the session: the progress indicator shows an
//! error, is dismissed after a delay, and nothing is retried.

mod flow;
mod state;

pub use flow::{AUTH_ERROR_MESSAGE, AuthFlow, DEFAULT_ERROR_DISMISS_DELAY};
pub use state::AuthState;
