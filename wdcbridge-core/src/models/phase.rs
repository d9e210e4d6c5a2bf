//! Lifecycle phases.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// The execution context a host declares when it initializes the connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// User-facing setup where connection details are entered.
    #[serde(rename = "interactive")]
    Interactive,
    /// Headless data pull.
    #[serde(rename = "gatherData")]
    GatherData,
    /// Headless token refresh.
    #[serde(rename = "auth")]
    Auth,
}

impl Phase {
    /// Returns the host's wire name for this phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Interactive => "interactive",
            Self::GatherData => "gatherData",
            Self::Auth => "auth",
        }
    }

    /// Returns true if this phase has a user interface.
    pub fn is_interactive(&self) -> bool {
        matches!(self, Self::Interactive)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "interactive" => Ok(Self::Interactive),
            "gatherData" | "gather-data" | "gather_data" => Ok(Self::GatherData),
            "auth" => Ok(Self::Auth),
            other => Err(CoreError::UnknownPhase(other.to_string())),
        }
    }
}
