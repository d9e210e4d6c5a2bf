//! Connection data and report listings.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Connection data chosen during the interactive phase.
///
/// Only `report` is interpreted by the connector; any other keys a host
/// stores alongside it are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Identifier of the report to query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<String>,
    /// Host-defined extra keys.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConnectionConfig {
    /// Creates connection data selecting the given report.
    pub fn for_report(report: impl Into<String>) -> Self {
        Self {
            report: Some(report.into()),
            extra: Map::new(),
        }
    }

    /// Returns the selected report, ignoring empty identifiers.
    pub fn report(&self) -> Option<&str> {
        self.report.as_deref().filter(|r| !r.is_empty())
    }
}

/// A report the authenticated profile can query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportItem {
    /// Report identifier, used as `reportId` in later requests.
    pub id: String,
    /// Human-readable report name.
    pub name: String,
}

/// Response of the `/reports` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportList {
    /// Profile identifier the credential belongs to.
    pub profile_id: String,
    /// Available reports, in backend order.
    #[serde(default)]
    pub items: Vec<ReportItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_connection_config_keeps_extra_keys() {
        let config: ConnectionConfig =
            serde_json::from_value(json!({"report": "r1", "segment": "mobile"})).unwrap();
        assert_eq!(config.report(), Some("r1"));
        assert_eq!(config.extra.get("segment"), Some(&json!("mobile")));

        let back = serde_json::to_value(&config).unwrap();
        assert_eq!(back, json!({"report": "r1", "segment": "mobile"}));
    }

    #[test]
    fn test_empty_report_is_unset() {
        let config = ConnectionConfig::for_report("");
        assert!(config.report().is_none());
        assert!(ConnectionConfig::default().report().is_none());
    }

    #[test]
    fn test_report_list_preserves_backend_order() {
        let list: ReportList = serde_json::from_value(json!({
            "profileId": "p1",
            "items": [{"id": "r2", "name": "Report Two"}, {"id": "r1", "name": "Report One"}]
        }))
        .unwrap();

        let ids: Vec<&str> = list.items.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["r2", "r1"]);
    }
}
