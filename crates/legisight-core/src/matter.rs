//! Legistar matter records as returned by the upstream Web API.
//!
//! The upstream schema is owned by Legistar. Only the fields LegiSight reads
//! are typed; everything else is kept in `extra` so that a record written back
//! out (e.g. to the watchlist) is the same record the API returned.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::text::{decode_html_entities, format_display_date, parse_upstream_date};

/// A legislative item (bill, resolution, local law) tracked by Legistar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matter {
    #[serde(rename = "MatterId")]
    pub id: i64,
    #[serde(rename = "MatterFile", default)]
    pub file: Option<String>,
    #[serde(rename = "MatterName", default)]
    pub name: Option<String>,
    #[serde(rename = "MatterTitle", default)]
    pub title: Option<String>,
    #[serde(rename = "MatterEnactmentNumber", default)]
    pub enactment_number: Option<String>,
    #[serde(rename = "MatterStatusName", default)]
    pub status_name: Option<String>,
    #[serde(rename = "MatterBodyName", default)]
    pub body_name: Option<String>,
    /// Legistar stores the matter summary in the fifth extended text column.
    #[serde(rename = "MatterEXText5", default)]
    pub summary: Option<String>,
    #[serde(rename = "MatterTypeName", default)]
    pub type_name: Option<String>,
    /// Introduction timestamp, upstream format (`2024-03-05T00:00:00`).
    #[serde(rename = "MatterIntroDate", default)]
    pub intro_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Matter {
    /// A bare matter with only an id set.
    pub fn new(id: i64) -> Self {
        Self {
            id,
            file: None,
            name: None,
            title: None,
            enactment_number: None,
            status_name: None,
            body_name: None,
            summary: None,
            type_name: None,
            intro_date: None,
            extra: Map::new(),
        }
    }

    /// Title with HTML entities decoded, or empty if the matter has none.
    pub fn display_title(&self) -> String {
        self.title
            .as_deref()
            .map(decode_html_entities)
            .unwrap_or_default()
    }

    /// File number for headings, falling back to the numeric id.
    pub fn display_file(&self) -> String {
        match self.file.as_deref() {
            Some(file) if !file.trim().is_empty() => file.to_string(),
            _ => format!("#{}", self.id),
        }
    }

    pub fn display_status(&self) -> &str {
        non_blank(self.status_name.as_deref()).unwrap_or("N/A")
    }

    pub fn display_committee(&self) -> &str {
        non_blank(self.body_name.as_deref()).unwrap_or("N/A")
    }
}

/// One action recorded against a matter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatterHistoryEntry {
    #[serde(rename = "MatterHistoryId", default)]
    pub id: Option<i64>,
    #[serde(rename = "MatterHistoryActionDate", default)]
    pub action_date: Option<String>,
    #[serde(rename = "MatterHistoryActionName", default)]
    pub action_name: Option<String>,
    #[serde(rename = "MatterHistoryActionText", default)]
    pub action_text: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MatterHistoryEntry {
    /// `March 5, 2024`, or `N/A` when the date is missing or unparseable.
    pub fn display_date(&self) -> String {
        self.action_date
            .as_deref()
            .and_then(parse_upstream_date)
            .map(format_display_date)
            .unwrap_or_else(|| "N/A".to_string())
    }

    pub fn display_action(&self) -> &str {
        non_blank(self.action_name.as_deref()).unwrap_or("N/A")
    }

    pub fn display_text(&self) -> &str {
        self.action_text.as_deref().unwrap_or("")
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MATTER_JSON: &str = r#"{
        "MatterId": 77463,
        "MatterGuid": "6C1E2C1E-0000-0000-0000-000000000000",
        "MatterFile": "Int 0123-2024",
        "MatterName": "Street co-naming",
        "MatterTitle": "A Local Law in relation to parks &amp; recreation",
        "MatterEnactmentNumber": "2024/045",
        "MatterStatusName": "Enacted",
        "MatterBodyName": "Committee on Parks and Recreation",
        "MatterEXText5": "This bill would rename a park.",
        "MatterTypeName": "Introduction",
        "MatterIntroDate": "2024-03-05T00:00:00",
        "MatterAgendaDate": null
    }"#;

    #[test]
    fn parses_upstream_matter() {
        let matter: Matter = serde_json::from_str(MATTER_JSON).unwrap();
        assert_eq!(matter.id, 77463);
        assert_eq!(matter.file.as_deref(), Some("Int 0123-2024"));
        assert_eq!(matter.enactment_number.as_deref(), Some("2024/045"));
        assert_eq!(
            matter.summary.as_deref(),
            Some("This bill would rename a park.")
        );
        assert!(matter.extra.contains_key("MatterGuid"));
    }

    #[test]
    fn unknown_fields_survive_reserialisation() {
        let matter: Matter = serde_json::from_str(MATTER_JSON).unwrap();
        let value = serde_json::to_value(&matter).unwrap();
        assert_eq!(
            value["MatterGuid"],
            "6C1E2C1E-0000-0000-0000-000000000000"
        );
        assert!(value["MatterAgendaDate"].is_null());
        assert_eq!(value["MatterEXText5"], "This bill would rename a park.");
    }

    #[test]
    fn missing_optional_fields_default_to_none() {
        let matter: Matter = serde_json::from_str(r#"{"MatterId": 5}"#).unwrap();
        assert_eq!(matter, Matter::new(5));
    }

    #[test]
    fn display_helpers_fall_back() {
        let mut matter = Matter::new(9);
        assert_eq!(matter.display_status(), "N/A");
        assert_eq!(matter.display_committee(), "N/A");
        assert_eq!(matter.display_file(), "#9");
        assert_eq!(matter.display_title(), "");

        matter.title = Some("Smith &amp; Wesson".into());
        matter.status_name = Some("Filed".into());
        assert_eq!(matter.display_title(), "Smith & Wesson");
        assert_eq!(matter.display_status(), "Filed");
    }

    #[test]
    fn history_display_fields() {
        let entry: MatterHistoryEntry = serde_json::from_str(
            r#"{
                "MatterHistoryId": 1,
                "MatterHistoryActionDate": "2024-03-05T00:00:00",
                "MatterHistoryActionName": "Introduced by Council",
                "MatterHistoryActionText": null
            }"#,
        )
        .unwrap();
        assert_eq!(entry.display_date(), "March 5, 2024");
        assert_eq!(entry.display_action(), "Introduced by Council");
        assert_eq!(entry.display_text(), "");
    }

    #[test]
    fn history_missing_date_and_action() {
        let entry: MatterHistoryEntry = serde_json::from_str("{}").unwrap();
        assert_eq!(entry.display_date(), "N/A");
        assert_eq!(entry.display_action(), "N/A");
    }
}
