//! What the dashboard is showing.
//!
//! The matters pane is always in exactly one of three states: the recent
//! list, a search result, or one matter's history. History remembers which
//! list it was opened from so "back" returns there.

use legisight_core::{Matter, MatterHistoryEntry, SearchField, parse_upstream_date};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViewState {
    /// The recent-matters list.
    #[default]
    Browsing,
    /// Results of a field search; may be empty.
    Searching(SearchResults),
    /// A matter's timeline. `return_to` is `None` when opened from the recent list.
    ViewingHistory {
        panel: HistoryPanel,
        return_to: Option<SearchResults>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults {
    pub field: SearchField,
    pub query: String,
    pub matters: Vec<Matter>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.matters.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryPanel {
    pub matter_id: i64,
    pub matter_file: String,
    pub history: HistoryView,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HistoryView {
    /// The matter has no recorded actions.
    Empty,
    /// Actions in chronological order.
    Timeline(Vec<TimelineItem>),
}

/// One rendered history action.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineItem {
    /// `March 5, 2024` or `N/A`.
    pub date: String,
    /// Action name or `N/A`.
    pub action: String,
    pub text: String,
}

impl HistoryView {
    /// Sort entries by action date and format them for display.
    ///
    /// Undated entries go last, keeping their upstream order.
    pub fn from_entries(entries: Vec<MatterHistoryEntry>) -> Self {
        if entries.is_empty() {
            return HistoryView::Empty;
        }

        let mut dated: Vec<_> = entries
            .into_iter()
            .map(|e| {
                let key = e.action_date.as_deref().and_then(parse_upstream_date);
                (key, e)
            })
            .collect();
        dated.sort_by_key(|(key, _)| (key.is_none(), *key));

        HistoryView::Timeline(
            dated
                .into_iter()
                .map(|(_, e)| TimelineItem {
                    date: e.display_date(),
                    action: e.display_action().to_string(),
                    text: e.display_text().to_string(),
                })
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, HistoryView::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(date: Option<&str>, action: &str) -> MatterHistoryEntry {
        serde_json::from_value(serde_json::json!({
            "MatterHistoryActionDate": date,
            "MatterHistoryActionName": action,
        }))
        .unwrap()
    }

    #[test]
    fn empty_history_is_explicit() {
        assert_eq!(HistoryView::from_entries(Vec::new()), HistoryView::Empty);
        assert!(HistoryView::from_entries(Vec::new()).is_empty());
    }

    #[test]
    fn timeline_sorted_chronologically() {
        let view = HistoryView::from_entries(vec![
            entry(Some("2024-06-12T00:00:00"), "Approved by Committee"),
            entry(Some("2024-03-05T00:00:00"), "Introduced by Council"),
            entry(Some("2024-04-20T10:00:00"), "Hearing Held by Committee"),
        ]);
        let HistoryView::Timeline(items) = view else {
            panic!("expected a timeline");
        };
        let actions: Vec<&str> = items.iter().map(|i| i.action.as_str()).collect();
        assert_eq!(
            actions,
            vec![
                "Introduced by Council",
                "Hearing Held by Committee",
                "Approved by Committee"
            ]
        );
        assert_eq!(items[0].date, "March 5, 2024");
        assert_eq!(items[2].date, "June 12, 2024");
    }

    #[test]
    fn undated_entries_go_last_in_upstream_order() {
        let view = HistoryView::from_entries(vec![
            entry(None, "first undated"),
            entry(Some("2024-01-02T00:00:00"), "dated"),
            entry(Some("garbage"), "second undated"),
        ]);
        let HistoryView::Timeline(items) = view else {
            panic!("expected a timeline");
        };
        assert_eq!(items[0].action, "dated");
        assert_eq!(items[1].action, "first undated");
        assert_eq!(items[1].date, "N/A");
        assert_eq!(items[2].action, "second undated");
        assert_eq!(items[2].date, "N/A");
    }
}
