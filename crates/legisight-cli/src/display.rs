//! Plain-text rendering of matters, search results, timelines, and the watchlist.
//!
//! Everything writes to a caller-supplied [`Write`] so output can be captured.

use std::io::{self, Write};

use legisight_core::Matter;
use legisight_dashboard::{HistoryPanel, HistoryView, SearchResults, ViewState, Watchlist};

const RULE_WIDTH: usize = 72;

pub const NO_MATTERS: &str = "No matters found";
pub const NO_HISTORY: &str = "No history available";
pub const NO_HISTORY_DETAIL: &str = "This matter has no recorded history yet.";
pub const EMPTY_WATCHLIST: &str = "Your watchlist is empty";

// ── Public API ──

/// Render whatever the matters pane currently shows.
pub fn write_view(out: &mut impl Write, view: &ViewState, recent: &[Matter]) -> io::Result<()> {
    match view {
        ViewState::Browsing => write_matter_list(out, "Recent matters", recent),
        ViewState::Searching(results) => write_search_results(out, results),
        ViewState::ViewingHistory { panel, .. } => write_history(out, panel),
    }
}

pub fn write_search_results(out: &mut impl Write, results: &SearchResults) -> io::Result<()> {
    let heading = format!("Search: {} contains \"{}\"", results.field, results.query);
    write_matter_list(out, &heading, &results.matters)
}

pub fn write_matter_list(out: &mut impl Write, heading: &str, matters: &[Matter]) -> io::Result<()> {
    write_heading(out, heading)?;
    if matters.is_empty() {
        writeln!(out, "  {NO_MATTERS}")?;
        return Ok(());
    }
    for matter in matters {
        write_matter_card(out, matter)?;
    }
    Ok(())
}

pub fn write_matter_card(out: &mut impl Write, matter: &Matter) -> io::Result<()> {
    writeln!(out, "  [{}] {}", matter.id, matter.display_title())?;
    writeln!(out, "    File: {}", matter.file.as_deref().unwrap_or("N/A"))?;
    writeln!(
        out,
        "    Status: {} | Committee: {}",
        matter.display_status(),
        matter.display_committee()
    )?;
    writeln!(out)
}

pub fn write_history(out: &mut impl Write, panel: &HistoryPanel) -> io::Result<()> {
    write_heading(out, &format!("Matter History - {}", panel.matter_file))?;
    match &panel.history {
        HistoryView::Empty => {
            writeln!(out, "  {NO_HISTORY}")?;
            writeln!(out, "  {NO_HISTORY_DETAIL}")?;
        }
        HistoryView::Timeline(items) => {
            for item in items {
                writeln!(out, "  {:<20} {}", item.date, item.action)?;
                if !item.text.is_empty() {
                    writeln!(out, "  {:<20} {}", "", item.text)?;
                }
            }
        }
    }
    Ok(())
}

pub fn write_watchlist(out: &mut impl Write, watchlist: &Watchlist) -> io::Result<()> {
    write_heading(out, &format!("Watchlist ({})", watchlist.len()))?;
    if watchlist.is_empty() {
        writeln!(out, "  {EMPTY_WATCHLIST}")?;
        return Ok(());
    }
    for matter in watchlist.entries() {
        write_matter_card(out, matter)?;
    }
    Ok(())
}

// ── Helpers ──

fn write_heading(out: &mut impl Write, heading: &str) -> io::Result<()> {
    writeln!(out, "=== {heading} ===")?;
    writeln!(out, "{}", "─".repeat(RULE_WIDTH))
}
