//! Dashboard session: fetches through a [`MattersApi`] and moves between views.
//!
//! Upstream failures never reach the caller. They are logged and the view
//! falls back to its empty state, which reads the same as "no results".
//! Watchlist writes are local and do report errors.

use legisight_core::{Matter, SearchField, build_filter, matter_id_filter};
use tracing::{info, warn};

use crate::client::MattersApi;
use crate::view::{HistoryPanel, HistoryView, SearchResults, ViewState};
use crate::watchlist::{Watchlist, WatchlistError, WatchlistStore};

pub struct Dashboard<A: MattersApi> {
    api: A,
    store: WatchlistStore,
    recent: Vec<Matter>,
    view: ViewState,
    watchlist: Watchlist,
}

impl<A: MattersApi> Dashboard<A> {
    /// Create a session, loading the watchlist from `store` once.
    pub fn new(api: A, store: WatchlistStore) -> Self {
        let watchlist = store.load();
        Self {
            api,
            store,
            recent: Vec::new(),
            view: ViewState::Browsing,
            watchlist,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn recent(&self) -> &[Matter] {
        &self.recent
    }

    pub fn watchlist(&self) -> &Watchlist {
        &self.watchlist
    }

    /// Matters in the list pane: search results while searching, otherwise
    /// the recent list (also behind an open history view).
    pub fn visible_matters(&self) -> &[Matter] {
        match &self.view {
            ViewState::Searching(results)
            | ViewState::ViewingHistory {
                return_to: Some(results),
                ..
            } => &results.matters,
            _ => &self.recent,
        }
    }

    /// Fetch the recent-matters list and show it.
    pub async fn load(&mut self) {
        self.recent = match self.api.recent_matters().await {
            Ok(matters) => matters,
            Err(e) => {
                warn!(error = %e, "failed to fetch recent matters");
                Vec::new()
            }
        };
        self.view = ViewState::Browsing;
    }

    /// Search `field` for `query`. A blank query leaves the view unchanged.
    pub async fn search(&mut self, field: SearchField, query: &str) {
        let Some(filter) = build_filter(field, query) else {
            return;
        };
        info!(%field, filter = %filter, "searching matters");

        let matters = match self.api.filtered_matters(&filter).await {
            Ok(matters) => matters,
            Err(e) => {
                warn!(error = %e, "failed to fetch matters");
                Vec::new()
            }
        };
        self.view = ViewState::Searching(SearchResults {
            field,
            query: query.trim().to_string(),
            matters,
        });
    }

    /// Drop the active search and go back to the recent list.
    pub fn clear_search(&mut self) {
        self.view = ViewState::Browsing;
    }

    /// Fetch and show a matter's history.
    pub async fn open_history(&mut self, matter_id: i64, matter_file: impl Into<String>) {
        let entries = match self.api.matter_history(matter_id).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(matter_id, error = %e, "failed to fetch matter history");
                Vec::new()
            }
        };

        let return_to = match std::mem::take(&mut self.view) {
            ViewState::Searching(results) => Some(results),
            ViewState::ViewingHistory { return_to, .. } => return_to,
            ViewState::Browsing => None,
        };
        self.view = ViewState::ViewingHistory {
            panel: HistoryPanel {
                matter_id,
                matter_file: matter_file.into(),
                history: HistoryView::from_entries(entries),
            },
            return_to,
        };
    }

    /// Leave the history view for the list it was opened from.
    pub fn close_history(&mut self) {
        if let ViewState::ViewingHistory { return_to, .. } = std::mem::take(&mut self.view) {
            self.view = return_to.map_or(ViewState::Browsing, ViewState::Searching);
        }
    }

    /// Add `matter` to the watchlist and persist it.
    ///
    /// Returns `false` (and writes nothing) if it was already watched.
    pub fn watch(&mut self, matter: Matter) -> Result<bool, WatchlistError> {
        let mut updated = self.watchlist.clone();
        if !updated.add(matter) {
            return Ok(false);
        }
        self.store.save(&updated)?;
        self.watchlist = updated;
        Ok(true)
    }

    /// Look a matter up by id and watch it.
    ///
    /// `Ok(None)` means the proxy returned no such matter (or failed).
    pub async fn watch_by_id(&mut self, matter_id: i64) -> Result<Option<bool>, WatchlistError> {
        if self.watchlist.contains(matter_id) {
            return Ok(Some(false));
        }
        let found = match self.api.filtered_matters(&matter_id_filter(matter_id)).await {
            Ok(matters) => matters.into_iter().find(|m| m.id == matter_id),
            Err(e) => {
                warn!(matter_id, error = %e, "failed to look up matter");
                None
            }
        };
        match found {
            Some(matter) => self.watch(matter).map(Some),
            None => Ok(None),
        }
    }

    /// Remove a matter from the watchlist and persist the change.
    pub fn unwatch(&mut self, matter_id: i64) -> Result<Option<Matter>, WatchlistError> {
        let mut updated = self.watchlist.clone();
        let Some(removed) = updated.remove(matter_id) else {
            return Ok(None);
        };
        self.store.save(&updated)?;
        self.watchlist = updated;
        Ok(Some(removed))
    }
}
