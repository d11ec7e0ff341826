//! Dashboard layer: talks to the LegiSight proxy, holds the current view, and
//! keeps the user's watchlist on disk.

pub mod client;
pub mod dashboard;
pub mod view;
pub mod watchlist;

pub use client::{ClientError, MattersApi, ProxyClient};
pub use dashboard::Dashboard;
pub use view::{HistoryPanel, HistoryView, SearchResults, TimelineItem, ViewState};
pub use watchlist::{Watchlist, WatchlistError, WatchlistStore};
