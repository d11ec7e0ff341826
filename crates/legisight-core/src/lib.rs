//! Core types for LegiSight: Legistar matters, history entries, search filters.

pub mod matter;
pub mod search;
pub mod text;

pub use matter::{Matter, MatterHistoryEntry};
pub use search::{SearchField, UnknownSearchField, build_filter, matter_id_filter};
pub use text::{decode_html_entities, format_display_date, parse_upstream_date};
