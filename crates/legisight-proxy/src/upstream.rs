//! HTTP client for the Legistar matters API.
//!
//! Responses are returned as raw bytes; the proxy relays them without
//! decoding. The read token is added here and nowhere else, and is stripped
//! from any error before it can be logged.

use axum::body::Bytes;
use chrono::{DateTime, Months, Utc};
use reqwest::Url;
use thiserror::Error;
use tracing::info;

use crate::config::ProxyConfig;

/// Size of the trailing window served by `/proxy/matters`.
pub const RECENT_WINDOW_MONTHS: u32 = 6;

#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("invalid upstream base URL {0:?}")]
    InvalidBaseUrl(String),
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),
    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },
}

// reqwest errors carry the request URL, query string (and token) included.
impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        UpstreamError::Http(err.without_url())
    }
}

/// A closed `[from, to]` interval of introduction dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl DateWindow {
    /// `[now - months, now]`, in calendar months.
    ///
    /// A day that does not exist in the target month clamps to that month's
    /// last day (31 August minus six months is 28/29 February).
    pub fn trailing_months(now: DateTime<Utc>, months: u32) -> Self {
        let from = now
            .checked_sub_months(Months::new(months))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Self { from, to: now }
    }

    /// OData predicate selecting matters introduced inside the window.
    pub fn intro_date_filter(&self) -> String {
        format!(
            "MatterIntroDate ge datetime'{}' and MatterIntroDate le datetime'{}'",
            format_timestamp(self.from),
            format_timestamp(self.to)
        )
    }
}

/// UTC timestamp without fractional seconds: `2024-03-05T14:07:00Z`.
pub fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Client for one Legistar jurisdiction (`<base>/<client>`).
#[derive(Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    base_url: Url,
    token: String,
    page_size: u32,
}

impl UpstreamClient {
    pub fn new(config: &ProxyConfig) -> Result<Self, UpstreamError> {
        let raw = config.client_url();
        let base_url =
            Url::parse(&raw).map_err(|_| UpstreamError::InvalidBaseUrl(raw.clone()))?;
        if base_url.cannot_be_a_base() {
            return Err(UpstreamError::InvalidBaseUrl(raw));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
            token: config.token.clone(),
            page_size: config.page_size,
        })
    }

    /// Matters introduced inside `window`, newest first.
    pub async fn recent_matters(&self, window: &DateWindow) -> Result<Bytes, UpstreamError> {
        let filter = window.intro_date_filter();
        let top = self.page_size.to_string();
        self.fetch(
            &["matters"],
            &[
                ("$filter", filter.as_str()),
                ("$orderby", "MatterIntroDate desc"),
                ("$top", top.as_str()),
            ],
        )
        .await
    }

    /// Matters matching a caller-built `$filter` expression, passed through verbatim.
    pub async fn filtered_matters(&self, filter: &str) -> Result<Bytes, UpstreamError> {
        let top = self.page_size.to_string();
        self.fetch(&["matters"], &[("$filter", filter), ("$top", top.as_str())])
            .await
    }

    /// History records of one matter.
    pub async fn matter_history(&self, matter_id: &str) -> Result<Bytes, UpstreamError> {
        self.fetch(
            &["matters", matter_id, "histories"],
            &[("AgendaNote", "0"), ("MinutesNote", "0")],
        )
        .await
    }

    async fn fetch(
        &self,
        segments: &[&str],
        params: &[(&str, &str)],
    ) -> Result<Bytes, UpstreamError> {
        let url = self.endpoint(segments)?;
        info!(path = %url.path(), params = ?params, "forwarding to upstream");

        let resp = self
            .client
            .get(url)
            .query(params)
            .query(&[("token", self.token.as_str())])
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.bytes().await?;
        info!(bytes = body.len(), "upstream responded");
        Ok(body)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, UpstreamError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| UpstreamError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn window_spans_six_calendar_months() {
        let now = utc(2024, 11, 15, 9, 30, 5);
        let window = DateWindow::trailing_months(now, RECENT_WINDOW_MONTHS);
        assert_eq!(window.to, now);
        assert_eq!(window.from, utc(2024, 5, 15, 9, 30, 5));
    }

    #[test]
    fn window_crosses_year_boundary() {
        let now = utc(2025, 2, 10, 0, 0, 0);
        let window = DateWindow::trailing_months(now, 6);
        assert_eq!(window.from, utc(2024, 8, 10, 0, 0, 0));
    }

    #[test]
    fn window_clamps_to_month_end() {
        let now = utc(2024, 8, 31, 12, 0, 0);
        let window = DateWindow::trailing_months(now, 6);
        assert_eq!(window.from, utc(2024, 2, 29, 12, 0, 0));
    }

    #[test]
    fn timestamps_drop_fractional_seconds() {
        let now = Utc.timestamp_opt(1_700_000_000, 987_654_321).unwrap();
        assert_eq!(format_timestamp(now), "2023-11-14T22:13:20Z");
    }

    #[test]
    fn intro_date_filter_format() {
        let window = DateWindow::trailing_months(utc(2024, 11, 15, 9, 30, 5), 6);
        assert_eq!(
            window.intro_date_filter(),
            "MatterIntroDate ge datetime'2024-05-15T09:30:05Z' \
             and MatterIntroDate le datetime'2024-11-15T09:30:05Z'"
        );
    }

    #[test]
    fn endpoint_appends_segments() {
        let config = ProxyConfig::new("http://127.0.0.1:9/v1", "t");
        let client = UpstreamClient::new(&config).unwrap();
        let url = client.endpoint(&["matters", "77463", "histories"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9/v1/nyc/matters/77463/histories");
    }

    #[test]
    fn endpoint_escapes_path_segments() {
        let config = ProxyConfig::new("http://127.0.0.1:9/v1", "t");
        let client = UpstreamClient::new(&config).unwrap();
        let url = client.endpoint(&["matters", "1/../2", "histories"]).unwrap();
        assert_eq!(url.path(), "/v1/nyc/matters/1%2F..%2F2/histories");
    }

    #[test]
    fn rejects_unusable_base_url() {
        let config = ProxyConfig::new("not a url", "t");
        assert!(matches!(
            UpstreamClient::new(&config),
            Err(UpstreamError::InvalidBaseUrl(_))
        ));
    }
}
