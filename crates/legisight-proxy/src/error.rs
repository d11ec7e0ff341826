use std::error::Error as StdError;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::upstream::UpstreamError;

/// Failure of a proxied request.
///
/// The message is all the caller sees; the upstream cause is only logged.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to fetch matters")]
    Matters(#[source] UpstreamError),

    #[error("Failed to fetch matter history")]
    MatterHistory(#[source] UpstreamError),
}

impl ApiError {
    fn upstream(&self) -> &UpstreamError {
        match self {
            ApiError::Matters(e) | ApiError::MatterHistory(e) => e,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %error_chain(self.upstream()), "{self}");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

/// `err` followed by each of its sources, `: `-separated.
fn error_chain(err: &dyn StdError) -> String {
    let mut chain = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        chain.push_str(": ");
        chain.push_str(&cause.to_string());
        source = cause.source();
    }
    chain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_fixed_message_without_cause() {
        let err = ApiError::MatterHistory(UpstreamError::Status {
            status: 403,
            body: "token rejected".into(),
        });
        assert_eq!(err.to_string(), "Failed to fetch matter history");

        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_chain_walks_sources() {
        let err = ApiError::Matters(UpstreamError::Status {
            status: 503,
            body: "busy".into(),
        });
        assert_eq!(
            error_chain(&err),
            "Failed to fetch matters: upstream returned 503: busy"
        );
        assert_eq!(
            error_chain(err.upstream()),
            "upstream returned 503: busy"
        );
    }
}
