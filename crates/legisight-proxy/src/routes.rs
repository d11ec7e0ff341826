use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;
use crate::upstream::{DateWindow, RECENT_WINDOW_MONTHS};

#[derive(Debug, Deserialize)]
pub struct FilterParams {
    #[serde(default)]
    pub filter: String,
}

/// `GET /proxy/matters`: matters introduced in the last six months.
pub async fn matters_handler(State(state): State<AppState>) -> Result<Response, ApiError> {
    let window = DateWindow::trailing_months(state.clock.now(), RECENT_WINDOW_MONTHS);
    let body = state
        .upstream
        .recent_matters(&window)
        .await
        .map_err(ApiError::Matters)?;
    Ok(passthrough(body))
}

/// `GET /proxy/filtered-matters?filter=<expr>`
pub async fn filtered_matters_handler(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Response, ApiError> {
    let body = state
        .upstream
        .filtered_matters(&params.filter)
        .await
        .map_err(ApiError::Matters)?;
    Ok(passthrough(body))
}

/// `GET /proxy/matterhistory/{matter_id}`
pub async fn matter_history_handler(
    State(state): State<AppState>,
    Path(matter_id): Path<String>,
) -> Result<Response, ApiError> {
    let body = state
        .upstream
        .matter_history(&matter_id)
        .await
        .map_err(ApiError::MatterHistory)?;
    Ok(passthrough(body))
}

pub async fn healthz_handler() -> &'static str {
    "ok"
}

fn passthrough(body: Bytes) -> Response {
    ([(CONTENT_TYPE, "application/json")], body).into_response()
}
