//! Chat-to-Discord relay endpoint.

use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse, Response},
};

use crate::error::{AppError, Result};
use crate::server::AppState;

/// Setup instructions shown when the endpoint is opened without parameters
const HELP_PAGE: &str = include_str!("../../assets/discord_help.html");

/// GET /discord - relay a chat message to a Discord webhook
#[tracing::instrument(
    name = "discord.relay",
    skip(state, params),
    fields(param_count = params.len())
)]
pub async fn discord_relay(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response> {
    if params.is_empty() {
        return Ok(Html(HELP_PAGE).into_response());
    }

    let reply = state
        .relay
        .relay(&params)
        .await
        .map_err(|e| AppError::relay(e, state.relay.max_reply_length()))?;
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], reply.text).into_response())
}
