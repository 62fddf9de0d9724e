//! Pokedex chat command endpoints.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Redirect, Response},
};

use crate::dex::DexReply;
use crate::server::AppState;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// GET /dex - random entry
#[tracing::instrument(name = "dex.random", skip(state))]
pub async fn dex_random(State(state): State<AppState>) -> impl IntoResponse {
    let out = state.dex.random(&mut rand::rng());
    ([(header::CONTENT_TYPE, TEXT_PLAIN)], out)
}

/// GET /dex/help - usage text
#[tracing::instrument(name = "dex.help", skip(state))]
pub async fn dex_help(State(state): State<AppState>) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, TEXT_PLAIN)], state.dex.help())
}

/// GET /dex/{query} - lookup, search or easter egg
#[tracing::instrument(name = "dex.query", skip(state))]
pub async fn dex_query(State(state): State<AppState>, Path(query): Path<String>) -> Response {
    let reply = state.dex.query(&query, &mut rand::rng());
    match reply {
        DexReply::Text(out) => ([(header::CONTENT_TYPE, TEXT_PLAIN)], out).into_response(),
        DexReply::Random => Redirect::to("/dex").into_response(),
    }
}
