// JSON API over the same computations the pages use

use axum::{
    extract::{Extension, Query},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::channel_api::validate_channel_url;
use crate::error::AppError;
use crate::models::api::{AnalysisResponse, QuoteRequest};
use crate::models::channel::ChannelLookup;
use crate::pricing::QuoteSummary;
use crate::AppState;

pub fn api_routes() -> Router {
    Router::new()
        .route("/api/channel", get(lookup_channel))
        .route("/api/analysis", post(analyze_channel))
        .route("/api/quote", post(quote))
        .route("/api/status", get(api_status))
}

#[derive(Deserialize)]
pub struct ChannelQuery {
    #[serde(default)]
    pub url: String,
}

/// Validated proxy of the backend lookup
pub async fn lookup_channel(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<ChannelQuery>,
) -> Result<Json<ChannelLookup>, AppError> {
    let url = validate_channel_url(&query.url)?;
    let lookup = state.channel_source.fetch_channel(url).await?;
    Ok(Json(lookup))
}

pub async fn analyze_channel(
    Extension(state): Extension<Arc<AppState>>,
    Json(lookup): Json<ChannelLookup>,
) -> Json<AnalysisResponse> {
    Json(AnalysisResponse::build(&lookup, state.today(), &state.decay))
}

pub async fn quote(Json(request): Json<QuoteRequest>) -> Json<QuoteSummary> {
    let session = request.to_session();
    Json(session.summarize(&request.videos))
}

pub async fn api_status(Extension(state): Extension<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "operational",
        "version": env!("CARGO_PKG_VERSION"),
        "channel_api": state.config.api_base_url,
        "endpoints": {
            "channel": "/api/channel?url=",
            "analysis": "/api/analysis",
            "quote": "/api/quote",
            "status": "/api/status"
        }
    }))
}
