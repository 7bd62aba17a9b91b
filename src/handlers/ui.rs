use axum::{
    extract::{Extension, Form, Query},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

use super::pages::{self, CHANNEL_FIELD};
use crate::analytics::check_videos;
use crate::channel_api::validate_channel_url;
use crate::error::AppError;
use crate::models::api::AnalysisResponse;
use crate::models::channel::{ChannelLookup, VideoSummary};
use crate::pricing::catalog::{Metric, Package};
use crate::pricing::QuoteSession;
use crate::AppState;

pub fn ui_routes() -> Router {
    Router::new()
        .route("/", get(landing_page))
        .route("/channel", post(channel_preview))
        .route("/analysis", get(analysis_page))
        .route("/analysis/quote", post(analysis_quote))
}

#[derive(Deserialize)]
pub struct UrlForm {
    #[serde(default)]
    pub url: String,
}

#[derive(Deserialize)]
pub struct AnalysisQuery {
    pub url: Option<String>,
}

pub async fn landing_page() -> Html<String> {
    Html(pages::landing_page("", None))
}

/// Validate, look up, and show the channel with its eligibility verdict.
/// Failures re-render the form with an inline message.
pub async fn channel_preview(
    Extension(state): Extension<Arc<AppState>>,
    Form(form): Form<UrlForm>,
) -> Html<String> {
    let url = match validate_channel_url(&form.url) {
        Ok(url) => url,
        Err(e) => {
            tracing::info!("Rejected channel url '{}'", form.url);
            return Html(pages::landing_page(&form.url, Some(&e.user_message())));
        }
    };

    match state.channel_source.fetch_channel(url).await {
        Ok(lookup) => {
            let eligibility = check_videos(&lookup.recent_videos, state.today());
            tracing::info!(
                channel = %lookup.title,
                eligible = eligibility.is_eligible,
                last_90_days = eligibility.count_last_90_days,
                last_30_days = eligibility.count_last_30_days,
                "Channel preview ready"
            );
            Html(pages::channel_preview_page(url, &lookup, &eligibility))
        }
        Err(e) => {
            tracing::warn!("Channel lookup failed for {}: {}", url, e);
            Html(pages::landing_page(url, Some(&e.user_message())))
        }
    }
}

/// The one network lookup of the analysis flow. The result rides along in the
/// quote form so later recalculations stay local.
pub async fn analysis_page(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<AnalysisQuery>,
) -> Response {
    let Some(url) = query.url.filter(|u| !u.trim().is_empty()) else {
        return back_to_entry(AppError::MissingAnalysisState);
    };
    match state.channel_source.fetch_channel(&url).await {
        Ok(lookup) => render_analysis(&state, &url, &lookup, &HashMap::new()),
        Err(e) => back_to_entry(e),
    }
}

/// Recompute the quote from the submitted form and the channel data it carries
pub async fn analysis_quote(
    Extension(state): Extension<Arc<AppState>>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let Some(url) = form.get("url").filter(|u| !u.trim().is_empty()) else {
        return back_to_entry(AppError::MissingAnalysisState);
    };
    let lookup = match carried_lookup(&form) {
        Ok(lookup) => lookup,
        Err(e) => return back_to_entry(e),
    };
    render_analysis(&state, url, &lookup, &form)
}

fn carried_lookup(form: &HashMap<String, String>) -> Result<ChannelLookup, AppError> {
    let raw = form
        .get(CHANNEL_FIELD)
        .filter(|raw| !raw.trim().is_empty())
        .ok_or(AppError::MissingAnalysisState)?;
    serde_json::from_str(raw).map_err(|e| AppError::Decode(e.to_string()))
}

fn render_analysis(
    state: &AppState,
    url: &str,
    lookup: &ChannelLookup,
    form: &HashMap<String, String>,
) -> Response {
    let channel_data = match serde_json::to_string(lookup) {
        Ok(json) => json,
        Err(e) => return back_to_entry(AppError::Decode(e.to_string())),
    };

    let analysis = AnalysisResponse::build(lookup, state.today(), &state.decay);
    let session = session_from_form(form, &analysis.videos);
    let summary = session.summarize(&analysis.quote_videos());

    tracing::debug!(
        case_id = ?analysis.case_id,
        selected = summary.lines.len(),
        total = summary.total_amount,
        "Rendered analysis"
    );

    Html(pages::analysis_page(
        url,
        &channel_data,
        &analysis,
        &session,
        &summary,
    ))
    .into_response()
}

/// Reaching the analysis view without usable channel data sends the user back
/// to the entry form.
fn back_to_entry(reason: AppError) -> Response {
    tracing::warn!("Analysis redirected to entry page: {}", reason);
    Redirect::to("/").into_response()
}

/// Rebuild the quote builder from submitted fields, replaying them in the
/// order the UI produces them: checkbox, package radio, sliders. A package that
/// differs from `prev_package_<id>` was just chosen, so its initial slider
/// values win over the submitted ones.
fn session_from_form(form: &HashMap<String, String>, videos: &[VideoSummary]) -> QuoteSession {
    let mut session = QuoteSession::new();

    for video in videos {
        let id = video.video_id.as_str();
        if form.contains_key(&format!("select_{}", id)) {
            session.set_selected(id, true);
        }

        let package = parse_package(form.get(&format!("package_{}", id)));
        let previous = parse_package(form.get(&format!("prev_package_{}", id)));

        if let Some(package) = package {
            session.choose_package(id, package);
            if previous != Some(package) {
                continue;
            }
        }

        for metric in Metric::ALL {
            let key = format!("{}_{}", metric.key(), id);
            if let Some(value) = form.get(&key).and_then(|v| v.trim().parse::<u32>().ok()) {
                session.set_target(id, metric, value.min(u8::MAX as u32) as u8);
            }
        }
    }

    let addon_target = form
        .get("addon_target")
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(0);
    session.set_subscriber_addon(form.contains_key("addon"), addon_target);

    session
}

fn parse_package(value: Option<&String>) -> Option<Package> {
    value.and_then(|v| v.parse().ok())
}
