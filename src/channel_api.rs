// Client for the backend that resolves a YouTube URL to channel statistics.
// GET {API_URL}/channel?url=<channel or video url>

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use tracing::{error, info};

use crate::error::AppError;
use crate::models::channel::ChannelLookup;

lazy_static! {
    static ref CHANNEL_URL: Regex =
        Regex::new(r"^(https?://)?(www\.)?youtube\.com/@[^/?]+").unwrap();
    static ref VIDEO_URL: Regex =
        Regex::new(r"^(https?://)?(www\.)?youtube\.com/watch\?v=[^&]+").unwrap();
}

/// Accepts `youtube.com/@handle` channel URLs and `youtube.com/watch?v=` video URLs.
/// Returns the trimmed input.
pub fn validate_channel_url(input: &str) -> Result<&str, AppError> {
    let url = input.trim();
    if CHANNEL_URL.is_match(url) || VIDEO_URL.is_match(url) {
        Ok(url)
    } else {
        Err(AppError::InvalidChannelUrl(url.to_string()))
    }
}

#[async_trait]
pub trait ChannelSource: Send + Sync {
    async fn fetch_channel(&self, url: &str) -> Result<ChannelLookup, AppError>;
}

#[derive(Debug, Clone)]
pub struct ChannelApiClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl ChannelApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ChannelSource for ChannelApiClient {
    async fn fetch_channel(&self, url: &str) -> Result<ChannelLookup, AppError> {
        let url = validate_channel_url(url)?;
        info!("📺 Looking up channel for {}", url);

        let response = self
            .client
            .get(format!("{}/channel", self.base_url))
            .query(&[("url", url)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_default();
            error!(status = %status.as_u16(), "Channel API error: {}", body);
            return Err(AppError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let lookup: ChannelLookup = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to decode channel API response: {}", e);
            AppError::Decode(e.to_string())
        })?;

        info!(
            "✅ Channel '{}' resolved with {} recent videos",
            lookup.title,
            lookup.recent_videos.len()
        );
        Ok(lookup)
    }
}
