//! Shared fixtures for router-level tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{body::Body, http::Request, Router};
use chrono::NaiveDate;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use channel_insight::channel_api::ChannelSource;
use channel_insight::config::AppConfig;
use channel_insight::handlers;
use channel_insight::models::channel::ChannelLookup;
use channel_insight::{AppError, AppState};

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 15).unwrap()
}

/// Six uploads in the last three months, the newest two within the last month
pub fn eligible_channel() -> ChannelLookup {
    serde_json::from_str(
        r#"{
            "channelId": "UCtest",
            "title": "러닝 채널",
            "subscriberCount": "50,000명",
            "recentVideos": [
                {"title": "7월 영상", "publishedAt": "2024년 7월 10일", "url": "https://www.youtube.com/watch?v=vid1",
                 "thumbnail": "https://img/1.jpg", "statistics": {"viewCount": "10,000", "likeCount": "600", "commentCount": "40"}},
                {"title": "6월 말 영상", "publishedAt": "2024년 6월 28일", "url": "https://www.youtube.com/watch?v=vid2",
                 "thumbnail": "https://img/2.jpg", "statistics": {"viewCount": "8,000", "likeCount": "300", "commentCount": "20"}},
                {"title": "6월 초 영상", "publishedAt": "2024년 6월 2일", "url": "https://www.youtube.com/watch?v=vid3",
                 "thumbnail": "https://img/3.jpg", "statistics": {"viewCount": "5,000", "likeCount": "100", "commentCount": "5"}},
                {"title": "5월 영상", "publishedAt": "2024년 5월 20일", "url": "https://www.youtube.com/watch?v=vid4",
                 "thumbnail": "https://img/4.jpg", "statistics": {"viewCount": "4,000", "likeCount": "80", "commentCount": "4"}},
                {"title": "4월 영상", "publishedAt": "2024년 4월 30일", "url": "https://www.youtube.com/watch?v=vid5",
                 "thumbnail": "https://img/5.jpg", "statistics": {"viewCount": "3,000", "likeCount": "60", "commentCount": "3"}},
                {"title": "4월 중순 영상", "publishedAt": "2024년 4월 20일", "url": "https://www.youtube.com/watch?v=vid6",
                 "thumbnail": "https://img/6.jpg", "statistics": {"viewCount": "2,000", "likeCount": "40", "commentCount": "2"}}
            ]
        }"#,
    )
    .unwrap()
}

/// Only two old uploads
pub fn inactive_channel() -> ChannelLookup {
    serde_json::from_str(
        r#"{
            "channelId": "UCidle",
            "title": "휴면 채널",
            "subscriberCount": "1,200명",
            "recentVideos": [
                {"title": "옛날 영상", "publishedAt": "2024년 1월 3일", "url": "https://www.youtube.com/watch?v=old1",
                 "thumbnail": "", "statistics": {"viewCount": "100", "likeCount": "1", "commentCount": "0"}},
                {"title": "더 옛날 영상", "publishedAt": "2023년 11월 3일", "url": "https://www.youtube.com/watch?v=old2",
                 "thumbnail": "", "statistics": {"viewCount": "50", "likeCount": "0", "commentCount": "0"}}
            ]
        }"#,
    )
    .unwrap()
}

pub enum FakeResponse {
    Channel(ChannelLookup),
    Upstream(u16, &'static str),
}

pub struct FakeSource {
    response: FakeResponse,
    calls: AtomicUsize,
}

impl FakeSource {
    pub fn new(response: FakeResponse) -> Arc<Self> {
        Arc::new(Self {
            response,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChannelSource for FakeSource {
    async fn fetch_channel(&self, _url: &str) -> Result<ChannelLookup, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            FakeResponse::Channel(lookup) => Ok(lookup.clone()),
            FakeResponse::Upstream(status, message) => Err(AppError::Upstream {
                status: *status,
                message: message.to_string(),
            }),
        }
    }
}

pub fn router(source: Arc<FakeSource>) -> Router {
    let mut state = AppState::with_source(AppConfig::default(), source);
    state.fixed_today = Some(today());
    handlers::app(Arc::new(state))
}

/// Quote-form body: the channel URL, the carried lookup, then `fields`
pub fn quote_form(lookup: &ChannelLookup, fields: &str) -> String {
    let channel = serde_json::to_string(lookup).unwrap();
    format!(
        "url={}&channel={}&{}",
        urlencoding::encode("https://www.youtube.com/@runner"),
        urlencoding::encode(&channel),
        fields
    )
}

pub fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn json_post(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
