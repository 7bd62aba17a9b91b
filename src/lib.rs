// lib.rs - channel analytics and growth-package quoting
pub mod analytics;
pub mod channel_api;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod pricing;
pub mod utils;

use std::sync::Arc;

use chrono::NaiveDate;

use analytics::DecayTable;
use channel_api::{ChannelApiClient, ChannelSource};
use config::AppConfig;

pub use error::AppError;

// Shared, read-only application state handed to handlers through `Extension`
pub struct AppState {
    pub config: AppConfig,
    pub channel_source: Arc<dyn ChannelSource>,
    pub decay: DecayTable,
    /// Pins "today" for date-relative checks; `None` uses the local clock
    pub fixed_today: Option<NaiveDate>,
}

impl AppState {
    pub fn from_config(config: AppConfig) -> Self {
        let client = ChannelApiClient::new(config.api_base_url.clone());
        Self {
            config,
            channel_source: Arc::new(client),
            decay: DecayTable::default(),
            fixed_today: None,
        }
    }

    pub fn with_source(config: AppConfig, source: Arc<dyn ChannelSource>) -> Self {
        Self {
            config,
            channel_source: source,
            decay: DecayTable::default(),
            fixed_today: None,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.fixed_today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}
