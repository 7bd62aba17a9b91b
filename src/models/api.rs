use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analytics::{
    check_videos, AnalysisCase, DecayTable, Eligibility, PerformanceMetrics, CASE_BOOK,
};
use crate::models::channel::{ChannelInfo, ChannelLookup, VideoSummary};
use crate::pricing::{Metric, Metrics, Package, QuoteSession, QuoteVideo, SubscriberAddon};

// ============================================================================
// JSON API bodies
// ============================================================================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SelectionInput {
    pub video_id: String,
    #[serde(default = "default_true")]
    pub selected: bool,
    pub package: Option<Package>,
    /// Applied after the package, so each value is clamped to its cap
    pub targets: Option<Metrics<u8>>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct QuoteRequest {
    pub videos: Vec<QuoteVideo>,
    #[serde(default)]
    pub selections: Vec<SelectionInput>,
    #[serde(default)]
    pub subscriber_addon: Option<SubscriberAddon>,
}

impl QuoteRequest {
    /// Replay the request as the same sequence of UI events: check, pick a
    /// package, then move sliders.
    pub fn to_session(&self) -> QuoteSession {
        let mut session = QuoteSession::new();
        for input in &self.selections {
            session.set_selected(&input.video_id, input.selected);
            if let Some(package) = input.package {
                session.choose_package(&input.video_id, package);
            }
            if let Some(targets) = input.targets {
                for metric in Metric::ALL {
                    session.set_target(&input.video_id, metric, targets.get(metric));
                }
            }
        }
        if let Some(addon) = self.subscriber_addon {
            session.set_subscriber_addon(addon.selected, addon.target);
        }
        session
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AnalysisResponse {
    pub channel: ChannelInfo,
    pub eligibility: Eligibility,
    /// `None` when the channel has no videos to analyse
    pub metrics: Option<PerformanceMetrics>,
    pub case_id: Option<String>,
    pub analysis: Option<AnalysisCase>,
    pub videos: Vec<VideoSummary>,
}

impl AnalysisResponse {
    pub fn build(lookup: &ChannelLookup, today: NaiveDate, decay: &DecayTable) -> Self {
        let channel = lookup.channel_info();
        let metrics = PerformanceMetrics::compute(
            &lookup.video_stats(),
            channel.subscriber_count,
            today,
            decay,
        );
        let case_id = metrics.as_ref().map(PerformanceMetrics::case_code);
        let analysis = case_id
            .as_deref()
            .and_then(|code| CASE_BOOK.lookup(code))
            .cloned();

        Self {
            eligibility: check_videos(&lookup.recent_videos, today),
            videos: lookup.video_summaries(),
            channel,
            metrics,
            case_id,
            analysis,
        }
    }

    pub fn quote_videos(&self) -> Vec<QuoteVideo> {
        self.videos.iter().map(QuoteVideo::from).collect()
    }
}
