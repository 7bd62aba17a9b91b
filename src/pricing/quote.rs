use serde::{Deserialize, Serialize};

use super::catalog::{Metric, Metrics, Package, SubscriberBracket, PER_UNIT_RATE};
use crate::models::channel::VideoSummary;

/// What the calculator needs to know about one video
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct QuoteVideo {
    pub video_id: String,
    #[serde(default)]
    pub title: String,
    pub current: Metrics<u64>,
    pub subscriber_count: u64,
}

impl From<&VideoSummary> for QuoteVideo {
    fn from(summary: &VideoSummary) -> Self {
        Self {
            video_id: summary.video_id.clone(),
            title: summary.title.clone(),
            current: Metrics::new(
                summary.stats.view_count,
                summary.stats.like_count,
                summary.stats.comment_count,
            ),
            subscriber_count: summary.subscriber_count,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct VideoQuote {
    pub package: Package,
    pub increase: Metrics<u64>,
    /// Current value plus increase
    pub projected: Metrics<u64>,
    pub video_total: u64,
}

/// Expected increase for one metric:
/// `round(current * package multiplier * target%)`
pub fn metric_increase(
    current: u64,
    package: Package,
    metric: Metric,
    target_percent: u8,
    bracket: &SubscriberBracket,
) -> u64 {
    let multiplier = package.multiplier(metric, bracket);
    (current as f64 * multiplier * (target_percent as f64 / 100.0)).round() as u64
}

/// Price one video: package price plus every unit of expected increase at
/// `PER_UNIT_RATE`.
pub fn quote(video: &QuoteVideo, package: Package, targets: &Metrics<u8>) -> VideoQuote {
    let bracket = SubscriberBracket::for_subscribers(video.subscriber_count);

    let increase = video.current.map(|metric, current| {
        metric_increase(current, package, metric, targets.get(metric), bracket)
    });
    let projected = video
        .current
        .map(|metric, current| current.saturating_add(increase.get(metric)));

    let units = increase
        .views
        .saturating_add(increase.likes)
        .saturating_add(increase.comments);

    VideoQuote {
        package,
        increase,
        projected,
        video_total: package
            .price()
            .saturating_add(units.saturating_mul(PER_UNIT_RATE)),
    }
}
