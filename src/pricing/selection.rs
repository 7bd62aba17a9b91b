// Per-request quote builder state. Nothing here outlives the request that built it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::catalog::{
    Metric, Metrics, Package, MAX_TARGET_PERCENT, SUBSCRIBER_ADDON_MAX, SUBSCRIBER_ADDON_MIN,
    SUBSCRIBER_ADDON_STEP, SUBSCRIBER_RATE,
};
use super::quote::{quote, QuoteVideo, VideoQuote};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct VideoSelection {
    pub selected: bool,
    pub package: Option<Package>,
    pub targets: Metrics<u8>,
}

impl VideoSelection {
    fn cap(&self, metric: Metric) -> u8 {
        self.package
            .map(|p| p.cap(metric))
            .unwrap_or(MAX_TARGET_PERCENT)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct SubscriberAddon {
    pub selected: bool,
    pub target: u64,
}

impl Default for SubscriberAddon {
    fn default() -> Self {
        Self {
            selected: false,
            target: SUBSCRIBER_ADDON_MIN,
        }
    }
}

impl SubscriberAddon {
    pub fn new(selected: bool, target: u64) -> Self {
        Self {
            selected,
            target: snap_addon_target(target),
        }
    }

    pub fn amount(&self) -> u64 {
        if self.selected {
            self.target * SUBSCRIBER_RATE
        } else {
            0
        }
    }
}

/// Clamp to the slider range and snap down to its step
pub fn snap_addon_target(target: u64) -> u64 {
    let clamped = target.clamp(SUBSCRIBER_ADDON_MIN, SUBSCRIBER_ADDON_MAX);
    clamped - (clamped - SUBSCRIBER_ADDON_MIN) % SUBSCRIBER_ADDON_STEP
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct QuoteLine {
    pub video_id: String,
    pub title: String,
    pub quote: VideoQuote,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct PackageCount {
    pub package: Package,
    pub count: usize,
    pub subtotal: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct QuoteSummary {
    pub lines: Vec<QuoteLine>,
    pub package_counts: Vec<PackageCount>,
    pub videos_total: u64,
    pub subscriber_addon: SubscriberAddon,
    pub subscriber_amount: u64,
    pub total_amount: u64,
}

impl QuoteSummary {
    pub fn line(&self, video_id: &str) -> Option<&QuoteLine> {
        self.lines.iter().find(|line| line.video_id == video_id)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSession {
    videos: BTreeMap<String, VideoSelection>,
    subscriber_addon: SubscriberAddon,
}

impl QuoteSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self, video_id: &str) -> Option<&VideoSelection> {
        self.videos.get(video_id)
    }

    pub fn is_selected(&self, video_id: &str) -> bool {
        self.selection(video_id).is_some_and(|s| s.selected)
    }

    pub fn subscriber_addon(&self) -> SubscriberAddon {
        self.subscriber_addon
    }

    /// Flip a video's checkbox. Returns the new state. A first selection starts
    /// with every target at zero.
    pub fn toggle_video(&mut self, video_id: &str) -> bool {
        let entry = self.videos.entry(video_id.to_string()).or_default();
        entry.selected = !entry.selected;
        entry.selected
    }

    pub fn set_selected(&mut self, video_id: &str, selected: bool) {
        if self.is_selected(video_id) != selected {
            self.toggle_video(video_id);
        }
    }

    /// Choosing a package resets the sliders to its initial values.
    pub fn choose_package(&mut self, video_id: &str, package: Package) -> Metrics<u8> {
        let entry = self.videos.entry(video_id.to_string()).or_default();
        entry.package = Some(package);
        entry.targets = package.initial_targets();
        entry.targets
    }

    /// Move one slider. The stored value is clamped to the chosen package's cap
    /// (or 100 without a package) and returned.
    pub fn set_target(&mut self, video_id: &str, metric: Metric, percent: u8) -> u8 {
        let entry = self.videos.entry(video_id.to_string()).or_default();
        let value = percent.min(entry.cap(metric));
        entry.targets.set(metric, value);
        value
    }

    pub fn set_subscriber_addon(&mut self, selected: bool, target: u64) {
        self.subscriber_addon = SubscriberAddon::new(selected, target);
    }

    /// Quote for one video, if it is selected and has a package
    pub fn quote_for(&self, video: &QuoteVideo) -> Option<VideoQuote> {
        let selection = self.selection(&video.video_id)?;
        if !selection.selected {
            return None;
        }
        let package = selection.package?;
        Some(quote(video, package, &selection.targets))
    }

    /// Totals across `videos`. Unselected videos and videos without a package
    /// contribute nothing.
    pub fn summarize(&self, videos: &[QuoteVideo]) -> QuoteSummary {
        let lines: Vec<QuoteLine> = videos
            .iter()
            .filter_map(|video| {
                self.quote_for(video).map(|quote| QuoteLine {
                    video_id: video.video_id.clone(),
                    title: video.title.clone(),
                    quote,
                })
            })
            .collect();

        let package_counts = Package::ALL
            .iter()
            .map(|package| {
                let count = lines.iter().filter(|l| l.quote.package == *package).count();
                PackageCount {
                    package: *package,
                    count,
                    subtotal: package.price() * count as u64,
                }
            })
            .collect();

        let videos_total = lines
            .iter()
            .map(|l| l.quote.video_total)
            .fold(0, u64::saturating_add);
        let subscriber_amount = self.subscriber_addon.amount();

        QuoteSummary {
            lines,
            package_counts,
            videos_total,
            subscriber_addon: self.subscriber_addon,
            subscriber_amount,
            total_amount: videos_total.saturating_add(subscriber_amount),
        }
    }
}
