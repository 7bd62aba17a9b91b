use serde::{Deserialize, Deserializer, Serialize};

use crate::analytics::performance::{Measure, Ratio, Tier};

// ============================================================================
// Backend wire types (GET {API_URL}/channel?url=...)
// ============================================================================

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ChannelLookup {
    #[serde(default)]
    pub channel_id: String,
    pub title: String,
    /// Kept raw ("12,345명") for display; use `subscriber_total()` for arithmetic
    #[serde(default, deserialize_with = "raw_count")]
    pub subscriber_count: String,
    #[serde(default)]
    pub recent_videos: Vec<RecentVideo>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RecentVideo {
    pub title: String,
    pub published_at: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub statistics: VideoStatistics,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatistics {
    #[serde(default, deserialize_with = "count")]
    pub view_count: u64,
    #[serde(default, deserialize_with = "count")]
    pub like_count: u64,
    #[serde(default, deserialize_with = "count")]
    pub comment_count: u64,
}

/// Counts arrive either as JSON numbers or as display strings like "1,234"
#[derive(Deserialize)]
#[serde(untagged)]
enum CountRepr {
    Number(u64),
    Float(f64),
    Text(String),
}

fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<CountRepr>::deserialize(deserializer)? {
        Some(CountRepr::Number(n)) => n,
        Some(CountRepr::Float(f)) if f.is_finite() && f >= 0.0 => f as u64,
        Some(CountRepr::Text(s)) => parse_count(&s).unwrap_or(0),
        _ => 0,
    })
}

fn raw_count<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<CountRepr>::deserialize(deserializer)? {
        Some(CountRepr::Number(n)) => n.to_string(),
        Some(CountRepr::Float(f)) => f.to_string(),
        Some(CountRepr::Text(s)) => s,
        None => String::new(),
    })
}

/// Strip thousands separators, unit suffixes and whitespace, then parse.
pub fn parse_count(raw: &str) -> Option<u64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, ',' | '명' | '회' | '개') && !c.is_whitespace())
        .collect();
    cleaned.parse().ok()
}

impl ChannelLookup {
    pub fn subscriber_total(&self) -> u64 {
        parse_count(&self.subscriber_count).unwrap_or(0)
    }

    pub fn channel_info(&self) -> ChannelInfo {
        ChannelInfo {
            title: self.title.clone(),
            subscriber_count: self.subscriber_total(),
            description: format!("구독자 {}", self.subscriber_count),
        }
    }

    pub fn video_stats(&self) -> Vec<VideoStat> {
        self.recent_videos.iter().map(VideoStat::from).collect()
    }

    /// Display rows for the analysis page, capped at the five most recent uploads
    pub fn video_summaries(&self) -> Vec<VideoSummary> {
        let subscribers = self.subscriber_total();
        self.recent_videos
            .iter()
            .take(MAX_SUMMARY_VIDEOS)
            .enumerate()
            .map(|(index, video)| VideoSummary::from_recent(index, video, subscribers))
            .collect()
    }
}

pub const MAX_SUMMARY_VIDEOS: usize = 5;

// ============================================================================
// Normalized domain types
// ============================================================================

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChannelInfo {
    pub title: String,
    pub subscriber_count: u64,
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct VideoStat {
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
    pub published_at: String,
}

impl From<&RecentVideo> for VideoStat {
    fn from(video: &RecentVideo) -> Self {
        Self {
            view_count: video.statistics.view_count,
            like_count: video.statistics.like_count,
            comment_count: video.statistics.comment_count,
            published_at: video.published_at.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct VideoPerformance {
    pub views: Tier,
    pub likes: Tier,
    pub comments: Tier,
}

impl VideoPerformance {
    pub fn of(stat: &VideoStat, subscribers: u64) -> Self {
        // Unlike the channel aggregate (`classify` with no subscribers falls back to
        // the ratio thresholds), a per-video count against zero subscribers grades Low.
        let views = Measure::Count {
            value: stat.view_count as f64,
            subscribers: subscribers as f64,
        };
        let likes = Measure::from(Ratio::of(stat.like_count as f64, stat.view_count as f64));
        let comments =
            Measure::from(Ratio::of(stat.comment_count as f64, stat.view_count as f64));

        Self {
            views: views.tier(),
            likes: likes.tier(),
            comments: comments.tier(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VideoSummary {
    pub video_id: String,
    pub title: String,
    pub url: String,
    pub thumbnail: String,
    pub published_at: String,
    pub stats: VideoStat,
    pub subscriber_count: u64,
    pub performance: VideoPerformance,
}

impl VideoSummary {
    pub fn from_recent(index: usize, video: &RecentVideo, subscribers: u64) -> Self {
        let video_id = video_id_from_url(&video.url)
            .map(str::to_string)
            .unwrap_or_else(|| format!("video_{}", index));
        let thumbnail = if video.thumbnail.is_empty() {
            format!("https://img.youtube.com/vi/{}/mqdefault.jpg", video_id)
        } else {
            video.thumbnail.clone()
        };
        let stats = VideoStat::from(video);
        let performance = VideoPerformance::of(&stats, subscribers);

        Self {
            video_id,
            title: video.title.clone(),
            url: video.url.clone(),
            thumbnail,
            published_at: video.published_at.clone(),
            stats,
            subscriber_count: subscribers,
            performance,
        }
    }
}

/// `https://www.youtube.com/watch?v=abc&t=10` -> `abc`
pub fn video_id_from_url(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once("v=")?;
    let id = rest.split('&').next().unwrap_or_default();
    (!id.is_empty()).then_some(id)
}
