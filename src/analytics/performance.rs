// Performance tier classification and channel-level aggregate metrics

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::decay::DecayTable;
use super::eligibility::parse_publish_date;
use crate::models::channel::VideoStat;

/// Views-per-subscriber thresholds
pub const VIEW_RATIO_HIGH: f64 = 0.3;
pub const VIEW_RATIO_MID: f64 = 0.1;

/// Like/comment-per-view thresholds
pub const ENGAGEMENT_HIGH: f64 = 0.05;
pub const ENGAGEMENT_MID: f64 = 0.02;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Low,
    Mid,
    High,
}

impl Tier {
    /// Label shown to users
    pub fn label(&self) -> &'static str {
        match self {
            Tier::High => "우수",
            Tier::Mid => "적정",
            Tier::Low => "미달",
        }
    }

    /// Letter used in analysis case codes
    pub fn code(&self) -> char {
        match self {
            Tier::High => 'H',
            Tier::Mid => 'M',
            Tier::Low => 'L',
        }
    }

    fn from_thresholds(value: f64, high: f64, mid: f64) -> Self {
        // NaN fails every comparison and lands on Low
        if value >= high {
            Tier::High
        } else if value >= mid {
            Tier::Mid
        } else {
            Tier::Low
        }
    }
}

/// Untyped classifier. A missing (or zero) subscriber count means `value` is already
/// a per-view ratio.
pub fn classify(value: f64, subscriber_count: Option<f64>) -> Tier {
    match subscriber_count {
        Some(subscribers) if subscribers > 0.0 && subscribers.is_finite() => Measure::Count {
            value,
            subscribers,
        }
        .tier(),
        _ => Measure::Ratio(value).tier(),
    }
}

/// A per-view ratio. Construction guards the zero-view case.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ratio(Option<f64>);

impl Ratio {
    pub fn of(numerator: f64, denominator: f64) -> Self {
        if denominator > 0.0 && denominator.is_finite() && numerator.is_finite() {
            Ratio(Some(numerator / denominator))
        } else {
            Ratio(None)
        }
    }

    pub fn value(&self) -> Option<f64> {
        self.0
    }
}

/// What is being classified: a raw count against the subscriber base, or an
/// already-divided engagement ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measure {
    Count { value: f64, subscribers: f64 },
    Ratio(f64),
}

impl From<Ratio> for Measure {
    fn from(ratio: Ratio) -> Self {
        Measure::Ratio(ratio.value().unwrap_or(f64::NAN))
    }
}

impl Measure {
    pub fn tier(&self) -> Tier {
        match *self {
            Measure::Count { value, subscribers } => {
                if !subscribers.is_finite() || subscribers <= 0.0 {
                    return Tier::Low;
                }
                Tier::from_thresholds(value / subscribers, VIEW_RATIO_HIGH, VIEW_RATIO_MID)
            }
            Measure::Ratio(value) => {
                Tier::from_thresholds(value, ENGAGEMENT_HIGH, ENGAGEMENT_MID)
            }
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct MetricPerformance {
    pub level: Tier,
    pub value: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct PerformanceMetrics {
    /// Decay-weighted average views, classified against subscribers
    pub views: MetricPerformance,
    /// Average like/view ratio
    pub likes: MetricPerformance,
    /// Average comment/view ratio
    pub comments: MetricPerformance,
}

impl PerformanceMetrics {
    /// Returns `None` for a channel with no videos.
    pub fn compute(
        videos: &[VideoStat],
        subscribers: u64,
        today: NaiveDate,
        decay: &DecayTable,
    ) -> Option<Self> {
        if videos.is_empty() {
            return None;
        }

        let weighted_views: f64 = videos
            .iter()
            .map(|video| {
                let published = parse_publish_date(&video.published_at, today);
                let age_days = (today - published).num_days();
                video.view_count as f64 * decay.multiplier_for(age_days)
            })
            .sum();
        let average_views = weighted_views / videos.len() as f64;

        let like_rate = mean_ratio(videos, |v| v.like_count);
        let comment_rate = mean_ratio(videos, |v| v.comment_count);

        let views = Measure::Count {
            value: average_views,
            subscribers: subscribers as f64,
        };

        Some(Self {
            views: MetricPerformance {
                level: views.tier(),
                value: average_views,
            },
            likes: MetricPerformance {
                level: Measure::from(like_rate).tier(),
                value: like_rate.value().unwrap_or(0.0),
            },
            comments: MetricPerformance {
                level: Measure::from(comment_rate).tier(),
                value: comment_rate.value().unwrap_or(0.0),
            },
        })
    }

    pub fn case_code(&self) -> String {
        [self.views.level, self.likes.level, self.comments.level]
            .iter()
            .map(Tier::code)
            .collect()
    }
}

/// Mean of per-video `metric / views`, skipping videos without views
fn mean_ratio(videos: &[VideoStat], metric: impl Fn(&VideoStat) -> u64) -> Ratio {
    let ratios: Vec<f64> = videos
        .iter()
        .filter_map(|v| Ratio::of(metric(v) as f64, v.view_count as f64).value())
        .collect();
    Ratio::of(ratios.iter().sum(), ratios.len() as f64)
}
