use chrono::{DateTime, Months, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::channel::RecentVideo;

pub const MIN_VIDEOS_LAST_3_MONTHS: usize = 5;
pub const MIN_VIDEOS_LAST_MONTH: usize = 1;

lazy_static! {
    static ref KOREAN_DATE: Regex = Regex::new(r"(\d{4})년 (\d{1,2})월 (\d{1,2})일").unwrap();
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Eligibility {
    pub is_eligible: bool,
    pub count_last_90_days: usize,
    pub count_last_30_days: usize,
}

/// A channel can be analysed once it uploads regularly: at least five videos in
/// the last three calendar months and at least one in the last month.
pub fn check_eligibility<'a, I>(published_dates: I, today: NaiveDate) -> Eligibility
where
    I: IntoIterator<Item = &'a str>,
{
    let three_months_ago = today.checked_sub_months(Months::new(3)).unwrap_or(today);
    let one_month_ago = today.checked_sub_months(Months::new(1)).unwrap_or(today);

    let dates: Vec<NaiveDate> = published_dates
        .into_iter()
        .map(|raw| parse_publish_date(raw, today))
        .collect();

    let count_last_90_days = dates.iter().filter(|d| **d >= three_months_ago).count();
    let count_last_30_days = dates.iter().filter(|d| **d >= one_month_ago).count();

    Eligibility {
        is_eligible: count_last_90_days >= MIN_VIDEOS_LAST_3_MONTHS
            && count_last_30_days >= MIN_VIDEOS_LAST_MONTH,
        count_last_90_days,
        count_last_30_days,
    }
}

pub fn check_videos(videos: &[RecentVideo], today: NaiveDate) -> Eligibility {
    check_eligibility(videos.iter().map(|v| v.published_at.as_str()), today)
}

/// Accepts "2024년 3월 5일", RFC 3339 timestamps and plain `YYYY-MM-DD`.
///
/// Anything else is treated as published `today`. That keeps the page usable but can
/// make an old upload count as recent, so it is logged.
pub fn parse_publish_date(raw: &str, today: NaiveDate) -> NaiveDate {
    if let Some(date) = try_parse_publish_date(raw) {
        return date;
    }
    tracing::warn!(published_at = %raw, "unparseable publish date, assuming today");
    today
}

pub fn try_parse_publish_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Some(caps) = KOREAN_DATE.captures(raw) {
        let year = caps[1].parse().ok()?;
        let month = caps[2].parse().ok()?;
        let day = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}
