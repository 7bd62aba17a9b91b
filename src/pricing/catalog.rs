// Static pricing catalog: growth packages and subscriber brackets.
// Amounts are in KRW.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Price of one unit of metric increase (one view, like or comment)
pub const PER_UNIT_RATE: u64 = 1_000;

/// Subscriber-growth add-on
pub const SUBSCRIBER_RATE: u64 = 500;
pub const SUBSCRIBER_ADDON_MIN: u64 = 1_000;
pub const SUBSCRIBER_ADDON_MAX: u64 = 100_000;
pub const SUBSCRIBER_ADDON_STEP: u64 = 1_000;

/// Slider range when no package caps it
pub const MAX_TARGET_PERCENT: u8 = 100;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Views,
    Likes,
    Comments,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Views, Metric::Likes, Metric::Comments];

    pub fn key(&self) -> &'static str {
        match self {
            Metric::Views => "views",
            Metric::Likes => "likes",
            Metric::Comments => "comments",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Views => "조회수",
            Metric::Likes => "좋아요",
            Metric::Comments => "댓글",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Views => "회",
            Metric::Likes | Metric::Comments => "개",
        }
    }
}

/// One value per metric
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct Metrics<T> {
    pub views: T,
    pub likes: T,
    pub comments: T,
}

impl<T: Copy> Metrics<T> {
    pub const fn new(views: T, likes: T, comments: T) -> Self {
        Self { views, likes, comments }
    }

    pub fn get(&self, metric: Metric) -> T {
        match metric {
            Metric::Views => self.views,
            Metric::Likes => self.likes,
            Metric::Comments => self.comments,
        }
    }

    pub fn set(&mut self, metric: Metric, value: T) {
        match metric {
            Metric::Views => self.views = value,
            Metric::Likes => self.likes = value,
            Metric::Comments => self.comments = value,
        }
    }

    pub fn map<U: Copy>(&self, f: impl Fn(Metric, T) -> U) -> Metrics<U> {
        Metrics {
            views: f(Metric::Views, self.views),
            likes: f(Metric::Likes, self.likes),
            comments: f(Metric::Comments, self.comments),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Package {
    Basic,
    Standard,
    Premium,
    Vip,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackageInfo {
    pub package: Package,
    pub name: &'static str,
    pub price: u64,
    /// Per-metric slider cap; also the initial slider position
    pub caps: Metrics<u8>,
}

pub const PACKAGES: [PackageInfo; 4] = [
    PackageInfo {
        package: Package::Basic,
        name: "BASIC 패키지",
        price: 100_000,
        caps: Metrics::new(20, 15, 10),
    },
    PackageInfo {
        package: Package::Standard,
        name: "STANDARD 패키지",
        price: 200_000,
        caps: Metrics::new(40, 30, 20),
    },
    PackageInfo {
        package: Package::Premium,
        name: "PREMIUM 패키지",
        price: 300_000,
        caps: Metrics::new(60, 45, 30),
    },
    PackageInfo {
        package: Package::Vip,
        name: "VIP 패키지",
        price: 500_000,
        caps: Metrics::new(100, 80, 50),
    },
];

impl Package {
    pub const ALL: [Package; 4] = [Package::Basic, Package::Standard, Package::Premium, Package::Vip];

    pub fn info(&self) -> &'static PackageInfo {
        &PACKAGES[*self as usize]
    }

    pub fn code(&self) -> &'static str {
        match self {
            Package::Basic => "BASIC",
            Package::Standard => "STANDARD",
            Package::Premium => "PREMIUM",
            Package::Vip => "VIP",
        }
    }

    pub fn price(&self) -> u64 {
        self.info().price
    }

    pub fn cap(&self, metric: Metric) -> u8 {
        self.info().caps.get(metric)
    }

    pub fn initial_targets(&self) -> Metrics<u8> {
        self.info().caps
    }

    /// Bracket multiplier for this package: the lower bound for BASIC, the midpoint
    /// for STANDARD, the upper bound for PREMIUM, and half a range above it for VIP.
    pub fn multiplier(&self, metric: Metric, bracket: &SubscriberBracket) -> f64 {
        let (lower, upper) = bracket.bounds(metric);
        match self {
            Package::Basic => lower,
            Package::Standard => (lower + upper) / 2.0,
            Package::Premium => upper,
            Package::Vip => (3.0 * upper - lower) / 2.0,
        }
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.info().name)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown package: {0}")]
pub struct UnknownPackage(pub String);

impl FromStr for Package {
    type Err = UnknownPackage;

    /// Accepts the code ("STANDARD") or the display name ("STANDARD 패키지")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().trim_end_matches("패키지").trim();
        Package::ALL
            .into_iter()
            .find(|p| p.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| UnknownPackage(s.to_string()))
    }
}

/// Subscriber-count range with multiplier bounds: `pm..pm_max` for views and
/// likes, `qm..qm_max` for comments.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct SubscriberBracket {
    /// Exclusive upper bound; `None` for the top bracket
    pub below: Option<u64>,
    pub pm: f64,
    pub pm_max: f64,
    pub qm: f64,
    pub qm_max: f64,
}

pub const SUBSCRIBER_BRACKETS: [SubscriberBracket; 6] = [
    SubscriberBracket { below: Some(1_000), pm: 0.05, pm_max: 0.1, qm: 0.005, qm_max: 0.015 },
    SubscriberBracket { below: Some(10_000), pm: 0.04, pm_max: 0.08, qm: 0.004, qm_max: 0.01 },
    SubscriberBracket { below: Some(100_000), pm: 0.03, pm_max: 0.06, qm: 0.003, qm_max: 0.008 },
    SubscriberBracket { below: Some(500_000), pm: 0.02, pm_max: 0.05, qm: 0.002, qm_max: 0.006 },
    SubscriberBracket { below: Some(1_000_000), pm: 0.015, pm_max: 0.04, qm: 0.002, qm_max: 0.005 },
    SubscriberBracket { below: None, pm: 0.01, pm_max: 0.03, qm: 0.001, qm_max: 0.003 },
];

impl SubscriberBracket {
    pub fn for_subscribers(subscribers: u64) -> &'static SubscriberBracket {
        SUBSCRIBER_BRACKETS
            .iter()
            .find(|bracket| bracket.below.map_or(true, |limit| subscribers < limit))
            .unwrap_or(&SUBSCRIBER_BRACKETS[SUBSCRIBER_BRACKETS.len() - 1])
    }

    pub fn bounds(&self, metric: Metric) -> (f64, f64) {
        match metric {
            Metric::Comments => (self.qm, self.qm_max),
            Metric::Views | Metric::Likes => (self.pm, self.pm_max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bracket_lookup() {
        assert_eq!(SubscriberBracket::for_subscribers(0).pm, 0.05);
        assert_eq!(SubscriberBracket::for_subscribers(999).pm, 0.05);
        assert_eq!(SubscriberBracket::for_subscribers(1_000).pm, 0.04);
        assert_eq!(SubscriberBracket::for_subscribers(50_000).qm_max, 0.008);
        assert_eq!(SubscriberBracket::for_subscribers(499_999).pm_max, 0.05);
        assert_eq!(SubscriberBracket::for_subscribers(999_999).pm, 0.015);
        assert_eq!(SubscriberBracket::for_subscribers(u64::MAX).below, None);
    }

    #[test]
    fn test_multipliers_strictly_increase_across_packages() {
        for bracket in SUBSCRIBER_BRACKETS.iter() {
            for metric in Metric::ALL {
                let values: Vec<f64> =
                    Package::ALL.iter().map(|p| p.multiplier(metric, bracket)).collect();
                assert!(
                    values.windows(2).all(|w| w[0] < w[1]),
                    "{metric:?} {values:?}"
                );
            }
        }
    }

    #[test]
    fn test_standard_and_vip_multipliers() {
        let bracket = SubscriberBracket::for_subscribers(50_000);
        let standard = Package::Standard.multiplier(Metric::Views, bracket);
        assert!((standard - 0.045).abs() < 1e-12);

        let vip_comments = Package::Vip.multiplier(Metric::Comments, bracket);
        assert!((vip_comments - (3.0 * 0.008 - 0.003) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_package_table() {
        assert_eq!(Package::Premium.price(), 300_000);
        assert_eq!(Package::Vip.cap(Metric::Likes), 80);
        assert_eq!(Package::Basic.initial_targets(), Metrics::new(20, 15, 10));
        for (index, info) in PACKAGES.iter().enumerate() {
            assert_eq!(info.package as usize, index);
        }
    }

    #[test]
    fn test_package_parsing() {
        assert_eq!("VIP".parse::<Package>().unwrap(), Package::Vip);
        assert_eq!("standard".parse::<Package>().unwrap(), Package::Standard);
        assert_eq!("PREMIUM 패키지".parse::<Package>().unwrap(), Package::Premium);
        assert!("GOLD".parse::<Package>().is_err());
        assert_eq!(Package::Basic.to_string(), "BASIC 패키지");
    }
}
