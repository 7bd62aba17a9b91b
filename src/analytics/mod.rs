// src/analytics/mod.rs
pub mod cases;
pub mod decay;
pub mod eligibility;
pub mod performance;

pub use cases::{AnalysisCase, CaseBook, NarrativeSection, CASE_BOOK};
pub use decay::{DecayStep, DecayTable};
pub use eligibility::{check_eligibility, check_videos, Eligibility};
pub use performance::{classify, Measure, PerformanceMetrics, Ratio, Tier};
