// Canned narratives keyed by the three-letter case code (views, likes, comments)

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

const BUNDLED_CASES: &str = include_str!("../../data/analysis_cases.json");

lazy_static! {
    pub static ref CASE_BOOK: CaseBook =
        CaseBook::from_json(BUNDLED_CASES).expect("bundled analysis_cases.json is valid");
}

/// A titled group of bullet points
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NarrativeSection {
    pub title: String,
    pub content: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AnalysisCase {
    pub case_id: String,
    pub interpretation: String,
    pub causes: Vec<NarrativeSection>,
    pub detailed_analysis: Vec<NarrativeSection>,
    pub recommendations: Vec<NarrativeSection>,
    pub conclusion: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CaseBook {
    cases: Vec<AnalysisCase>,
}

impl CaseBook {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Exact match on the case code, otherwise the first case in the book.
    pub fn lookup(&self, case_id: &str) -> Option<&AnalysisCase> {
        self.cases
            .iter()
            .find(|case| case.case_id == case_id)
            .or_else(|| self.cases.first())
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}
