// View-count age correction. Older uploads have had longer to collect views from
// outside the subscriber base, so recent uploads are compared on a scaled basis.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct DecayStep {
    pub min_age_days: i64,
    pub multiplier: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DecayTable {
    steps: Vec<DecayStep>,
}

impl Default for DecayTable {
    fn default() -> Self {
        Self::new(vec![
            DecayStep { min_age_days: 0, multiplier: 1.0 },
            DecayStep { min_age_days: 14, multiplier: 2.0 },
            DecayStep { min_age_days: 21, multiplier: 3.0 },
            DecayStep { min_age_days: 28, multiplier: 4.0 },
            DecayStep { min_age_days: 30, multiplier: 6.0 },
            DecayStep { min_age_days: 60, multiplier: 10.0 },
            DecayStep { min_age_days: 90, multiplier: 14.0 },
        ])
    }
}

impl DecayTable {
    /// Steps are sorted by age; an empty table means "no correction".
    pub fn new(mut steps: Vec<DecayStep>) -> Self {
        steps.sort_by_key(|step| step.min_age_days);
        Self { steps }
    }

    pub fn steps(&self) -> &[DecayStep] {
        &self.steps
    }

    /// Multiplier of the last step whose threshold the age has reached.
    /// Future dates count as age zero.
    pub fn multiplier_for(&self, age_days: i64) -> f64 {
        let age = age_days.max(0);
        self.steps
            .iter()
            .take_while(|step| step.min_age_days <= age)
            .last()
            .map(|step| step.multiplier)
            .unwrap_or(1.0)
    }
}
