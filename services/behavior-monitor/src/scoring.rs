//! Risk aggregation
//!
//! Collapses an insight list into a single 0-100 score and compares it
//! against a trader's historical average.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{Insight, Severity};

/// Highest possible risk score
pub const MAX_RISK_SCORE: u8 = 100;
/// Score delta (either direction) that counts as a real change
const TREND_THRESHOLD: i32 = 10;

/// Score contribution of a single severity
///
/// A missing severity scores as Medium; an unknown label gets the generic 10.
pub fn severity_weight(severity: Severity) -> i32 {
    match severity {
        Severity::High => 25,
        Severity::Medium | Severity::NotApplicable => 15,
        Severity::Positive => -20,
        Severity::Unrecognized => 10,
    }
}

/// Sum severity weights, clamped to 0..=100.
///
/// Not normalized by count: many mild insights still saturate the score.
pub fn risk_score(insights: &[Insight]) -> u8 {
    let total: i32 = insights.iter().map(|i| severity_weight(i.severity)).sum();
    total.clamp(0, MAX_RISK_SCORE as i32) as u8
}

/// Direction of the current score relative to the historical average
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increased,
    Decreased,
    Stable,
}

/// Current score compared with a historical one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskTrend {
    pub current: u8,
    pub historical: u8,
    pub delta: i32,
    pub direction: TrendDirection,
}

impl RiskTrend {
    pub fn compare(current: u8, historical: u8) -> Self {
        let delta = current as i32 - historical as i32;
        let direction = if delta > TREND_THRESHOLD {
            TrendDirection::Increased
        } else if delta < -TREND_THRESHOLD {
            TrendDirection::Decreased
        } else {
            TrendDirection::Stable
        };
        Self {
            current,
            historical,
            delta,
            direction,
        }
    }
}

impl fmt::Display for RiskTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            TrendDirection::Increased => write!(
                f,
                "RISK INCREASED: Current risk ({}) is {} points higher than your historical average ({}).",
                self.current, self.delta, self.historical
            ),
            TrendDirection::Decreased => write!(
                f,
                "RISK DECREASED: Current risk ({}) is {} points lower than your historical average ({}).",
                self.current,
                self.delta.abs(),
                self.historical
            ),
            TrendDirection::Stable => write!(
                f,
                "RISK STABLE: Current risk ({}) is similar to your historical average ({}).",
                self.current, self.historical
            ),
        }
    }
}
