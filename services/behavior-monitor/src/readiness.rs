//! Market readiness assessment

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::PatternKind;

/// Score at or above which trading must stop
pub const STOP_THRESHOLD: u8 = 60;
/// Score at or above which trading continues with caution
pub const CAUTION_THRESHOLD: u8 = 40;

/// Four-level trading recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "STOP TRADING")]
    StopTrading,
    #[serde(rename = "TRADE WITH CAUTION")]
    TradeWithCaution,
    #[serde(rename = "CONTINUE TRADING")]
    ContinueTrading,
    #[serde(rename = "PROCEED CAREFULLY")]
    ProceedCarefully,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::StopTrading => "STOP TRADING",
            Recommendation::TradeWithCaution => "TRADE WITH CAUTION",
            Recommendation::ContinueTrading => "CONTINUE TRADING",
            Recommendation::ProceedCarefully => "PROCEED CAREFULLY",
        }
    }

    fn reason(&self) -> &'static str {
        match self {
            Recommendation::StopTrading => {
                "High-risk emotional patterns detected. Take a break, review your plan, and return when calm."
            }
            Recommendation::TradeWithCaution => {
                "Some concerning patterns detected. Reduce position sizes and stick strictly to your trading plan."
            }
            Recommendation::ContinueTrading => {
                "Disciplined behavior with good risk management. Maintain your current approach."
            }
            Recommendation::ProceedCarefully => {
                "No major red flags, but stay vigilant and follow your trading rules."
            }
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Readiness verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Readiness {
    pub ready: bool,
    pub recommendation: Recommendation,
    pub reason: String,
}

impl Readiness {
    fn from_recommendation(recommendation: Recommendation) -> Self {
        Self {
            ready: recommendation != Recommendation::StopTrading,
            recommendation,
            reason: recommendation.reason().to_string(),
        }
    }
}

/// Decide whether the trader should keep trading; first matching rule wins
pub fn assess_readiness(risk_score: u8, kinds: &[PatternKind]) -> Readiness {
    let has_critical = kinds.iter().any(|k| k.is_critical());

    let recommendation = if risk_score >= STOP_THRESHOLD || has_critical {
        Recommendation::StopTrading
    } else if risk_score >= CAUTION_THRESHOLD {
        Recommendation::TradeWithCaution
    } else if kinds.contains(&PatternKind::CalculatedRisk) {
        Recommendation::ContinueTrading
    } else {
        Recommendation::ProceedCarefully
    };

    Readiness::from_recommendation(recommendation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_alone_can_stop() {
        let readiness = assess_readiness(65, &[PatternKind::Overtrading]);
        assert!(!readiness.ready);
        assert_eq!(readiness.recommendation, Recommendation::StopTrading);
    }

    #[test]
    fn test_critical_pattern_stops_at_low_score() {
        for kind in [
            PatternKind::RevengeTrading,
            PatternKind::EgoTrading,
            PatternKind::AveragingDown,
        ] {
            let readiness = assess_readiness(0, &[kind]);
            assert_eq!(readiness.recommendation, Recommendation::StopTrading);
            assert!(!readiness.ready);
        }
    }

    #[test]
    fn test_caution_band() {
        let readiness = assess_readiness(40, &[PatternKind::CalculatedRisk]);
        assert_eq!(readiness.recommendation, Recommendation::TradeWithCaution);
        assert!(readiness.ready);
        assert_eq!(
            assess_readiness(59, &[]).recommendation,
            Recommendation::TradeWithCaution
        );
    }

    #[test]
    fn test_low_score_outcomes() {
        let readiness = assess_readiness(0, &[PatternKind::CalculatedRisk]);
        assert_eq!(readiness.recommendation, Recommendation::ContinueTrading);
        assert!(readiness.reason.starts_with("Disciplined behavior"));

        let readiness = assess_readiness(10, &[PatternKind::Disciplined]);
        assert_eq!(readiness.recommendation, Recommendation::ProceedCarefully);
        assert!(readiness.ready);
    }

    #[test]
    fn test_serialized_labels() {
        let readiness = assess_readiness(80, &[]);
        let value = serde_json::to_value(&readiness).unwrap();
        assert_eq!(value["recommendation"], "STOP TRADING");
        assert_eq!(value["ready"], false);
    }
}
