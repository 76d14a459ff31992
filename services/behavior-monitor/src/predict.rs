//! Predictive risk - forecasts likely patterns for the trader's next action
//!
//! Works from live streak counters rather than insights, so it can run
//! before the next trade exists.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{sort_chronologically, TradeEvent};

/// Conservative prior used for every tendency when no history is available
pub const CONSERVATIVE_TENDENCY: f64 = 0.3;

/// Live streak counters for the current session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    #[serde(default)]
    pub consecutive_losses: u32,
    #[serde(default)]
    pub consecutive_wins: u32,
    #[serde(default)]
    pub trades_in_last_hour: u32,
}

impl StreakState {
    /// Derive counters from a session, with the hour ending at its last trade
    pub fn from_session(events: &[TradeEvent]) -> Self {
        let sorted = sort_chronologically(events);
        let as_of = sorted.iter().rev().find_map(|e| e.timestamp.instant());
        Self::derive(&sorted, as_of)
    }

    /// Derive counters from a session, with the hour ending at `as_of`
    pub fn from_session_at(events: &[TradeEvent], as_of: NaiveDateTime) -> Self {
        Self::derive(&sort_chronologically(events), Some(as_of))
    }

    fn derive(sorted: &[TradeEvent], as_of: Option<NaiveDateTime>) -> Self {
        let consecutive_losses = sorted.iter().rev().take_while(|e| e.is_loss()).count();
        let consecutive_wins = sorted.iter().rev().take_while(|e| e.is_win()).count();

        let trades_in_last_hour = match as_of {
            Some(end) => {
                let start = end - Duration::hours(1);
                sorted
                    .iter()
                    .filter_map(|e| e.timestamp.instant())
                    .filter(|t| *t >= start && *t <= end)
                    .count()
            }
            None => 0,
        };

        Self {
            consecutive_losses: consecutive_losses as u32,
            consecutive_wins: consecutive_wins as u32,
            trades_in_last_hour: trades_in_last_hour as u32,
        }
    }
}

/// Historical frequency (0.0 - 1.0) of each pattern under similar conditions.
///
/// A table with no keys at all counts as "no history" and is replaced by
/// the default table. Otherwise missing keys read as 0.0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TendencyPriors {
    #[serde(
        rename = "revenge_trading_tendency",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub revenge_trading: Option<f64>,
    #[serde(rename = "fomo_tendency", default, skip_serializing_if = "Option::is_none")]
    pub fomo: Option<f64>,
    #[serde(
        rename = "ego_trading_tendency",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ego_trading: Option<f64>,
    #[serde(
        rename = "impulsive_tendency",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub impulsive: Option<f64>,
}

impl TendencyPriors {
    /// Default table used when the caller supplies no priors at all
    pub fn conservative() -> Self {
        Self {
            revenge_trading: Some(CONSERVATIVE_TENDENCY),
            fomo: Some(CONSERVATIVE_TENDENCY),
            ego_trading: Some(CONSERVATIVE_TENDENCY),
            impulsive: Some(CONSERVATIVE_TENDENCY),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.revenge_trading.is_none()
            && self.fomo.is_none()
            && self.ego_trading.is_none()
            && self.impulsive.is_none()
    }

    pub fn revenge_trading(&self) -> f64 {
        self.revenge_trading.unwrap_or(0.0)
    }

    pub fn fomo(&self) -> f64 {
        self.fomo.unwrap_or(0.0)
    }

    pub fn ego_trading(&self) -> f64 {
        self.ego_trading.unwrap_or(0.0)
    }

    pub fn impulsive(&self) -> f64 {
        self.impulsive.unwrap_or(0.0)
    }
}

/// Forecast risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Fixed recommendation for each level
    pub fn recommended_action(&self) -> &'static str {
        match self {
            RiskLevel::High => "STOP: Do not take the next trade. Take a 15-minute break.",
            RiskLevel::Medium => {
                "CAUTION: Reduce position size by 50% and stick strictly to your plan."
            }
            RiskLevel::Low => "Continue trading with normal risk management",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

/// A single forecast pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictedPattern {
    pub pattern: String,
    pub confidence: f64,
}

/// Forecast for the next trade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskForecast {
    pub predictions: Vec<PredictedPattern>,
    pub risk_level: RiskLevel,
    /// Mean of fired confidences, rounded to 2 places (0 if none fired)
    pub confidence: f64,
    pub recommended_action: String,
}

impl RiskForecast {
    pub fn pattern_names(&self) -> Vec<&str> {
        self.predictions.iter().map(|p| p.pattern.as_str()).collect()
    }
}

/// Forecast next-trade risk from streak state and optional trader priors
pub fn predict_next_risk(state: &StreakState, priors: Option<&TendencyPriors>) -> RiskForecast {
    predict_with_defaults(state, priors, &TendencyPriors::conservative())
}

/// Same as [`predict_next_risk`] with a caller-tuned default table
pub fn predict_with_defaults(
    state: &StreakState,
    priors: Option<&TendencyPriors>,
    defaults: &TendencyPriors,
) -> RiskForecast {
    let t = priors.filter(|p| !p.is_empty()).unwrap_or(defaults);
    let (revenge, fomo, ego, impulsive) =
        (t.revenge_trading(), t.fomo(), t.ego_trading(), t.impulsive());
    let mut predictions = Vec::new();

    if state.consecutive_losses >= 2 && (revenge > 0.5 || state.consecutive_losses >= 3) {
        predictions.push(PredictedPattern {
            pattern: "Revenge Trading".to_string(),
            confidence: (revenge + 0.15 * state.consecutive_losses as f64).min(1.0),
        });
    }

    if state.consecutive_wins >= 2 && fomo > 0.4 {
        predictions.push(PredictedPattern {
            pattern: "FOMO Trading".to_string(),
            confidence: fomo,
        });
    }

    if state.consecutive_wins >= 3 && ego > 0.4 {
        predictions.push(PredictedPattern {
            pattern: "Ego Trading".to_string(),
            confidence: ego,
        });
    }

    if state.trades_in_last_hour >= 5 && impulsive > 0.4 {
        predictions.push(PredictedPattern {
            pattern: "Impulsive Trading".to_string(),
            confidence: impulsive,
        });
    }

    let mean_confidence = if predictions.is_empty() {
        0.0
    } else {
        predictions.iter().map(|p| p.confidence).sum::<f64>() / predictions.len() as f64
    };

    let risk_level = if predictions.len() >= 2 || mean_confidence > 0.7 {
        RiskLevel::High
    } else if !predictions.is_empty() || mean_confidence > 0.5 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    RiskForecast {
        predictions,
        risk_level,
        confidence: (mean_confidence * 100.0).round() / 100.0,
        recommended_action: risk_level.recommended_action().to_string(),
    }
}
