//! Contextual alert formatting
//!
//! Ties a detected (or predicted) pattern to current market conditions
//! for the notification layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall market sentiment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    #[serde(other)]
    Neutral,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "positive"),
            Sentiment::Negative => write!(f, "negative"),
            Sentiment::Neutral => write!(f, "neutral"),
        }
    }
}

/// Market volatility bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Volatility {
    Low,
    High,
    #[default]
    #[serde(other)]
    Moderate,
}

impl fmt::Display for Volatility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Volatility::Low => write!(f, "low"),
            Volatility::Moderate => write!(f, "moderate"),
            Volatility::High => write!(f, "high"),
        }
    }
}

/// Market conditions supplied by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketContext {
    #[serde(default, rename = "overall")]
    pub sentiment: Sentiment,
    #[serde(default)]
    pub volatility: Volatility,
}

impl MarketContext {
    pub fn new(sentiment: Sentiment, volatility: Volatility) -> Self {
        Self {
            sentiment,
            volatility,
        }
    }

    pub fn alert_for(&self, pattern: &str, historical_tendency: f64) -> String {
        format_alert(pattern, self.sentiment, self.volatility, historical_tendency)
    }
}

/// Render the alert for a pattern name; unknown names get a generic message
pub fn format_alert(
    pattern: &str,
    sentiment: Sentiment,
    volatility: Volatility,
    historical_tendency: f64,
) -> String {
    let tendency = if historical_tendency > 0.0 {
        format!(
            " You've shown this pattern in {}% of similar {} market conditions.",
            (historical_tendency * 100.0) as i64,
            sentiment
        )
    } else {
        String::new()
    };

    match pattern {
        "Revenge Trading" => format!(
            "⚠️ MARKET ALERT: Market is {} with {} volatility.{} High risk of chasing losses.",
            sentiment, volatility, tendency
        ),
        "FOMO Trading" => format!(
            "⚠️ MARKET ALERT: Market sentiment is {}.{} Don't chase trades.",
            sentiment, tendency
        ),
        "Ego Trading" => format!(
            "⚠️ WIN STREAK ALERT: You tend to overtrade after wins.{} Stick to your normal position size.",
            tendency
        ),
        // The speed alert never carries the tendency clause
        "Impulsive Decisions" => format!(
            "⚠️ SPEED ALERT: You're trading too fast. In {} markets, reduce trade frequency. Slow down.",
            sentiment
        ),
        other => format!("Pattern '{}' detected. Review your trading plan.", other),
    }
}
