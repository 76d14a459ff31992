//! Core types for behavioral analysis
//!
//! These types define the contract between trade-history providers, the
//! detection engine, and downstream consumers (narration, alerting).

use chrono::{DateTime, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// Timestamp format used by trade-history providers
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Event timestamp as delivered by the provider.
///
/// The raw text is kept even when it cannot be parsed, so a single noisy
/// record never aborts a session. Detectors skip any pair involving an
/// unparseable timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    raw: String,
    parsed: Option<NaiveDateTime>,
}

impl Timestamp {
    /// Parse provider text (`YYYY-MM-DD HH:MM:SS` or RFC 3339)
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let trimmed = raw.trim();
        let parsed = NaiveDateTime::parse_from_str(trimmed, TIMESTAMP_FORMAT)
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(trimmed)
                    .ok()
                    .map(|dt| dt.naive_utc())
            });
        Self { raw, parsed }
    }

    /// Raw provider text
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parsed instant, if the raw text was well-formed
    pub fn instant(&self) -> Option<NaiveDateTime> {
        self.parsed
    }

    pub fn is_valid(&self) -> bool {
        self.parsed.is_some()
    }

    /// Milliseconds elapsed from `self` to `later`; None if either side is malformed
    pub fn millis_until(&self, later: &Timestamp) -> Option<i64> {
        match (self.parsed, later.parsed) {
            (Some(a), Some(b)) => Some((b - a).num_milliseconds()),
            _ => None,
        }
    }

    /// Minutes elapsed from `self` to `later` (fractional)
    pub fn minutes_until(&self, later: &Timestamp) -> Option<f64> {
        self.millis_until(later).map(|ms| ms as f64 / 60_000.0)
    }

    /// Chronological ordering; malformed timestamps sort after valid ones
    pub fn chronological_cmp(&self, other: &Timestamp) -> Ordering {
        match (self.parsed, other.parsed) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(dt: NaiveDateTime) -> Self {
        Self {
            raw: dt.format(TIMESTAMP_FORMAT).to_string(),
            parsed: Some(dt),
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Timestamp::parse(raw))
    }
}

/// Trade side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeAction {
    Buy,
    Sell,
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeAction::Buy => write!(f, "BUY"),
            TradeAction::Sell => write!(f, "SELL"),
        }
    }
}

/// Position status at the time the event was recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeStatus {
    Open,
    Closed,
}

/// A single recorded trade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeEvent {
    pub timestamp: Timestamp,
    pub symbol: String,
    pub action: TradeAction,
    pub price: Decimal,
    /// Realized profit/loss; its sign alone decides win vs loss
    pub pnl: Decimal,
    pub status: TradeStatus,
}

impl TradeEvent {
    pub fn new(
        timestamp: Timestamp,
        symbol: impl Into<String>,
        action: TradeAction,
        price: Decimal,
        pnl: Decimal,
        status: TradeStatus,
    ) -> Self {
        Self {
            timestamp,
            symbol: symbol.into(),
            action,
            price,
            pnl,
            status,
        }
    }

    pub fn is_win(&self) -> bool {
        self.pnl > Decimal::ZERO
    }

    pub fn is_loss(&self) -> bool {
        self.pnl < Decimal::ZERO
    }
}

/// Sort a session chronologically (stable; malformed timestamps last)
pub fn sort_chronologically(events: &[TradeEvent]) -> Vec<TradeEvent> {
    let mut sorted = events.to_vec();
    sorted.sort_by(|a, b| a.timestamp.chronological_cmp(&b.timestamp));
    sorted
}

/// Insight severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    High,
    Medium,
    Positive,
    /// No severity attached (sentinel insights, or the key was absent)
    #[default]
    #[serde(rename = "N/A")]
    NotApplicable,
    /// Any label outside the known set (e.g. from a foreign producer)
    #[serde(other)]
    Unrecognized,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Positive => "Positive",
            Severity::NotApplicable => "N/A",
            Severity::Unrecognized => "Unrecognized",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Behavioral pattern names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternKind {
    #[serde(rename = "Revenge Trading")]
    RevengeTrading,
    #[serde(rename = "Overtrading")]
    Overtrading,
    #[serde(rename = "FOMO Trading")]
    FomoTrading,
    #[serde(rename = "Ego Trading")]
    EgoTrading,
    #[serde(rename = "Impulsive Decisions")]
    ImpulsiveDecisions,
    #[serde(rename = "Calculated Risk")]
    CalculatedRisk,
    #[serde(rename = "Loss Aversion")]
    LossAversion,
    #[serde(rename = "Quick Profit Taking")]
    QuickProfitTaking,
    #[serde(rename = "Averaging Down")]
    AveragingDown,
    #[serde(rename = "Hesitation / Analysis Paralysis")]
    Hesitation,
    #[serde(rename = "No Activity")]
    NoActivity,
    #[serde(rename = "Disciplined")]
    Disciplined,
}

impl PatternKind {
    /// Display name (matches the serialized form)
    pub fn name(&self) -> &'static str {
        match self {
            PatternKind::RevengeTrading => "Revenge Trading",
            PatternKind::Overtrading => "Overtrading",
            PatternKind::FomoTrading => "FOMO Trading",
            PatternKind::EgoTrading => "Ego Trading",
            PatternKind::ImpulsiveDecisions => "Impulsive Decisions",
            PatternKind::CalculatedRisk => "Calculated Risk",
            PatternKind::LossAversion => "Loss Aversion",
            PatternKind::QuickProfitTaking => "Quick Profit Taking",
            PatternKind::AveragingDown => "Averaging Down",
            PatternKind::Hesitation => "Hesitation / Analysis Paralysis",
            PatternKind::NoActivity => "No Activity",
            PatternKind::Disciplined => "Disciplined",
        }
    }

    /// Patterns that force a stop regardless of score
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            PatternKind::RevengeTrading | PatternKind::EgoTrading | PatternKind::AveragingDown
        )
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A detected behavioral pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: PatternKind,
    #[serde(default)]
    pub severity: Severity,
    pub details: String,
}

impl Insight {
    pub fn new(kind: PatternKind, severity: Severity, details: impl Into<String>) -> Self {
        Self {
            kind,
            severity,
            details: details.into(),
        }
    }

    pub fn no_activity() -> Self {
        Self::new(
            PatternKind::NoActivity,
            Severity::NotApplicable,
            "No trades recorded in this session.",
        )
    }

    pub fn disciplined() -> Self {
        Self::new(
            PatternKind::Disciplined,
            Severity::NotApplicable,
            "No negative patterns detected. Good adherence to plan.",
        )
    }
}

/// Error types for loading sessions and configuration
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid session data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Batch task failed: {0}")]
    Task(String),
}

/// Result type for monitor operations
pub type Result<T> = std::result::Result<T, MonitorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_parsing() {
        let ts = Timestamp::parse("2026-02-07 09:00:00");
        assert!(ts.is_valid());
        assert_eq!(ts.as_str(), "2026-02-07 09:00:00");

        let rfc = Timestamp::parse("2026-02-07T09:05:00Z");
        assert_eq!(ts.minutes_until(&rfc), Some(5.0));

        let fractional = Timestamp::parse("2026-02-07T09:01:00.500Z");
        assert_eq!(ts.millis_until(&fractional), Some(60_500));

        let bad = Timestamp::parse("yesterday-ish");
        assert!(!bad.is_valid());
        assert_eq!(bad.millis_until(&ts), None);
        assert_eq!(ts.millis_until(&bad), None);
    }

    #[test]
    fn test_sort_puts_malformed_last() {
        let mk = |ts: &str, pnl: i64| {
            TradeEvent::new(
                Timestamp::parse(ts),
                "BTCUSD",
                TradeAction::Buy,
                Decimal::from(100),
                Decimal::from(pnl),
                TradeStatus::Closed,
            )
        };
        let events = vec![
            mk("garbage", 1),
            mk("2026-02-07 10:00:00", 2),
            mk("2026-02-07 09:00:00", 3),
        ];
        let sorted = sort_chronologically(&events);
        let pnls: Vec<Decimal> = sorted.iter().map(|e| e.pnl).collect();
        assert_eq!(pnls, vec![Decimal::from(3), Decimal::from(2), Decimal::from(1)]);
    }

    #[test]
    fn test_trade_event_json() {
        let json = r#"{
            "timestamp": "2026-02-07 09:00:00",
            "symbol": "BTCUSD",
            "action": "BUY",
            "price": 45000,
            "pnl": -100,
            "status": "CLOSED"
        }"#;
        let event: TradeEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.action, TradeAction::Buy);
        assert_eq!(event.status, TradeStatus::Closed);
        assert!(event.is_loss());
        assert!(!event.is_win());
    }

    #[test]
    fn test_insight_serialization() {
        let insight = Insight::disciplined();
        let value = serde_json::to_value(&insight).unwrap();
        assert_eq!(value["type"], "Disciplined");
        assert_eq!(value["severity"], "N/A");

        let parsed: Insight = serde_json::from_str(
            r#"{"type": "Overtrading", "severity": "Severe", "details": "x"}"#,
        )
        .unwrap();
        assert_eq!(parsed.severity, Severity::Unrecognized);
        assert_eq!(parsed.kind, PatternKind::Overtrading);

        let parsed: Insight =
            serde_json::from_str(r#"{"type": "Disciplined", "details": "x"}"#).unwrap();
        assert_eq!(parsed.severity, Severity::NotApplicable);
    }
}
