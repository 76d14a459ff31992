//! Behavior Monitor Library
//!
//! Detects emotional trading patterns in a session of trades, scores the
//! session, and decides whether the trader should keep going.

pub mod alerts;
pub mod analyzer;
pub mod config;
pub mod detectors;
pub mod ingest;
pub mod predict;
pub mod readiness;
pub mod report;
pub mod scoring;
pub mod summary;
pub mod types;


// Re-export main types for convenience
pub use alerts::{format_alert, MarketContext, Sentiment, Volatility};
pub use analyzer::BehaviorMonitor;
pub use config::{BatchConfig, DetectorToggles, LoggingConfig, MonitorConfig, PredictionConfig};
pub use detectors::{DetectorFactory, DetectorGroup, PatternDetector};
pub use ingest::{load_session, parse_session};
pub use predict::{
    predict_next_risk, predict_with_defaults, PredictedPattern, RiskForecast, RiskLevel,
    StreakState, TendencyPriors,
};
pub use readiness::{assess_readiness, Readiness, Recommendation};
pub use report::{analyze_sessions, SessionInput, SessionReport};
pub use scoring::{risk_score, RiskTrend, TrendDirection};
pub use summary::SessionSummary;
pub use types::{
    Insight, MonitorError, PatternKind, Result, Severity, Timestamp, TradeAction, TradeEvent,
    TradeStatus,
};
