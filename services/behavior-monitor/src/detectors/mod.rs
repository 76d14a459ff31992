//! Pattern Detectors - Behavioral pattern recognition
//!
//! Each detector scans a chronologically sorted session and returns at most
//! one insight. Detectors are pure: they never mutate the session and never
//! look at each other's output, so they can run in any order (or in
//! parallel) as long as results are re-joined in registry order.

use crate::config::DetectorToggles;
use crate::types::{Insight, PatternKind, TradeEvent};

pub mod holding;
pub mod session;
pub mod streak;
pub mod timing;

pub use holding::{LossAversionDetector, QuickProfitTakingDetector};
pub use session::{AveragingDownDetector, CalculatedRiskDetector, OvertradingDetector};
pub use streak::{EgoTradingDetector, RevengeTradingDetector};
pub use timing::{FomoTradingDetector, HesitationDetector, ImpulsiveDecisionDetector};

/// Core detector trait - all behavioral patterns implement this
pub trait PatternDetector: Send + Sync {
    /// Pattern this detector recognizes
    fn kind(&self) -> PatternKind;

    /// Toggle group this detector belongs to
    fn group(&self) -> DetectorGroup;

    /// Scan a chronologically sorted session; first qualifying window wins
    fn detect(&self, events: &[TradeEvent]) -> Option<Insight>;
}

/// Detector families that can be switched on/off independently
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorGroup {
    RevengeTrading,
    Overtrading,
    EmotionalPatterns,
}

impl DetectorToggles {
    pub fn is_enabled(&self, group: DetectorGroup) -> bool {
        match group {
            DetectorGroup::RevengeTrading => self.revenge_trading,
            DetectorGroup::Overtrading => self.overtrading,
            DetectorGroup::EmotionalPatterns => self.emotional_patterns,
        }
    }
}

/// Factory for the fixed-order detector registry
pub struct DetectorFactory;

impl DetectorFactory {
    /// Every detector, in output order
    pub fn all() -> Vec<Box<dyn PatternDetector>> {
        vec![
            Box::new(RevengeTradingDetector),
            Box::new(OvertradingDetector),
            Box::new(FomoTradingDetector),
            Box::new(EgoTradingDetector),
            Box::new(ImpulsiveDecisionDetector),
            Box::new(CalculatedRiskDetector),
            Box::new(LossAversionDetector),
            Box::new(QuickProfitTakingDetector),
            Box::new(AveragingDownDetector),
            Box::new(HesitationDetector),
        ]
    }

    /// Detectors whose group is enabled, still in output order
    pub fn create(toggles: &DetectorToggles) -> Vec<Box<dyn PatternDetector>> {
        Self::all()
            .into_iter()
            .filter(|d| toggles.is_enabled(d.group()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_order() {
        let kinds: Vec<PatternKind> = DetectorFactory::all().iter().map(|d| d.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                PatternKind::RevengeTrading,
                PatternKind::Overtrading,
                PatternKind::FomoTrading,
                PatternKind::EgoTrading,
                PatternKind::ImpulsiveDecisions,
                PatternKind::CalculatedRisk,
                PatternKind::LossAversion,
                PatternKind::QuickProfitTaking,
                PatternKind::AveragingDown,
                PatternKind::Hesitation,
            ]
        );
    }

    #[test]
    fn test_toggles_filter_groups_independently() {
        let toggles = DetectorToggles {
            revenge_trading: false,
            overtrading: true,
            emotional_patterns: false,
        };
        let kinds: Vec<PatternKind> = DetectorFactory::create(&toggles)
            .iter()
            .map(|d| d.kind())
            .collect();
        assert_eq!(kinds, vec![PatternKind::Overtrading]);

        let toggles = DetectorToggles {
            revenge_trading: true,
            overtrading: false,
            emotional_patterns: true,
        };
        let detectors = DetectorFactory::create(&toggles);
        assert_eq!(detectors.len(), 9);
        assert_eq!(detectors[0].kind(), PatternKind::RevengeTrading);
        assert!(detectors.iter().all(|d| d.kind() != PatternKind::Overtrading));
    }
}

/// Shared helpers for detector tests
#[cfg(test)]
pub(crate) mod fixtures {
    use crate::types::{Timestamp, TradeAction, TradeEvent, TradeStatus};
    use rust_decimal::Decimal;

    /// Closed BUY on `symbol` at `2026-02-07 <time>`
    pub fn trade(time: &str, symbol: &str, pnl: i64) -> TradeEvent {
        trade_at(&format!("2026-02-07 {}", time), symbol, pnl)
    }

    /// Closed BUY with the raw provider timestamp as given
    pub fn trade_at(raw: &str, symbol: &str, pnl: i64) -> TradeEvent {
        TradeEvent::new(
            Timestamp::parse(raw),
            symbol,
            TradeAction::Buy,
            Decimal::from(100),
            Decimal::from(pnl),
            TradeStatus::Closed,
        )
    }

    /// Closed BUY whose timestamp cannot be parsed
    pub fn garbled(symbol: &str, pnl: i64) -> TradeEvent {
        trade_at("sometime after lunch", symbol, pnl)
    }

    pub fn open_trade(time: &str, symbol: &str, pnl: i64) -> TradeEvent {
        TradeEvent {
            status: TradeStatus::Open,
            ..trade(time, symbol, pnl)
        }
    }

    pub fn sell(time: &str, symbol: &str, pnl: i64) -> TradeEvent {
        TradeEvent {
            action: TradeAction::Sell,
            ..trade(time, symbol, pnl)
        }
    }
}
