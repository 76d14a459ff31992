//! Session-level detectors: volume, discipline and position building

use super::{DetectorGroup, PatternDetector};
use crate::types::{Insight, PatternKind, Severity, TradeAction, TradeEvent};
use rust_decimal::Decimal;

/// Trades per session above which overtrading is flagged
const OVERTRADING_MAX_TRADES: usize = 10;
/// Minimum session size for the calculated-risk assessment
const CALCULATED_RISK_MIN_TRADES: usize = 3;
/// Minimum win rate (percent)
const CALCULATED_RISK_MIN_WIN_RATE: usize = 40;
/// Worst single loss tolerated (currency units)
const CALCULATED_RISK_MAX_LOSS: i64 = -200;

/// Overtrading: too many trades in one session
pub struct OvertradingDetector;

impl PatternDetector for OvertradingDetector {
    fn kind(&self) -> PatternKind {
        PatternKind::Overtrading
    }

    fn group(&self) -> DetectorGroup {
        DetectorGroup::Overtrading
    }

    fn detect(&self, events: &[TradeEvent]) -> Option<Insight> {
        if events.len() <= OVERTRADING_MAX_TRADES {
            return None;
        }
        Some(Insight::new(
            PatternKind::Overtrading,
            Severity::Medium,
            format!(
                "High trade count ({}) for a single session. Ensure quality over quantity.",
                events.len()
            ),
        ))
    }
}

/// Calculated Risk: decent win rate with capped losses (positive pattern)
pub struct CalculatedRiskDetector;

impl PatternDetector for CalculatedRiskDetector {
    fn kind(&self) -> PatternKind {
        PatternKind::CalculatedRisk
    }

    fn group(&self) -> DetectorGroup {
        DetectorGroup::EmotionalPatterns
    }

    fn detect(&self, events: &[TradeEvent]) -> Option<Insight> {
        let total = events.len();
        if total < CALCULATED_RISK_MIN_TRADES {
            return None;
        }

        let wins = events.iter().filter(|e| e.is_win()).count();
        let worst_loss = events
            .iter()
            .filter(|e| e.is_loss())
            .map(|e| e.pnl)
            .min()
            .unwrap_or(Decimal::ZERO);

        if wins * 100 < CALCULATED_RISK_MIN_WIN_RATE * total
            || worst_loss < Decimal::from(CALCULATED_RISK_MAX_LOSS)
        {
            return None;
        }

        let win_rate = wins as f64 / total as f64 * 100.0;
        Some(Insight::new(
            PatternKind::CalculatedRisk,
            Severity::Positive,
            format!(
                "Win rate of {:.1}% with controlled losses. This indicates disciplined risk management and calculated decision-making.",
                win_rate
            ),
        ))
    }
}

/// Averaging Down: loss, then same-symbol BUY, then another loss
pub struct AveragingDownDetector;

impl PatternDetector for AveragingDownDetector {
    fn kind(&self) -> PatternKind {
        PatternKind::AveragingDown
    }

    fn group(&self) -> DetectorGroup {
        DetectorGroup::EmotionalPatterns
    }

    fn detect(&self, events: &[TradeEvent]) -> Option<Insight> {
        events.windows(3).find_map(|window| {
            let (losing, add, follow) = (&window[0], &window[1], &window[2]);
            let averaged = losing.is_loss()
                && add.symbol == losing.symbol
                && add.action == TradeAction::Buy
                && follow.is_loss();
            averaged.then(|| {
                Insight::new(
                    PatternKind::AveragingDown,
                    Severity::High,
                    format!(
                        "Multiple entries on {} while in losing position. Averaging down increases risk instead of cutting losses.",
                        losing.symbol
                    ),
                )
            })
        })
    }
}
