//! Streak-based detectors
//!
//! Both detectors keep a single running counter that resets on any
//! opposite outcome.

use super::{DetectorGroup, PatternDetector};
use crate::types::{Insight, PatternKind, Severity, Timestamp, TradeEvent};
use rust_decimal::Decimal;
use tracing::debug;

/// Minimum consecutive losses for revenge trading
const REVENGE_MIN_LOSSES: usize = 3;
/// Max span (minutes) between first and last loss of the window
const REVENGE_WINDOW_MINUTES: f64 = 10.0;
/// Minimum win streak before a large loss counts as ego trading
const EGO_MIN_WIN_STREAK: u32 = 2;
/// Loss size (currency units) treated as oversized after a win streak
const EGO_LARGE_LOSS: i64 = -150;

/// Revenge Trading: 3+ consecutive losses within 10 minutes
pub struct RevengeTradingDetector;

impl PatternDetector for RevengeTradingDetector {
    fn kind(&self) -> PatternKind {
        PatternKind::RevengeTrading
    }

    fn group(&self) -> DetectorGroup {
        DetectorGroup::RevengeTrading
    }

    fn detect(&self, events: &[TradeEvent]) -> Option<Insight> {
        let mut consecutive_losses = 0usize;
        // Only well-formed timestamps are recorded; a malformed loss still
        // extends the streak.
        let mut loss_times: Vec<&Timestamp> = Vec::new();

        for event in events {
            if event.is_loss() {
                consecutive_losses += 1;
                if !event.timestamp.is_valid() {
                    continue;
                }
                loss_times.push(&event.timestamp);
            } else {
                consecutive_losses = 0;
                loss_times.clear();
            }

            if consecutive_losses >= REVENGE_MIN_LOSSES && loss_times.len() >= REVENGE_MIN_LOSSES {
                let first = loss_times[loss_times.len() - REVENGE_MIN_LOSSES];
                let last = loss_times[loss_times.len() - 1];
                let Some(span) = first.minutes_until(last) else {
                    continue;
                };
                if span <= REVENGE_WINDOW_MINUTES {
                    debug!(consecutive_losses, span, "revenge trading window found");
                    return Some(Insight::new(
                        PatternKind::RevengeTrading,
                        Severity::High,
                        format!(
                            "Detected {} consecutive losses within {} minutes. This indicates potential tilt or chasing.",
                            consecutive_losses,
                            span.trunc() as i64
                        ),
                    ));
                }
            }
        }
        None
    }
}

/// Ego Trading: oversized loss right after a win streak
pub struct EgoTradingDetector;

impl PatternDetector for EgoTradingDetector {
    fn kind(&self) -> PatternKind {
        PatternKind::EgoTrading
    }

    fn group(&self) -> DetectorGroup {
        DetectorGroup::EmotionalPatterns
    }

    fn detect(&self, events: &[TradeEvent]) -> Option<Insight> {
        let large_loss = Decimal::from(EGO_LARGE_LOSS);
        let mut win_streak = 0u32;

        for event in events {
            if event.is_win() {
                win_streak += 1;
                continue;
            }
            if win_streak >= EGO_MIN_WIN_STREAK && event.pnl < large_loss {
                debug!(win_streak, pnl = %event.pnl, "ego trading loss found");
                return Some(Insight::new(
                    PatternKind::EgoTrading,
                    Severity::High,
                    format!(
                        "After {} consecutive wins, took a large loss (${}). This suggests overconfidence and excessive risk-taking.",
                        win_streak,
                        event.pnl.abs()
                    ),
                ));
            }
            win_streak = 0;
        }
        None
    }
}
