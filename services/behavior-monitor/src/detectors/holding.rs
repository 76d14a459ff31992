//! Holding-duration detectors
//!
//! Holding time is measured from an OPEN event to the next event when that
//! next event is on the same symbol. CLOSED predecessors are not measured.

use super::{DetectorGroup, PatternDetector};
use crate::types::{Insight, PatternKind, Severity, TradeEvent, TradeStatus};

/// Losers held longer than this multiple of winners => loss aversion
const LOSS_AVERSION_RATIO: f64 = 2.0;
/// Losers held longer than this multiple of winners => quick profit taking
const QUICK_PROFIT_RATIO: f64 = 3.0;
/// Winners closed under this many minutes on average
const QUICK_PROFIT_MAX_WIN_MINUTES: f64 = 3.0;

/// Average holding minutes before wins and before losses
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoldingProfile {
    pub avg_win_minutes: f64,
    pub avg_loss_minutes: f64,
}

impl HoldingProfile {
    /// Both averages need at least one sample
    pub fn from_events(events: &[TradeEvent]) -> Option<Self> {
        let mut win_minutes = Vec::new();
        let mut loss_minutes = Vec::new();

        for pair in events.windows(2) {
            let (open, next) = (&pair[0], &pair[1]);
            if open.status != TradeStatus::Open || open.symbol != next.symbol {
                continue;
            }
            let Some(held) = open.timestamp.minutes_until(&next.timestamp) else {
                continue;
            };
            if next.is_loss() {
                loss_minutes.push(held);
            } else if next.is_win() {
                win_minutes.push(held);
            }
        }

        Some(Self {
            avg_win_minutes: mean(&win_minutes)?,
            avg_loss_minutes: mean(&loss_minutes)?,
        })
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Loss Aversion: losers held much longer than winners
pub struct LossAversionDetector;

impl PatternDetector for LossAversionDetector {
    fn kind(&self) -> PatternKind {
        PatternKind::LossAversion
    }

    fn group(&self) -> DetectorGroup {
        DetectorGroup::EmotionalPatterns
    }

    fn detect(&self, events: &[TradeEvent]) -> Option<Insight> {
        let profile = HoldingProfile::from_events(events)?;
        if profile.avg_loss_minutes <= profile.avg_win_minutes * LOSS_AVERSION_RATIO {
            return None;
        }
        Some(Insight::new(
            PatternKind::LossAversion,
            Severity::High,
            format!(
                "Losing trades held {:.1} min on average vs {:.1} min for winners. This suggests holding onto losers hoping they'll recover.",
                profile.avg_loss_minutes, profile.avg_win_minutes
            ),
        ))
    }
}

/// Quick Profit Taking: winners closed fast while losers run
pub struct QuickProfitTakingDetector;

impl PatternDetector for QuickProfitTakingDetector {
    fn kind(&self) -> PatternKind {
        PatternKind::QuickProfitTaking
    }

    fn group(&self) -> DetectorGroup {
        DetectorGroup::EmotionalPatterns
    }

    fn detect(&self, events: &[TradeEvent]) -> Option<Insight> {
        let profile = HoldingProfile::from_events(events)?;
        if profile.avg_win_minutes >= QUICK_PROFIT_MAX_WIN_MINUTES
            || profile.avg_loss_minutes <= profile.avg_win_minutes * QUICK_PROFIT_RATIO
        {
            return None;
        }
        Some(Insight::new(
            PatternKind::QuickProfitTaking,
            Severity::Medium,
            format!(
                "Winning trades closed in {:.1} min vs {:.1} min for losers. Cutting profits too early limits upside potential.",
                profile.avg_win_minutes, profile.avg_loss_minutes
            ),
        ))
    }
}
