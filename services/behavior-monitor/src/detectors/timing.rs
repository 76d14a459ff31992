//! Timing-based detectors
//!
//! These compare gaps between adjacent trades. A pair with a malformed
//! timestamp on either side is skipped.

use super::{DetectorGroup, PatternDetector};
use crate::types::{Insight, PatternKind, Severity, TradeEvent};
use tracing::debug;

/// Re-entry window after a win (minutes)
const FOMO_REENTRY_MINUTES: f64 = 5.0;
/// Gap (milliseconds) at or under which a trade counts as rapid
const IMPULSIVE_GAP_MILLIS: i64 = 60_000;
/// Rapid pairs needed to flag impulsive behavior
const IMPULSIVE_MIN_PAIRS: usize = 3;
/// Gap (minutes) above which a pause counts as hesitation
const HESITATION_GAP_MINUTES: f64 = 60.0;
/// Sessions must be larger than this for hesitation
const HESITATION_MIN_TRADES: usize = 3;

/// FOMO Trading: rapid re-entry on the same asset after a win
pub struct FomoTradingDetector;

impl PatternDetector for FomoTradingDetector {
    fn kind(&self) -> PatternKind {
        PatternKind::FomoTrading
    }

    fn group(&self) -> DetectorGroup {
        DetectorGroup::EmotionalPatterns
    }

    fn detect(&self, events: &[TradeEvent]) -> Option<Insight> {
        for pair in events.windows(2) {
            let (win, next) = (&pair[0], &pair[1]);
            if !win.is_win() || win.symbol != next.symbol {
                continue;
            }
            let Some(gap) = win.timestamp.minutes_until(&next.timestamp) else {
                continue;
            };
            if gap <= FOMO_REENTRY_MINUTES {
                debug!(symbol = %win.symbol, gap, "fomo re-entry found");
                return Some(Insight::new(
                    PatternKind::FomoTrading,
                    Severity::Medium,
                    "Detected rapid re-entry on same asset after a win. This suggests Fear Of Missing Out (FOMO) rather than strategic planning.",
                ));
            }
        }
        None
    }
}

/// Impulsive Decisions: several trades placed within a minute of the previous one
pub struct ImpulsiveDecisionDetector;

impl PatternDetector for ImpulsiveDecisionDetector {
    fn kind(&self) -> PatternKind {
        PatternKind::ImpulsiveDecisions
    }

    fn group(&self) -> DetectorGroup {
        DetectorGroup::EmotionalPatterns
    }

    fn detect(&self, events: &[TradeEvent]) -> Option<Insight> {
        // Each adjacent pair counts on its own, not as one continuous run
        let rapid_pairs = events
            .windows(2)
            .filter_map(|pair| pair[0].timestamp.millis_until(&pair[1].timestamp))
            .filter(|gap| *gap <= IMPULSIVE_GAP_MILLIS)
            .count();

        if rapid_pairs < IMPULSIVE_MIN_PAIRS {
            return None;
        }

        Some(Insight::new(
            PatternKind::ImpulsiveDecisions,
            Severity::Medium,
            format!(
                "Detected {} trades executed within 60 seconds of each other. Suggests insufficient analysis and impulsive behavior.",
                rapid_pairs
            ),
        ))
    }
}

/// Hesitation: a large share of gaps between trades exceed an hour
pub struct HesitationDetector;

impl PatternDetector for HesitationDetector {
    fn kind(&self) -> PatternKind {
        PatternKind::Hesitation
    }

    fn group(&self) -> DetectorGroup {
        DetectorGroup::EmotionalPatterns
    }

    fn detect(&self, events: &[TradeEvent]) -> Option<Insight> {
        if events.len() <= HESITATION_MIN_TRADES {
            return None;
        }

        let large_gaps = events
            .windows(2)
            .filter_map(|pair| pair[0].timestamp.minutes_until(&pair[1].timestamp))
            .filter(|gap| *gap > HESITATION_GAP_MINUTES)
            .count();
        let pairs = events.len() - 1;

        // large_gaps / pairs >= 30%, kept in integers
        if large_gaps * 10 < pairs * 3 {
            return None;
        }

        Some(Insight::new(
            PatternKind::Hesitation,
            Severity::Medium,
            format!(
                "Detected {} large time gaps (>60 min) between trades. This suggests fear or overthinking, causing missed opportunities.",
                large_gaps
            ),
        ))
    }
}
