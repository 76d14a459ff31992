//! Session Analyzer - runs the detector registry over one session

use tracing::{debug, info};

use crate::config::{DetectorToggles, MonitorConfig};
use crate::detectors::{DetectorFactory, PatternDetector};
use crate::types::{sort_chronologically, Insight, TradeEvent};

/// Behavioral analysis engine
///
/// Holds only the detector list built from the toggles; analysis itself
/// keeps no state between calls.
pub struct BehaviorMonitor {
    toggles: DetectorToggles,
    detectors: Vec<Box<dyn PatternDetector>>,
}

impl BehaviorMonitor {
    pub fn new(toggles: DetectorToggles) -> Self {
        Self {
            toggles,
            detectors: DetectorFactory::create(&toggles),
        }
    }

    pub fn from_config(config: &MonitorConfig) -> Self {
        Self::new(config.detectors)
    }

    pub fn toggles(&self) -> DetectorToggles {
        self.toggles
    }

    /// Analyze a session, returning insights in registry order.
    ///
    /// Never empty: an empty session yields "No Activity", a clean one
    /// yields "Disciplined".
    pub fn analyze(&self, events: &[TradeEvent]) -> Vec<Insight> {
        if events.is_empty() {
            debug!("empty session");
            return vec![Insight::no_activity()];
        }

        let sorted = sort_chronologically(events);
        let malformed = sorted.iter().filter(|e| !e.timestamp.is_valid()).count();
        if malformed > 0 {
            debug!(malformed, "session has unparseable timestamps");
        }

        let mut insights: Vec<Insight> = self
            .detectors
            .iter()
            .filter_map(|detector| {
                let found = detector.detect(&sorted);
                if found.is_some() {
                    debug!(pattern = %detector.kind(), "detector fired");
                }
                found
            })
            .collect();

        if insights.is_empty() {
            insights.push(Insight::disciplined());
        }

        info!(
            trades = sorted.len(),
            insights = insights.len(),
            "session analyzed"
        );
        insights
    }
}

impl Default for BehaviorMonitor {
    fn default() -> Self {
        Self::new(DetectorToggles::default())
    }
}
