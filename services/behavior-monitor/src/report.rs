//! Session reports and batch analysis
//!
//! A [`SessionReport`] is the structured hand-off to the narration layer:
//! insights, score, readiness, summary, next-trade forecast and (when a
//! historical score is known) the risk trend.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, info};

use crate::analyzer::BehaviorMonitor;
use crate::config::MonitorConfig;
use crate::predict::{predict_with_defaults, RiskForecast, StreakState, TendencyPriors};
use crate::readiness::{assess_readiness, Readiness};
use crate::scoring::{risk_score, RiskTrend};
use crate::summary::SessionSummary;
use crate::types::{Insight, MonitorError, PatternKind, Result, TradeEvent};

/// One session to analyze, plus optional trader history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionInput {
    pub trades: Vec<TradeEvent>,
    /// Trader's average risk score from earlier sessions
    #[serde(default)]
    pub historical_risk_score: Option<u8>,
    /// Trader-specific priors; config defaults apply when absent
    #[serde(default)]
    pub tendencies: Option<TendencyPriors>,
    /// End of the "last hour" window; defaults to the last trade
    #[serde(default)]
    pub as_of: Option<NaiveDateTime>,
}

impl From<Vec<TradeEvent>> for SessionInput {
    fn from(trades: Vec<TradeEvent>) -> Self {
        Self {
            trades,
            ..Default::default()
        }
    }
}

/// Full analysis of one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub insights: Vec<Insight>,
    pub risk_score: u8,
    pub readiness: Readiness,
    pub summary: SessionSummary,
    pub forecast: RiskForecast,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<RiskTrend>,
}

impl SessionReport {
    /// Run the whole pipeline for one session
    pub fn build(
        monitor: &BehaviorMonitor,
        input: &SessionInput,
        default_tendencies: &TendencyPriors,
    ) -> Self {
        let insights = monitor.analyze(&input.trades);
        let risk_score = risk_score(&insights);
        let kinds: Vec<PatternKind> = insights.iter().map(|i| i.kind).collect();
        let readiness = assess_readiness(risk_score, &kinds);

        let streak = match input.as_of {
            Some(as_of) => StreakState::from_session_at(&input.trades, as_of),
            None => StreakState::from_session(&input.trades),
        };
        let forecast = predict_with_defaults(&streak, input.tendencies.as_ref(), default_tendencies);

        let trend = input
            .historical_risk_score
            .map(|historical| RiskTrend::compare(risk_score, historical));

        debug!(
            risk_score,
            recommendation = %readiness.recommendation,
            forecast = %forecast.risk_level,
            "report built"
        );

        Self {
            insights,
            risk_score,
            readiness,
            summary: SessionSummary::from_events(&input.trades),
            forecast,
            trend,
        }
    }

    /// Leading verdict: the first insight in registry order
    pub fn headline(&self) -> Option<&Insight> {
        self.insights.first()
    }
}

/// Analyze many sessions concurrently; reports come back in input order.
///
/// Each session runs on the blocking pool. `batch.max_concurrent_sessions`
/// bounds how many run at once (0 = no bound).
pub async fn analyze_sessions(
    monitor: Arc<BehaviorMonitor>,
    sessions: Vec<SessionInput>,
    config: &MonitorConfig,
) -> Result<Vec<SessionReport>> {
    let limit = config
        .batch
        .max_concurrent_sessions
        .min(Semaphore::MAX_PERMITS);
    let semaphore = (limit > 0).then(|| Arc::new(Semaphore::new(limit)));
    let defaults = config.prediction.default_tendencies;

    info!(sessions = sessions.len(), limit, "starting batch analysis");

    let mut handles = Vec::with_capacity(sessions.len());
    for input in sessions {
        let monitor = Arc::clone(&monitor);
        let semaphore = semaphore.clone();

        handles.push(tokio::spawn(async move {
            let _permit = match semaphore {
                Some(semaphore) => Some(
                    semaphore
                        .acquire_owned()
                        .await
                        .map_err(|e| MonitorError::Task(e.to_string()))?,
                ),
                None => None,
            };

            let report = tokio::task::spawn_blocking(move || {
                SessionReport::build(&monitor, &input, &defaults)
            })
            .await
            .map_err(|e| MonitorError::Task(e.to_string()))?;

            Ok::<SessionReport, MonitorError>(report)
        }));
    }

    let mut reports = Vec::with_capacity(handles.len());
    for handle in handles {
        let report = handle
            .await
            .map_err(|e| MonitorError::Task(e.to_string()))??;
        reports.push(report);
    }

    info!(reports = reports.len(), "batch analysis complete");
    Ok(reports)
}
