//! Session statistics for downstream narration

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Timestamp, TradeEvent};

/// Aggregate numbers for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub total_trades: usize,
    pub net_pnl: Decimal,
    pub wins: usize,
    pub losses: usize,
    /// Percent of trades that won, one decimal place
    pub win_rate: f64,
    /// Latest parseable trade time
    pub last_trade: Option<Timestamp>,
}

impl SessionSummary {
    pub fn from_events(events: &[TradeEvent]) -> Self {
        let total_trades = events.len();
        let wins = events.iter().filter(|e| e.is_win()).count();
        let losses = events.iter().filter(|e| e.is_loss()).count();
        let net_pnl = events.iter().map(|e| e.pnl).sum::<Decimal>();

        let win_rate = if total_trades == 0 {
            0.0
        } else {
            (wins as f64 / total_trades as f64 * 1000.0).round() / 10.0
        };

        let last_trade = events
            .iter()
            .filter(|e| e.timestamp.is_valid())
            .max_by(|a, b| a.timestamp.chronological_cmp(&b.timestamp))
            .map(|e| e.timestamp.clone());

        Self {
            total_trades,
            net_pnl,
            wins,
            losses,
            win_rate,
            last_trade,
        }
    }

    /// Break-even trades (neither win nor loss)
    pub fn flat(&self) -> usize {
        self.total_trades - self.wins - self.losses
    }
}
