//! Session file loading
//!
//! A session file is either a bare JSON array of trades or an object with
//! `trades` plus optional `historical_risk_score` and `tendencies`.

use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::report::SessionInput;
use crate::types::{Result, TradeEvent};

#[derive(Deserialize)]
#[serde(untagged)]
enum SessionFile {
    Trades(Vec<TradeEvent>),
    Session(SessionInput),
}

/// Parse session JSON from memory
pub fn parse_session(json: &str) -> Result<SessionInput> {
    let input = match serde_json::from_str::<SessionFile>(json)? {
        SessionFile::Trades(trades) => SessionInput::from(trades),
        SessionFile::Session(input) => input,
    };
    let malformed = input
        .trades
        .iter()
        .filter(|t| !t.timestamp.is_valid())
        .count();
    if malformed > 0 {
        debug!(malformed, "kept trades with unparseable timestamps");
    }
    Ok(input)
}

/// Read and parse a session file
pub async fn load_session(path: impl AsRef<Path>) -> Result<SessionInput> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path).await?;
    let input = parse_session(&contents)?;
    debug!(path = %path.display(), trades = input.trades.len(), "session loaded");
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MonitorError;

    #[test]
    fn test_parse_bare_array() {
        let input = parse_session(
            r#"[
                {"timestamp": "2026-02-07 09:00:00", "symbol": "BTCUSD", "action": "BUY",
                 "price": 45000, "pnl": -100, "status": "CLOSED"},
                {"timestamp": "not a time", "symbol": "BTCUSD", "action": "SELL",
                 "price": "45010.5", "pnl": 12.5, "status": "OPEN"}
            ]"#,
        )
        .unwrap();
        assert_eq!(input.trades.len(), 2);
        assert!(!input.trades[1].timestamp.is_valid());
        assert!(input.tendencies.is_none());
    }

    #[test]
    fn test_parse_session_object() {
        let input = parse_session(
            r#"{
                "trades": [],
                "historical_risk_score": 35,
                "tendencies": {"fomo_tendency": 0.6}
            }"#,
        )
        .unwrap();
        assert!(input.trades.is_empty());
        assert_eq!(input.historical_risk_score, Some(35));
        let tendencies = input.tendencies.unwrap();
        assert_eq!(tendencies.fomo(), 0.6);
        assert_eq!(tendencies.revenge_trading, None);
    }

    #[test]
    fn test_parse_rejects_bad_shape() {
        let err = parse_session(r#"{"trades": "nope"}"#).unwrap_err();
        assert!(matches!(err, MonitorError::Json(_)));
    }
}
