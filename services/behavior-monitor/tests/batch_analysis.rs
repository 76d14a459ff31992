//! Batch pipeline tests: session files in, ordered reports out

use std::io::Write;
use std::sync::Arc;

use behavior_monitor::{
    analyze_sessions, load_session, BehaviorMonitor, DetectorToggles, MonitorConfig,
    MonitorError, PatternKind, Recommendation, RiskLevel, SessionInput,
};
use tempfile::NamedTempFile;

const REVENGE_SESSION: &str = r#"[
    {"timestamp": "2026-02-07 09:00:00", "symbol": "BTCUSD", "action": "BUY", "price": 45000, "pnl": -150, "status": "CLOSED"},
    {"timestamp": "2026-02-07 09:05:00", "symbol": "BTCUSD", "action": "SELL", "price": 44800, "pnl": -90, "status": "CLOSED"},
    {"timestamp": "2026-02-07 09:08:00", "symbol": "BTCUSD", "action": "SELL", "price": 44700, "pnl": -60, "status": "CLOSED"},
    {"timestamp": "2026-02-07 10:00:00", "symbol": "EURUSD", "action": "BUY", "price": 1.08, "pnl": 40, "status": "CLOSED"}
]"#;

const CALM_SESSION: &str = r#"{
    "trades": [
        {"timestamp": "2026-02-07 09:00:00", "symbol": "ETHUSD", "action": "BUY", "price": 2500, "pnl": 35, "status": "CLOSED"},
        {"timestamp": "2026-02-07 09:40:00", "symbol": "SOLUSD", "action": "BUY", "price": 150, "pnl": -10, "status": "CLOSED"},
        {"timestamp": "2026-02-07 10:20:00", "symbol": "ETHUSD", "action": "SELL", "price": 2510, "pnl": 20, "status": "CLOSED"}
    ],
    "historical_risk_score": 40
}"#;

fn session_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn test_load_and_analyze_files() {
    let revenge = session_file(REVENGE_SESSION);
    let calm = session_file(CALM_SESSION);

    let sessions = vec![
        load_session(revenge.path()).await.unwrap(),
        load_session(calm.path()).await.unwrap(),
    ];

    let config = MonitorConfig::default();
    let monitor = Arc::new(BehaviorMonitor::from_config(&config));
    let reports = analyze_sessions(monitor, sessions, &config).await.unwrap();
    assert_eq!(reports.len(), 2);

    let first = &reports[0];
    assert_eq!(first.headline().unwrap().kind, PatternKind::RevengeTrading);
    assert!(!first.readiness.ready);
    assert_eq!(first.readiness.recommendation, Recommendation::StopTrading);
    assert!(first.trend.is_none());

    let second = &reports[1];
    assert_eq!(second.headline().unwrap().kind, PatternKind::CalculatedRisk);
    assert_eq!(second.risk_score, 0);
    assert_eq!(second.readiness.recommendation, Recommendation::ContinueTrading);
    assert_eq!(second.trend.map(|t| t.delta), Some(-40));
    assert_eq!(second.forecast.risk_level, RiskLevel::Low);
}

#[tokio::test]
async fn test_bounded_batch_keeps_input_order() {
    let calm = load_session(session_file(CALM_SESSION).path()).await.unwrap();
    let sessions: Vec<SessionInput> = (0..12)
        .map(|i| {
            if i % 3 == 0 {
                SessionInput::default()
            } else {
                calm.clone()
            }
        })
        .collect();

    let mut config = MonitorConfig::default();
    config.batch.max_concurrent_sessions = 2;
    let monitor = Arc::new(BehaviorMonitor::from_config(&config));
    let reports = analyze_sessions(monitor, sessions, &config).await.unwrap();

    assert_eq!(reports.len(), 12);
    for (i, report) in reports.iter().enumerate() {
        let expected = if i % 3 == 0 {
            PatternKind::NoActivity
        } else {
            PatternKind::CalculatedRisk
        };
        assert_eq!(report.insights[0].kind, expected, "session {}", i);
    }
}

#[tokio::test]
async fn test_disabled_detectors_from_config() {
    let mut config = MonitorConfig::default();
    config.detectors = DetectorToggles {
        revenge_trading: false,
        overtrading: true,
        emotional_patterns: false,
    };
    let session = load_session(session_file(REVENGE_SESSION).path()).await.unwrap();
    let monitor = Arc::new(BehaviorMonitor::from_config(&config));
    let reports = analyze_sessions(monitor, vec![session], &config).await.unwrap();

    assert_eq!(reports[0].insights.len(), 1);
    assert_eq!(reports[0].insights[0].kind, PatternKind::Disciplined);
}

#[tokio::test]
async fn test_missing_and_invalid_files() {
    let err = load_session("/nonexistent/session.json").await.unwrap_err();
    assert!(matches!(err, MonitorError::Io(_)));

    let broken = session_file("{ not json");
    let err = load_session(broken.path()).await.unwrap_err();
    assert!(matches!(err, MonitorError::Json(_)));
}

#[tokio::test]
async fn test_empty_tendency_table_uses_defaults() {
    let file = session_file(
        r#"{
        "trades": [
            {"timestamp": "2026-02-07 09:00:00", "symbol": "BTCUSD", "action": "SELL", "price": 45000, "pnl": -20, "status": "CLOSED"},
            {"timestamp": "2026-02-07 09:30:00", "symbol": "ETHUSD", "action": "SELL", "price": 2500, "pnl": -15, "status": "CLOSED"},
            {"timestamp": "2026-02-07 10:15:00", "symbol": "SOLUSD", "action": "SELL", "price": 150, "pnl": -5, "status": "CLOSED"}
        ],
        "tendencies": {}
    }"#,
    );
    let session = load_session(file.path()).await.unwrap();
    assert!(session.tendencies.map(|t| t.is_empty()).unwrap_or(false));

    let config = MonitorConfig::default();
    let monitor = Arc::new(BehaviorMonitor::from_config(&config));
    let reports = analyze_sessions(monitor, vec![session], &config).await.unwrap();

    let forecast = &reports[0].forecast;
    assert_eq!(forecast.pattern_names(), vec!["Revenge Trading"]);
    assert_eq!(forecast.confidence, 0.75);
    assert_eq!(forecast.risk_level, RiskLevel::High);
}
