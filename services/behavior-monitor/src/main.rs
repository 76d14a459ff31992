//! Behavior Monitor - analyzes recorded trading sessions
//!
//! Usage: `behavior-monitor [--config FILE] <session.json>...`
//!
//! 1. Loads configuration (defaults, optional file, environment)
//! 2. Loads each session file
//! 3. Runs detection, scoring, readiness and prediction per session
//! 4. Prints the reports as JSON

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use behavior_monitor::{analyze_sessions, load_session, BehaviorMonitor, MonitorConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = MonitorConfig::load(args.config.as_deref())?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(config.logging.max_level())
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Behavior Monitor...");

    let mut sessions = Vec::with_capacity(args.sessions.len());
    let mut names = Vec::with_capacity(args.sessions.len());
    for path in &args.sessions {
        match load_session(path).await {
            Ok(session) => {
                sessions.push(session);
                names.push(path.display().to_string());
            }
            Err(e) => warn!("Skipping {}: {}", path.display(), e),
        }
    }

    if sessions.is_empty() {
        anyhow::bail!("no readable session files");
    }

    let monitor = Arc::new(BehaviorMonitor::from_config(&config));
    let reports = analyze_sessions(monitor, sessions, &config).await?;

    let output: Vec<serde_json::Value> = names
        .into_iter()
        .zip(reports)
        .map(|(session, report)| {
            if let Some(headline) = report.headline() {
                info!("{}: {} ({})", session, headline.kind, report.readiness.recommendation);
            }
            serde_json::json!({ "session": session, "report": report })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Behavior Monitor Command Line Interface
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Configuration file (TOML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Session files: a JSON array of trades or a session object
    #[arg(required = true)]
    sessions: Vec<PathBuf>,
}
