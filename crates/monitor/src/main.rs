//! PawGuard monitoring binary.
//!
//! Reads newline-delimited JSON frame observations from stdin (the
//! upstream detector's output), runs the detection/training pipeline, and
//! dispatches notifications and alert actions.

use anyhow::Context;
use chrono::Utc;
use monitor::{spawn_dispatcher, FrameObservation, MonitorSession, SessionConfig};
use notify::{CompositeNotifier, ConsoleNotifier, DetectionLog, DetectionRecord, NotificationSink};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use training::{dispatch_all, TracingSink, TrainingMode};
use zones::ZoneSetConfig;

/// Command-line options (config file, zone file, mode override)
#[derive(Debug, Default)]
struct CliArgs {
    config: Option<PathBuf>,
    zones: Option<PathBuf>,
    mode: Option<TrainingMode>,
}

fn parse_args() -> anyhow::Result<CliArgs> {
    let mut args = CliArgs::default();
    let mut iter = std::env::args().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let value = iter.next().context("--config requires a path")?;
                args.config = Some(PathBuf::from(value));
            }
            "--zones" => {
                let value = iter.next().context("--zones requires a path")?;
                args.zones = Some(PathBuf::from(value));
            }
            "--mode" => {
                let value = iter.next().context("--mode requires a value")?;
                args.mode = Some(value.parse().map_err(anyhow::Error::msg)?);
            }
            other => anyhow::bail!("unknown argument '{other}'"),
        }
    }
    Ok(args)
}

/// Initialize logging
fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    info!("=== PawGuard v{} ===", env!("CARGO_PKG_VERSION"));

    let args = parse_args()?;

    let mut config = SessionConfig::load(args.config.as_deref())
        .context("failed to load session configuration")?;
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    info!("Training mode: {:?}", config.mode);

    // A configured-but-unloadable zone file must abort startup.
    let zone_path = args
        .zones
        .or_else(|| config.zone_config.clone().map(PathBuf::from));
    let zone_set = match zone_path {
        Some(path) => ZoneSetConfig::load(&path)
            .with_context(|| format!("failed to load zones from {}", path.display()))?,
        None => ZoneSetConfig {
            zones: Vec::new(),
            camera_index: Default::default(),
        },
    };

    let mut notifier = CompositeNotifier::new();
    notifier.push(Box::new(ConsoleNotifier));
    notifier.push(Box::new(DetectionLog::new(&config.detection_log)));

    let (alert_sink, dispatcher) = spawn_dispatcher(Arc::new(TracingSink));

    let mut session = MonitorSession::new(config, zone_set)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    info!("Reading frame observations from stdin (NDJSON); ctrl-c to stop");

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                info!("Stop requested");
                break;
            }
        };
        let Some(line) = line else {
            info!("Observation stream ended");
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        // A malformed line is a missed frame, not a crash: treat it as an
        // empty observation so counters reset the same way an absent
        // detection would.
        let observation = match serde_json::from_str::<FrameObservation>(&line) {
            Ok(observation) => observation,
            Err(e) => {
                warn!("dropping malformed observation: {}", e);
                FrameObservation::Empty
            }
        };

        let outcome = session.process(&observation, Instant::now());

        for detection in &outcome.detections {
            let record =
                DetectionRecord::from_event(&detection.event, Utc::now(), detection.zone.clone());
            if let Err(e) = notifier.notify(&outcome.frame, &record) {
                warn!("notification failed: {}", e);
            }
        }

        dispatch_all(&alert_sink, &outcome.actions);
    }

    let stats = session.stats();
    info!(
        "Session complete: {} frames, {} detections, {} alerts",
        stats.frames_processed, stats.detections_confirmed, stats.alerts_fired
    );

    drop(alert_sink);
    dispatcher.await.ok();

    Ok(())
}
