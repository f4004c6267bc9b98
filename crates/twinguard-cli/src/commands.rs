//! Command execution.
//!
//! Every command resolves one [`DetectorConfig`] (file, then flags), builds a
//! [`Detector`] from it and prints a [`ScanReport`]. Only configuration and
//! output problems are errors here; scan and model failures arrive as report
//! diagnostics.

use anyhow::{Context, Result};
use tracing::debug;
use twinguard_classify::{Detector, DetectorConfig, ScanReport};
use twinguard_wifiscan::ScanPlatform;

use crate::output;
use crate::{BatchArgs, CheckArgs, Cli, Commands, ScanArgs};

/// Execute a parsed command line.
pub async fn execute(cli: Cli) -> Result<()> {
    if let Commands::Version = cli.command {
        println!("twinguard {}", env!("CARGO_PKG_VERSION"));
        println!("classifier version: {}", twinguard_classify::VERSION);
        return Ok(());
    }

    let config = resolve_config(&cli)?;
    let detector = Detector::from_config(config);

    let report = match &cli.command {
        Commands::Scan(_) => detector.scan().await,
        Commands::Check(args) => execute_check(&detector, args),
        Commands::Batch(args) => execute_batch(&detector, args).await,
        Commands::Version => return Ok(()),
    };

    println!("{}", output::render(&report, cli.format)?);
    Ok(())
}

/// Build the effective configuration: the `--config` file (or defaults),
/// then artifact flags, then `scan` flags.
pub fn resolve_config(cli: &Cli) -> Result<DetectorConfig> {
    let mut config = match &cli.config {
        Some(path) => DetectorConfig::from_json(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => DetectorConfig::default(),
    };

    if let Some(path) = &cli.pipeline {
        config.pipeline_path = Some(path.clone());
    }
    if let Some(path) = &cli.text_model {
        config.text_model_path = Some(path.clone());
    }
    if let Some(path) = &cli.vectorizer {
        config.vectorizer_path = Some(path.clone());
    }
    if let Commands::Scan(args) = &cli.command {
        apply_scan_args(&mut config, args);
    }

    config.validate().context("Invalid configuration")?;
    debug!(?config, "configuration resolved");
    Ok(config)
}

fn apply_scan_args(config: &mut DetectorConfig, args: &ScanArgs) {
    if let Some(interface) = &args.interface {
        config.interface = interface.clone();
    }
    if let Some(settle_ms) = args.settle_ms {
        config.settle_ms = settle_ms;
    }
}

/// Manual check as a report of zero or one network.
fn execute_check(detector: &Detector, args: &CheckArgs) -> ScanReport {
    match detector.check(&args.ssid, args.bssid.as_deref()) {
        Some(network) => ScanReport::new(vec![network], Vec::new()),
        None => {
            let reason = detector
                .gateway()
                .text_slot()
                .reason()
                .unwrap_or("text model not loaded");
            ScanReport::new(Vec::new(), vec![format!("model unavailable: {reason}")])
        }
    }
}

async fn execute_batch(detector: &Detector, args: &BatchArgs) -> ScanReport {
    let platform = args
        .platform
        .map(ScanPlatform::from)
        .unwrap_or_else(ScanPlatform::detect);
    detector.batch(&platform).await
}
