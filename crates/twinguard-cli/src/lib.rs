//! twinguard CLI
//!
//! Command-line front end for the rogue access point detector.
//!
//! # Commands
//!
//! - **scan**: structured scan of a wireless interface, full-feature model
//! - **check**: classify one SSID (and optional BSSID) with the text model
//! - **batch**: OS scan tool listing, text model
//! - **version**: display version information
//!
//! # Usage
//!
//! ```bash
//! # Scan wlan0 with the full pipeline and print a table
//! twinguard --pipeline models/pipeline.json --format table scan --interface wlan0
//!
//! # Check a single network name
//! twinguard --text-model models/model.json --vectorizer models/vectorizer.json \
//!     check --ssid "Airport_Free_WiFi"
//!
//! # Classify everything the OS scan tool lists
//! twinguard --config twinguard.json batch
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use twinguard_wifiscan::ScanPlatform;

pub mod commands;
pub mod output;

/// twinguard Command Line Interface
#[derive(Parser, Debug)]
#[command(name = "twinguard")]
#[command(author, version, about = "Evil-twin and rogue Wi-Fi access point detector")]
#[command(propagate_version = true)]
pub struct Cli {
    /// JSON configuration file; flags below override its values
    #[arg(long, global = true, env = "TWINGUARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Full-feature pipeline artifact
    #[arg(long, global = true)]
    pub pipeline: Option<PathBuf>,

    /// Text classifier artifact
    #[arg(long, global = true)]
    pub text_model: Option<PathBuf>,

    /// Text vectorizer artifact
    #[arg(long, global = true)]
    pub vectorizer: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Structured scan of a wireless interface, classified by the full pipeline
    Scan(ScanArgs),

    /// Classify one operator-supplied network with the text model
    Check(CheckArgs),

    /// Classify every SSID the OS scan tool lists, with the text model
    Batch(BatchArgs),

    /// Display version information
    Version,
}

/// Arguments for the scan command
#[derive(Args, Debug, Default)]
pub struct ScanArgs {
    /// Wireless interface to scan
    #[arg(short, long)]
    pub interface: Option<String>,

    /// Delay between requesting the scan and reading results, in milliseconds
    #[arg(long)]
    pub settle_ms: Option<u64>,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Network name to classify
    #[arg(short, long)]
    pub ssid: String,

    /// Radio MAC address, if known
    #[arg(short, long)]
    pub bssid: Option<String>,
}

/// Arguments for the batch command
#[derive(Args, Debug, Default)]
pub struct BatchArgs {
    /// Scan tool family to use instead of the detected one
    #[arg(short, long, value_enum)]
    pub platform: Option<PlatformArg>,
}

/// Scan platform argument enum for CLI
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlatformArg {
    Windows,
    Macos,
    Linux,
}

impl From<PlatformArg> for ScanPlatform {
    fn from(val: PlatformArg) -> Self {
        match val {
            PlatformArg::Windows => ScanPlatform::Windows,
            PlatformArg::Macos => ScanPlatform::MacOs,
            PlatformArg::Linux => ScanPlatform::Linux,
        }
    }
}

/// Output format
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON report
    #[default]
    Json,
    /// Colored table with a summary block
    Table,
}
