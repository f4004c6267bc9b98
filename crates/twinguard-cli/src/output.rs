//! Report rendering: pretty JSON or a colored table.

use anyhow::{Context, Result};
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};
use twinguard_classify::{ClassifiedNetwork, Label, ScanReport};

use crate::OutputFormat;

/// Network display row for tables
#[derive(Tabled)]
struct NetworkRow {
    #[tabled(rename = "SSID")]
    ssid: String,
    #[tabled(rename = "BSSID")]
    bssid: String,
    #[tabled(rename = "RSSI")]
    rssi: String,
    #[tabled(rename = "Auth")]
    auth: String,
    #[tabled(rename = "Channel")]
    channel: String,
    #[tabled(rename = "Prediction")]
    prediction: String,
}

impl From<&ClassifiedNetwork> for NetworkRow {
    fn from(n: &ClassifiedNetwork) -> Self {
        let obs = &n.observation;
        Self {
            ssid: if obs.ssid.is_empty() {
                "<hidden>".to_owned()
            } else {
                obs.ssid.clone()
            },
            bssid: or_dash(obs.bssid()),
            rssi: or_dash(obs.rssi()),
            auth: or_dash(obs.auth()),
            channel: or_dash(obs.channel()),
            prediction: format_label(n),
        }
    }
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_owned(), |v| v.to_string())
}

fn format_label(n: &ClassifiedNetwork) -> String {
    match n.label {
        Label::Real => n.prediction().green().to_string(),
        Label::Fake => n.prediction().red().bold().to_string(),
    }
}

/// Render `report` in the requested format.
pub fn render(report: &ScanReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(report).context("Failed to serialize report")
        }
        OutputFormat::Table => Ok(render_table(report)),
    }
}

fn render_table(report: &ScanReport) -> String {
    let mut out = String::new();

    if report.networks.is_empty() {
        out.push_str(&format!("{} No networks classified.\n", "[INFO]".blue()));
    } else {
        let rows: Vec<NetworkRow> = report.networks.iter().map(NetworkRow::from).collect();
        out.push_str(&Table::new(rows).with(Style::rounded()).to_string());
        out.push('\n');
    }

    let s = &report.summary;
    out.push_str(&format!("{}\n", "Summary".bold().cyan()));
    out.push_str(&format!("  {} {}\n", "Total:".dimmed(), s.total));
    out.push_str(&format!("  {} {}\n", "Real:".dimmed(), s.real_count.to_string().green()));
    out.push_str(&format!(
        "  {} {}\n",
        "Fake:".dimmed(),
        if s.fake_count > 0 {
            s.fake_count.to_string().red().bold()
        } else {
            s.fake_count.to_string().normal()
        }
    ));
    if let Some(strongest) = &s.strongest {
        out.push_str(&format!(
            "  {} {} ({})\n",
            "Strongest:".dimmed(),
            strongest.observation,
            format_label(strongest)
        ));
    }

    for diagnostic in &report.diagnostics {
        out.push_str(&format!("{} {}\n", "[WARN]".yellow().bold(), diagnostic));
    }
    out
}
