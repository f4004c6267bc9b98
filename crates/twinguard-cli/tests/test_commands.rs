//! Integration tests for command-line resolution and report rendering.

use clap::Parser;
use serde_json::json;
use tempfile::tempdir;
use twinguard_classify::Detector;
use twinguard_cli::{commands::resolve_config, output::render, Cli, OutputFormat};

fn write_text_artifacts(dir: &std::path::Path) -> (String, String) {
    let model = dir.join("model.json");
    let vectorizer = dir.join("vectorizer.json");
    std::fs::write(
        &model,
        json!({ "classes": ["fake", "real"], "coef": [[-3.0, 1.0]], "intercept": [0.5] })
            .to_string(),
    )
    .unwrap();
    std::fs::write(
        &vectorizer,
        json!({
            "analyzer": "word",
            "ngram_range": [1, 1],
            "vocabulary": { "free": 0, "home": 1 },
            "idf": [1.0, 1.0]
        })
        .to_string(),
    )
    .unwrap();
    (
        model.to_string_lossy().into_owned(),
        vectorizer.to_string_lossy().into_owned(),
    )
}

/// `check` flags flow through config resolution into a classified report.
#[test]
fn check_from_flags_to_json() {
    let tmp = tempdir().unwrap();
    let (model, vectorizer) = write_text_artifacts(tmp.path());

    let cli = Cli::try_parse_from([
        "twinguard",
        "--text-model",
        &model,
        "--vectorizer",
        &vectorizer,
        "check",
        "--ssid",
        "Free Airport WiFi",
    ])
    .unwrap();
    let detector = Detector::from_config(resolve_config(&cli).unwrap());
    let network = detector.check("Free Airport WiFi", None).unwrap();

    let report = twinguard_classify::ScanReport::new(vec![network], Vec::new());
    let value: serde_json::Value =
        serde_json::from_str(&render(&report, OutputFormat::Json).unwrap()).unwrap();
    assert_eq!(value["networks"][0]["ssid"], "Free Airport WiFi");
    assert_eq!(value["networks"][0]["prediction"], "Fake");
    assert_eq!(value["networks"][0]["prediction_class"], "fake");
    assert_eq!(value["summary"]["fake"], 1);
    assert_eq!(value["summary"]["strongest"], json!({}));
}

/// Config file paths are used when no artifact flags are given.
#[test]
fn config_file_supplies_artifacts() {
    let tmp = tempdir().unwrap();
    let (model, vectorizer) = write_text_artifacts(tmp.path());
    let config = tmp.path().join("twinguard.json");
    std::fs::write(
        &config,
        json!({ "text_model_path": model, "vectorizer_path": vectorizer }).to_string(),
    )
    .unwrap();

    let cli = Cli::try_parse_from([
        "twinguard",
        "--config",
        config.to_str().unwrap(),
        "check",
        "--ssid",
        "Home",
    ])
    .unwrap();
    let detector = Detector::from_config(resolve_config(&cli).unwrap());
    assert!(detector.gateway().text_available());
    assert!(!detector.gateway().pipeline_available());
}

/// A config file with a bad value is reported, not silently defaulted.
#[test]
fn invalid_config_file_fails() {
    let tmp = tempdir().unwrap();
    let config = tmp.path().join("twinguard.json");
    std::fs::write(&config, r#"{ "command_timeout_secs": 0 }"#).unwrap();

    let cli =
        Cli::try_parse_from(["twinguard", "--config", config.to_str().unwrap(), "batch"]).unwrap();
    assert!(resolve_config(&cli).is_err());
}
