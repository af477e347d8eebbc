//! CLI Pipeline Tests
//!
//! End-to-end: archive file -> tracer -> compressor -> exported artifact.
//! - Malformed archive lines are skipped, not fatal
//! - Exported artifacts read back with provenance intact
//! - Config files are honored and validated
//! - Batch export gives every root its own artifact

use std::fs;
use std::path::{Path, PathBuf};

use forecast_arc::cli::{compress, compress_all, CliErrorCode};
use forecast_arc::export::ForecastExporter;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

const ARCHIVE: &str = r#"{"trace_id": "A", "timestamp": "2024-03-01T00:00:00Z", "attributes": {"p": 0.5, "stance": "bullish"}}
{"trace_id": "B", "parent_trace_id": "A", "timestamp": "2024-03-02T00:00:00Z", "attributes": {"p": 0.6}, "metadata": {"corroborating_evidence": 3}}
this line is not json

{"trace_id": "C", "parent_trace_id": "B", "timestamp": "2024-03-03T00:00:00Z", "attributes": {"p": 0.62, "stance": "bullish"}, "metadata": {"externally_validated": true}}
{"trace_id": "Z", "timestamp": 1, "attributes": {"p": -0.2}}
"#;

fn write_archive(dir: &Path) -> PathBuf {
    let path = dir.join("forecasts.jsonl");
    fs::write(&path, ARCHIVE).unwrap();
    path
}

// =============================================================================
// Compress
// =============================================================================

/// Malformed lines are skipped and the chain still compresses.
#[test]
fn test_compress_skips_malformed_lines() {
    let dir = TempDir::new().unwrap();
    let archive = write_archive(dir.path());
    let output = dir.path().join("out").join("A.json");

    compress(&archive, "A", None, Some(output.as_path())).unwrap();

    let forecast = ForecastExporter::read(&output).unwrap();
    assert_eq!(forecast.root_trace_id(), "A");
    assert_eq!(forecast.contributing_trace_ids(), &["A", "B", "C"]);
    assert_eq!(forecast.provenance().nodes.len(), 3);
    assert!(forecast.provenance().nodes[2].validated);
    assert_eq!(forecast.provenance().chain_fingerprint.len(), 64);

    let p = forecast.canonical_attributes()["p"].as_number().unwrap();
    assert!((0.5..=0.62).contains(&p));
}

/// Unknown roots fail with a stable code.
#[test]
fn test_compress_unknown_root() {
    let dir = TempDir::new().unwrap();
    let archive = write_archive(dir.path());

    let err = compress(&archive, "missing", None, None).unwrap_err();
    assert_eq!(err.code(), &CliErrorCode::RootNotFound);
}

/// Missing archive is an I/O failure.
#[test]
fn test_compress_missing_archive() {
    let dir = TempDir::new().unwrap();
    let err = compress(&dir.path().join("nope.jsonl"), "A", None, None).unwrap_err();
    assert_eq!(err.code(), &CliErrorCode::IoError);
}

// =============================================================================
// Configuration
// =============================================================================

/// Config file values reach the provenance record.
#[test]
fn test_config_file_applied() {
    let dir = TempDir::new().unwrap();
    let archive = write_archive(dir.path());
    let config = dir.path().join("arc.json");
    fs::write(&config, r#"{"decay_rate": 0.5, "variance_clamp": 0.01}"#).unwrap();
    let output = dir.path().join("A.json");

    compress(&archive, "A", Some(config.as_path()), Some(output.as_path())).unwrap();

    let forecast = ForecastExporter::read(&output).unwrap();
    assert_eq!(forecast.provenance().config.decay_rate, 0.5);
    let clamp = forecast.provenance().config.variance_clamp.unwrap();
    assert!((clamp - 0.01).abs() < 1e-12);
}

/// Invalid config is rejected before any output is written.
#[test]
fn test_invalid_config_rejected() {
    let dir = TempDir::new().unwrap();
    let archive = write_archive(dir.path());
    let config = dir.path().join("arc.json");
    fs::write(&config, r#"{"decay_rate": 0.0}"#).unwrap();
    let output = dir.path().join("A.json");

    let err = compress(&archive, "A", Some(config.as_path()), Some(output.as_path())).unwrap_err();
    assert_eq!(err.code(), &CliErrorCode::ConfigError);
    assert!(!output.exists());
}

/// Unknown config keys are rejected.
#[test]
fn test_unknown_config_key_rejected() {
    let dir = TempDir::new().unwrap();
    let archive = write_archive(dir.path());
    let config = dir.path().join("arc.json");
    fs::write(&config, r#"{"decay": 0.9}"#).unwrap();

    let err = compress(&archive, "A", Some(config.as_path()), None).unwrap_err();
    assert_eq!(err.code(), &CliErrorCode::ConfigError);
}

// =============================================================================
// Compress All
// =============================================================================

/// Every origin root gets its own artifact.
#[test]
fn test_compress_all_writes_each_origin() {
    let dir = TempDir::new().unwrap();
    let archive = write_archive(dir.path());
    let out = dir.path().join("forecasts");

    compress_all(&archive, &out, None).unwrap();

    let a = ForecastExporter::read(&ForecastExporter::path_for_root(&out, "A")).unwrap();
    let z = ForecastExporter::read(&ForecastExporter::path_for_root(&out, "Z")).unwrap();
    assert_eq!(a.contributing_trace_ids().len(), 3);
    assert_eq!(z.contributing_trace_ids(), &["Z"]);
    assert!(!ForecastExporter::path_for_root(&out, "B").exists());
}

/// Roots whose names sanitize alike still get separate artifacts.
#[test]
fn test_compress_all_keeps_similar_root_names_apart() {
    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("runs.jsonl");
    fs::write(
        &archive,
        r#"{"trace_id": "run/1", "timestamp": 1, "attributes": {"p": 0.1}}
{"trace_id": "run:1", "timestamp": 2, "attributes": {"p": 0.9}}
"#,
    )
    .unwrap();
    let out = dir.path().join("forecasts");

    compress_all(&archive, &out, None).unwrap();

    let slash_path = ForecastExporter::path_for_root(&out, "run/1");
    let colon_path = ForecastExporter::path_for_root(&out, "run:1");
    assert_ne!(slash_path, colon_path);
    assert_eq!(fs::read_dir(&out).unwrap().count(), 2);

    let slash = ForecastExporter::read(&slash_path).unwrap();
    let colon = ForecastExporter::read(&colon_path).unwrap();
    assert_eq!(slash.root_trace_id(), "run/1");
    assert_eq!(colon.root_trace_id(), "run:1");
    assert_eq!(slash.canonical_attributes()["p"].as_number(), Some(0.1));
}
