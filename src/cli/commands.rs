//! CLI command implementations
//!
//! Every command follows the same pipeline:
//!
//! archive -> episode tracer -> compression engine -> exporter
//!
//! The tracer and the engine are pure. This layer owns all I/O and logs the
//! warnings they return.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::archive::{ArchiveReader, LoadedArchive};
use crate::compression::{CompressedForecast, CompressionConfig, MutationCompressor};
use crate::episode::{build_episode_chain, EpisodeChain, TraceWarning};
use crate::export::ForecastExporter;
use crate::observability::{
    log_event, log_line_issue, log_trace_warning, Event, ObservationScope,
};
use crate::record::ForecastRecord;

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{write_json, write_raw};

/// Parse arguments and run the requested command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Compress {
            archive,
            root,
            config,
            output,
        } => compress(&archive, &root, config.as_deref(), output.as_deref()),
        Command::Trace { archive, root } => trace(&archive, &root),
        Command::Roots { archive } => roots(&archive),
        Command::CompressAll {
            archive,
            output_dir,
            config,
        } => compress_all(&archive, &output_dir, config.as_deref()),
    }
}

/// Compress the chain rooted at `root` and write it to `output` or stdout
pub fn compress(
    archive_path: &Path,
    root: &str,
    config_path: Option<&Path>,
    output: Option<&Path>,
) -> CliResult<()> {
    let compressor = MutationCompressor::new(load_config(config_path)?)?;
    let archive = load_archive(archive_path)?;

    let scope = ObservationScope::with_fields("COMPRESS", &[("root", root)]);
    let result = compress_root(&compressor, &archive.records, root)
        .and_then(|forecast| emit_forecast(&forecast, root, output));

    match result {
        Ok(()) => {
            scope.complete();
            Ok(())
        }
        Err(e) => {
            scope.fail(e.code_str(), e.message());
            Err(e)
        }
    }
}

/// Write `forecast` to `output`, or to stdout when no path is given
fn emit_forecast(
    forecast: &CompressedForecast,
    root: &str,
    output: Option<&Path>,
) -> CliResult<()> {
    match output {
        Some(path) => {
            ForecastExporter::write(forecast, path)?;
            let path_str = path.display().to_string();
            log_event(
                Event::ForecastExported,
                &[("path", path_str.as_str()), ("root", root)],
            );
            Ok(())
        }
        None => write_raw(&ForecastExporter::to_json(forecast)?),
    }
}

/// Print the ordered chain for `root`
pub fn trace(archive_path: &Path, root: &str) -> CliResult<()> {
    let archive = load_archive(archive_path)?;
    let chain = trace_chain(&archive.records, root)?;
    write_json(&TraceReport::from_chain(&chain))
}

/// List origin trace ids, ordered by timestamp then id
pub fn roots(archive_path: &Path) -> CliResult<()> {
    let archive = load_archive(archive_path)?;
    write_json(&RootsReport {
        roots: origin_ids(&archive),
    })
}

/// Compress every origin root into `output_dir`
///
/// A failing root is logged and recorded in the summary; the remaining
/// roots are still compressed.
pub fn compress_all(
    archive_path: &Path,
    output_dir: &Path,
    config_path: Option<&Path>,
) -> CliResult<()> {
    let compressor = MutationCompressor::new(load_config(config_path)?)?;
    let archive = load_archive(archive_path)?;
    let roots = origin_ids(&archive);

    let scope = ObservationScope::new("COMPRESS_ALL");
    let mut summary = BatchSummary::default();

    for root in &roots {
        let result = compress_root(&compressor, &archive.records, root).and_then(|forecast| {
            let path = ForecastExporter::path_for_root(output_dir, root);
            ForecastExporter::write(&forecast, &path)?;
            Ok(path)
        });

        match result {
            Ok(path) => {
                let path_str = path.display().to_string();
                log_event(
                    Event::ForecastExported,
                    &[("path", path_str.as_str()), ("root", root.as_str())],
                );
                summary.written.push(path);
            }
            Err(e) => {
                log_event(
                    Event::RequestFailed,
                    &[
                        ("code", e.code_str()),
                        ("reason", e.message()),
                        ("root", root.as_str()),
                    ],
                );
                summary.failed.push(FailedRoot {
                    root: root.clone(),
                    code: e.code_str(),
                    message: e.message().to_string(),
                });
            }
        }
    }

    let written = summary.written.len().to_string();
    let failed = summary.failed.len().to_string();
    scope.complete_with_fields(&[("failed", failed.as_str()), ("written", written.as_str())]);

    write_json(&summary)?;

    if summary.failed.is_empty() {
        Ok(())
    } else {
        Err(CliError::partial_failure(summary.failed.len(), roots.len()))
    }
}

fn load_config(path: Option<&Path>) -> CliResult<CompressionConfig> {
    let config = match path {
        Some(path) => CompressionConfig::load(path)?,
        None => CompressionConfig::default(),
    };

    let decay = config.decay_rate.to_string();
    let boost = config.validation_boost.to_string();
    log_event(
        Event::ConfigLoaded,
        &[("decay_rate", decay.as_str()), ("validation_boost", boost.as_str())],
    );
    Ok(config)
}

fn load_archive(path: &Path) -> CliResult<LoadedArchive> {
    let archive = ArchiveReader::load(path)?;

    for issue in &archive.issues {
        log_line_issue(issue);
    }

    let records = archive.records.len().to_string();
    let rejected = archive.issues.len().to_string();
    let path_str = path.display().to_string();
    log_event(
        Event::ArchiveLoaded,
        &[
            ("path", path_str.as_str()),
            ("records", records.as_str()),
            ("rejected", rejected.as_str()),
        ],
    );
    Ok(archive)
}

fn trace_chain(records: &[ForecastRecord], root: &str) -> CliResult<EpisodeChain> {
    let chain = build_episode_chain(records, root)?;

    for warning in chain.warnings() {
        log_trace_warning(root, warning);
    }

    let nodes = chain.len().to_string();
    let depth = chain.max_depth().to_string();
    log_event(
        Event::ChainTraced,
        &[
            ("max_depth", depth.as_str()),
            ("nodes", nodes.as_str()),
            ("root", root),
        ],
    );
    Ok(chain)
}

fn compress_root(
    compressor: &MutationCompressor,
    records: &[ForecastRecord],
    root: &str,
) -> CliResult<CompressedForecast> {
    let chain = trace_chain(records, root)?;
    let forecast = compressor.compress(&chain)?;

    let trust = forecast.composite_trust().to_string();
    let stability = forecast.arc_stability().to_string();
    log_event(
        Event::ForecastCompressed,
        &[
            ("arc_stability", stability.as_str()),
            ("composite_trust", trust.as_str()),
            ("root", root),
        ],
    );
    Ok(forecast)
}

fn origin_ids(archive: &LoadedArchive) -> Vec<String> {
    let mut origins: Vec<&ForecastRecord> = archive.origins().collect();
    origins.sort_by(|a, b| {
        a.timestamp
            .cmp(&b.timestamp)
            .then_with(|| a.trace_id.cmp(&b.trace_id))
    });
    origins.into_iter().map(|r| r.trace_id.clone()).collect()
}

#[derive(Debug, Serialize)]
struct TraceNode<'a> {
    trace_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_trace_id: Option<&'a str>,
    depth: usize,
    timestamp: f64,
}

#[derive(Debug, Serialize)]
struct TraceReport<'a> {
    root_trace_id: &'a str,
    nodes: Vec<TraceNode<'a>>,
    warnings: &'a [TraceWarning],
}

impl<'a> TraceReport<'a> {
    fn from_chain(chain: &'a EpisodeChain) -> Self {
        let nodes = chain
            .nodes()
            .iter()
            .zip(chain.depths())
            .map(|(node, &depth)| TraceNode {
                trace_id: &node.trace_id,
                parent_trace_id: node.parent_trace_id.as_deref(),
                depth,
                timestamp: node.timestamp.value(),
            })
            .collect();

        Self {
            root_trace_id: chain.root_trace_id(),
            nodes,
            warnings: chain.warnings(),
        }
    }
}

#[derive(Debug, Serialize)]
struct RootsReport {
    roots: Vec<String>,
}

#[derive(Debug, Serialize)]
struct FailedRoot {
    root: String,
    code: &'static str,
    message: String,
}

#[derive(Debug, Default, Serialize)]
struct BatchSummary {
    written: Vec<PathBuf>,
    failed: Vec<FailedRoot>,
}
