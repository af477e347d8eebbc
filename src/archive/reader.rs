//! Line-delimited JSON archive reader
//!
//! One ForecastRecord per line. Blank lines are skipped. Malformed lines and
//! duplicate trace ids are collected as `LineIssue`s with the 1-based line
//! number and raw content; the remaining lines are still loaded.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Serialize;

use crate::record::ForecastRecord;

use super::errors::{ArchiveError, ArchiveResult};

/// A line that could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineIssue {
    /// 1-based line number
    pub line_number: usize,
    pub raw: String,
    pub reason: String,
}

/// Records and per-line issues from one archive.
#[derive(Debug, Clone, Default)]
pub struct LoadedArchive {
    pub records: Vec<ForecastRecord>,
    pub issues: Vec<LineIssue>,
}

impl LoadedArchive {
    /// Origin records (no parent link), in archive order.
    pub fn origins(&self) -> impl Iterator<Item = &ForecastRecord> {
        self.records.iter().filter(|r| r.is_origin())
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Reads forecast archives.
pub struct ArchiveReader;

impl ArchiveReader {
    /// Loads an archive file.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError::Io` if the file cannot be opened or read.
    pub fn load(path: &Path) -> ArchiveResult<LoadedArchive> {
        let file = File::open(path).map_err(|e| ArchiveError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::parse(BufReader::new(file)).map_err(|e| match e {
            ArchiveError::Io { source, .. } => ArchiveError::Io {
                path: path.display().to_string(),
                source,
            },
        })
    }

    /// Parses records from any buffered reader.
    pub fn parse<R: BufRead>(reader: R) -> ArchiveResult<LoadedArchive> {
        let mut archive = LoadedArchive::default();
        let mut seen: HashSet<String> = HashSet::new();

        for (index, line) in reader.lines().enumerate() {
            let line_number = index + 1;
            let line = line.map_err(|e| ArchiveError::Io {
                path: "<reader>".to_string(),
                source: e,
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let record: ForecastRecord = match serde_json::from_str(&line) {
                Ok(record) => record,
                Err(e) => {
                    archive.issues.push(LineIssue {
                        line_number,
                        raw: line,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            if !seen.insert(record.trace_id.clone()) {
                archive.issues.push(LineIssue {
                    line_number,
                    reason: format!("duplicate trace_id '{}'", record.trace_id),
                    raw: line,
                });
                continue;
            }

            archive.records.push(record);
        }

        Ok(archive)
    }
}
