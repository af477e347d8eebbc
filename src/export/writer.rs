//! Compressed forecast writer
//!
//! Writes the forecast as pretty-printed JSON and fsyncs the file before
//! returning. Missing parent directories are created.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::compression::CompressedForecast;

use super::errors::{ExportError, ExportResult};

/// Digest bytes appended to export file names
const ROOT_DIGEST_BYTES: usize = 6;

/// Serializes compressed forecasts to persistent storage.
pub struct ForecastExporter;

impl ForecastExporter {
    /// Serializes the forecast to pretty-printed JSON.
    pub fn to_json(forecast: &CompressedForecast) -> ExportResult<String> {
        Ok(serde_json::to_string_pretty(forecast)?)
    }

    /// Writes the forecast to `path` with fsync.
    pub fn write(forecast: &CompressedForecast, path: &Path) -> ExportResult<()> {
        let json = Self::to_json(forecast)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                ExportError::io(format!("Failed to create {}", parent.display()), e)
            })?;
        }

        let mut file = File::create(path).map_err(|e| {
            ExportError::io(format!("Failed to create {}", path.display()), e)
        })?;

        file.write_all(json.as_bytes())
            .and_then(|_| file.write_all(b"\n"))
            .map_err(|e| ExportError::io(format!("Failed to write {}", path.display()), e))?;

        file.sync_all()
            .map_err(|e| ExportError::io(format!("Failed to fsync {}", path.display()), e))?;

        Ok(())
    }

    /// Reads a previously exported forecast.
    pub fn read(path: &Path) -> ExportResult<CompressedForecast> {
        let content = fs::read_to_string(path)
            .map_err(|e| ExportError::io(format!("Failed to read {}", path.display()), e))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// File path for a root's forecast inside `dir`.
    ///
    /// Characters outside `[A-Za-z0-9._-]` are replaced with `_`. The first
    /// 12 hex digits of the raw id's SHA-256 are appended, so ids that
    /// sanitize alike (`run/1`, `run:1`) still get distinct files.
    pub fn path_for_root(dir: &Path, root_trace_id: &str) -> PathBuf {
        let safe: String = root_trace_id
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();

        let digest = Sha256::digest(root_trace_id.as_bytes());
        let suffix: String = digest[..ROOT_DIGEST_BYTES]
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect();

        dir.join(format!("{}-{}.forecast.json", safe, suffix))
    }
}
