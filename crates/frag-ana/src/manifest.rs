use std::fs;
use std::path::{Path, PathBuf};

use frag_core::errors::{ErrorInfo, FragError};
use frag_core::{GenerationStats, RunProvenance, SchemaVersion};
use serde::{Deserialize, Serialize};

use crate::config::RunConfig;
use crate::hash::stable_hash_string;
use crate::pipeline::RunSummary;

/// Record of a completed run, written next to the exported table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    /// Layout version of this document.
    pub schema: SchemaVersion,
    /// Configuration used for the run.
    pub config: RunConfig,
    /// Input hash, master seed, event source and tool versions.
    pub provenance: RunProvenance,
    /// Exported table.
    pub output: PathBuf,
    /// Events requested.
    pub events_requested: usize,
    /// Events that produced a particle list.
    pub events_generated: usize,
    /// Events forfeited by generation failures.
    pub events_failed: usize,
    /// Generated events that contributed no row.
    pub events_without_rows: usize,
    /// Data rows written.
    pub rows_written: u64,
    /// Counters reported by the event source.
    pub statistics: GenerationStats,
}

impl RunManifest {
    /// Builds the manifest of a finished run.
    pub fn from_run(
        config: &RunConfig,
        source_name: &str,
        summary: &RunSummary,
    ) -> Result<Self, FragError> {
        let provenance =
            RunProvenance::new(stable_hash_string(config)?, config.generator.master_seed, source_name)
                .with_tool(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        Ok(Self {
            schema: SchemaVersion::MANIFEST,
            config: config.clone(),
            provenance,
            output: config.output.path.clone(),
            events_requested: summary.events_requested,
            events_generated: summary.events_generated,
            events_failed: summary.events_failed,
            events_without_rows: summary.events_without_rows,
            rows_written: summary.rows_written,
            statistics: summary.statistics,
        })
    }

    /// Manifest location for an exported table: `<out>` with its extension
    /// replaced by `.manifest.json` (`rows.csv` gives `rows.manifest.json`).
    pub fn path_for(output: &Path) -> PathBuf {
        output.with_extension("manifest.json")
    }

    /// Writes pretty-printed JSON, creating parent directories.
    pub fn write(&self, path: &Path) -> Result<(), FragError> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| manifest_error("manifest-mkdir", parent, err))?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|err| manifest_error("manifest-serialize", path, err))?;
        fs::write(path, json).map_err(|err| manifest_error("manifest-write", path, err))
    }

    /// Reads a manifest, rejecting layouts newer than this build understands.
    pub fn load(path: &Path) -> Result<Self, FragError> {
        let contents =
            fs::read_to_string(path).map_err(|err| manifest_error("manifest-read", path, err))?;
        let manifest: Self = serde_json::from_str(&contents)
            .map_err(|err| manifest_error("manifest-parse", path, err))?;
        if !SchemaVersion::MANIFEST.reads(&manifest.schema) {
            return Err(FragError::Serde(
                ErrorInfo::new("manifest-schema", "unsupported manifest version")
                    .with_context("path", path.display().to_string())
                    .with_context("schema", manifest.schema.to_string()),
            ));
        }
        Ok(manifest)
    }
}

fn manifest_error(code: &str, path: &Path, err: impl ToString) -> FragError {
    FragError::Serde(
        ErrorInfo::new(code, err.to_string()).with_context("path", path.display().to_string()),
    )
}
