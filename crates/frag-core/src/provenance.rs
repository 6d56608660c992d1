//! Where a run's output came from: layout version, inputs and tools.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// `major.minor.patch` version of a serialized layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Incremented when existing fields change meaning or disappear.
    pub major: u32,
    /// Incremented when fields are added.
    pub minor: u32,
    /// Incremented for corrections that leave the layout unchanged.
    pub patch: u32,
}

impl SchemaVersion {
    /// Current run manifest layout.
    pub const MANIFEST: SchemaVersion = SchemaVersion::new(1, 0, 0);

    /// Version from its three components.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Whether a reader of `self` can load data written as `other`.
    pub fn reads(&self, other: &SchemaVersion) -> bool {
        self.major == other.major && self.minor >= other.minor
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::MANIFEST
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Inputs that determine the contents of an exported table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RunProvenance {
    /// Hex digest of the canonical run configuration.
    pub input_hash: String,
    /// Master seed of the event source.
    pub seed: u64,
    /// Name reported by the event source.
    pub source: String,
    /// Crate name to version.
    #[serde(default)]
    pub tool_versions: BTreeMap<String, String>,
}

impl RunProvenance {
    /// Provenance without tool versions.
    pub fn new(input_hash: impl Into<String>, seed: u64, source: impl Into<String>) -> Self {
        Self {
            input_hash: input_hash.into(),
            seed,
            source: source.into(),
            tool_versions: BTreeMap::new(),
        }
    }

    /// Records the version of one tool.
    pub fn with_tool(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.tool_versions.insert(name.into(), version.into());
        self
    }
}
