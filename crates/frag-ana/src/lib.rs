//! First-hadron analysis of string fragmentation events.
//!
//! Classifies the particle list of each generated event, resolves the
//! earliest produced primary hadrons, and writes the selected particles to
//! a delimited text file.

pub mod classifier;
pub mod config;
pub mod export;
pub mod hash;
mod manifest;
pub mod pipeline;
pub mod report;
pub mod resolver;
pub mod selection;

pub use classifier::{
    final_hadrons, is_final_hadron, is_primary_hadron, primary_candidates, Candidate,
};
pub use config::{OutputConfig, Preset, RunConfig, SeedConfig};
pub use export::{
    Column, ColumnSpec, EventLabel, OutputFormat, QuoteMode, RecordExporter, RowContext,
};
pub use manifest::RunManifest;
pub use pipeline::{run_pipeline, RunSummary};
pub use report::EventReport;
pub use resolver::{resolve, Direction, GroupMember, Resolution, ResolverOptions, TimeSource};
pub use selection::{select, GroupExport, SelectedRow, Selection, SelectionPolicy};
