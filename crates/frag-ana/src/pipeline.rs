//! Sequential event loop tying an event source to selection and export.

use std::io::Write;

use frag_core::errors::FragError;
use frag_core::{Event, EventSource, GenerationStats};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::RunConfig;
use crate::export::{EventLabel, RecordExporter};
use crate::selection::{select, Selection};

/// Counters describing one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RunSummary {
    /// Iterations requested.
    pub events_requested: usize,
    /// Iterations whose generation succeeded.
    pub events_generated: usize,
    /// Iterations forfeited by a generation failure.
    pub events_failed: usize,
    /// Generated events without any selected particle.
    pub events_without_rows: usize,
    /// Rows handed to the exporter.
    pub rows_written: u64,
    /// Counters reported by the event source after the loop.
    pub statistics: GenerationStats,
}

/// Runs `config.events` iterations of reset, seed, generate, select, export.
///
/// A generation failure skips its iteration with a warning. Export errors
/// abort the run. `on_event` observes every generated event together with
/// its selection, after its rows were written.
pub fn run_pipeline<S, W, F>(
    source: &mut S,
    config: &RunConfig,
    exporter: &mut RecordExporter<W>,
    mut on_event: F,
) -> Result<RunSummary, FragError>
where
    S: EventSource + ?Sized,
    W: Write,
    F: FnMut(usize, &Event, &Selection),
{
    let partons = config.seed.partons();
    let string_energy = config.string_energy();
    let mut summary = RunSummary {
        events_requested: config.events,
        ..RunSummary::default()
    };
    info!(
        source = source.name(),
        events = config.events,
        energy = config.seed.energy,
        "starting run"
    );

    for event_index in 0..config.events {
        source.reset();
        for parton in &partons {
            source.append(parton);
        }
        if let Err(err) = source.generate_next() {
            if !err.is_generation_failure() {
                return Err(err);
            }
            warn!(event = event_index, error = %err, "event generation failed, skipping");
            summary.events_failed += 1;
            continue;
        }
        summary.events_generated += 1;

        let event = source.event();
        let selection = select(event, &config.selection, &config.resolver, string_energy);
        debug!(
            event = event_index,
            particles = event.len(),
            rows = selection.rows.len(),
            group = selection.resolution.as_ref().map_or(0, |r| r.group.len()),
            "event selected"
        );
        if selection.rows.is_empty() {
            summary.events_without_rows += 1;
        }
        for row in &selection.rows {
            let label = EventLabel {
                event: event_index,
                suffix: row.suffix,
            };
            exporter.write_row(label, row.index, &event[row.index])?;
            summary.rows_written += 1;
        }
        on_event(event_index, event, &selection);
    }

    summary.statistics = source.statistics();
    info!(
        generated = summary.events_generated,
        failed = summary.events_failed,
        rows = summary.rows_written,
        "run finished"
    );
    Ok(summary)
}
