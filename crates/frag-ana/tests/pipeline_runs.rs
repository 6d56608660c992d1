use std::collections::VecDeque;

use frag_ana::{
    run_pipeline, OutputFormat, RecordExporter, RowContext, RunConfig, RunManifest, Selection,
};
use frag_core::errors::{ErrorInfo, FragError};
use frag_core::{Event, EventSource, FourMomentum, GenerationStats, Particle, SeedParton, Vertex};
use frag_gen::{GeneratorSettings, ToyStringSource};
use tempfile::tempdir;

/// Replays prepared hadron lists, or failures, in order.
struct ScriptedSource {
    script: VecDeque<Option<Vec<Particle>>>,
    event: Event,
    stats: GenerationStats,
}

impl ScriptedSource {
    fn new(script: Vec<Option<Vec<Particle>>>) -> Self {
        Self {
            script: script.into(),
            event: Event::new(),
            stats: GenerationStats::default(),
        }
    }
}

impl EventSource for ScriptedSource {
    fn name(&self) -> &str {
        "scripted"
    }

    fn reset(&mut self) {
        self.event.reset();
    }

    fn append(&mut self, seed: &SeedParton) -> usize {
        self.event.append(seed)
    }

    fn generate_next(&mut self) -> Result<(), FragError> {
        match self.script.pop_front().flatten() {
            Some(particles) => {
                for particle in particles {
                    self.event.push(particle);
                }
                self.stats.record(true);
                Ok(())
            }
            None => {
                self.stats.record(false);
                Err(FragError::Generation(ErrorInfo::new("scripted", "no event")))
            }
        }
    }

    fn event(&self) -> &Event {
        &self.event
    }

    fn statistics(&self) -> GenerationStats {
        self.stats
    }
}

fn primary(status: i32, e: f64, t: f64) -> Particle {
    Particle::new(211, status, FourMomentum::new(0.1, 0.1, e * 0.9, e), 0.13957)
        .with_mothers(1, 2)
        .with_production(Vertex::new(0.0, 0.0, 0.0, t))
}

fn context(config: &RunConfig) -> RowContext {
    RowContext {
        string_energy: config.string_energy(),
        direction_threshold: config.resolver.direction_threshold,
    }
}

#[test]
fn failures_and_empty_events_contribute_no_rows() {
    let config = RunConfig {
        events: 4,
        ..RunConfig::default()
    };
    let mut source = ScriptedSource::new(vec![
        Some(vec![primary(83, 2.0, 0.0), primary(84, 1.5, 0.0)]),
        None,
        Some(vec![Particle::new(22, 91, FourMomentum::new(0.0, 0.0, 1.0, 1.0), 0.0)]),
        Some(vec![primary(-83, 1.0, 0.4), primary(84, 3.0, 0.8)]),
    ]);
    let mut exporter =
        RecordExporter::new(Vec::new(), OutputFormat::default(), context(&config)).expect("exporter");
    let mut seen = Vec::new();
    let summary = run_pipeline(&mut source, &config, &mut exporter, |index, _, selection: &Selection| {
        seen.push((index, selection.rows.len()));
    })
    .expect("run");

    assert_eq!(summary.events_requested, 4);
    assert_eq!(summary.events_generated, 3);
    assert_eq!(summary.events_failed, 1);
    assert_eq!(summary.events_without_rows, 1);
    assert_eq!(summary.rows_written, 3);
    assert_eq!(summary.statistics.tried, 4);
    assert_eq!(seen, vec![(0, 2), (2, 0), (3, 1)]);

    let text = String::from_utf8(exporter.finish().expect("finish")).expect("utf8");
    let labels: Vec<&str> = text
        .lines()
        .skip(1)
        .map(|line| line.split(',').next().unwrap_or_default())
        .collect();
    assert_eq!(labels, vec!["0_1", "0_2", "3"]);
}

#[test]
fn seed_partons_are_injected_every_event() {
    let config = RunConfig {
        events: 2,
        ..RunConfig::default()
    };
    let mut source = ScriptedSource::new(vec![Some(Vec::new()), Some(Vec::new())]);
    let mut exporter =
        RecordExporter::new(Vec::new(), OutputFormat::default(), context(&config)).expect("exporter");
    run_pipeline(&mut source, &config, &mut exporter, |_, event: &Event, _| {
        assert_eq!(event.len(), 3);
        assert_eq!(event[1].id, 1);
        assert_eq!(event[2].id, -1);
        assert_eq!(event[1].col, event[2].acol);
        assert_eq!(event[1].pz(), 5.0);
        assert_eq!(event[2].pz(), -5.0);
    })
    .expect("run");
}

#[test]
fn five_gev_string_exports_momentum_fractions() {
    let config = RunConfig {
        events: 5,
        ..RunConfig::default()
    };
    let mut source = ToyStringSource::new(config.generator.clone()).expect("source");
    let mut exporter =
        RecordExporter::new(Vec::new(), config.output.format.clone(), context(&config))
            .expect("exporter");
    let mut checked = 0;
    let summary = run_pipeline(&mut source, &config, &mut exporter, |_, event: &Event, selection| {
        let resolution = selection.resolution.as_ref().expect("primary hadrons");
        assert_eq!(selection.rows.len(), resolution.group.len());
        for candidate in &resolution.ordered {
            assert!((81..=89).contains(&candidate.status.abs()));
        }
        for member in &resolution.group {
            let energy = event[member.index].e();
            assert!((member.z_fraction - energy / 10.0).abs() < 1e-12);
        }
        checked += 1;
    })
    .expect("run");
    assert_eq!(checked, summary.events_generated);
    assert!(summary.events_generated > 0);
    assert_eq!(summary.rows_written as usize, {
        let text = String::from_utf8(exporter.finish().expect("finish")).expect("utf8");
        text.lines().count() - 1
    });
}

#[test]
fn leading_pion_run_writes_at_most_one_row_per_event() {
    let mut config = frag_ana::Preset::LeadingPion.config();
    config.events = 20;
    let mut source = ToyStringSource::new(config.generator.clone()).expect("source");
    let mut exporter =
        RecordExporter::new(Vec::new(), config.output.format.clone(), context(&config))
            .expect("exporter");
    let summary = run_pipeline(&mut source, &config, &mut exporter, |_, event: &Event, selection| {
        assert!(selection.rows.len() <= 1);
        if let Some(row) = selection.rows.first() {
            let chosen = &event[row.index];
            assert!([111, 211, -211].contains(&chosen.id));
            assert!(chosen.is_final());
            for (_, other) in event.iter() {
                if other.is_final() && [111, 211, -211].contains(&other.id) {
                    assert!(other.e() <= chosen.e());
                }
            }
        }
    })
    .expect("run");
    assert!(summary.rows_written <= 20);
}

#[test]
fn manifest_records_hash_and_counts() {
    let dir = tempdir().expect("tempdir");
    let mut config = RunConfig {
        events: 3,
        ..RunConfig::default()
    };
    config.output.path = dir.path().join("rows.csv");
    config.generator = GeneratorSettings {
        master_seed: 42,
        ..GeneratorSettings::default()
    };
    let mut source = ToyStringSource::new(config.generator.clone()).expect("source");
    let mut exporter =
        RecordExporter::create(&config.output.path, config.output.format.clone(), context(&config))
            .expect("exporter");
    let summary = run_pipeline(&mut source, &config, &mut exporter, |_, _, _| {}).expect("run");
    exporter.finish().expect("finish");

    let manifest = RunManifest::from_run(&config, source.name(), &summary).expect("manifest");
    let path = RunManifest::path_for(&config.output.path);
    assert!(path.to_string_lossy().ends_with("rows.manifest.json"));
    manifest.write(&path).expect("write");
    let loaded = RunManifest::load(&path).expect("load");
    assert_eq!(loaded.config.events, config.events);
    assert_eq!(loaded.output, config.output.path);
    assert_eq!(loaded.statistics, summary.statistics);
    assert_eq!(loaded.provenance.seed, 42);
    assert_eq!(loaded.provenance.source, "toy-string");
    assert_eq!(loaded.provenance.input_hash.len(), 64);
    assert_eq!(loaded.events_requested, 3);
    assert_eq!(loaded.rows_written, summary.rows_written);

    let again = RunManifest::from_run(&config, source.name(), &summary).expect("manifest");
    assert_eq!(again.provenance.input_hash, manifest.provenance.input_hash);
}
