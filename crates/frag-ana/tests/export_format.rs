use std::fs;

use frag_ana::{Column, ColumnSpec, EventLabel, OutputFormat, QuoteMode, RecordExporter, RowContext};
use frag_core::{FourMomentum, Particle, Vertex};
use tempfile::tempdir;

const CONTEXT: RowContext = RowContext {
    string_energy: 10.0,
    direction_threshold: 0.1,
};

fn pion() -> Particle {
    let mut particle = Particle::new(211, -83, FourMomentum::new(0.25, -0.5, 1.5, 1.6), 0.13957)
        .with_mothers(1, 2)
        .with_production(Vertex::new(0.0, 0.0, 0.1, 0.2));
    particle.daughter1 = 7;
    particle.daughter2 = 8;
    particle
}

fn render(format: OutputFormat, rows: &[(EventLabel, usize, Particle)]) -> String {
    let mut exporter = RecordExporter::new(Vec::new(), format, CONTEXT).expect("exporter");
    for (label, index, particle) in rows {
        exporter.write_row(*label, *index, particle).expect("row");
    }
    assert_eq!(exporter.rows_written(), rows.len() as u64);
    String::from_utf8(exporter.finish().expect("finish")).expect("utf8")
}

#[test]
fn detailed_layout_writes_fixed_precision() {
    let label = EventLabel {
        event: 4,
        suffix: None,
    };
    let text = render(OutputFormat::default(), &[(label, 5, pion())]);
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("Event,Index,Name,ID,Status,px,py,pz,E,m,Mother1,Mother2,Daughter1,Daughter2,IsFinal")
    );
    assert_eq!(
        lines.next(),
        Some("4,5,pi+,211,-83,0.250000,-0.500000,1.500000,1.600000,0.139570,1,2,7,8,0")
    );
    assert_eq!(lines.next(), None);
}

#[test]
fn group_members_get_suffixed_labels() {
    let rows: Vec<_> = (1..=2)
        .map(|suffix| {
            (
                EventLabel {
                    event: 3,
                    suffix: Some(suffix),
                },
                suffix + 10,
                pion(),
            )
        })
        .collect();
    let text = render(OutputFormat::default(), &rows);
    let events: Vec<&str> = text
        .lines()
        .skip(1)
        .map(|line| line.split(',').next().unwrap_or_default())
        .collect();
    assert_eq!(events, vec!["3_1", "3_2"]);
}

#[test]
fn header_prefix_and_label_overrides() {
    let format = OutputFormat {
        columns: vec![
            ColumnSpec::new(Column::Event),
            ColumnSpec::labeled(Column::Id, "Particle_ID"),
            ColumnSpec::new(Column::Pz),
        ],
        precision: None,
        quote: QuoteMode::Necessary,
        header_prefix: Some("# ".into()),
    };
    let label = EventLabel {
        event: 0,
        suffix: None,
    };
    let text = render(format, &[(label, 1, pion())]);
    assert_eq!(text, "# Event,Particle_ID,pz\n0,211,1.5\n");
}

#[test]
fn non_numeric_quoting_wraps_names_only() {
    let format = OutputFormat {
        columns: vec![
            ColumnSpec::new(Column::Event),
            ColumnSpec::labeled(Column::Name, "Particle"),
            ColumnSpec::labeled(Column::E, "Particle_E"),
        ],
        precision: None,
        quote: QuoteMode::NonNumeric,
        header_prefix: None,
    };
    let label = EventLabel {
        event: 2,
        suffix: None,
    };
    let text = render(format, &[(label, 1, pion())]);
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("Event,Particle,Particle_E"));
    assert_eq!(lines.next(), Some("2,\"pi+\",1.6"));
}

#[test]
fn derived_columns_are_computed_per_row() {
    let format = OutputFormat {
        columns: vec![
            ColumnSpec::new(Column::AbsPz),
            ColumnSpec::new(Column::Pt),
            ColumnSpec::new(Column::ZFraction),
            ColumnSpec::new(Column::ProductionTime),
            ColumnSpec::new(Column::Direction),
        ],
        precision: Some(3),
        quote: QuoteMode::Necessary,
        header_prefix: None,
    };
    let mut backward = pion();
    backward.momentum = FourMomentum::new(0.3, 0.4, -2.0, 2.5);
    backward.production = None;
    let label = EventLabel {
        event: 0,
        suffix: None,
    };
    let text = render(format, &[(label, 1, pion()), (label, 2, backward)]);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "abs_pz,pT,z,t_prod,direction");
    assert_eq!(lines[1], "1.500,0.559,0.160,0.200,positive");
    assert_eq!(lines[2], "2.000,0.500,0.250,,negative");
}

#[test]
fn empty_column_set_is_rejected() {
    let format = OutputFormat {
        columns: Vec::new(),
        ..OutputFormat::default()
    };
    let err = RecordExporter::new(Vec::new(), format, CONTEXT).err().expect("invalid");
    assert_eq!(err.info().code, "output-columns");
}

#[test]
fn file_exporter_creates_parent_directories() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("rows.csv");
    let mut exporter =
        RecordExporter::create(&path, OutputFormat::default(), CONTEXT).expect("create");
    let label = EventLabel {
        event: 0,
        suffix: None,
    };
    exporter.write_row(label, 3, &pion()).expect("row");
    exporter.finish().expect("finish");
    let contents = fs::read_to_string(&path).expect("read");
    assert_eq!(contents.lines().count(), 2);
    assert!(contents.lines().nth(1).unwrap_or_default().starts_with("0,3,pi+,211,"));
}
