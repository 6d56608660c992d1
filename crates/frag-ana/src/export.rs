//! Delimited record export with a configurable column set.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use frag_core::errors::{ErrorInfo, FragError};
use frag_core::Particle;
use serde::{Deserialize, Serialize};

use crate::resolver::{momentum_fraction, Direction};

/// Field that can appear as an output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Column {
    /// Event label, suffixed for multi-member groups.
    Event,
    /// Record index.
    Index,
    /// Species name.
    Name,
    /// PDG code.
    Id,
    /// Status code.
    Status,
    /// Momentum along x.
    Px,
    /// Momentum along y.
    Py,
    /// Momentum along z.
    Pz,
    /// |pz|.
    AbsPz,
    /// Transverse momentum.
    Pt,
    /// Energy.
    E,
    /// Mass.
    Mass,
    /// First mother index.
    Mother1,
    /// Second mother index.
    Mother2,
    /// First daughter index.
    Daughter1,
    /// Second daughter index.
    Daughter2,
    /// 1 for final-state particles, 0 otherwise.
    IsFinal,
    /// Approximate momentum fraction of the string energy.
    ZFraction,
    /// Production time; empty when not tracked.
    ProductionTime,
    /// Longitudinal direction tag.
    Direction,
}

impl Column {
    /// Default header label.
    pub fn default_label(&self) -> &'static str {
        match self {
            Column::Event => "Event",
            Column::Index => "Index",
            Column::Name => "Name",
            Column::Id => "ID",
            Column::Status => "Status",
            Column::Px => "px",
            Column::Py => "py",
            Column::Pz => "pz",
            Column::AbsPz => "abs_pz",
            Column::Pt => "pT",
            Column::E => "E",
            Column::Mass => "m",
            Column::Mother1 => "Mother1",
            Column::Mother2 => "Mother2",
            Column::Daughter1 => "Daughter1",
            Column::Daughter2 => "Daughter2",
            Column::IsFinal => "IsFinal",
            Column::ZFraction => "z",
            Column::ProductionTime => "t_prod",
            Column::Direction => "direction",
        }
    }
}

/// Column with an optional header label override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Exported field.
    pub column: Column,
    /// Header label; the column default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ColumnSpec {
    /// Column with its default label.
    pub fn new(column: Column) -> Self {
        Self {
            column,
            label: None,
        }
    }

    /// Column with a custom label.
    pub fn labeled(column: Column, label: impl Into<String>) -> Self {
        Self {
            column,
            label: Some(label.into()),
        }
    }

    /// Header label.
    pub fn label(&self) -> &str {
        self.label
            .as_deref()
            .unwrap_or_else(|| self.column.default_label())
    }
}

/// When fields are wrapped in double quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuoteMode {
    /// Only fields containing delimiters, quotes or newlines.
    #[default]
    Necessary,
    /// Every field that does not parse as a number (species names, suffixed labels).
    NonNumeric,
}

impl From<QuoteMode> for csv::QuoteStyle {
    fn from(mode: QuoteMode) -> Self {
        match mode {
            QuoteMode::Necessary => csv::QuoteStyle::Necessary,
            QuoteMode::NonNumeric => csv::QuoteStyle::NonNumeric,
        }
    }
}

/// Layout of the exported file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputFormat {
    /// Ordered columns.
    #[serde(default = "detailed_columns")]
    pub columns: Vec<ColumnSpec>,
    /// Fixed number of decimals for floating point fields; shortest
    /// round-trip form when null.
    #[serde(default = "default_precision")]
    pub precision: Option<usize>,
    /// Quoting rule for data rows. The header is never quoted beyond necessity.
    #[serde(default)]
    pub quote: QuoteMode,
    /// Text prepended to the first header label, e.g. `"# "`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_prefix: Option<String>,
}

fn default_precision() -> Option<usize> {
    Some(6)
}

/// The fifteen-column layout of the detailed first-hadron export.
pub fn detailed_columns() -> Vec<ColumnSpec> {
    [
        Column::Event,
        Column::Index,
        Column::Name,
        Column::Id,
        Column::Status,
        Column::Px,
        Column::Py,
        Column::Pz,
        Column::E,
        Column::Mass,
        Column::Mother1,
        Column::Mother2,
        Column::Daughter1,
        Column::Daughter2,
        Column::IsFinal,
    ]
    .into_iter()
    .map(ColumnSpec::new)
    .collect()
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self {
            columns: detailed_columns(),
            precision: default_precision(),
            quote: QuoteMode::Necessary,
            header_prefix: None,
        }
    }
}

impl OutputFormat {
    /// Rejects layouts that cannot produce a meaningful file.
    pub fn validate(&self) -> Result<(), FragError> {
        if self.columns.is_empty() {
            return Err(FragError::Config(ErrorInfo::new(
                "output-columns",
                "at least one output column is required",
            )));
        }
        if let Some(precision) = self.precision {
            if precision > 17 {
                return Err(FragError::Config(
                    ErrorInfo::new("output-precision", "precision above 17 decimals")
                        .with_context("precision", precision.to_string()),
                ));
            }
        }
        Ok(())
    }

    /// Header labels in column order, prefix applied.
    pub fn header(&self) -> Vec<String> {
        self.columns
            .iter()
            .enumerate()
            .map(|(position, spec)| match (&self.header_prefix, position) {
                (Some(prefix), 0) => format!("{prefix}{}", spec.label()),
                _ => spec.label().to_string(),
            })
            .collect()
    }
}

/// Event identifier written to the `Event` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventLabel {
    /// Event number in the run.
    pub event: usize,
    /// Position within a multi-member group.
    pub suffix: Option<usize>,
}

impl fmt::Display for EventLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.suffix {
            Some(suffix) => write!(f, "{}_{}", self.event, suffix),
            None => write!(f, "{}", self.event),
        }
    }
}

/// Per-run quantities needed by derived columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowContext {
    /// Assumed total string energy for `z`.
    pub string_energy: f64,
    /// |pz| threshold for the direction tag.
    pub direction_threshold: f64,
}

fn export_error(code: &str, err: impl ToString) -> FragError {
    FragError::Export(ErrorInfo::new(code, err.to_string()))
}

/// Appends one row per exported particle to a delimited text sink.
///
/// The header is written on construction. Each row is fully formatted
/// before it reaches the sink. Call [`RecordExporter::finish`] to flush.
pub struct RecordExporter<W: Write> {
    writer: csv::Writer<W>,
    format: OutputFormat,
    context: RowContext,
    rows: u64,
}

impl RecordExporter<BufWriter<File>> {
    /// Creates (or truncates) the file at `path` and writes the header.
    pub fn create(path: &Path, format: OutputFormat, context: RowContext) -> Result<Self, FragError> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|err| {
                FragError::Export(
                    ErrorInfo::new("export-mkdir", err.to_string())
                        .with_context("path", parent.display().to_string()),
                )
            })?;
        }
        let file = File::create(path).map_err(|err| {
            FragError::Export(
                ErrorInfo::new("export-open", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        Self::new(BufWriter::new(file), format, context)
    }
}

impl<W: Write> RecordExporter<W> {
    /// Wraps `sink` and writes the header.
    pub fn new(mut sink: W, format: OutputFormat, context: RowContext) -> Result<Self, FragError> {
        format.validate()?;
        {
            let mut header = csv::WriterBuilder::new().from_writer(&mut sink);
            header
                .write_record(format.header())
                .map_err(|err| export_error("export-header", err))?;
            header.flush().map_err(|err| export_error("export-header", err))?;
        }
        let writer = csv::WriterBuilder::new()
            .quote_style(format.quote.into())
            .from_writer(sink);
        Ok(Self {
            writer,
            format,
            context,
            rows: 0,
        })
    }

    /// Layout in use.
    pub fn format(&self) -> &OutputFormat {
        &self.format
    }

    /// Number of data rows written so far.
    pub fn rows_written(&self) -> u64 {
        self.rows
    }

    /// Formats and appends the row for `particle` at record `index`.
    pub fn write_row(
        &mut self,
        label: EventLabel,
        index: usize,
        particle: &Particle,
    ) -> Result<(), FragError> {
        let fields = self.format_row(label, index, particle);
        self.writer
            .write_record(&fields)
            .map_err(|err| export_error("export-row", err))?;
        self.rows += 1;
        Ok(())
    }

    /// Field values of one row without writing them.
    pub fn format_row(&self, label: EventLabel, index: usize, particle: &Particle) -> Vec<String> {
        self.format
            .columns
            .iter()
            .map(|spec| self.field(spec.column, label, index, particle))
            .collect()
    }

    fn float(&self, value: f64) -> String {
        match self.format.precision {
            Some(precision) => format!("{value:.precision$}"),
            None => value.to_string(),
        }
    }

    fn field(&self, column: Column, label: EventLabel, index: usize, particle: &Particle) -> String {
        match column {
            Column::Event => label.to_string(),
            Column::Index => index.to_string(),
            Column::Name => particle.name(),
            Column::Id => particle.id.to_string(),
            Column::Status => particle.status.to_string(),
            Column::Px => self.float(particle.px()),
            Column::Py => self.float(particle.py()),
            Column::Pz => self.float(particle.pz()),
            Column::AbsPz => self.float(particle.pz().abs()),
            Column::Pt => self.float(particle.pt()),
            Column::E => self.float(particle.e()),
            Column::Mass => self.float(particle.mass),
            Column::Mother1 => particle.mother1.to_string(),
            Column::Mother2 => particle.mother2.to_string(),
            Column::Daughter1 => particle.daughter1.to_string(),
            Column::Daughter2 => particle.daughter2.to_string(),
            Column::IsFinal => String::from(if particle.is_final() { "1" } else { "0" }),
            Column::ZFraction => {
                self.float(momentum_fraction(particle.e(), self.context.string_energy))
            }
            Column::ProductionTime => particle
                .production_time()
                .map(|time| self.float(time))
                .unwrap_or_default(),
            Column::Direction => {
                Direction::from_pz(particle.pz(), self.context.direction_threshold)
                    .as_str()
                    .to_string()
            }
        }
    }

    /// Flushes every buffered row and returns the underlying sink.
    pub fn finish(self) -> Result<W, FragError> {
        let mut sink = self
            .writer
            .into_inner()
            .map_err(|err| export_error("export-flush", err.error()))?;
        sink.flush().map_err(|err| export_error("export-flush", err))?;
        Ok(sink)
    }
}
