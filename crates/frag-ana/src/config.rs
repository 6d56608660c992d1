use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use frag_core::errors::{ErrorInfo, FragError};
use frag_core::{FourMomentum, SeedParton};
use frag_gen::{GeneratorSettings, MAX_SEED_FLAVOUR};
use serde::{Deserialize, Serialize};

use crate::export::{Column, ColumnSpec, OutputFormat, QuoteMode};
use crate::resolver::ResolverOptions;
use crate::selection::SelectionPolicy;

/// YAML-configurable parameters of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of generation attempts; failures still count.
    #[serde(default = "default_events")]
    pub events: usize,
    /// Seed partons injected before every event.
    #[serde(default)]
    pub seed: SeedConfig,
    /// Event source settings.
    #[serde(default)]
    pub generator: GeneratorSettings,
    /// Particle selection rule.
    #[serde(default)]
    pub selection: SelectionPolicy,
    /// First-hadron resolution options.
    #[serde(default)]
    pub resolver: ResolverOptions,
    /// Output file and layout.
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_events() -> usize {
    10
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            events: default_events(),
            seed: SeedConfig::default(),
            generator: GeneratorSettings::default(),
            selection: SelectionPolicy::default(),
            resolver: ResolverOptions::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Symmetric back-to-back quark-antiquark seeding along z.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Energy of each parton (GeV); the quark moves along +z.
    #[serde(default = "default_energy")]
    pub energy: f64,
    /// Quark flavour code; the antiquark carries the negated code.
    #[serde(default = "default_quark")]
    pub quark: i32,
    /// Status code given to both partons.
    #[serde(default = "default_parton_status")]
    pub status: i32,
    /// Colour tag shared by the quark colour and the antiquark anticolour.
    #[serde(default = "default_colour")]
    pub colour: i32,
}

fn default_energy() -> f64 {
    5.0
}

fn default_quark() -> i32 {
    1
}

fn default_parton_status() -> i32 {
    23
}

fn default_colour() -> i32 {
    101
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            energy: default_energy(),
            quark: default_quark(),
            status: default_parton_status(),
            colour: default_colour(),
        }
    }
}

impl SeedConfig {
    /// Quark and antiquark forming a colour singlet.
    pub fn partons(&self) -> [SeedParton; 2] {
        [
            SeedParton {
                id: self.quark,
                status: self.status,
                col: self.colour,
                acol: 0,
                momentum: FourMomentum::new(0.0, 0.0, self.energy, self.energy),
                mass: 0.0,
            },
            SeedParton {
                id: -self.quark,
                status: self.status,
                col: 0,
                acol: self.colour,
                momentum: FourMomentum::new(0.0, 0.0, -self.energy, self.energy),
                mass: 0.0,
            },
        ]
    }

    /// Total string energy assumed for momentum fractions: twice the
    /// single-parton energy. Only meaningful for this symmetric seeding.
    pub fn assumed_string_energy(&self) -> f64 {
        2.0 * self.energy
    }
}

/// Output path and file layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// CSV file written by the run.
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
    /// Column layout and formatting.
    #[serde(flatten)]
    pub format: OutputFormat,
}

fn default_output_path() -> PathBuf {
    PathBuf::from("first_hadron_data.csv")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            format: OutputFormat::default(),
        }
    }
}

fn config_error(code: &str, message: &str) -> FragError {
    FragError::Config(ErrorInfo::new(code, message))
}

impl RunConfig {
    /// Parses a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, FragError> {
        serde_yaml::from_str(yaml)
            .map_err(|err| FragError::Serde(ErrorInfo::new("config-parse", err.to_string())))
    }

    /// Loads and validates a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self, FragError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            FragError::Config(
                ErrorInfo::new("config-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        let config = Self::from_yaml_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Renders the configuration as YAML.
    pub fn to_yaml_string(&self) -> Result<String, FragError> {
        serde_yaml::to_string(self)
            .map_err(|err| FragError::Serde(ErrorInfo::new("config-serialize", err.to_string())))
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), FragError> {
        if !(self.seed.energy > 0.0 && self.seed.energy.is_finite()) {
            return Err(FragError::Config(
                ErrorInfo::new("seed-energy", "seed energy must be positive and finite")
                    .with_context("energy", self.seed.energy.to_string()),
            ));
        }
        if !(1..=MAX_SEED_FLAVOUR).contains(&self.seed.quark) {
            return Err(FragError::Config(
                ErrorInfo::new("seed-quark", "seed quark must be d (1), u (2) or s (3)")
                    .with_context("quark", self.seed.quark.to_string())
                    .with_hint("the antiquark is derived by negating the code"),
            ));
        }
        if self.seed.colour <= 0 {
            return Err(config_error("seed-colour", "colour tag must be positive"));
        }
        if !(self.resolver.tolerance >= 0.0) {
            return Err(config_error("resolver-tolerance", "tolerance must not be negative"));
        }
        if !(self.resolver.direction_threshold >= 0.0) {
            return Err(config_error(
                "resolver-direction",
                "direction threshold must not be negative",
            ));
        }
        if let SelectionPolicy::MostEnergetic { species } = &self.selection {
            if species.is_empty() {
                return Err(config_error(
                    "selection-species",
                    "most-energetic selection needs at least one species",
                ));
            }
        }
        self.output.format.validate()
    }

    /// Assumed total string energy used for momentum fractions.
    pub fn string_energy(&self) -> f64 {
        self.seed.assumed_string_energy()
    }
}

/// Named configurations reproducing the standard analyses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Earliest primary hadrons at 5 GeV with the detailed 15-column export.
    FirstHadron,
    /// Every final-state hadron at 5 GeV.
    FinalHadrons,
    /// Most energetic final pion at 50 GeV without decays.
    LeadingPion,
    /// First final-state particle at 50 GeV, u/d pseudoscalars only, no decays.
    FirstFinal,
}

impl Preset {
    /// Every preset in listing order.
    pub const ALL: [Preset; 4] = [
        Preset::FirstHadron,
        Preset::FinalHadrons,
        Preset::LeadingPion,
        Preset::FirstFinal,
    ];

    /// Name accepted on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Preset::FirstHadron => "first-hadron",
            Preset::FinalHadrons => "final-hadrons",
            Preset::LeadingPion => "leading-pion",
            Preset::FirstFinal => "first-final",
        }
    }

    /// One-line description.
    pub fn description(&self) -> &'static str {
        match self {
            Preset::FirstHadron => "earliest primary hadron(s) of a 5 GeV d-dbar string, detailed columns",
            Preset::FinalHadrons => "all final-state hadrons of a 5 GeV d-dbar string",
            Preset::LeadingPion => "most energetic final pion of a 50 GeV string, decays off",
            Preset::FirstFinal => "first final-state particle, 50 GeV, u/d pseudoscalars only, decays off",
        }
    }

    /// Full run configuration of the preset.
    pub fn config(&self) -> RunConfig {
        match self {
            Preset::FirstHadron => RunConfig::default(),
            Preset::FinalHadrons => RunConfig {
                selection: SelectionPolicy::AllFinalHadrons,
                output: OutputConfig {
                    path: PathBuf::from("momentum_data.csv"),
                    format: OutputFormat {
                        columns: vec![
                            ColumnSpec::new(Column::Event),
                            ColumnSpec::labeled(Column::Id, "Particle_ID"),
                            ColumnSpec::new(Column::Px),
                            ColumnSpec::new(Column::Py),
                            ColumnSpec::new(Column::Pz),
                            ColumnSpec::new(Column::E),
                            ColumnSpec::labeled(Column::Mass, "mass"),
                        ],
                        precision: None,
                        quote: QuoteMode::Necessary,
                        header_prefix: Some("# ".into()),
                    },
                },
                ..RunConfig::default()
            },
            Preset::LeadingPion => RunConfig {
                events: 10_000,
                seed: SeedConfig {
                    energy: 50.0,
                    status: 71,
                    ..SeedConfig::default()
                },
                generator: GeneratorSettings {
                    decays: false,
                    ..GeneratorSettings::default()
                },
                selection: SelectionPolicy::leading_pion(),
                output: OutputConfig {
                    path: PathBuf::from("events_output_100gev.csv"),
                    format: OutputFormat {
                        columns: vec![
                            ColumnSpec::new(Column::Event),
                            ColumnSpec::labeled(Column::Name, "Particle"),
                            ColumnSpec::labeled(Column::AbsPz, "Particle_pz"),
                            ColumnSpec::labeled(Column::Pt, "Particle_pT"),
                            ColumnSpec::labeled(Column::Px, "Particle_px"),
                            ColumnSpec::labeled(Column::Py, "Particle_py"),
                            ColumnSpec::labeled(Column::E, "Particle_E"),
                        ],
                        precision: None,
                        quote: QuoteMode::NonNumeric,
                        header_prefix: None,
                    },
                },
                ..RunConfig::default()
            },
            Preset::FirstFinal => RunConfig {
                events: 10_000,
                seed: SeedConfig {
                    energy: 50.0,
                    ..SeedConfig::default()
                },
                generator: GeneratorSettings {
                    decays: false,
                    ..GeneratorSettings::default().light_pseudoscalars_only()
                },
                selection: SelectionPolicy::FirstFinal,
                output: OutputConfig {
                    path: PathBuf::from("first_emission_50gev.csv"),
                    format: OutputFormat {
                        columns: vec![
                            ColumnSpec::new(Column::Event),
                            ColumnSpec::new(Column::Name),
                            ColumnSpec::labeled(Column::Id, "Pid"),
                            ColumnSpec::labeled(Column::Px, "Particle_px"),
                            ColumnSpec::labeled(Column::Py, "Particle_py"),
                            ColumnSpec::labeled(Column::Pz, "Particle_pz"),
                            ColumnSpec::labeled(Column::E, "Particle_E"),
                            ColumnSpec::labeled(Column::Pt, "Particle_pT"),
                        ],
                        precision: None,
                        quote: QuoteMode::Necessary,
                        header_prefix: None,
                    },
                },
                ..RunConfig::default()
            },
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = FragError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|preset| preset.name() == value)
            .ok_or_else(|| {
                FragError::Config(
                    ErrorInfo::new("unknown-preset", format!("unknown preset `{value}`")).with_hint(
                        Preset::ALL
                            .iter()
                            .map(Preset::name)
                            .collect::<Vec<_>>()
                            .join(", "),
                    ),
                )
            })
    }
}

