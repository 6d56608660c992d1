use frag_core::errors::{ErrorInfo, FragError};
use frag_core::{
    species, Event, EventSource, FourMomentum, GenerationStats, Particle, RngHandle, SeedParton,
    Vertex,
};
use tracing::debug;

use crate::decay;
use crate::fragmentation::fragment;
use crate::settings::GeneratorSettings;

const SOURCE_NAME: &str = "toy-string";

/// Heaviest seed flavour with mesons in the species table (s).
pub const MAX_SEED_FLAVOUR: i32 = 3;

fn config_error(field: &str, message: impl Into<String>) -> FragError {
    FragError::Config(ErrorInfo::new("generator-settings", message).with_context("field", field))
}

/// Event source running the toy string model on a manually seeded
/// quark-antiquark pair.
///
/// Attempt `n` (counting failures) draws its randomness from substream `n`
/// of the master seed, so a run is reproducible event by event.
#[derive(Debug, Clone)]
pub struct ToyStringSource {
    settings: GeneratorSettings,
    event: Event,
    stats: GenerationStats,
}

impl ToyStringSource {
    /// Creates a source after validating the settings.
    pub fn new(settings: GeneratorSettings) -> Result<Self, FragError> {
        if !(settings.string_tension > 0.0) {
            return Err(config_error("string_tension", "string tension must be positive"));
        }
        if !(settings.stop_mass > 0.0) {
            return Err(config_error("stop_mass", "stop mass must be positive"));
        }
        if !(settings.pt_sigma >= 0.0) {
            return Err(config_error("pt_sigma", "pT width must not be negative"));
        }
        if !(settings.lund_a >= 0.0 && settings.lund_b > 0.0) {
            return Err(config_error("lund", "Lund a must be >= 0 and b > 0"));
        }
        if !(0.0..=1.0).contains(&settings.vector_fraction) {
            return Err(config_error("vector_fraction", "vector fraction must lie in [0, 1]"));
        }
        for (field, value) in [
            ("strange_suppression", settings.strange_suppression),
            ("eta_suppression", settings.eta_suppression),
            ("eta_prime_suppression", settings.eta_prime_suppression),
        ] {
            if !(value >= 0.0) {
                return Err(config_error(field, "suppression weights must not be negative"));
            }
        }
        Ok(Self {
            settings,
            event: Event::new(),
            stats: GenerationStats::default(),
        })
    }

    /// Settings the source was built with.
    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    fn hadronize(&mut self, rng: &mut RngHandle) -> Result<(), FragError> {
        let partons: Vec<usize> = self
            .event
            .iter()
            .filter(|(_, particle)| particle.is_final() && species::is_quark(particle.id))
            .map(|(index, _)| index)
            .collect();
        let (iq, iqbar) = match partons.as_slice() {
            [a, b] if self.event[*a].id > 0 && self.event[*b].id < 0 => (*a, *b),
            [a, b] if self.event[*a].id < 0 && self.event[*b].id > 0 => (*b, *a),
            _ => {
                return Err(FragError::Generation(
                    ErrorInfo::new("seed-partons", "expected exactly one quark and one antiquark")
                        .with_context("partons", partons.len().to_string()),
                ))
            }
        };
        let quark = self.event[iq].clone();
        let antiquark = self.event[iqbar].clone();
        if quark.id > MAX_SEED_FLAVOUR || -antiquark.id > MAX_SEED_FLAVOUR {
            return Err(FragError::Generation(
                ErrorInfo::new("seed-flavour", "only d, u and s strings can be fragmented")
                    .with_context("quark", quark.id.to_string())
                    .with_context("antiquark", antiquark.id.to_string()),
            ));
        }
        if quark.col == 0 || quark.acol != 0 || antiquark.col != 0 || quark.col != antiquark.acol {
            return Err(FragError::Generation(
                ErrorInfo::new("colour-singlet", "seed partons do not form a colour singlet")
                    .with_context("quark_col", quark.col.to_string())
                    .with_context("antiquark_acol", antiquark.acol.to_string()),
            ));
        }

        let total = quark.momentum + antiquark.momentum;
        let string_mass = total.m();
        if !(string_mass >= self.settings.stop_mass) {
            return Err(FragError::Generation(
                ErrorInfo::new("string-mass", "string mass below the stop mass")
                    .with_context("mass", format!("{string_mass:.6}")),
            ));
        }
        let beta = total.velocity();
        let quark_rest = quark.momentum.boosted([-beta[0], -beta[1], -beta[2]]);
        if quark_rest.pt() > 1e-6 * string_mass {
            return Err(FragError::Generation(
                ErrorInfo::new("string-axis", "string axis must lie along z")
                    .with_hint("seed partons back to back along z in their rest frame"),
            ));
        }
        let axis = if quark_rest.pz >= 0.0 { 1.0 } else { -1.0 };

        let hadrons = fragment(quark.id, antiquark.id, string_mass, &self.settings, rng);
        let (mother1, mother2) = (iq.min(iqbar) as i32, iq.max(iqbar) as i32);
        let first = self.event.len();
        for hadron in &hadrons {
            let local = FourMomentum::new(
                hadron.momentum.px,
                hadron.momentum.py,
                axis * hadron.momentum.pz,
                hadron.momentum.e,
            );
            let mut particle = Particle::new(hadron.id, hadron.status, local.boosted(beta), hadron.mass)
                .with_mothers(mother1, mother2);
            if self.settings.track_vertices {
                let point = FourMomentum::new(
                    hadron.vertex.x,
                    hadron.vertex.y,
                    axis * hadron.vertex.z,
                    hadron.vertex.t,
                )
                .boosted(beta);
                particle = particle.with_production(Vertex::new(point.px, point.py, point.pz, point.e));
            }
            self.event.push(particle);
        }
        let last = self.event.len() - 1;
        for index in [iq, iqbar] {
            if let Some(parton) = self.event.get_mut(index) {
                parton.status = -parton.status.abs();
                parton.daughter1 = first as i32;
                parton.daughter2 = last as i32;
            }
        }

        if self.settings.decays {
            decay::decay_all(&mut self.event, rng);
        }
        debug!(
            primaries = hadrons.len(),
            particles = self.event.len(),
            "string hadronized"
        );
        Ok(())
    }
}

impl EventSource for ToyStringSource {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    fn reset(&mut self) {
        self.event.reset();
    }

    fn append(&mut self, seed: &SeedParton) -> usize {
        self.event.append(seed)
    }

    fn generate_next(&mut self) -> Result<(), FragError> {
        let mut rng = RngHandle::for_substream(self.settings.master_seed, self.stats.tried);
        let outcome = self.hadronize(&mut rng);
        self.stats.record(outcome.is_ok());
        outcome
    }

    fn event(&self) -> &Event {
        &self.event
    }

    fn statistics(&self) -> GenerationStats {
        self.stats
    }
}
