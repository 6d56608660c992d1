#![deny(missing_docs)]
#![doc = "Particle records, species classification and the event-source contract shared by the frag crates."]

pub mod errors;
pub mod particle;
pub mod provenance;
pub mod rng;
pub mod species;
mod types;
pub mod vector;

pub use errors::{ErrorInfo, FragError};
pub use particle::{Event, Particle, SeedParton, SYSTEM_ID};
pub use provenance::{RunProvenance, SchemaVersion};
pub use rng::{derive_substream_seed, RngHandle};
pub use types::GenerationStats;
pub use vector::{FourMomentum, Vertex};

/// Capability of an external event generator driven by manual parton seeding.
///
/// One iteration is `reset`, one `append` per seed parton, then
/// `generate_next`. After a successful call the particle list returned by
/// `event` stays valid until the next `reset`.
pub trait EventSource {
    /// Short identifier recorded in run provenance.
    fn name(&self) -> &str;

    /// Clears the particle list for reuse.
    fn reset(&mut self);

    /// Injects a manually specified parton and returns its index.
    fn append(&mut self, seed: &SeedParton) -> usize;

    /// Runs shower, hadronization and optional decays on the seeded state.
    ///
    /// A [`FragError::Generation`] only forfeits the current event.
    fn generate_next(&mut self) -> Result<(), FragError>;

    /// Read-only access to the current particle list.
    fn event(&self) -> &Event;

    /// Generation counters accumulated since construction.
    fn statistics(&self) -> GenerationStats;
}

impl<S: EventSource + ?Sized> EventSource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn append(&mut self, seed: &SeedParton) -> usize {
        (**self).append(seed)
    }

    fn generate_next(&mut self) -> Result<(), FragError> {
        (**self).generate_next()
    }

    fn event(&self) -> &Event {
        (**self).event()
    }

    fn statistics(&self) -> GenerationStats {
        (**self).statistics()
    }
}
