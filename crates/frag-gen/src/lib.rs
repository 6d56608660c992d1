//! Toy string-fragmentation event source.
//!
//! Stands in for a full event generator: it accepts a manually seeded
//! colour-singlet quark-antiquark pair, splits the string into primary
//! mesons (status 83/84) with breakpoint production vertices, and
//! optionally decays short-lived states. It reproduces the record layout
//! the analysis expects, not the physics of a tuned generator.

pub mod decay;
pub mod flavour;
pub mod fragmentation;
mod settings;
mod source;

pub use fragmentation::{fragment, PrimaryHadron, STATUS_BOTTOM_END, STATUS_TOP_END};
pub use settings::GeneratorSettings;
pub use source::{ToyStringSource, MAX_SEED_FLAVOUR};
