//! Hadron classification by status code and species.

use std::ops::RangeInclusive;

use frag_core::{Event, Particle};
use serde::{Deserialize, Serialize};

/// Status magnitudes reserved for primary hadrons from string fragmentation.
pub const PRIMARY_STATUS: RangeInclusive<i32> = 81..=89;

/// A primary hadron found in an event, identified by record position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Candidate {
    /// Index in the event record.
    pub index: usize,
    /// Status code at classification time.
    pub status: i32,
}

/// True for hadrons produced directly by string fragmentation, decayed or not.
pub fn is_primary_hadron(particle: &Particle) -> bool {
    PRIMARY_STATUS.contains(&particle.status.abs()) && particle.is_hadron()
}

/// True for hadrons still present at the end of the simulation.
pub fn is_final_hadron(particle: &Particle) -> bool {
    particle.is_final() && particle.is_hadron()
}

/// All primary hadrons of `event` in record order.
pub fn primary_candidates(event: &Event) -> Vec<Candidate> {
    event
        .iter()
        .filter(|(_, particle)| is_primary_hadron(particle))
        .map(|(index, particle)| Candidate {
            index,
            status: particle.status,
        })
        .collect()
}

/// Record indices of all final-state hadrons of `event`.
pub fn final_hadrons(event: &Event) -> Vec<usize> {
    event
        .iter()
        .filter(|(_, particle)| is_final_hadron(particle))
        .map(|(index, _)| index)
        .collect()
}
