//! Particle and event records.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::species;
use crate::vector::{FourMomentum, Vertex};

/// PDG code of the bookkeeping entry stored at index 0 of every event.
pub const SYSTEM_ID: i32 = 90;

/// One entry of an event record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// PDG species code.
    pub id: i32,
    /// Status code. Positive entries are final, negative ones were processed.
    pub status: i32,
    /// First mother index (0 when absent).
    pub mother1: i32,
    /// Second mother index (0 when absent).
    pub mother2: i32,
    /// First daughter index (0 when absent).
    pub daughter1: i32,
    /// Second daughter index (0 when absent).
    pub daughter2: i32,
    /// Colour tag (0 when colourless).
    pub col: i32,
    /// Anticolour tag (0 when colourless).
    pub acol: i32,
    /// Four-momentum; the mass shell is not enforced.
    pub momentum: FourMomentum,
    /// Mass assigned by the producer.
    pub mass: f64,
    /// Production point when the source tracks space-time information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production: Option<Vertex>,
}

impl Particle {
    /// Creates a particle with no mother/daughter links or vertex.
    pub fn new(id: i32, status: i32, momentum: FourMomentum, mass: f64) -> Self {
        Self {
            id,
            status,
            mother1: 0,
            mother2: 0,
            daughter1: 0,
            daughter2: 0,
            col: 0,
            acol: 0,
            momentum,
            mass,
            production: None,
        }
    }

    /// Sets both mother indices.
    pub fn with_mothers(mut self, mother1: i32, mother2: i32) -> Self {
        self.mother1 = mother1;
        self.mother2 = mother2;
        self
    }

    /// Sets the production vertex.
    pub fn with_production(mut self, vertex: Vertex) -> Self {
        self.production = Some(vertex);
        self
    }

    /// Species name.
    pub fn name(&self) -> String {
        species::name(self.id)
    }

    /// Whether the particle survived to the end of the simulation.
    pub fn is_final(&self) -> bool {
        self.status > 0
    }

    /// Whether the species is a hadron.
    pub fn is_hadron(&self) -> bool {
        species::is_hadron(self.id)
    }

    /// Momentum along x.
    pub fn px(&self) -> f64 {
        self.momentum.px
    }

    /// Momentum along y.
    pub fn py(&self) -> f64 {
        self.momentum.py
    }

    /// Momentum along z.
    pub fn pz(&self) -> f64 {
        self.momentum.pz
    }

    /// Energy.
    pub fn e(&self) -> f64 {
        self.momentum.e
    }

    /// Transverse momentum.
    pub fn pt(&self) -> f64 {
        self.momentum.pt()
    }

    /// Production time, if tracked.
    pub fn production_time(&self) -> Option<f64> {
        self.production.map(|vertex| vertex.t)
    }
}

/// Manually specified parton injected before generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeedParton {
    /// PDG species code.
    pub id: i32,
    /// Status code handed to the source.
    pub status: i32,
    /// Colour tag.
    pub col: i32,
    /// Anticolour tag.
    pub acol: i32,
    /// Four-momentum.
    pub momentum: FourMomentum,
    /// Mass.
    pub mass: f64,
}

impl SeedParton {
    /// Converts the seed into an event entry.
    pub fn to_particle(&self) -> Particle {
        let mut particle = Particle::new(self.id, self.status, self.momentum, self.mass);
        particle.col = self.col;
        particle.acol = self.acol;
        particle
    }
}

/// Ordered particle list for a single event. Index 0 is the system entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    particles: Vec<Particle>,
}

impl Default for Event {
    fn default() -> Self {
        Self::new()
    }
}

impl Event {
    /// Creates an event holding only the system entry.
    pub fn new() -> Self {
        let mut event = Self {
            particles: Vec::with_capacity(64),
        };
        event.reset();
        event
    }

    /// Clears the record for reuse, keeping the allocation.
    pub fn reset(&mut self) {
        self.particles.clear();
        self.particles
            .push(Particle::new(SYSTEM_ID, -11, FourMomentum::default(), 0.0));
    }

    /// Appends a particle and returns its index.
    pub fn push(&mut self, particle: Particle) -> usize {
        self.particles.push(particle);
        self.particles.len() - 1
    }

    /// Appends a seed parton and returns its index.
    pub fn append(&mut self, seed: &SeedParton) -> usize {
        self.push(seed.to_particle())
    }

    /// Number of entries including the system entry.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the record holds nothing beyond the system entry.
    pub fn is_empty(&self) -> bool {
        self.particles.len() <= 1
    }

    /// Entry at `index`.
    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    /// Mutable entry at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Particle> {
        self.particles.get_mut(index)
    }

    /// All entries in record order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Iterates over `(index, particle)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Particle)> + '_ {
        self.particles.iter().enumerate()
    }
}

impl Index<usize> for Event {
    type Output = Particle;

    fn index(&self, index: usize) -> &Particle {
        &self.particles[index]
    }
}
