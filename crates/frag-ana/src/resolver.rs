//! Identification of the earliest produced primary hadrons.
//!
//! Candidates are ordered by production time. When any candidate lacks a
//! production vertex, or has a non-finite time, the whole event falls back
//! to record order, so times from the two sources are never compared with
//! each other. The simultaneity group is every candidate within
//! `tolerance` of the earliest time.

use std::collections::BTreeMap;
use std::fmt;

use frag_core::{Event, Vertex};
use serde::{Deserialize, Serialize};

use crate::classifier::Candidate;

/// Options controlling first-hadron resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolverOptions {
    /// Maximum production-time difference still counted as simultaneous.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// |pz| (GeV) above which a hadron is tagged as moving along the string axis.
    #[serde(default = "default_direction_threshold")]
    pub direction_threshold: f64,
}

fn default_tolerance() -> f64 {
    1e-10
}

fn default_direction_threshold() -> f64 {
    0.1
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            direction_threshold: default_direction_threshold(),
        }
    }
}

/// Where the ordering times of an event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeSource {
    /// Time component of the production vertex.
    Vertex,
    /// Record index, used when vertex information is missing or not finite.
    RecordIndex,
}

impl fmt::Display for TimeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeSource::Vertex => write!(f, "production time"),
            TimeSource::RecordIndex => write!(f, "record index"),
        }
    }
}

/// Coarse longitudinal direction of a hadron.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// Moving along +z.
    Positive,
    /// Moving along -z.
    Negative,
    /// |pz| at or below the threshold.
    Transverse,
}

impl Direction {
    /// Tags `pz` against a symmetric threshold.
    pub fn from_pz(pz: f64, threshold: f64) -> Self {
        if pz > threshold {
            Direction::Positive
        } else if pz < -threshold {
            Direction::Negative
        } else {
            Direction::Transverse
        }
    }

    /// Lowercase label used in exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Positive => "positive",
            Direction::Negative => "negative",
            Direction::Transverse => "transverse",
        }
    }
}

/// Energy fraction of the string carried by a hadron.
///
/// `string_energy` is an assumed total, twice the energy of one seed
/// parton for symmetric back-to-back seeding. It is not derived from the
/// invariant mass of the string.
pub fn momentum_fraction(energy: f64, string_energy: f64) -> f64 {
    energy / string_energy
}

/// Candidate paired with the time used to order it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedCandidate {
    /// Record index.
    pub index: usize,
    /// Status code.
    pub status: i32,
    /// Ordering time (production time or record index).
    pub time: f64,
}

/// Derived metrics for one member of the simultaneity group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMember {
    /// Record index.
    pub index: usize,
    /// Status code.
    pub status: i32,
    /// Ordering time.
    pub time: f64,
    /// Energy.
    pub energy: f64,
    /// Transverse momentum.
    pub pt: f64,
    /// Longitudinal direction tag.
    pub direction: Direction,
    /// Approximate momentum fraction `E / string_energy`.
    pub z_fraction: f64,
    /// Mother pair.
    pub mothers: (i32, i32),
    /// Production vertex when the event tracks vertices.
    pub vertex: Option<Vertex>,
}

/// Outcome of resolving the first hadrons of an event.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Source of the ordering times.
    pub time_source: TimeSource,
    /// All candidates sorted by ascending time, stable for ties.
    pub ordered: Vec<TimedCandidate>,
    /// Simultaneity group in sorted order; never empty.
    pub group: Vec<GroupMember>,
    /// Group members keyed by their (mother1, mother2) pair.
    pub by_mothers: BTreeMap<(i32, i32), Vec<usize>>,
}

impl Resolution {
    /// Earliest ordering time.
    pub fn earliest_time(&self) -> f64 {
        self.ordered[0].time
    }

    /// Group member with the largest energy; the first one wins ties.
    pub fn most_energetic(&self) -> &GroupMember {
        let mut best = &self.group[0];
        for member in &self.group[1..] {
            if member.energy > best.energy {
                best = member;
            }
        }
        best
    }

    /// Whether every group member comes from the same mother pair.
    pub fn single_mother_pair(&self) -> bool {
        self.by_mothers.len() == 1
    }
}

/// Resolves the first-produced hadrons among `candidates`.
///
/// Returns `None` when there are no candidates (or none of them index into
/// `event`); the event then has nothing to export.
pub fn resolve(
    event: &Event,
    candidates: &[Candidate],
    options: &ResolverOptions,
    string_energy: f64,
) -> Option<Resolution> {
    let present: Vec<Candidate> = candidates
        .iter()
        .copied()
        .filter(|candidate| candidate.index < event.len())
        .collect();
    if present.is_empty() {
        return None;
    }

    let time_source = if present.iter().all(|candidate| {
        event[candidate.index]
            .production_time()
            .is_some_and(f64::is_finite)
    }) {
        TimeSource::Vertex
    } else {
        TimeSource::RecordIndex
    };

    let mut ordered: Vec<TimedCandidate> = present
        .iter()
        .map(|candidate| TimedCandidate {
            index: candidate.index,
            status: candidate.status,
            time: match time_source {
                TimeSource::Vertex => event[candidate.index].production_time().unwrap_or_default(),
                TimeSource::RecordIndex => candidate.index as f64,
            },
        })
        .collect();
    ordered.sort_by(|a, b| a.time.total_cmp(&b.time));

    let earliest = ordered[0].time;
    let mut group = Vec::new();
    let mut by_mothers: BTreeMap<(i32, i32), Vec<usize>> = BTreeMap::new();
    for timed in &ordered {
        if !group.is_empty() && timed.time - earliest > options.tolerance {
            break;
        }
        let particle = &event[timed.index];
        let mothers = (particle.mother1, particle.mother2);
        by_mothers.entry(mothers).or_default().push(timed.index);
        group.push(GroupMember {
            index: timed.index,
            status: timed.status,
            time: timed.time,
            energy: particle.e(),
            pt: particle.pt(),
            direction: Direction::from_pz(particle.pz(), options.direction_threshold),
            z_fraction: momentum_fraction(particle.e(), string_energy),
            mothers,
            vertex: particle.production,
        });
    }

    Some(Resolution {
        time_source,
        ordered,
        group,
        by_mothers,
    })
}
