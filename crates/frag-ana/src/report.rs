//! Human readable per-event report used by `inspect`.

use std::fmt;

use frag_core::{Event, Particle};

use crate::classifier::{final_hadrons, primary_candidates};
use crate::resolver::{momentum_fraction, resolve, Resolution, ResolverOptions, TimeSource};

/// Whether `particle` hangs below a two-parton string: both mothers set
/// and ordered.
pub fn from_string(particle: &Particle) -> bool {
    particle.mother1 >= 0 && particle.mother2 >= 0 && particle.mother1 < particle.mother2
}

/// Displayable analysis of one generated event.
pub struct EventReport<'a> {
    event_index: usize,
    event: &'a Event,
    resolution: Option<Resolution>,
    string_energy: f64,
}

impl<'a> EventReport<'a> {
    /// Classifies and resolves `event` up front.
    pub fn new(
        event_index: usize,
        event: &'a Event,
        options: &ResolverOptions,
        string_energy: f64,
    ) -> Self {
        let candidates = primary_candidates(event);
        Self {
            event_index,
            event,
            resolution: resolve(event, &candidates, options, string_energy),
            string_energy,
        }
    }

    /// First-hadron resolution, absent when the event has no primary hadrons.
    pub fn resolution(&self) -> Option<&Resolution> {
        self.resolution.as_ref()
    }

    fn write_primaries(&self, f: &mut fmt::Formatter<'_>, resolution: &Resolution) -> fmt::Result {
        writeln!(f, "Primary hadrons: {}", resolution.ordered.len())?;
        let mut indices: Vec<usize> = resolution.ordered.iter().map(|c| c.index).collect();
        indices.sort_unstable();
        for index in indices {
            let particle = &self.event[index];
            writeln!(
                f,
                "  [{index:>4}] {:<10} id={:<6} status={:<4} {:<7} {}mothers=({}, {})",
                particle.name(),
                particle.id,
                particle.status,
                if particle.is_final() { "final" } else { "decayed" },
                if from_string(particle) { "string " } else { "" },
                particle.mother1,
                particle.mother2,
            )?;
        }
        Ok(())
    }

    fn write_group(&self, f: &mut fmt::Formatter<'_>, resolution: &Resolution) -> fmt::Result {
        match resolution.time_source {
            TimeSource::Vertex => writeln!(f, "Ordering: production vertex time")?,
            TimeSource::RecordIndex => {
                writeln!(f, "Ordering: record index (vertex information unavailable)")?
            }
        }
        writeln!(
            f,
            "First hadron group: {} member(s) at t = {:.6e}",
            resolution.group.len(),
            resolution.earliest_time()
        )?;
        for member in &resolution.group {
            let particle = &self.event[member.index];
            writeln!(
                f,
                "  [{:>4}] {:<10} E={:.6} pT={:.6} pz={:.6} direction={} z={:.6}",
                member.index,
                particle.name(),
                member.energy,
                member.pt,
                particle.pz(),
                member.direction.as_str(),
                member.z_fraction,
            )?;
            if let Some(vertex) = member.vertex {
                writeln!(
                    f,
                    "         vertex x={:.6e} y={:.6e} z={:.6e} t={:.6e}",
                    vertex.x, vertex.y, vertex.z, vertex.t
                )?;
            }
        }
        if resolution.group.len() > 1 {
            let leading = resolution.most_energetic();
            writeln!(f, "Most energetic member: [{}]", leading.index)?;
        }

        writeln!(f, "Mother grouping:")?;
        for ((mother1, mother2), members) in &resolution.by_mothers {
            writeln!(f, "  ({mother1}, {mother2}) -> {members:?}")?;
        }
        if !resolution.single_mother_pair() {
            writeln!(f, "  note: group spans several mother pairs")?;
        }
        Ok(())
    }

    fn write_sequence(&self, f: &mut fmt::Formatter<'_>, resolution: &Resolution) -> fmt::Result {
        writeln!(f, "Fragmentation sequence:")?;
        for (rank, timed) in resolution.ordered.iter().enumerate() {
            let particle = &self.event[timed.index];
            writeln!(
                f,
                "  {:>3}. [{:>4}] {:<10} t={:.6e} z={:.6}",
                rank + 1,
                timed.index,
                particle.name(),
                timed.time,
                momentum_fraction(particle.e(), self.string_energy),
            )?;
        }
        Ok(())
    }

    fn write_finals(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let finals = final_hadrons(self.event);
        writeln!(f, "Final-state hadrons: {}", finals.len())?;
        for index in finals {
            let particle = &self.event[index];
            writeln!(
                f,
                "  [{index:>4}] {:<10} E={:.6} pT={:.6}",
                particle.name(),
                particle.e(),
                particle.pt(),
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for EventReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "=== Event {} ({} entries) ===",
            self.event_index,
            self.event.len()
        )?;
        match &self.resolution {
            Some(resolution) => {
                self.write_primaries(f, resolution)?;
                self.write_group(f, resolution)?;
                self.write_sequence(f, resolution)?;
            }
            None => writeln!(f, "No primary hadrons found.")?,
        }
        self.write_finals(f)
    }
}
