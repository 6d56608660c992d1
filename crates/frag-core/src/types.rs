use std::fmt;

use serde::{Deserialize, Serialize};

/// Counters maintained by an event source across a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Number of `generate_next` calls.
    pub tried: u64,
    /// Calls that produced an event.
    pub accepted: u64,
    /// Calls that failed.
    pub failed: u64,
}

impl GenerationStats {
    /// Records the outcome of one generation attempt.
    pub fn record(&mut self, success: bool) {
        self.tried += 1;
        if success {
            self.accepted += 1;
        } else {
            self.failed += 1;
        }
    }

    /// Fraction of attempts that produced an event (0 when nothing was tried).
    pub fn efficiency(&self) -> f64 {
        if self.tried == 0 {
            0.0
        } else {
            self.accepted as f64 / self.tried as f64
        }
    }
}

impl fmt::Display for GenerationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, " *-------  Event Generation Statistics  -------*")?;
        writeln!(f, " | tried     {:>12}                     |", self.tried)?;
        writeln!(f, " | accepted  {:>12}                     |", self.accepted)?;
        writeln!(f, " | failed    {:>12}                     |", self.failed)?;
        writeln!(
            f,
            " | efficiency {:>11.4}                     |",
            self.efficiency()
        )?;
        write!(f, " *---------------------------------------------*")
    }
}
