use serde::{Deserialize, Serialize};

/// Tunable parameters of the toy string-fragmentation source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorSettings {
    /// Master seed from which per-event substreams are derived.
    #[serde(default = "default_master_seed")]
    pub master_seed: u64,
    /// Decay short-lived primary hadrons after fragmentation.
    #[serde(default = "default_true")]
    pub decays: bool,
    /// Record production vertices on every produced particle.
    #[serde(default = "default_true")]
    pub track_vertices: bool,
    /// Relative production rate of s quarks to u or d quarks in new pairs.
    #[serde(default = "default_strange_suppression")]
    pub strange_suppression: f64,
    /// Probability that a light meson is a vector rather than a pseudoscalar.
    #[serde(default = "default_vector_fraction")]
    pub vector_fraction: f64,
    /// Relative weight of eta in diagonal pseudoscalar flavour states.
    #[serde(default = "default_one")]
    pub eta_suppression: f64,
    /// Relative weight of eta' in diagonal pseudoscalar flavour states.
    #[serde(default = "default_eta_prime_suppression")]
    pub eta_prime_suppression: f64,
    /// String tension in GeV/fm; sets the space-time scale of breakpoints.
    #[serde(default = "default_one")]
    pub string_tension: f64,
    /// Width of the transverse momentum given to each new quark pair (GeV).
    #[serde(default = "default_pt_sigma")]
    pub pt_sigma: f64,
    /// Lund symmetric fragmentation function parameter `a`.
    #[serde(default = "default_lund_a")]
    pub lund_a: f64,
    /// Lund symmetric fragmentation function parameter `b` (GeV^-2).
    #[serde(default = "default_lund_b")]
    pub lund_b: f64,
    /// Remaining string mass (GeV) below which the string closes into one hadron.
    #[serde(default = "default_stop_mass")]
    pub stop_mass: f64,
}

fn default_master_seed() -> u64 {
    0x5EED_F4A6_0000_0001
}

fn default_true() -> bool {
    true
}

fn default_one() -> f64 {
    1.0
}

fn default_strange_suppression() -> f64 {
    0.217
}

fn default_vector_fraction() -> f64 {
    0.5
}

fn default_eta_prime_suppression() -> f64 {
    0.12
}

fn default_pt_sigma() -> f64 {
    0.335
}

fn default_lund_a() -> f64 {
    0.68
}

fn default_lund_b() -> f64 {
    0.98
}

fn default_stop_mass() -> f64 {
    1.0
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            master_seed: default_master_seed(),
            decays: true,
            track_vertices: true,
            strange_suppression: default_strange_suppression(),
            vector_fraction: default_vector_fraction(),
            eta_suppression: default_one(),
            eta_prime_suppression: default_eta_prime_suppression(),
            string_tension: default_one(),
            pt_sigma: default_pt_sigma(),
            lund_a: default_lund_a(),
            lund_b: default_lund_b(),
            stop_mass: default_stop_mass(),
        }
    }
}

impl GeneratorSettings {
    /// Restricts new pairs to u/d pseudoscalar mesons without eta states.
    pub fn light_pseudoscalars_only(mut self) -> Self {
        self.strange_suppression = 0.0;
        self.vector_fraction = 0.0;
        self.eta_suppression = 0.0;
        self.eta_prime_suppression = 0.0;
        self
    }
}
