//! PDG species table and classification by particle code.

/// Static properties of a particle species.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Species {
    /// PDG code of the particle (always positive in the table).
    pub id: i32,
    /// Name of the particle.
    pub name: &'static str,
    /// Name of the antiparticle, `None` when self-conjugate.
    pub anti_name: Option<&'static str>,
    /// Nominal mass in GeV.
    pub mass: f64,
}

const fn species(id: i32, name: &'static str, anti_name: Option<&'static str>, mass: f64) -> Species {
    Species {
        id,
        name,
        anti_name,
        mass,
    }
}

static TABLE: &[Species] = &[
    species(1, "d", Some("dbar"), 0.33),
    species(2, "u", Some("ubar"), 0.33),
    species(3, "s", Some("sbar"), 0.50),
    species(4, "c", Some("cbar"), 1.50),
    species(5, "b", Some("bbar"), 4.80),
    species(11, "e-", Some("e+"), 0.000511),
    species(13, "mu-", Some("mu+"), 0.105658),
    species(21, "g", None, 0.0),
    species(22, "gamma", None, 0.0),
    species(90, "system", None, 0.0),
    species(111, "pi0", None, 0.134977),
    species(113, "rho0", None, 0.77526),
    species(130, "K_L0", None, 0.497611),
    species(211, "pi+", Some("pi-"), 0.139570),
    species(213, "rho+", Some("rho-"), 0.77511),
    species(221, "eta", None, 0.547862),
    species(223, "omega", None, 0.78266),
    species(310, "K_S0", None, 0.497611),
    species(311, "K0", Some("Kbar0"), 0.497611),
    species(313, "K*0", Some("K*bar0"), 0.89555),
    species(321, "K+", Some("K-"), 0.493677),
    species(323, "K*+", Some("K*-"), 0.89176),
    species(331, "eta'", None, 0.95778),
    species(333, "phi", None, 1.019461),
    species(2112, "n0", Some("nbar0"), 0.939565),
    species(2212, "p+", Some("pbar-"), 0.938272),
    species(2214, "Delta+", Some("Deltabar-"), 1.232),
    species(3122, "Lambda0", Some("Lambdabar0"), 1.115683),
    species(3322, "Xi0", Some("Xibar0"), 1.31486),
];

/// Looks up the species entry for `id`, matching antiparticles by magnitude.
pub fn lookup(id: i32) -> Option<&'static Species> {
    let abs = id.checked_abs()?;
    TABLE.iter().find(|entry| entry.id == abs)
}

/// Name of the species, including the antiparticle spelling for negative codes.
pub fn name(id: i32) -> String {
    match lookup(id) {
        Some(entry) if id < 0 => entry
            .anti_name
            .map(str::to_string)
            .unwrap_or_else(|| entry.name.to_string()),
        Some(entry) => entry.name.to_string(),
        None => format!("id{id}"),
    }
}

/// Nominal mass of the species in GeV.
pub fn mass(id: i32) -> Option<f64> {
    lookup(id).map(|entry| entry.mass)
}

/// Whether `id` names a quark.
pub fn is_quark(id: i32) -> bool {
    (1..=8).contains(&id.unsigned_abs())
}

/// Whether `id` names a hadron under the PDG numbering scheme.
///
/// Codes up to 100, the 1000000-9000000 excited and SUSY blocks and
/// everything from 9900000 are rejected. Diquarks (zero quark digit in
/// the meson/baryon positions) are rejected as well. `K_L0` and `K_S0`
/// do not follow the digit rule and are accepted explicitly.
pub fn is_hadron(id: i32) -> bool {
    let abs = id.unsigned_abs();
    if abs <= 100 || (1_000_000..=9_000_000).contains(&abs) || abs >= 9_900_000 {
        return false;
    }
    if abs == 130 || abs == 310 {
        return true;
    }
    if abs % 10 == 0 || (abs / 10) % 10 == 0 || (abs / 100) % 10 == 0 {
        return false;
    }
    true
}
