//! Flavour selection for new quark pairs and meson code composition.

use rand::Rng;

use crate::settings::GeneratorSettings;

/// Draws the flavour (1 = d, 2 = u, 3 = s) of a new quark-antiquark pair.
pub fn pick_pair_flavour<R: Rng + ?Sized>(rng: &mut R, settings: &GeneratorSettings) -> i32 {
    let strange = settings.strange_suppression.max(0.0);
    let draw = rng.gen::<f64>() * (2.0 + strange);
    if draw < 1.0 {
        1
    } else if draw < 2.0 {
        2
    } else {
        3
    }
}

/// Composes the PDG code of the meson made of `quark` (> 0) and `antiquark` (< 0).
///
/// Off-diagonal states follow the PDG sign convention. Diagonal states are
/// mixed into pi0/eta/eta' (pseudoscalar) or rho0/omega/phi (vector) using
/// the eta suppression weights.
pub fn meson_id<R: Rng + ?Sized>(
    quark: i32,
    antiquark: i32,
    settings: &GeneratorSettings,
    rng: &mut R,
) -> i32 {
    let vector = rng.gen::<f64>() < settings.vector_fraction.clamp(0.0, 1.0);
    let spin = if vector { 3 } else { 1 };
    let q = quark.abs();
    let qbar = antiquark.abs();
    if q != qbar {
        let max = q.max(qbar);
        let min = q.min(qbar);
        let mut sign = if max % 2 == 0 { 1 } else { -1 };
        if max == qbar {
            sign = -sign;
        }
        return sign * (100 * max + 10 * min + spin);
    }
    diagonal_meson(q, vector, settings, rng)
}

fn diagonal_meson<R: Rng + ?Sized>(
    flavour: i32,
    vector: bool,
    settings: &GeneratorSettings,
    rng: &mut R,
) -> i32 {
    let eta = settings.eta_suppression.max(0.0);
    let eta_prime = settings.eta_prime_suppression.max(0.0);
    match (flavour, vector) {
        (3, true) => 333,
        (3, false) => {
            if eta + eta_prime <= 0.0 {
                return 221;
            }
            if rng.gen::<f64>() * (eta + eta_prime) < eta {
                221
            } else {
                331
            }
        }
        (_, true) => {
            if rng.gen_bool(0.5) {
                113
            } else {
                223
            }
        }
        (_, false) => {
            let weights = [0.5, 0.25 * eta, 0.25 * eta_prime];
            let total: f64 = weights.iter().sum();
            let mut draw = rng.gen::<f64>() * total;
            for (id, weight) in [111, 221, 331].into_iter().zip(weights) {
                if draw < weight {
                    return id;
                }
                draw -= weight;
            }
            111
        }
    }
}
