//! Isotropic two-body decays of short-lived hadrons.

use std::f64::consts::PI;

use frag_core::{species, Event, FourMomentum, Particle};
use rand::Rng;
use tracing::trace;

/// Status given to decay products.
pub const STATUS_DECAY_PRODUCT: i32 = 91;

struct Channel {
    parent: i32,
    daughters: [i32; 2],
}

const fn channel(parent: i32, first: i32, second: i32) -> Channel {
    Channel {
        parent,
        daughters: [first, second],
    }
}

static CHANNELS: &[Channel] = &[
    channel(111, 22, 22),
    channel(221, 22, 22),
    channel(331, 113, 22),
    channel(113, 211, -211),
    channel(213, 211, 111),
    channel(223, 111, 22),
    channel(313, 321, -211),
    channel(323, 311, 211),
    channel(333, 321, -321),
];

fn conjugate(id: i32) -> i32 {
    match species::lookup(id) {
        Some(entry) if entry.anti_name.is_some() => -id,
        _ => id,
    }
}

/// Decay products of `id`, charge-conjugated for antiparticles.
pub fn channel_for(id: i32) -> Option<[i32; 2]> {
    let entry = CHANNELS.iter().find(|entry| entry.parent == id.abs())?;
    if id < 0 {
        Some(entry.daughters.map(conjugate))
    } else {
        Some(entry.daughters)
    }
}

/// Decays every final-state particle with a known channel, including products.
///
/// Parents are flagged as processed (negative status) and linked to their
/// daughters. No decay length is simulated: daughters get a copy of the
/// parent's production vertex, not a displaced decay point.
pub fn decay_all<R: Rng + ?Sized>(event: &mut Event, rng: &mut R) {
    let mut index = 1;
    while index < event.len() {
        let parent = event[index].clone();
        if parent.is_final() {
            if let Some(daughters) = channel_for(parent.id) {
                decay_one(event, index, &parent, daughters, rng);
            }
        }
        index += 1;
    }
}

fn decay_one<R: Rng + ?Sized>(
    event: &mut Event,
    index: usize,
    parent: &Particle,
    daughters: [i32; 2],
    rng: &mut R,
) {
    let m1 = species::mass(daughters[0]).unwrap_or(0.0);
    let m2 = species::mass(daughters[1]).unwrap_or(0.0);
    let m0 = parent.mass;
    if m0 <= m1 + m2 {
        trace!(id = parent.id, "decay closed by phase space");
        return;
    }
    let p_star =
        ((m0 * m0 - (m1 + m2) * (m1 + m2)) * (m0 * m0 - (m1 - m2) * (m1 - m2))).sqrt() / (2.0 * m0);
    let cos_theta: f64 = rng.gen_range(-1.0..=1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
    let phi = 2.0 * PI * rng.gen::<f64>();
    let direction = [sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta];
    let beta = parent.momentum.velocity();

    let mut first = 0;
    for (slot, (&id, mass)) in daughters.iter().zip([m1, m2]).enumerate() {
        let sign = if slot == 0 { 1.0 } else { -1.0 };
        let rest = FourMomentum::new(
            sign * p_star * direction[0],
            sign * p_star * direction[1],
            sign * p_star * direction[2],
            (p_star * p_star + mass * mass).sqrt(),
        );
        let mut daughter = Particle::new(id, STATUS_DECAY_PRODUCT, rest.boosted(beta), mass)
            .with_mothers(index as i32, 0);
        daughter.production = parent.production;
        let position = event.push(daughter);
        if slot == 0 {
            first = position;
        }
    }

    if let Some(entry) = event.get_mut(index) {
        entry.status = -entry.status.abs();
        entry.daughter1 = first as i32;
        entry.daughter2 = first as i32 + 1;
    }
}
