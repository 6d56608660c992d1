//! Iterative string fragmentation in the string rest frame.
//!
//! Hadrons are split off alternately from the quark (+z) and antiquark (-z)
//! ends. Each split takes a Lund-distributed fraction of the remaining
//! light-cone momentum of its end; the string closes into a final hadron
//! once its remaining mass drops below `stop_mass`.

use std::f64::consts::PI;

use frag_core::{species, FourMomentum, Vertex};
use rand::Rng;

use crate::flavour::{meson_id, pick_pair_flavour};
use crate::settings::GeneratorSettings;

/// Status of primary hadrons split off the quark end (and of the closing hadron).
pub const STATUS_TOP_END: i32 = 83;
/// Status of primary hadrons split off the antiquark end.
pub const STATUS_BOTTOM_END: i32 = 84;

const MAX_HADRONS: usize = 256;
const LUND_GRID: usize = 200;
const LUND_TRIES: usize = 10_000;

/// Hadron produced by the string, expressed in the string rest frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryHadron {
    /// PDG code.
    pub id: i32,
    /// [`STATUS_TOP_END`] or [`STATUS_BOTTOM_END`].
    pub status: i32,
    /// Four-momentum in the string rest frame, string along +z.
    pub momentum: FourMomentum,
    /// Nominal mass.
    pub mass: f64,
    /// Midpoint of the two breakpoints enclosing the hadron (fm).
    pub vertex: Vertex,
}

#[derive(Debug, Clone, Copy)]
struct StringEnd {
    flavour: i32,
    px: f64,
    py: f64,
    /// Light-cone momentum still available along this end's direction.
    remaining: f64,
    /// Opposite light-cone momentum taken by hadrons from this end.
    consumed: f64,
    /// Last breakpoint as (x+, x-).
    last_break: (f64, f64),
}

struct Split {
    id: i32,
    new_flavour: i32,
    px: f64,
    py: f64,
    end_px: f64,
    end_py: f64,
    mass: f64,
    mt2: f64,
}

/// Fragments a colour-singlet string of invariant mass `string_mass`.
///
/// `quark` (> 0) sits at the +z end and `antiquark` (< 0) at the -z end.
/// Hadrons are returned in string order: quark-end ranks first, then the
/// closing hadron, then antiquark-end ranks from innermost to outermost.
pub fn fragment<R: Rng + ?Sized>(
    quark: i32,
    antiquark: i32,
    string_mass: f64,
    settings: &GeneratorSettings,
    rng: &mut R,
) -> Vec<PrimaryHadron> {
    let kappa = settings.string_tension;
    let mut top = StringEnd {
        flavour: quark,
        px: 0.0,
        py: 0.0,
        remaining: string_mass,
        consumed: 0.0,
        last_break: (string_mass / kappa, 0.0),
    };
    let mut bottom = StringEnd {
        flavour: antiquark,
        px: 0.0,
        py: 0.0,
        remaining: string_mass,
        consumed: 0.0,
        last_break: (0.0, string_mass / kappa),
    };
    let stop2 = settings.stop_mass * settings.stop_mass;
    let mut from_top = Vec::new();
    let mut from_bottom = Vec::new();

    while from_top.len() + from_bottom.len() < MAX_HADRONS {
        if top.remaining * bottom.remaining < stop2 {
            break;
        }
        let take_top = rng.gen_bool(0.5);
        let split = draw_split(if take_top { &top } else { &bottom }, take_top, settings, rng);
        let z = sample_lund_z(split.mt2, settings, rng);
        if take_top {
            let p_plus = z * top.remaining;
            let p_minus = split.mt2 / p_plus;
            if p_minus >= bottom.remaining {
                break;
            }
            top.remaining -= p_plus;
            bottom.remaining -= p_minus;
            top.consumed += p_minus;
            let breakpoint = (top.remaining / kappa, top.consumed / kappa);
            from_top.push(hadron(&split, STATUS_TOP_END, p_plus, p_minus, top.last_break, breakpoint));
            top.last_break = breakpoint;
            top.flavour = split.new_flavour;
            top.px = split.end_px;
            top.py = split.end_py;
        } else {
            let p_minus = z * bottom.remaining;
            let p_plus = split.mt2 / p_minus;
            if p_plus >= top.remaining {
                break;
            }
            bottom.remaining -= p_minus;
            top.remaining -= p_plus;
            bottom.consumed += p_plus;
            let breakpoint = (bottom.consumed / kappa, bottom.remaining / kappa);
            from_bottom.push(hadron(
                &split,
                STATUS_BOTTOM_END,
                p_plus,
                p_minus,
                bottom.last_break,
                breakpoint,
            ));
            bottom.last_break = breakpoint;
            bottom.flavour = split.new_flavour;
            bottom.px = split.end_px;
            bottom.py = split.end_py;
        }
    }

    let closing_id = meson_id(top.flavour, bottom.flavour, settings, rng);
    let closing = Split {
        id: closing_id,
        new_flavour: 0,
        px: top.px + bottom.px,
        py: top.py + bottom.py,
        end_px: 0.0,
        end_py: 0.0,
        mass: species::mass(closing_id).unwrap_or(0.0),
        mt2: 0.0,
    };
    let closing = hadron(
        &closing,
        STATUS_TOP_END,
        top.remaining,
        bottom.remaining,
        top.last_break,
        bottom.last_break,
    );

    from_top.push(closing);
    from_top.extend(from_bottom.into_iter().rev());
    from_top
}

fn draw_split<R: Rng + ?Sized>(
    end: &StringEnd,
    top: bool,
    settings: &GeneratorSettings,
    rng: &mut R,
) -> Split {
    let flavour = pick_pair_flavour(rng, settings);
    let (id, new_flavour) = if top {
        (meson_id(end.flavour, -flavour, settings, rng), flavour)
    } else {
        (meson_id(flavour, end.flavour, settings, rng), -flavour)
    };
    let sigma = settings.pt_sigma / std::f64::consts::SQRT_2;
    let qx = sample_gaussian(rng, sigma);
    let qy = sample_gaussian(rng, sigma);
    let px = end.px + qx;
    let py = end.py + qy;
    let mass = species::mass(id).unwrap_or(0.0);
    Split {
        id,
        new_flavour,
        px,
        py,
        end_px: -qx,
        end_py: -qy,
        mass,
        mt2: mass * mass + px * px + py * py,
    }
}

fn hadron(
    split: &Split,
    status: i32,
    p_plus: f64,
    p_minus: f64,
    outer: (f64, f64),
    inner: (f64, f64),
) -> PrimaryHadron {
    let x_plus = 0.5 * (outer.0 + inner.0);
    let x_minus = 0.5 * (outer.1 + inner.1);
    PrimaryHadron {
        id: split.id,
        status,
        momentum: FourMomentum::new(
            split.px,
            split.py,
            0.5 * (p_plus - p_minus),
            0.5 * (p_plus + p_minus),
        ),
        mass: split.mass,
        vertex: Vertex::new(0.0, 0.0, 0.5 * (x_plus - x_minus), 0.5 * (x_plus + x_minus)),
    }
}

fn lund_weight(z: f64, mt2: f64, settings: &GeneratorSettings) -> f64 {
    if z <= 0.0 || z >= 1.0 {
        return 0.0;
    }
    (1.0 - z).powf(settings.lund_a) / z * (-settings.lund_b * mt2 / z).exp()
}

/// Samples the light-cone fraction from the Lund symmetric fragmentation function.
pub fn sample_lund_z<R: Rng + ?Sized>(mt2: f64, settings: &GeneratorSettings, rng: &mut R) -> f64 {
    let (mut z_peak, mut f_max) = (0.5, 0.0);
    for step in 1..LUND_GRID {
        let z = step as f64 / LUND_GRID as f64;
        let weight = lund_weight(z, mt2, settings);
        if weight > f_max {
            f_max = weight;
            z_peak = z;
        }
    }
    if f_max <= 0.0 {
        return z_peak;
    }
    // Grid maximum can undershoot the true peak slightly; pad it.
    let ceiling = 1.1 * f_max;
    for _ in 0..LUND_TRIES {
        let z: f64 = rng.gen_range(1e-6..1.0);
        if rng.gen::<f64>() * ceiling <= lund_weight(z, mt2, settings) {
            return z;
        }
    }
    z_peak
}

/// Zero-mean Gaussian sample via the Box-Muller transform.
pub fn sample_gaussian<R: Rng + ?Sized>(rng: &mut R, sigma: f64) -> f64 {
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen();
    sigma * (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}
