//! Four-vectors in (px, py, pz, E) and (x, y, z, t) form.

use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Energy-momentum four-vector in GeV.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FourMomentum {
    /// Momentum along x.
    pub px: f64,
    /// Momentum along y.
    pub py: f64,
    /// Momentum along z, the string axis.
    pub pz: f64,
    /// Energy.
    pub e: f64,
}

impl FourMomentum {
    /// Creates a four-momentum from its components.
    pub const fn new(px: f64, py: f64, pz: f64, e: f64) -> Self {
        Self { px, py, pz, e }
    }

    /// Transverse momentum with respect to the z axis.
    pub fn pt(&self) -> f64 {
        self.px.hypot(self.py)
    }

    /// Invariant mass squared, which may be negative for off-shell input.
    pub fn m2(&self) -> f64 {
        self.e * self.e - self.px * self.px - self.py * self.py - self.pz * self.pz
    }

    /// Invariant mass, signed like `m2` so space-like vectors stay visible.
    pub fn m(&self) -> f64 {
        let m2 = self.m2();
        if m2 >= 0.0 {
            m2.sqrt()
        } else {
            -(-m2).sqrt()
        }
    }

    /// Velocity vector of the frame in which this momentum is at rest.
    pub fn velocity(&self) -> [f64; 3] {
        if self.e <= 0.0 {
            return [0.0; 3];
        }
        [self.px / self.e, self.py / self.e, self.pz / self.e]
    }

    /// Lorentz boost by velocity `beta`.
    ///
    /// Velocities at or above the speed of light leave the vector unchanged.
    pub fn boosted(&self, beta: [f64; 3]) -> Self {
        let b2 = beta[0] * beta[0] + beta[1] * beta[1] + beta[2] * beta[2];
        if b2 <= 0.0 || b2 >= 1.0 {
            return *self;
        }
        let gamma = 1.0 / (1.0 - b2).sqrt();
        let bp = beta[0] * self.px + beta[1] * self.py + beta[2] * self.pz;
        let gamma2 = (gamma - 1.0) / b2;
        let scale = gamma2 * bp + gamma * self.e;
        Self {
            px: self.px + scale * beta[0],
            py: self.py + scale * beta[1],
            pz: self.pz + scale * beta[2],
            e: gamma * (self.e + bp),
        }
    }
}

impl Add for FourMomentum {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.px + rhs.px,
            self.py + rhs.py,
            self.pz + rhs.pz,
            self.e + rhs.e,
        )
    }
}

/// Production space-time point of a particle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vertex {
    /// Position along x.
    pub x: f64,
    /// Position along y.
    pub y: f64,
    /// Position along z.
    pub z: f64,
    /// Production time.
    pub t: f64,
}

impl Vertex {
    /// Creates a vertex from its components.
    pub const fn new(x: f64, y: f64, z: f64, t: f64) -> Self {
        Self { x, y, z, t }
    }
}
