// src/fuzzy/membership.rs — Piecewise-linear membership functions

use serde::{Deserialize, Serialize};

/// A piecewise-linear membership function over a crisp universe.
///
/// Both shapes are closed on their support: a triangle `(a, b, c)` with
/// `a == b` is a left shoulder and has degree 1.0 at `a`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum MembershipFn {
    Triangular { a: f64, b: f64, c: f64 },
    Trapezoidal { a: f64, b: f64, c: f64, d: f64 },
}

impl MembershipFn {
    pub const fn triangular(a: f64, b: f64, c: f64) -> Self {
        MembershipFn::Triangular { a, b, c }
    }

    pub const fn trapezoidal(a: f64, b: f64, c: f64, d: f64) -> Self {
        MembershipFn::Trapezoidal { a, b, c, d }
    }

    /// The four corners `(foot_left, shoulder_left, shoulder_right, foot_right)`.
    pub fn corners(&self) -> (f64, f64, f64, f64) {
        match *self {
            MembershipFn::Triangular { a, b, c } => (a, b, b, c),
            MembershipFn::Trapezoidal { a, b, c, d } => (a, b, c, d),
        }
    }

    /// Degree of membership of `x`, always in [0, 1].
    pub fn degree(&self, x: f64) -> f64 {
        let (a, b, c, d) = self.corners();
        if x.is_nan() || x < a || x > d {
            return 0.0;
        }
        if x >= b && x <= c {
            return 1.0;
        }
        if x < b {
            ((x - a) / (b - a)).clamp(0.0, 1.0)
        } else {
            ((d - x) / (d - c)).clamp(0.0, 1.0)
        }
    }

    /// Corners must be finite and non-decreasing.
    pub fn is_well_formed(&self) -> bool {
        let (a, b, c, d) = self.corners();
        [a, b, c, d].iter().all(|v| v.is_finite()) && a <= b && b <= c && c <= d
    }

    /// Points on the sloped edges where the function equals `level`.
    ///
    /// Used by the defuzzifier to place samples exactly on the kinks a
    /// clipped term introduces.
    pub fn level_crossings(&self, level: f64) -> Vec<f64> {
        if !(level > 0.0 && level < 1.0) {
            return Vec::new();
        }
        let (a, b, c, d) = self.corners();
        let mut points = Vec::with_capacity(2);
        if b > a {
            points.push(a + level * (b - a));
        }
        if d > c {
            points.push(d - level * (d - c));
        }
        points
    }
}

/// Split `[lo, hi]` into `count` evenly spaced, overlapping triangles.
///
/// Centers run from `lo` to `hi`; every triangle spans one center spacing on
/// each side, so the first and last terms reach 1.0 at the domain edges and
/// neighbours cross at 0.5. Returns an empty vec for `count == 0` or an empty
/// domain.
pub fn auto_partition(lo: f64, hi: f64, count: usize) -> Vec<MembershipFn> {
    if count == 0 || !(hi > lo) {
        return Vec::new();
    }
    if count == 1 {
        return vec![MembershipFn::trapezoidal(lo, lo, hi, hi)];
    }

    let spacing = (hi - lo) / (count - 1) as f64;
    (0..count)
        .map(|i| {
            let center = lo + spacing * i as f64;
            MembershipFn::triangular(center - spacing, center, center + spacing)
        })
        .collect()
}
