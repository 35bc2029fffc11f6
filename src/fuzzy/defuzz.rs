// src/fuzzy/defuzz.rs — Aggregation of clipped output terms + centroid

use serde::{Deserialize, Serialize};

use super::variable::LinguisticVariable;

/// How a rule's activation level shapes its output term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Implication {
    /// Cut the term at the activation level (min).
    #[default]
    Clip,
    /// Scale the whole term by the activation level (product).
    Scale,
}

impl Implication {
    fn apply(self, level: f64, degree: f64) -> f64 {
        match self {
            Implication::Clip => level.min(degree),
            Implication::Scale => level * degree,
        }
    }
}

/// Upper bound on regular samples, whatever the requested resolution.
pub const MAX_STEPS: usize = 100_000;

/// Sample the union of all output terms shaped by their activation levels.
///
/// `levels[i]` is the activation of `output.terms()[i]`. The universe is
/// sampled every `resolution` units (at most `MAX_STEPS` intervals); term
/// corners and clip crossings are added so every kink of the aggregate
/// lands on a sample.
pub fn aggregate(
    output: &LinguisticVariable,
    levels: &[f64],
    implication: Implication,
    resolution: f64,
) -> Vec<(f64, f64)> {
    let (min, max) = output.universe();
    let steps = if resolution > 0.0 && resolution.is_finite() {
        ((max - min) / resolution).round().clamp(1.0, MAX_STEPS as f64) as usize
    } else {
        1
    };
    let width = (max - min) / steps as f64;

    let mut xs: Vec<f64> = (0..=steps).map(|i| min + width * i as f64).collect();
    for (term, &level) in output.terms().iter().zip(levels) {
        let (a, b, c, d) = term.mf.corners();
        xs.extend([a, b, c, d]);
        if implication == Implication::Clip {
            xs.extend(term.mf.level_crossings(level));
        }
    }
    xs.retain(|x| *x >= min && *x <= max);
    xs.sort_by(f64::total_cmp);
    xs.dedup_by(|a, b| (*a - *b).abs() < 1e-9);

    xs.into_iter()
        .map(|x| {
            let y = output
                .terms()
                .iter()
                .zip(levels)
                .map(|(term, &level)| implication.apply(level, term.mf.degree(x)))
                .fold(0.0, f64::max);
            (x, y)
        })
        .collect()
}

/// Center of area of a piecewise-linear curve given as ordered samples.
///
/// Each segment is integrated exactly as a trapezoid. Returns `None` when
/// the total area is zero (no output term is active).
pub fn centroid(samples: &[(f64, f64)]) -> Option<f64> {
    let mut moment = 0.0;
    let mut area = 0.0;

    for pair in samples.windows(2) {
        let (x1, y1) = pair[0];
        let (x2, y2) = pair[1];
        let width = x2 - x1;
        let height = y1 + y2;
        if width <= 0.0 || height <= 0.0 {
            continue;
        }
        let segment_area = width * height / 2.0;
        let segment_center = x1 + width * (y1 + 2.0 * y2) / (3.0 * height);
        moment += segment_area * segment_center;
        area += segment_area;
    }

    if area > 0.0 {
        Some(moment / area)
    } else {
        None
    }
}
