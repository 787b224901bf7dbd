use std::fmt::Write as _;

use rand::Rng;

use crate::palette::Hsl;

/// One radial gradient layer: a palette color anchored at a randomized center.
/// The outer radius is always 100% and the gradient fades to transparent
/// white, so layers tint the canvas without ever fully covering it.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GradientStop {
    pub color: Hsl,
    /// Center x as a percentage of canvas width.
    pub cx: f64,
    /// Center y as a percentage of canvas height.
    pub cy: f64,
}

/// Pair each palette color with an independently uniform center in [0, 100).
///
/// The generator is injected so interactive callers can reshuffle with the
/// thread RNG while tests drive a seeded `SmallRng`.
pub fn generate_stops<R: Rng + ?Sized>(colors: &[Hsl], rng: &mut R) -> Vec<GradientStop> {
    colors
        .iter()
        .map(|&color| GradientStop {
            color,
            cx: rng.random_range(0.0..100.0),
            cy: rng.random_range(0.0..100.0),
        })
        .collect()
}

/// Append the `<radialGradient>` definition for stop `index`.
///
/// Centers are fixed to 2 decimal digits so repeated serialization of the
/// same stop is byte-identical.
pub(crate) fn write_gradient_def(out: &mut String, index: usize, stop: &GradientStop) {
    let _ = writeln!(
        out,
        "    <radialGradient id=\"gradient{index}\" cx=\"{:.2}%\" cy=\"{:.2}%\" r=\"100%\">",
        stop.cx, stop.cy
    );
    let _ = writeln!(
        out,
        "      <stop offset=\"0%\" stop-color=\"{}\" />",
        stop.color
    );
    let _ = out.write_str("      <stop offset=\"100%\" stop-color=\"rgba(255,255,255,0.0)\" />\n");
    let _ = out.write_str("    </radialGradient>\n");
}
