use std::fmt;

/// A fully saturated HSL color. Hue is in degrees and deliberately unbounded:
/// CSS wraps hue values modulo 360, so callers never normalize. Lightness is a
/// percentage and is likewise not clamped; extreme stop counts can push it out
/// of [0, 100], which renders as an (accepted) washed-out or black layer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Hsl {
    pub hue: f64,
    pub lightness: f64,
}

impl Hsl {
    pub fn new(hue: f64, lightness: f64) -> Self {
        Self { hue, lightness }
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, 100%, {}%)", self.hue, self.lightness)
    }
}

/// Derive an ordered palette of `count` colors fanning out from `base_hue`.
///
/// The scheme is split-complementary-like: index 0 is the saturated anchor at
/// 50% lightness, early indices swing +-30 degrees (widening with the index),
/// and the tail swings +-150 degrees toward the complement. Lightness trends
/// downward so later layers read as receding light sources. The constants are
/// empirically tuned; treat them as opaque.
pub fn generate_colors(count: usize, base_hue: f64) -> Vec<Hsl> {
    (0..count)
        .map(|i| {
            if i == 0 {
                return Hsl::new(base_hue, 50.0);
            }
            // +1 for even indices, -1 for odd.
            let sign = 1.0 - 2.0 * ((i % 2) as f64);
            let i = i as f64;
            if i < count as f64 / 1.4 {
                let spread = if i > 2.0 { i / 2.0 } else { i };
                Hsl::new(base_hue - 30.0 * sign * spread, 64.0 - 1.75 * i * sign)
            } else {
                Hsl::new(base_hue - 150.0 * sign, 66.0 - 1.25 * i * sign)
            }
        })
        .collect()
}
