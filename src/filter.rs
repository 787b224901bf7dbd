use std::fmt;
use std::fmt::Write as _;
use std::str::FromStr;

use crate::foundation::error::{MeshyError, MeshyResult};

/// Fixed id shared by every gradient layer's `filter="url(#...)"` reference.
/// Rewriting the one filter re-styles all layers at once.
pub const FILTER_ID: &str = "combinedFilter";

/// Standard `feBlend` compositing modes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    #[default]
    Normal,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

impl BlendMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Multiply => "multiply",
            Self::Screen => "screen",
            Self::Overlay => "overlay",
            Self::Darken => "darken",
            Self::Lighten => "lighten",
            Self::ColorDodge => "color-dodge",
            Self::ColorBurn => "color-burn",
            Self::HardLight => "hard-light",
            Self::SoftLight => "soft-light",
            Self::Difference => "difference",
            Self::Exclusion => "exclusion",
            Self::Hue => "hue",
            Self::Saturation => "saturation",
            Self::Color => "color",
            Self::Luminosity => "luminosity",
        }
    }

    /// All modes, in the order the panel's selector lists them.
    pub fn all() -> &'static [BlendMode] {
        &[
            Self::Normal,
            Self::Multiply,
            Self::Screen,
            Self::Overlay,
            Self::Darken,
            Self::Lighten,
            Self::ColorDodge,
            Self::ColorBurn,
            Self::HardLight,
            Self::SoftLight,
            Self::Difference,
            Self::Exclusion,
            Self::Hue,
            Self::Saturation,
            Self::Color,
            Self::Luminosity,
        ]
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlendMode {
    type Err = MeshyError;

    fn from_str(s: &str) -> MeshyResult<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| MeshyError::validation(format!("unknown blend mode '{s}'")))
    }
}

/// The one filter shared by all gradient layers: a Gaussian blur feeding a
/// blend stage. Blur comes first so the blend operates on the already-blurred
/// source.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FilterSpec {
    pub blur_std_deviation: f64,
    pub blend: BlendMode,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            blur_std_deviation: 0.0,
            blend: BlendMode::Normal,
        }
    }
}

impl FilterSpec {
    pub fn new(blend: BlendMode, blur_std_deviation: f64) -> Self {
        Self {
            blur_std_deviation,
            blend,
        }
    }

    pub fn validate(&self) -> MeshyResult<()> {
        if !self.blur_std_deviation.is_finite() || self.blur_std_deviation < 0.0 {
            return Err(MeshyError::validation(
                "blur stdDeviation must be finite and >= 0",
            ));
        }
        Ok(())
    }

    pub(crate) fn write_def(&self, out: &mut String) {
        let _ = writeln!(out, "    <filter id=\"{FILTER_ID}\">");
        let _ = writeln!(
            out,
            "      <feGaussianBlur in=\"SourceGraphic\" stdDeviation=\"{}\" result=\"blurred\" />",
            self.blur_std_deviation
        );
        let _ = writeln!(
            out,
            "      <feBlend mode=\"{}\" in=\"blurred\" in2=\"BackgroundImage\" result=\"blend\" />",
            self.blend
        );
        let _ = out.write_str("    </filter>\n");
    }
}
