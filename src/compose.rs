use std::fmt::Write as _;

use rand::Rng;

use crate::{
    filter::{BlendMode, FILTER_ID, FilterSpec},
    foundation::core::Canvas,
    foundation::error::{MeshyError, MeshyResult},
    gradient::{GradientStop, generate_stops, write_gradient_def},
    palette::generate_colors,
};

/// Everything a generation pass needs. Mirrors the panel controls one-to-one.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ArtworkParams {
    pub stop_count: usize,
    pub base_hue: f64,
    pub canvas: Canvas,
    pub blend: BlendMode,
    pub blur_std_deviation: f64,
}

impl ArtworkParams {
    pub fn validate(&self) -> MeshyResult<()> {
        if self.stop_count == 0 {
            return Err(MeshyError::validation("stop_count must be >= 1"));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(MeshyError::validation("canvas width/height must be > 0"));
        }
        if !self.base_hue.is_finite() {
            return Err(MeshyError::validation("base_hue must be finite"));
        }
        FilterSpec::new(self.blend, self.blur_std_deviation).validate()
    }
}

/// Structured in-memory form of one generated artwork.
///
/// Stops are randomized once at generation and never touched afterwards; the
/// blur/blend knobs mutate only the shared [`FilterSpec`], so interactive
/// tuning keeps the gradient centers visually continuous. Text serialization
/// happens only at the boundary, via [`Artwork::to_svg`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Artwork {
    canvas: Canvas,
    base_hue: f64,
    stops: Vec<GradientStop>,
    filter: FilterSpec,
}

impl Artwork {
    pub fn generate<R: Rng + ?Sized>(params: &ArtworkParams, rng: &mut R) -> MeshyResult<Self> {
        params.validate()?;
        let colors = generate_colors(params.stop_count, params.base_hue);
        Ok(Self {
            canvas: params.canvas,
            base_hue: params.base_hue,
            stops: generate_stops(&colors, rng),
            filter: FilterSpec::new(params.blend, params.blur_std_deviation),
        })
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn base_hue(&self) -> f64 {
        self.base_hue
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    pub fn filter(&self) -> FilterSpec {
        self.filter
    }

    /// Typed accessor for the blend stage; leaves the stops untouched.
    pub fn set_blend_mode(&mut self, mode: BlendMode) {
        self.filter.blend = mode;
    }

    /// Typed accessor for the blur stage; leaves the stops untouched.
    pub fn set_blur(&mut self, std_deviation: f64) -> MeshyResult<()> {
        let next = FilterSpec::new(self.filter.blend, std_deviation);
        next.validate()?;
        self.filter = next;
        Ok(())
    }

    /// Serialize to a complete, self-contained SVG document.
    ///
    /// Layer order is fixed: a near-white wash tinted by the base hue, then a
    /// flat white base rectangle, then one full-canvas rectangle per gradient
    /// in palette order, each referencing the shared filter.
    pub fn to_svg(&self) -> String {
        let Canvas { width, height } = self.canvas;
        let mut out = String::new();

        let _ = writeln!(
            out,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {width} {height}\" width=\"{width}\" height=\"{height}\">"
        );
        out.push_str("  <defs>\n");
        self.filter.write_def(&mut out);
        for (i, stop) in self.stops.iter().enumerate() {
            write_gradient_def(&mut out, i, stop);
        }
        out.push_str("  </defs>\n");

        let _ = writeln!(
            out,
            "  <rect x=\"0\" y=\"0\" width=\"100%\" height=\"100%\" fill=\"hsl({}, 100%, 100%)\" />",
            self.base_hue
        );
        let _ = writeln!(
            out,
            "  <rect x=\"0\" y=\"0\" width=\"{width}\" height=\"{height}\" fill=\"white\" />"
        );
        for i in 0..self.stops.len() {
            let _ = writeln!(
                out,
                "  <rect x=\"0\" y=\"0\" width=\"{width}\" height=\"{height}\" fill=\"url(#gradient{i})\" filter=\"url(#{FILTER_ID})\" />"
            );
        }
        out.push_str("</svg>\n");
        out
    }
}

/// One-shot generation with the thread RNG (the panel's "generate" action).
pub fn compose_svg(params: &ArtworkParams) -> MeshyResult<String> {
    compose_svg_with(params, &mut rand::rng())
}

/// One-shot generation with an injected RNG, for deterministic callers.
pub fn compose_svg_with<R: Rng + ?Sized>(
    params: &ArtworkParams,
    rng: &mut R,
) -> MeshyResult<String> {
    Ok(Artwork::generate(params, rng)?.to_svg())
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn params(stop_count: usize) -> ArtworkParams {
        ArtworkParams {
            stop_count,
            base_hue: 210.0,
            canvas: Canvas::new(1200, 800),
            blend: BlendMode::Overlay,
            blur_std_deviation: 0.0,
        }
    }

    #[test]
    fn validate_rejects_zero_stops_and_zero_canvas() {
        let mut p = params(0);
        assert!(p.validate().is_err());
        p.stop_count = 3;
        p.canvas.width = 0;
        assert!(p.validate().is_err());
    }

    #[test]
    fn serialization_is_stable_for_the_same_artwork() {
        let art = Artwork::generate(&params(4), &mut SmallRng::seed_from_u64(1)).unwrap();
        assert_eq!(art.to_svg(), art.to_svg());
    }

    #[test]
    fn blur_and_blend_accessors_do_not_move_gradient_centers() {
        let mut art = Artwork::generate(&params(5), &mut SmallRng::seed_from_u64(9)).unwrap();
        let before = art.stops().to_vec();
        art.set_blend_mode(BlendMode::Multiply);
        art.set_blur(4.0).unwrap();
        assert_eq!(art.stops(), &before[..]);
        assert_eq!(art.filter().blend, BlendMode::Multiply);
        assert_eq!(art.filter().blur_std_deviation, 4.0);
    }

    #[test]
    fn set_blur_rejects_negative_values_and_keeps_the_old_filter() {
        let mut art = Artwork::generate(&params(2), &mut SmallRng::seed_from_u64(3)).unwrap();
        assert!(art.set_blur(-2.0).is_err());
        assert_eq!(art.filter().blur_std_deviation, 0.0);
    }

    #[test]
    fn document_counts_match_the_stop_count() {
        let svg = compose_svg_with(&params(6), &mut SmallRng::seed_from_u64(5)).unwrap();
        assert_eq!(svg.matches("<radialGradient").count(), 6);
        // 1 wash + 1 base + 6 gradient layers.
        assert_eq!(svg.matches("<rect").count(), 8);
        assert_eq!(svg.matches("filter=\"url(#combinedFilter)\"").count(), 6);
    }

    #[test]
    fn json_roundtrip() {
        let art = Artwork::generate(&params(3), &mut SmallRng::seed_from_u64(2)).unwrap();
        let s = serde_json::to_string(&art).unwrap();
        let de: Artwork = serde_json::from_str(&s).unwrap();
        assert_eq!(de, art);
    }
}
