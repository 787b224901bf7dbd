//! Text-level filter patching for documents that have already crossed the
//! string boundary (e.g. came back from the host application). In-memory
//! artworks use the typed accessors on [`Artwork`](crate::Artwork) instead.
//!
//! Patches are byte-range splices into the original string: everything outside
//! the rewritten attribute value is preserved exactly, and re-applying the
//! same patch is a no-op. All failures here are soft. A document that does not
//! parse, or that lacks the expected filter stages, is returned unchanged with
//! a `tracing` warning so the panel keeps showing the last good render.

use std::ops::Range;

use crate::filter::{BlendMode, FILTER_ID};

/// Set the mode of the first `feBlend` element in `svg`.
///
/// An `feBlend` without a `mode` attribute gets one inserted, so a stage
/// relying on the SVG default of `normal` is handled the same as an explicit
/// one.
pub fn update_blend_mode(svg: &str, mode: BlendMode) -> String {
    let doc = match roxmltree::Document::parse(svg) {
        Ok(doc) => doc,
        Err(err) => {
            tracing::warn!(%err, "blend mode update skipped: document is not valid xml");
            return svg.to_owned();
        }
    };

    let Some(blend) = doc
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name() == "feBlend")
    else {
        tracing::warn!("blend mode update skipped: no feBlend element found");
        return svg.to_owned();
    };

    splice(svg, vec![set_attr_patch(svg, blend, "mode", mode.as_str())])
}

/// Rewrite the blur standard deviation and blend mode of the shared filter.
///
/// The two sub-updates are independent: a missing blur or blend stage is a
/// soft warning and the other update still applies. A missing `combinedFilter`
/// id or a parse failure leaves the document untouched.
pub fn update_combined_filter(svg: &str, std_deviation: f64, mode: BlendMode) -> String {
    let doc = match roxmltree::Document::parse(svg) {
        Ok(doc) => doc,
        Err(err) => {
            tracing::warn!(%err, "filter update skipped: document is not valid xml");
            return svg.to_owned();
        }
    };

    let Some(filter) = doc.descendants().find(|n| {
        n.is_element() && n.tag_name().name() == "filter" && n.attribute("id") == Some(FILTER_ID)
    }) else {
        tracing::warn!("filter update skipped: no filter with id '{FILTER_ID}'");
        return svg.to_owned();
    };

    let mut patches = Vec::new();

    match filter
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name() == "feGaussianBlur")
    {
        Some(blur) => {
            patches.push(set_attr_patch(svg, blur, "stdDeviation", &std_deviation.to_string()));
        }
        None => tracing::warn!("filter update: no blur stage to patch"),
    }

    match filter
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name() == "feBlend")
    {
        Some(blend) => patches.push(set_attr_patch(svg, blend, "mode", mode.as_str())),
        None => tracing::warn!("filter update: no blend stage to patch"),
    }

    splice(svg, patches)
}

/// Patch that sets `attr` on `node`: the value is rewritten in place when the
/// attribute exists, and inserted right after the tag name otherwise (the
/// same observable behavior as DOM `setAttribute`).
fn set_attr_patch(
    svg: &str,
    node: roxmltree::Node<'_, '_>,
    attr: &str,
    value: &str,
) -> (Range<usize>, String) {
    match attr_value_span(svg, node.range(), attr) {
        Some(span) => (span, value.to_owned()),
        None => {
            let at = node.range().start + 1 + node.tag_name().name().len();
            (at..at, format!(" {attr}=\"{value}\""))
        }
    }
}

/// Byte range of the quoted value of `attr` inside the opening tag that starts
/// at `node_range.start`. Only the opening tag is scanned, so attributes on
/// child elements are never matched by accident.
fn attr_value_span(svg: &str, node_range: Range<usize>, attr: &str) -> Option<Range<usize>> {
    let tag_end = node_range.start + svg[node_range.clone()].find('>')?;
    let tag = &svg[node_range.start..tag_end];

    let bytes = tag.as_bytes();
    let mut search_from = 0;
    while let Some(rel) = tag[search_from..].find(attr) {
        let at = search_from + rel;
        search_from = at + attr.len();

        // Must be a standalone attribute name preceded by whitespace.
        if at == 0 || !bytes[at - 1].is_ascii_whitespace() {
            continue;
        }
        let mut i = at + attr.len();
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() || bytes[i] != b'=' {
            continue;
        }
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let quote = *bytes.get(i)?;
        if quote != b'"' && quote != b'\'' {
            continue;
        }
        let value_start = i + 1;
        let value_len = tag[value_start..].find(quote as char)?;
        let abs = node_range.start + value_start;
        return Some(abs..abs + value_len);
    }
    None
}

fn splice(svg: &str, mut patches: Vec<(Range<usize>, String)>) -> String {
    // Back to front so earlier spans stay valid.
    patches.sort_by(|a, b| b.0.start.cmp(&a.0.start));
    let mut out = svg.to_owned();
    for (span, replacement) in patches {
        out.replace_range(span, &replacement);
    }
    out
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::compose::{ArtworkParams, compose_svg_with};
    use crate::foundation::core::Canvas;

    fn sample_svg() -> String {
        let params = ArtworkParams {
            stop_count: 3,
            base_hue: 120.0,
            canvas: Canvas::new(640, 480),
            blend: BlendMode::Normal,
            blur_std_deviation: 0.0,
        };
        compose_svg_with(&params, &mut SmallRng::seed_from_u64(11)).unwrap()
    }

    #[test]
    fn malformed_input_is_returned_unchanged() {
        let bad = "not valid xml";
        assert_eq!(update_combined_filter(bad, 5.0, BlendMode::Screen), bad);
        assert_eq!(update_blend_mode(bad, BlendMode::Screen), bad);
    }

    #[test]
    fn missing_filter_id_is_returned_unchanged() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"><rect width="1" height="1"/></svg>"#;
        assert_eq!(update_combined_filter(svg, 5.0, BlendMode::Screen), svg);
    }

    #[test]
    fn missing_blend_element_is_returned_unchanged() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"><rect width="1" height="1"/></svg>"#;
        assert_eq!(update_blend_mode(svg, BlendMode::Multiply), svg);
    }

    #[test]
    fn blend_patch_changes_only_the_mode_value() {
        let svg = sample_svg();
        let patched = update_blend_mode(&svg, BlendMode::Multiply);
        assert_eq!(
            patched,
            svg.replace("mode=\"normal\"", "mode=\"multiply\"")
        );
    }

    #[test]
    fn blend_patch_is_idempotent() {
        let svg = sample_svg();
        let once = update_blend_mode(&svg, BlendMode::Overlay);
        let twice = update_blend_mode(&once, BlendMode::Overlay);
        assert_eq!(once, twice);
    }

    #[test]
    fn combined_patch_updates_both_stages() {
        let svg = sample_svg();
        let patched = update_combined_filter(&svg, 2.5, BlendMode::Screen);
        assert!(patched.contains("stdDeviation=\"2.5\""));
        assert!(patched.contains("mode=\"screen\""));
        // Gradient centers survive untouched.
        let doc = roxmltree::Document::parse(&patched).unwrap();
        assert_eq!(
            doc.descendants()
                .filter(|n| n.has_tag_name("radialGradient"))
                .count(),
            3
        );
    }

    #[test]
    fn blend_stage_still_updates_when_blur_stage_is_missing() {
        let svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\"><defs><filter id=\"{FILTER_ID}\">\
             <feBlend mode=\"normal\" in=\"SourceGraphic\" in2=\"BackgroundImage\" />\
             </filter></defs></svg>"
        );
        let patched = update_combined_filter(&svg, 9.0, BlendMode::Darken);
        assert!(patched.contains("mode=\"darken\""));
        assert!(!patched.contains("stdDeviation"));
    }

    #[test]
    fn missing_mode_attribute_is_inserted() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"><filter id="combinedFilter"><feBlend in="SourceGraphic" in2="BackgroundImage" /></filter></svg>"#;
        let patched = update_blend_mode(svg, BlendMode::Multiply);
        let doc = roxmltree::Document::parse(&patched).unwrap();
        let blend = doc
            .descendants()
            .find(|n| n.has_tag_name("feBlend"))
            .unwrap();
        assert_eq!(blend.attribute("mode"), Some("multiply"));
        assert_eq!(blend.attribute("in"), Some("SourceGraphic"));
    }

    #[test]
    fn combined_patch_inserts_missing_stage_attributes() {
        let svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\"><filter id=\"{FILTER_ID}\">\
             <feGaussianBlur in=\"SourceGraphic\" result=\"blurred\" />\
             <feBlend in=\"blurred\" in2=\"BackgroundImage\" />\
             </filter></svg>"
        );
        let patched = update_combined_filter(&svg, 3.5, BlendMode::Screen);
        let doc = roxmltree::Document::parse(&patched).unwrap();
        let blur = doc
            .descendants()
            .find(|n| n.has_tag_name("feGaussianBlur"))
            .unwrap();
        assert_eq!(blur.attribute("stdDeviation"), Some("3.5"));
        let blend = doc
            .descendants()
            .find(|n| n.has_tag_name("feBlend"))
            .unwrap();
        assert_eq!(blend.attribute("mode"), Some("screen"));
    }

    #[test]
    fn attr_span_ignores_lookalike_attribute_names() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"><filter id="combinedFilter"><feBlend data-mode="x" mode="normal" in="a" in2="b"/></filter></svg>"#;
        let patched = update_combined_filter(svg, 1.0, BlendMode::Hue);
        assert!(patched.contains("data-mode=\"x\""));
        assert!(patched.contains(" mode=\"hue\""));
    }
}
