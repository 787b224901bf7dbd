//! Meshy generates decorative mesh-gradient SVG artwork for a design-tool
//! panel.
//!
//! The pipeline is small and explicitly staged:
//!
//! 1. [`generate_colors`] derives a split-complementary palette from a stop
//!    count and a base hue
//! 2. [`generate_stops`] pairs each color with a randomized radial-gradient
//!    center
//! 3. [`Artwork`] holds the structured document and serializes it with
//!    [`Artwork::to_svg`]
//! 4. [`update_blend_mode`] / [`update_combined_filter`] patch an
//!    already-serialized document in place, so blur/blend tweaks never
//!    re-randomize gradient positions
//!
//! [`PanelState`] wires the stages to discrete input events and to the host
//! application's message protocol. Randomness is unseeded at the convenience
//! entry points (reshuffle-on-demand is the feature) and injectable
//! everywhere else.

#![forbid(unsafe_code)]

pub mod compose;
pub mod filter;
pub mod foundation;
pub mod gradient;
pub mod messages;
pub mod palette;
pub mod panel;
pub mod patch;

pub use compose::{Artwork, ArtworkParams, compose_svg, compose_svg_with};
pub use filter::{BlendMode, FILTER_ID, FilterSpec};
pub use foundation::core::Canvas;
pub use foundation::error::{MeshyError, MeshyResult};
pub use gradient::{GradientStop, generate_stops};
pub use messages::{HOST_SOURCE, OutboundMessage, theme_from_host_message};
pub use palette::{Hsl, generate_colors};
pub use panel::{PanelEvent, PanelState, Theme};
pub use patch::{update_blend_mode, update_combined_filter};
