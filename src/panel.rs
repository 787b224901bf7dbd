//! Pure panel state transitions. The embedding shell owns the DOM and the
//! message transport; this module owns what happens between an input event
//! and the next rendered document.

use rand::Rng;

use crate::{
    compose::{Artwork, ArtworkParams},
    filter::{BlendMode, FilterSpec},
    foundation::core::Canvas,
    messages::{OutboundMessage, theme_from_host_message},
};

/// Host UI theme, seeded from the initial query string and updated by host
/// theme-change messages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Read the initial theme from a query string (`?theme=dark`). Absent or
    /// unrecognized values fall back to light.
    pub fn from_query(query: &str) -> Self {
        query
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "theme")
            .map(|(_, value)| match value {
                "dark" => Self::Dark,
                _ => Self::Light,
            })
            .unwrap_or_default()
    }
}

/// One discrete user or host input.
#[derive(Clone, Debug, PartialEq)]
pub enum PanelEvent {
    SetStopCount(usize),
    SetBlurStrength(f64),
    SetBlendMode(BlendMode),
    Regenerate,
    AddToCanvas,
    Host(serde_json::Value),
}

/// The whole panel state. Transitions go through [`PanelState::apply`], which
/// returns the next state instead of mutating shared variables.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PanelState {
    pub stop_count: usize,
    pub blend: BlendMode,
    pub blur_std_deviation: f64,
    pub canvas: Canvas,
    pub theme: Theme,
    artwork: Option<Artwork>,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            stop_count: 3,
            blend: BlendMode::Normal,
            blur_std_deviation: 0.0,
            canvas: Canvas::default(),
            theme: Theme::default(),
            artwork: None,
        }
    }
}

impl PanelState {
    /// Panel startup: defaults plus the query-string theme and a first render.
    pub fn initial<R: Rng + ?Sized>(query: &str, rng: &mut R) -> Self {
        let state = Self {
            theme: Theme::from_query(query),
            ..Self::default()
        };
        state.regenerated(rng)
    }

    /// The current artwork, if a generation has happened yet.
    pub fn artwork(&self) -> Option<&Artwork> {
        self.artwork.as_ref()
    }

    /// Serialized form of the current artwork, for the preview surface.
    pub fn document(&self) -> Option<String> {
        self.artwork.as_ref().map(Artwork::to_svg)
    }

    /// Apply one input event, returning the next state and an outbound host
    /// message when the event produces one.
    ///
    /// Failures never escape: a generation that does not validate is logged
    /// and the previous artwork stays on screen.
    pub fn apply<R: Rng + ?Sized>(
        self,
        event: PanelEvent,
        rng: &mut R,
    ) -> (Self, Option<OutboundMessage>) {
        match event {
            PanelEvent::SetStopCount(count) => {
                if count == 0 {
                    tracing::warn!("ignoring stop count update: stop_count must be >= 1");
                    return (self, None);
                }
                let next = Self {
                    stop_count: count,
                    ..self
                };
                (next.regenerated(rng), None)
            }
            PanelEvent::SetBlurStrength(blur) => {
                if let Err(err) = FilterSpec::new(self.blend, blur).validate() {
                    tracing::warn!(%err, "ignoring blur update");
                    return (self, None);
                }
                let mut next = Self {
                    blur_std_deviation: blur,
                    ..self
                };
                if let Some(artwork) = next.artwork.as_mut() {
                    // Validated above; cannot fail.
                    let _ = artwork.set_blur(blur);
                }
                (next, None)
            }
            PanelEvent::SetBlendMode(mode) => {
                let mut next = Self {
                    blend: mode,
                    ..self
                };
                if let Some(artwork) = next.artwork.as_mut() {
                    artwork.set_blend_mode(mode);
                }
                (next, None)
            }
            PanelEvent::Regenerate => (self.regenerated(rng), None),
            PanelEvent::AddToCanvas => {
                let message = self
                    .artwork
                    .as_ref()
                    .map(|artwork| OutboundMessage::AddToCanvas {
                        data: artwork.to_svg(),
                    });
                (self, message)
            }
            PanelEvent::Host(value) => {
                let next = match theme_from_host_message(&value) {
                    Some(theme) => Self { theme, ..self },
                    None => self,
                };
                (next, None)
            }
        }
    }

    /// Rebuild the artwork with a freshly randomized base hue. The previous
    /// artwork is kept when the current controls do not validate.
    fn regenerated<R: Rng + ?Sized>(mut self, rng: &mut R) -> Self {
        let params = ArtworkParams {
            stop_count: self.stop_count,
            base_hue: f64::from(rng.random_range(0..=360u32)),
            canvas: self.canvas,
            blend: self.blend,
            blur_std_deviation: self.blur_std_deviation,
        };
        match Artwork::generate(&params, rng) {
            Ok(artwork) => self.artwork = Some(artwork),
            Err(err) => tracing::warn!(%err, "keeping previous artwork"),
        }
        self
    }
}
