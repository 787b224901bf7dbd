use crate::foundation::error::{MeshyError, MeshyResult};
use crate::panel::Theme;

/// Sentinel `source` value identifying messages from the host application.
pub const HOST_SOURCE: &str = "penpot";

/// Messages the panel posts to the host application. Fire-and-forget: no
/// acknowledgment is awaited and no retry is attempted.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum OutboundMessage {
    AddToCanvas { data: String },
}

impl OutboundMessage {
    pub fn to_json(&self) -> MeshyResult<String> {
        serde_json::to_string(self).map_err(|e| MeshyError::serde(e.to_string()))
    }
}

/// Extract the theme from a host message, if `value` is one.
///
/// Only messages carrying the host sentinel in `source` and a recognized
/// `theme` are accepted; every other shape is ignored.
pub fn theme_from_host_message(value: &serde_json::Value) -> Option<Theme> {
    #[derive(serde::Deserialize)]
    struct ThemeMessage {
        source: String,
        theme: Theme,
    }

    let msg: ThemeMessage = serde_json::from_value(value.clone()).ok()?;
    (msg.source == HOST_SOURCE).then_some(msg.theme)
}
