use serde::{Deserialize, Serialize};

/// Presentation knobs of the realizer. Every field has a default, so a
/// partial JSON object is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Token standing in for a missing constituent.
    pub placeholder: String,
    /// Output of a sentence whose render failed.
    pub incomplete_marker: String,
    /// Fail a sentence whose verbs carry roles outside their valency instead
    /// of dropping those roles.
    pub strict: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            placeholder: "___".to_string(),
            incomplete_marker: "[incomplete]".to_string(),
            strict: false,
        }
    }
}

impl RenderConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
