use serde::{Deserialize, Serialize};

/// An uploaded file as returned by the CMS media library.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub url: String,
    #[serde(default)]
    pub alternative_text: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

impl Media {
    pub fn alt(&self) -> &str {
        self.alternative_text.as_deref().unwrap_or("")
    }
}
