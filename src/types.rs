use serde::{Deserialize, Serialize};

/// Outcome of one successful translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationResult {
    pub translated_text: String,
    /// Provider code of the detected source language, when the provider reports one
    pub detected_source_lang: Option<String>,
}

/// One entry of the provider's language list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageDescriptor {
    pub code: String,
    pub name: String,
    /// Codes this language can be translated into, if the provider lists them
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<String>,
}
