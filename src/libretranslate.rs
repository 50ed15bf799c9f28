//! LibreTranslate REST client.
//!
//! Talks to `POST {base}/translate` and `GET {base}/languages`. Every call is
//! a single attempt with a fixed per-operation timeout; retry policy belongs
//! to the caller.

use crate::batch::BatchPolicy;
use crate::config::Config;
use crate::error::{MtResult, TranslationError};
use crate::provider::MachineTranslator;
use crate::types::{LanguageDescriptor, TranslationResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

const TRANSLATE_TIMEOUT: Duration = Duration::from_secs(30);
const LANGUAGES_TIMEOUT: Duration = Duration::from_secs(10);
const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateResponse {
    translated_text: String,
    #[serde(default)]
    detected_language_source: Option<String>,
    /// Shape returned by newer LibreTranslate releases for `source: "auto"`
    #[serde(default)]
    detected_language: Option<DetectedLanguage>,
}

#[derive(Debug, Deserialize)]
struct DetectedLanguage {
    language: String,
}

/// Builder errors (bad URL, bad header) mean the request was never sent
fn classify_send_error(err: reqwest::Error) -> TranslationError {
    if err.is_builder() {
        TranslationError::RequestBuildFailed(err.to_string())
    } else {
        TranslationError::TransportFailed(err)
    }
}

impl TranslateResponse {
    fn into_result(self) -> MtResult<TranslationResult> {
        if self.translated_text.is_empty() {
            return Err(TranslationError::ResponseParseFailed(
                "response contained an empty translatedText".to_string(),
            ));
        }

        let detected_source_lang = self
            .detected_language_source
            .filter(|lang| !lang.is_empty())
            .or_else(|| self.detected_language.map(|d| d.language));

        Ok(TranslationResult {
            translated_text: self.translated_text,
            detected_source_lang,
        })
    }
}

/// Client for a LibreTranslate-compatible service
#[derive(Debug, Clone)]
pub struct LibreTranslateClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    batch_policy: BatchPolicy,
}

impl LibreTranslateClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|key| !key.is_empty()),
            batch_policy: BatchPolicy::default(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.libretranslate_url.clone(),
            config.libretranslate_api_key.clone(),
        )
    }

    /// Override chunking and pacing for `translate_batch`
    pub fn with_batch_policy(mut self, policy: BatchPolicy) -> Self {
        self.batch_policy = policy;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn languages_url(&self) -> String {
        format!("{}/languages", self.base_url)
    }
}

#[async_trait]
impl MachineTranslator for LibreTranslateClient {
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<TranslationResult> {
        if text.is_empty() {
            return Err(TranslationError::InvalidInput(
                "text cannot be empty".to_string(),
            ));
        }

        // "auto" is passed through as-is; the provider detects the language
        let payload = TranslateRequest {
            q: text,
            source: source_locale,
            target: target_locale,
            format: "text",
            api_key: self.api_key.as_deref(),
        };
        let body = serde_json::to_vec(&payload)
            .map_err(|e| TranslationError::RequestBuildFailed(e.to_string()))?;

        debug!(
            "Sending translation request ({} chars, {} -> {})",
            text.chars().count(),
            source_locale,
            target_locale
        );

        let response = self
            .client
            .post(format!("{}/translate", self.base_url))
            .header("Content-Type", "application/json")
            .timeout(TRANSLATE_TIMEOUT)
            .body(body)
            .send()
            .await
            .map_err(classify_send_error)?;

        let status = response.status();
        let body = response.text().await?;

        if status != reqwest::StatusCode::OK {
            return Err(TranslationError::ProviderError {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TranslateResponse = serde_json::from_str(&body)?;
        parsed.into_result()
    }

    async fn supported_languages(&self) -> MtResult<Vec<LanguageDescriptor>> {
        let response = self
            .client
            .get(self.languages_url())
            .timeout(LANGUAGES_TIMEOUT)
            .send()
            .await
            .map_err(classify_send_error)?;

        let status = response.status();
        let body = response.text().await?;

        if status != reqwest::StatusCode::OK {
            return Err(TranslationError::ProviderError {
                status: status.as_u16(),
                body,
            });
        }

        let languages: Vec<LanguageDescriptor> = serde_json::from_str(&body)?;
        debug!("Provider reports {} languages", languages.len());
        Ok(languages)
    }

    async fn is_available(&self) -> bool {
        let result = self
            .client
            .get(self.languages_url())
            .timeout(HEALTH_CHECK_TIMEOUT)
            .send()
            .await;

        match result {
            Ok(response) if response.status() == reqwest::StatusCode::OK => true,
            Ok(response) => {
                warn!(
                    "LibreTranslate health check failed: status {}",
                    response.status()
                );
                false
            }
            Err(e) => {
                warn!("LibreTranslate health check failed: {}", e);
                false
            }
        }
    }

    fn batch_policy(&self) -> BatchPolicy {
        self.batch_policy.clone()
    }

    fn provider_name(&self) -> &str {
        "LibreTranslate"
    }
}
