//! Auto-fill a target language from the source language with machine translation.
//!
//! Locale codes in requests are host codes; they are converted to provider
//! codes before the batch runs.

use crate::error::{MtResult, TranslationError};
use crate::locale::to_provider_code;
use crate::provider::MachineTranslator;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoFillLanguageRequest {
    pub target_lang: String,
    /// Defaults to the configured source language when absent or empty
    #[serde(default)]
    pub source_lang: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoFillLanguageResponse {
    pub total: usize,
    pub success_count: usize,
    pub failed_count: usize,
    pub message: String,
}

/// A message key whose target-language value is missing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoFillEntry {
    pub key: String,
    pub source_text: String,
}

#[derive(Debug, Clone)]
pub struct AutoFillOutcome {
    pub response: AutoFillLanguageResponse,
    /// `(key, translated value)` for every entry that succeeded, in input order
    pub filled: Vec<(String, String)>,
}

pub async fn auto_fill_language<T>(
    translator: &T,
    request: &AutoFillLanguageRequest,
    entries: &[AutoFillEntry],
    default_source_lang: &str,
    cancel: &CancellationToken,
) -> MtResult<AutoFillOutcome>
where
    T: MachineTranslator + ?Sized,
{
    let target_lang = request.target_lang.trim();
    if target_lang.is_empty() {
        return Err(TranslationError::InvalidInput(
            "target_lang is required".to_string(),
        ));
    }

    let source_lang = request
        .source_lang
        .as_deref()
        .map(str::trim)
        .filter(|lang| !lang.is_empty())
        .unwrap_or(default_source_lang);

    let pending: Vec<&AutoFillEntry> = entries
        .iter()
        .filter(|entry| !entry.source_text.trim().is_empty())
        .collect();

    if pending.is_empty() {
        return Ok(AutoFillOutcome {
            response: AutoFillLanguageResponse {
                total: 0,
                success_count: 0,
                failed_count: 0,
                message: summary_message(0, 0, 0),
            },
            filled: Vec::new(),
        });
    }

    let texts: Vec<String> = pending.iter().map(|e| e.source_text.clone()).collect();
    let provider_source = to_provider_code(source_lang);
    let provider_target = to_provider_code(target_lang);

    info!(
        "Auto-filling {} entries {} -> {} via {} ({} -> {})",
        texts.len(),
        source_lang,
        target_lang,
        translator.provider_name(),
        provider_source,
        provider_target
    );

    let outcome = translator
        .translate_batch(&texts, provider_source, provider_target, cancel)
        .await;

    let filled: Vec<(String, String)> = pending
        .iter()
        .zip(outcome.results)
        .filter_map(|(entry, result)| result.map(|r| (entry.key.clone(), r.translated_text)))
        .collect();

    let total = texts.len();
    let success_count = filled.len();
    let failed_count = total - success_count;

    info!(
        "Auto-fill to {} finished: {}/{} succeeded",
        target_lang, success_count, total
    );

    Ok(AutoFillOutcome {
        response: AutoFillLanguageResponse {
            total,
            success_count,
            failed_count,
            message: summary_message(total, success_count, failed_count),
        },
        filled,
    })
}

fn summary_message(total: usize, success: usize, failed: usize) -> String {
    if total == 0 {
        return "Nothing to translate".to_string();
    }
    if failed == 0 {
        format!("Auto-filled {} of {} entries", success, total)
    } else {
        format!(
            "Auto-filled {} of {} entries ({} failed)",
            success, total, failed
        )
    }
}
