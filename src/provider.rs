//! Provider abstraction for machine translation backends.
//!
//! Callers (auto-fill, HTTP handlers) depend on `MachineTranslator` rather
//! than a concrete client, so the backend can be swapped or faked in tests.

use crate::batch::{self, BatchOutcome, BatchPolicy};
use crate::error::MtResult;
use crate::types::{LanguageDescriptor, TranslationResult};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

#[async_trait]
pub trait MachineTranslator: Send + Sync {
    /// Translate one text. Locale arguments are provider codes; `"auto"` asks
    /// the provider to detect the source language.
    ///
    /// Fails with `InvalidInput` on empty text without touching the network.
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<TranslationResult>;

    /// List the languages the provider supports.
    async fn supported_languages(&self) -> MtResult<Vec<LanguageDescriptor>>;

    /// Liveness probe. Never fails; any error is logged and reported as `false`.
    async fn is_available(&self) -> bool;

    /// Chunking and pacing used by `translate_batch`
    fn batch_policy(&self) -> BatchPolicy {
        BatchPolicy::default()
    }

    /// Translate many texts sequentially in chunks, isolating per-text failures.
    ///
    /// The outcome is positionally aligned with `texts`.
    async fn translate_batch(
        &self,
        texts: &[String],
        source_locale: &str,
        target_locale: &str,
        cancel: &CancellationToken,
    ) -> BatchOutcome {
        batch::translate_batch(
            self,
            texts,
            source_locale,
            target_locale,
            &self.batch_policy(),
            cancel,
        )
        .await
    }

    /// Name used in logs
    fn provider_name(&self) -> &str;
}
