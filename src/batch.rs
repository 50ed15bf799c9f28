//! Sequential, chunked batch translation.
//!
//! Texts are sent one request at a time in chunks of `chunk_size`, with a
//! fixed pause between chunks to stay under provider rate limits. A failing
//! text never aborts the batch: its slot stays empty and the error is
//! recorded next to its index.

use crate::error::{MtResult, TranslationError};
use crate::provider::MachineTranslator;
use crate::types::TranslationResult;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Chunking and pacing for batch translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchPolicy {
    /// Number of texts per chunk (must be >= 1)
    pub chunk_size: usize,
    /// Pause inserted between consecutive chunks
    pub pause: Duration,
}

impl BatchPolicy {
    pub const DEFAULT_CHUNK_SIZE: usize = 10;
    pub const DEFAULT_PAUSE: Duration = Duration::from_millis(100);

    pub fn new(chunk_size: usize, pause: Duration) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            pause,
        }
    }
}

impl Default for BatchPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CHUNK_SIZE, Self::DEFAULT_PAUSE)
    }
}

/// A text that could not be translated
#[derive(Debug)]
pub struct BatchFailure {
    /// Position of the text in the input
    pub index: usize,
    pub text: String,
    pub error: TranslationError,
}

/// Result of a batch call, aligned with the input texts
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// One slot per input text; `None` where translation failed
    pub results: Vec<Option<TranslationResult>>,
    /// Failures in input order
    pub failures: Vec<BatchFailure>,
}

impl BatchOutcome {
    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_some()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    fn record_failure(&mut self, index: usize, text: &str, error: TranslationError) {
        self.results.push(None);
        self.failures.push(BatchFailure {
            index,
            text: text.to_string(),
            error,
        });
    }
}

/// Run a future unless `cancel` fires first, in which case the future is
/// dropped (aborting any in-flight request) and `Cancelled` is returned.
pub async fn with_cancellation<T, F>(cancel: &CancellationToken, operation: F) -> MtResult<T>
where
    F: Future<Output = MtResult<T>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(TranslationError::Cancelled),
        result = operation => result,
    }
}

/// Translate `texts` through `translator` following `policy`.
///
/// Empty input returns an empty outcome without calling the translator.
/// When `cancel` fires, the in-flight call (or pause) is abandoned and every
/// text not yet processed is recorded as `Cancelled`.
pub async fn translate_batch<T>(
    translator: &T,
    texts: &[String],
    source_locale: &str,
    target_locale: &str,
    policy: &BatchPolicy,
    cancel: &CancellationToken,
) -> BatchOutcome
where
    T: MachineTranslator + ?Sized,
{
    let mut outcome = BatchOutcome {
        results: Vec::with_capacity(texts.len()),
        failures: Vec::new(),
    };

    if texts.is_empty() {
        return outcome;
    }

    let chunk_size = policy.chunk_size.max(1);
    let chunk_count = texts.len().div_ceil(chunk_size);

    for (chunk_index, chunk) in texts.chunks(chunk_size).enumerate() {
        debug!(
            "{}: Translating chunk {}/{} ({} texts, {} -> {})",
            translator.provider_name(),
            chunk_index + 1,
            chunk_count,
            chunk.len(),
            source_locale,
            target_locale
        );

        for (offset, text) in chunk.iter().enumerate() {
            let index = chunk_index * chunk_size + offset;

            if cancel.is_cancelled() {
                outcome.record_failure(index, text, TranslationError::Cancelled);
                continue;
            }

            let result = with_cancellation(
                cancel,
                translator.translate(text, source_locale, target_locale),
            )
            .await;

            match result {
                Ok(translated) => outcome.results.push(Some(translated)),
                Err(e) => {
                    if !matches!(e, TranslationError::Cancelled) {
                        warn!("Failed to translate text #{} '{}': {}", index, text, e);
                    }
                    outcome.record_failure(index, text, e);
                }
            }
        }

        // Pause between chunks, not after the last one
        let is_last = chunk_index + 1 == chunk_count;
        if !is_last && !cancel.is_cancelled() {
            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = sleep(policy.pause) => {}
            }
        }
    }

    if cancel.is_cancelled() {
        info!(
            "{}: Batch cancelled after {} of {} texts",
            translator.provider_name(),
            outcome.success_count(),
            texts.len()
        );
    } else {
        info!(
            "{}: Batch finished: {} succeeded, {} failed",
            translator.provider_name(),
            outcome.success_count(),
            outcome.failed_count()
        );
    }

    outcome
}
