//! Machine translation gateway for the content backend.
//!
//! - `libretranslate`: HTTP client for a LibreTranslate-compatible provider
//! - `locale`: host ⇄ provider locale code tables
//! - `batch`: chunked sequential batch translation with per-text failures
//! - `autofill`: fill a target language's missing values from a source language
//! - `server`: HTTP routes exposing the above to the admin frontend

pub mod autofill;
pub mod batch;
pub mod config;
pub mod error;
pub mod libretranslate;
pub mod locale;
pub mod provider;
pub mod server;
pub mod types;

pub use batch::{with_cancellation, BatchFailure, BatchOutcome, BatchPolicy};
pub use error::{MtResult, TranslationError};
pub use libretranslate::LibreTranslateClient;
pub use locale::{from_provider_code, to_provider_code};
pub use provider::MachineTranslator;
pub use types::{LanguageDescriptor, TranslationResult};
