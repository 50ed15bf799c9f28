//! Locale code translation between host and provider identifiers.
//!
//! The host application uses underscore-separated codes (`zh_TW`, `en_US`),
//! the provider uses hyphen-separated ones (`zh-TW`, `en`). Both directions
//! are backed by fixed tables built once on first access via `OnceLock`.
//!
//! The reverse table is not the inverse of the forward table. `zh` maps
//! back to `zh_CN`, and provider script variants (`zh-Hans`, `zh-Hant`) have
//! no forward entry. Keep the two tables independent.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Host code → provider code
const HOST_TO_PROVIDER: &[(&str, &str)] = &[
    // Chinese
    ("zh", "zh"),
    ("zh_CN", "zh"),
    ("zh_TW", "zh-TW"),
    ("zh_HK", "zh-TW"),
    ("zh_SG", "zh"),
    ("zh_MO", "zh-TW"),
    // English
    ("en", "en"),
    ("en_US", "en"),
    ("en_GB", "en"),
    ("en_CA", "en"),
    ("en_AU", "en"),
    // Spanish
    ("es", "es"),
    ("es_ES", "es"),
    ("es_MX", "es"),
    // French
    ("fr", "fr"),
    ("fr_FR", "fr"),
    ("fr_CA", "fr"),
    // Portuguese
    ("pt", "pt"),
    ("pt_PT", "pt"),
    ("pt_BR", "pt"),
    // German
    ("de", "de"),
    ("de_DE", "de"),
    ("de_AT", "de"),
    ("de_CH", "de"),
    // Japanese
    ("ja", "ja"),
    ("ja_JP", "ja"),
    // Korean
    ("ko", "ko"),
    ("ko_KR", "ko"),
    // Single-code languages
    ("ar", "ar"),
    ("ru", "ru"),
    ("it", "it"),
    ("nl", "nl"),
    ("pl", "pl"),
    ("tr", "tr"),
    ("vi", "vi"),
    ("th", "th"),
    ("hi", "hi"),
    ("id", "id"),
    ("ms", "ms"),
    ("uk", "uk"),
    ("cs", "cs"),
    ("el", "el"),
    ("he", "he"),
    ("ro", "ro"),
    ("hu", "hu"),
    ("sv", "sv"),
    ("da", "da"),
    ("fi", "fi"),
    ("no", "no"),
    ("sk", "sk"),
    ("bg", "bg"),
    ("hr", "hr"),
    ("lt", "lt"),
    ("lv", "lv"),
    ("sl", "sl"),
    ("et", "et"),
    ("ca", "ca"),
    ("tl", "tl"),
    ("bn", "bn"),
    ("sr", "sr"),
    ("fa", "fa"),
    ("ur", "ur"),
];

/// Provider code → host code
const PROVIDER_TO_HOST: &[(&str, &str)] = &[
    // Chinese: bare "zh" is Simplified
    ("zh", "zh_CN"),
    ("zh-Hans", "zh_CN"),
    ("zh-Hant", "zh_TW"),
    ("zh-TW", "zh_TW"),
    ("zh-HK", "zh_HK"),
    ("zh-SG", "zh_SG"),
    ("zh-MO", "zh_MO"),
    // English
    ("en", "en"),
    ("en-US", "en_US"),
    ("en-GB", "en_GB"),
    ("en-CA", "en_CA"),
    ("en-AU", "en_AU"),
    // Spanish
    ("es", "es"),
    ("es-ES", "es_ES"),
    ("es-MX", "es_MX"),
    // French
    ("fr", "fr"),
    ("fr-FR", "fr_FR"),
    ("fr-CA", "fr_CA"),
    // Portuguese
    ("pt", "pt"),
    ("pt-PT", "pt_PT"),
    ("pt-BR", "pt_BR"),
    // German
    ("de", "de"),
    ("de-DE", "de_DE"),
    ("de-AT", "de_AT"),
    ("de-CH", "de_CH"),
    // Japanese
    ("ja", "ja"),
    ("ja-JP", "ja_JP"),
    // Korean
    ("ko", "ko"),
    ("ko-KR", "ko_KR"),
    // Single-code languages
    ("ar", "ar"),
    ("ru", "ru"),
    ("it", "it"),
    ("nl", "nl"),
    ("pl", "pl"),
    ("tr", "tr"),
    ("vi", "vi"),
    ("th", "th"),
    ("hi", "hi"),
    ("id", "id"),
    ("ms", "ms"),
    ("uk", "uk"),
    ("cs", "cs"),
    ("el", "el"),
    ("he", "he"),
    ("ro", "ro"),
    ("hu", "hu"),
    ("sv", "sv"),
    ("da", "da"),
    ("fi", "fi"),
    ("no", "no"),
    ("sk", "sk"),
    ("bg", "bg"),
    ("hr", "hr"),
    ("lt", "lt"),
    ("lv", "lv"),
    ("sl", "sl"),
    ("et", "et"),
    ("ca", "ca"),
    ("tl", "tl"),
    ("bn", "bn"),
    ("sr", "sr"),
    ("fa", "fa"),
    ("ur", "ur"),
];

/// Host code returned for any unmapped provider code whose base is Chinese
const DEFAULT_CHINESE_HOST_CODE: &str = "zh_CN";

/// The pair of lookup tables, read-only after initialization.
pub struct LocaleCodeMap {
    to_provider: HashMap<&'static str, &'static str>,
    from_provider: HashMap<&'static str, &'static str>,
}

static LOCALE_MAP: OnceLock<LocaleCodeMap> = OnceLock::new();

impl LocaleCodeMap {
    /// Get the process-wide table instance.
    pub fn get() -> &'static LocaleCodeMap {
        LOCALE_MAP.get_or_init(|| LocaleCodeMap {
            to_provider: HOST_TO_PROVIDER.iter().copied().collect(),
            from_provider: PROVIDER_TO_HOST.iter().copied().collect(),
        })
    }

    /// Exact-match forward lookup, `None` when the host code is unmapped.
    pub fn provider_code(&self, host_code: &str) -> Option<&'static str> {
        self.to_provider.get(host_code).copied()
    }

    /// Exact-match reverse lookup, `None` when the provider code is unmapped.
    pub fn host_code(&self, provider_code: &str) -> Option<&'static str> {
        self.from_provider.get(provider_code).copied()
    }
}

/// Convert a host locale code to the provider's code.
///
/// Unmapped codes are returned unchanged, on the assumption that the caller
/// may already hold a provider-compatible code (`"auto"` passes through this way).
pub fn to_provider_code(host_code: &str) -> &str {
    LocaleCodeMap::get()
        .provider_code(host_code)
        .unwrap_or(host_code)
}

/// Convert a provider locale code to the host's code.
///
/// Unmapped codes fall back to their first two characters as a base language
/// code, with a Chinese base resolving to `zh_CN`. Inputs shorter than two
/// characters are returned unchanged.
pub fn from_provider_code(provider_code: &str) -> &str {
    if let Some(mapped) = LocaleCodeMap::get().host_code(provider_code) {
        return mapped;
    }

    // Slice on a char boundary so multi-byte input cannot panic
    let base = match provider_code.char_indices().nth(2) {
        Some((end, _)) => &provider_code[..end],
        None if provider_code.chars().count() == 2 => provider_code,
        None => return provider_code,
    };

    if base == "zh" {
        DEFAULT_CHINESE_HOST_CODE
    } else {
        base
    }
}
