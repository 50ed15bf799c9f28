use anyhow::Result;

#[derive(Debug, Clone)]
pub struct Config {
    // LibreTranslate
    pub libretranslate_url: String,
    pub libretranslate_api_key: Option<String>,

    // Auto-fill
    pub default_source_lang: String,

    // Server
    pub api_key: Option<String>,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // LibreTranslate
            libretranslate_url: non_empty_var("LIBRETRANSLATE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| "http://localhost:5000".to_string()),
            libretranslate_api_key: non_empty_var("LIBRETRANSLATE_API_KEY"),

            // Auto-fill (host locale code, e.g. "en" or "zh_CN")
            default_source_lang: non_empty_var("DEFAULT_SOURCE_LANG")
                .unwrap_or_else(|| "en".to_string()),

            // Server
            api_key: non_empty_var("API_KEY"),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
        })
    }
}

/// Read an env var, treating an empty value the same as an unset one
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
