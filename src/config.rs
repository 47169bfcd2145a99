use anyhow::{bail, Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Locale resources
    pub locales_base_url: String,
    pub locales_path: String,
    pub request_timeout_secs: u64,

    // Fallback dictionaries (embedded copy when unset)
    pub fallback_file: Option<String>,

    // Language preference storage
    pub preferences_file: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let request_timeout_secs = match std::env::var("LOCALES_TIMEOUT_SECS") {
            Ok(v) => v
                .parse::<u64>()
                .with_context(|| format!("LOCALES_TIMEOUT_SECS is not a number: '{}'", v))?,
            Err(_) => 10,
        };
        if request_timeout_secs == 0 {
            bail!("LOCALES_TIMEOUT_SECS must be greater than zero");
        }

        Ok(Self {
            locales_base_url: std::env::var("LOCALES_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            locales_path: std::env::var("LOCALES_PATH")
                .unwrap_or_else(|_| "/static/locales".to_string()),
            request_timeout_secs,

            fallback_file: std::env::var("LOCALES_FALLBACK_FILE")
                .ok()
                .filter(|v| !v.trim().is_empty()),

            preferences_file: std::env::var("PREFERENCES_FILE")
                .unwrap_or_else(|_| "data/preferences.json".to_string()),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locales_base_url: "http://localhost:8000".to_string(),
            locales_path: "/static/locales".to_string(),
            request_timeout_secs: 10,
            fallback_file: None,
            preferences_file: "data/preferences.json".to_string(),
        }
    }
}
