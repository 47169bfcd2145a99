//! Fetching dictionaries over HTTP.
//!
//! One JSON resource per language at `{base_url}{locales_path}/{code}.json`.
//! All languages are requested concurrently; the first failure wins and the
//! remaining requests are dropped.

use crate::config::Config;
use crate::i18n::{Language, TranslationDictionary, Translations};
use anyhow::{Context, Result};
use futures::future::try_join_all;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

/// Why a dictionary could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to fetch {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to fetch {url}: HTTP {status}")]
    Status { url: String, status: StatusCode },

    #[error("Invalid dictionary JSON at {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone)]
pub struct LocaleLoader {
    client: reqwest::Client,
    base_url: String,
    locales_path: String,
}

impl LocaleLoader {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to build HTTP client for locale resources")?;

        Ok(Self::with_client(
            client,
            &config.locales_base_url,
            &config.locales_path,
        ))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str, locales_path: &str) -> Self {
        let locales_path = locales_path.trim_matches('/');
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            locales_path: if locales_path.is_empty() {
                String::new()
            } else {
                format!("/{}", locales_path)
            },
        }
    }

    /// URL of a language's dictionary resource.
    pub fn locale_url(&self, language: Language) -> String {
        format!(
            "{}{}/{}",
            self.base_url,
            self.locales_path,
            language.config().resource_file()
        )
    }

    /// Fetch and parse one language's dictionary.
    pub async fn fetch_dictionary(
        &self,
        language: Language,
    ) -> Result<TranslationDictionary, LoadError> {
        let url = self.locale_url(language);
        debug!("Fetching {} dictionary from {}", language.name(), url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| LoadError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status { url, status });
        }

        let body = response
            .text()
            .await
            .map_err(|source| LoadError::Transport {
                url: url.clone(),
                source,
            })?;

        TranslationDictionary::from_json(&body).map_err(|source| LoadError::Parse { url, source })
    }

    /// Fetch every language concurrently. Fails if any single fetch fails.
    pub async fn fetch_all(&self, languages: &[Language]) -> Result<Translations, LoadError> {
        let fetches = languages.iter().map(|&language| async move {
            self.fetch_dictionary(language)
                .await
                .map(|dictionary| (language.code().to_string(), dictionary))
        });

        Ok(try_join_all(fetches).await?.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn create_test_loader(base_url: &str) -> LocaleLoader {
        LocaleLoader::with_client(reqwest::Client::new(), base_url, "/static/locales")
    }

    // ==================== URL Tests ====================

    #[test]
    fn test_locale_url() {
        let loader = create_test_loader("http://localhost:8000");
        assert_eq!(
            loader.locale_url(Language::POLISH),
            "http://localhost:8000/static/locales/pl.json"
        );
    }

    #[test]
    fn test_locale_url_normalizes_slashes() {
        let loader =
            LocaleLoader::with_client(reqwest::Client::new(), "http://host/", "static/locales/");
        assert_eq!(
            loader.locale_url(Language::ENGLISH),
            "http://host/static/locales/en.json"
        );
    }

    #[test]
    fn test_locale_url_with_empty_path() {
        let loader = LocaleLoader::with_client(reqwest::Client::new(), "http://host", "/");
        assert_eq!(loader.locale_url(Language::ENGLISH), "http://host/en.json");
    }

    #[test]
    fn test_new_from_config() {
        let config = Config {
            locales_base_url: "http://cdn.example.com/".to_string(),
            ..Config::default()
        };
        let loader = LocaleLoader::new(&config).expect("Should build client");
        assert_eq!(
            loader.locale_url(Language::POLISH),
            "http://cdn.example.com/static/locales/pl.json"
        );
    }

    // ==================== fetch_dictionary Tests ====================

    #[tokio::test]
    async fn test_fetch_dictionary_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/static/locales/en.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"title":"Hello","categories":{"weather":"Weather"}}"#),
            )
            .mount(&mock_server)
            .await;

        let dictionary = create_test_loader(&mock_server.uri())
            .fetch_dictionary(Language::ENGLISH)
            .await
            .expect("Should fetch successfully");

        assert_eq!(dictionary.text("title"), Some("Hello"));
        assert_eq!(dictionary.category("weather"), Some("Weather"));
    }

    #[tokio::test]
    async fn test_fetch_dictionary_404_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/static/locales/pl.json"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
            .mount(&mock_server)
            .await;

        let err = create_test_loader(&mock_server.uri())
            .fetch_dictionary(Language::POLISH)
            .await
            .unwrap_err();

        assert!(matches!(err, LoadError::Status { status, .. } if status == StatusCode::NOT_FOUND));
        assert!(
            err.to_string().contains("404"),
            "Error should mention 404 status: {}",
            err
        );
    }

    #[tokio::test]
    async fn test_fetch_dictionary_invalid_json() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/static/locales/en.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<!DOCTYPE html><html><body>Error</body></html>"),
            )
            .mount(&mock_server)
            .await;

        let err = create_test_loader(&mock_server.uri())
            .fetch_dictionary(Language::ENGLISH)
            .await
            .unwrap_err();

        assert!(matches!(err, LoadError::Parse { .. }));
        assert!(err.to_string().contains("/static/locales/en.json"));
    }

    #[tokio::test]
    async fn test_fetch_dictionary_connection_error() {
        // Nothing listens on port 1
        let err = create_test_loader("http://127.0.0.1:1")
            .fetch_dictionary(Language::ENGLISH)
            .await
            .unwrap_err();

        assert!(matches!(err, LoadError::Transport { .. }));
    }

    // ==================== fetch_all Tests ====================

    #[tokio::test]
    async fn test_fetch_all_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/static/locales/en.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"title":"Hello"}"#))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/static/locales/pl.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"title":"Witaj"}"#))
            .mount(&mock_server)
            .await;

        let translations = create_test_loader(&mock_server.uri())
            .fetch_all(&Language::enabled())
            .await
            .expect("Should fetch both languages");

        assert_eq!(translations.codes(), vec!["en", "pl"]);
        assert_eq!(translations.get("pl").unwrap().text("title"), Some("Witaj"));
    }

    #[tokio::test]
    async fn test_fetch_all_fails_if_one_language_fails() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/static/locales/en.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"title":"Hello"}"#))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/static/locales/pl.json"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let result = create_test_loader(&mock_server.uri())
            .fetch_all(&Language::enabled())
            .await;

        assert!(matches!(result, Err(LoadError::Status { .. })));
    }

    #[tokio::test]
    async fn test_fetch_all_no_languages_is_empty() {
        let translations = create_test_loader("http://127.0.0.1:1")
            .fetch_all(&[])
            .await
            .expect("Nothing to fetch");
        assert!(translations.is_empty());
    }
}
