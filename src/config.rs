use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use zeroize::Zeroizing;

/// The API root used when `STOCKSCOPE_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
/// The session file used when `STOCKSCOPE_SESSION_FILE` is unset.
pub const DEFAULT_SESSION_FILE: &str = ".stockscope/session.json";

/// Where the session is kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionBackend {
    /// Lost when the process exits.
    Memory,
    /// A JSON file on disk.
    File(PathBuf),
}

/// Login credentials supplied through the environment.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: Zeroizing<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// The application's configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// The API root, without a trailing slash.
    pub api_base_url: String,
    /// Where the session token and user are stored.
    pub session_backend: SessionBackend,
    /// Settle delay for course and blog search.
    pub search_debounce: Duration,
    /// Settle delay for dictionary search.
    pub dictionary_debounce: Duration,
    /// Optional credentials for logging in without a stored session.
    pub credentials: Option<Credentials>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            session_backend: SessionBackend::File(PathBuf::from(DEFAULT_SESSION_FILE)),
            search_debounce: Duration::from_millis(300),
            dictionary_debounce: Duration::from_millis(500),
            credentials: None,
        }
    }
}

impl Config {
    /// Creates a new `Config` from environment variables.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `Config`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a `Config` from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let api_base_url = lookup("STOCKSCOPE_API_URL")
            .unwrap_or(defaults.api_base_url)
            .trim_end_matches('/')
            .to_string();

        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            anyhow::bail!("STOCKSCOPE_API_URL must start with http:// or https://");
        }

        let session_backend = match lookup("STOCKSCOPE_SESSION_FILE") {
            Some(value) if value.eq_ignore_ascii_case("memory") => SessionBackend::Memory,
            Some(value) if !value.is_empty() => SessionBackend::File(PathBuf::from(value)),
            _ => defaults.session_backend,
        };

        let search_debounce = match lookup("SEARCH_DEBOUNCE_MS") {
            Some(ms) => Duration::from_millis(ms.parse().context("Invalid SEARCH_DEBOUNCE_MS")?),
            None => defaults.search_debounce,
        };

        let dictionary_debounce = match lookup("DICTIONARY_DEBOUNCE_MS") {
            Some(ms) => {
                Duration::from_millis(ms.parse().context("Invalid DICTIONARY_DEBOUNCE_MS")?)
            }
            None => defaults.dictionary_debounce,
        };

        let credentials = match (lookup("STOCKSCOPE_EMAIL"), lookup("STOCKSCOPE_PASSWORD")) {
            (Some(email), Some(password)) => Some(Credentials {
                email,
                password: Zeroizing::new(password),
            }),
            (Some(_), None) => {
                anyhow::bail!("STOCKSCOPE_PASSWORD must be set when STOCKSCOPE_EMAIL is set")
            }
            _ => None,
        };

        Ok(Self {
            api_base_url,
            session_backend,
            search_debounce,
            dictionary_debounce,
            credentials,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply() {
        let config = config(&[]).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(
            config.session_backend,
            SessionBackend::File(PathBuf::from(DEFAULT_SESSION_FILE))
        );
        assert_eq!(config.search_debounce, Duration::from_millis(300));
        assert_eq!(config.dictionary_debounce, Duration::from_millis(500));
        assert!(config.credentials.is_none());
    }

    #[test]
    fn overrides_are_read() {
        let config = config(&[
            ("STOCKSCOPE_API_URL", "https://api.example.com/api/"),
            ("STOCKSCOPE_SESSION_FILE", "memory"),
            ("SEARCH_DEBOUNCE_MS", "0"),
            ("STOCKSCOPE_EMAIL", "a@b.com"),
            ("STOCKSCOPE_PASSWORD", "secret1"),
        ])
        .unwrap();
        assert_eq!(config.api_base_url, "https://api.example.com/api");
        assert_eq!(config.session_backend, SessionBackend::Memory);
        assert_eq!(config.search_debounce, Duration::ZERO);
        let credentials = config.credentials.unwrap();
        assert_eq!(credentials.email, "a@b.com");
        assert_eq!(credentials.password.as_str(), "secret1");
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(config(&[("SEARCH_DEBOUNCE_MS", "soon")]).is_err());
        assert!(config(&[("STOCKSCOPE_API_URL", "localhost:8080")]).is_err());
        assert!(config(&[("STOCKSCOPE_EMAIL", "a@b.com")]).is_err());
    }
}
