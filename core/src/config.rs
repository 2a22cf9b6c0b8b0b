//! Client configuration: the API key, API version and base URI.
//!
//! # Design
//! `Config` is built once and never mutated; every resource client reads the
//! same instance through the dispatcher. The API key is redacted from
//! `Debug` output so configuration can be logged safely.

use std::fmt;

use crate::error::{ConjoinError, Result};

pub const DEFAULT_API_VERSION: &str = "v1";
pub const DEFAULT_API_URI: &str = "https://api.conjoin.com";

pub const ENV_API_KEY: &str = "CONJOIN_API_KEY";
pub const ENV_API_VERSION: &str = "CONJOIN_API_VERSION";
pub const ENV_API_URI: &str = "CONJOIN_API_URI";

/// Optional construction-time overrides.
#[derive(Debug, Clone, Default)]
pub struct ConjoinOptions {
    pub api_version: Option<String>,
    /// Points the client at a different host. Only meant for tests and
    /// staging environments.
    pub dangerously_set_api_uri: Option<String>,
}

impl ConjoinOptions {
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    pub fn dangerously_set_api_uri(mut self, uri: impl Into<String>) -> Self {
        self.dangerously_set_api_uri = Some(uri.into());
        self
    }
}

#[derive(Clone)]
pub struct Config {
    api_key: String,
    api_version: String,
    api_uri: String,
}

impl Config {
    pub fn new(api_key: impl Into<String>, options: ConjoinOptions) -> Self {
        let api_uri = options
            .dangerously_set_api_uri
            .unwrap_or_else(|| DEFAULT_API_URI.to_string());
        Self {
            api_key: api_key.into(),
            api_version: options
                .api_version
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            api_uri: api_uri.trim_end_matches('/').to_string(),
        }
    }

    /// Reads `CONJOIN_API_KEY`, `CONJOIN_API_VERSION` and `CONJOIN_API_URI`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup(ENV_API_KEY)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ConjoinError::Config(format!("{ENV_API_KEY} is not set")))?;
        let options = ConjoinOptions {
            api_version: lookup(ENV_API_VERSION),
            dangerously_set_api_uri: lookup(ENV_API_URI),
        };
        Ok(Self::new(api_key, options))
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn api_uri(&self) -> &str {
        &self.api_uri
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"***")
            .field("api_version", &self.api_version)
            .field("api_uri", &self.api_uri)
            .finish()
    }
}
