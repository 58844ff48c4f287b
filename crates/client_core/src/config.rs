use url::Url;

use crate::error::ClientError;

pub const API_BASE_URL_ENV: &str = "API_BASE_URL";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

/// Where the prediction service lives. Resolved once at startup and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_base_url: Url,
}

impl ClientConfig {
    pub fn new(api_base_url: &str) -> Result<Self, ClientError> {
        let trimmed = api_base_url.trim();
        let parsed = Url::parse(trimmed).map_err(|err| ClientError::InvalidBaseUrl {
            url: trimmed.to_string(),
            reason: err.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl {
                url: trimmed.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }
        Ok(Self {
            api_base_url: parsed,
        })
    }

    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_raw(read_non_empty_env_var(API_BASE_URL_ENV).as_deref())
    }

    /// Unset or blank values fall back to the local default service.
    pub fn from_raw(raw: Option<&str>) -> Result<Self, ClientError> {
        match raw.map(str::trim).filter(|value| !value.is_empty()) {
            Some(value) => Self::new(value),
            None => Self::new(DEFAULT_API_BASE_URL),
        }
    }

    pub fn api_base_url(&self) -> &Url {
        &self.api_base_url
    }

    pub fn endpoint(&self, route: &str) -> String {
        format!(
            "{}{}",
            self.api_base_url.as_str().trim_end_matches('/'),
            route
        )
    }
}

fn read_non_empty_env_var(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) if value.trim().is_empty() => {
            tracing::debug!("{name} was set but empty");
            None
        }
        Ok(value) => Some(value),
        Err(err) => {
            tracing::debug!("{name} unavailable: {err}");
            None
        }
    }
}
