use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::{
    domain::FeatureSet,
    error::ErrorBody,
    protocol::{
        features_route, health_route, predict_simple_route, FeatureCatalog, PredictionResult,
        ServiceHealth,
    },
};
use tracing::{info, warn};

pub mod config;
pub mod error;

pub use config::{ClientConfig, API_BASE_URL_ENV, DEFAULT_API_BASE_URL};
pub use error::{ClientError, FALLBACK_ERROR_MESSAGE};
pub use reqwest::StatusCode;

/// The remote classifier, as seen by the UI and the CLI.
#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict(&self, features: &FeatureSet) -> Result<PredictionResult, ClientError>;
    async fn health(&self) -> Result<ServiceHealth, ClientError>;
    async fn feature_catalog(&self) -> Result<FeatureCatalog, ClientError>;
}

/// HTTP implementation of [`PredictionService`].
///
/// One request per call: no auth headers, no timeout, no retries.
#[derive(Debug, Clone)]
pub struct PredictionClient {
    http: Client,
    config: ClientConfig,
}

impl PredictionClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn get_json<T: DeserializeOwned>(&self, route: &str) -> Result<T, ClientError> {
        let url = self.config.endpoint(route);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.clone(),
                source,
            })?;
        decode_response(url, response).await
    }
}

#[async_trait]
impl PredictionService for PredictionClient {
    async fn predict(&self, features: &FeatureSet) -> Result<PredictionResult, ClientError> {
        let url = self.config.endpoint(predict_simple_route());
        info!(%url, "submitting prediction request");
        let response = self
            .http
            .post(&url)
            .json(features)
            .send()
            .await
            .map_err(|source| {
                warn!(%url, "prediction request failed: {source}");
                ClientError::Transport {
                    url: url.clone(),
                    source,
                }
            })?;
        let result: PredictionResult = decode_response(url, response).await?;
        info!(
            prediction = %result.prediction,
            confidence = result.confidence,
            "prediction received"
        );
        Ok(result)
    }

    async fn health(&self) -> Result<ServiceHealth, ClientError> {
        self.get_json(health_route()).await
    }

    async fn feature_catalog(&self) -> Result<FeatureCatalog, ClientError> {
        self.get_json(features_route()).await
    }
}

async fn decode_response<T: DeserializeOwned>(
    url: String,
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();
    let body = match response.bytes().await {
        Ok(body) => body,
        Err(source) => return Err(ClientError::Transport { url, source }),
    };

    if !status.is_success() {
        let error = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(|body| body.message());
        warn!(
            %url,
            status = status.as_u16(),
            error = error.as_deref().unwrap_or("<none>"),
            "prediction service returned an error status"
        );
        return Err(ClientError::Status { url, status, error });
    }

    serde_json::from_slice(&body).map_err(|source| {
        warn!(%url, "undecodable response body: {source}");
        ClientError::MalformedBody { url, source }
    })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
