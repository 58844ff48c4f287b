use serde::{Deserialize, Serialize};

use crate::domain::Diagnosis;

pub fn predict_simple_route() -> &'static str {
    "/predict-simple"
}

pub fn health_route() -> &'static str {
    "/health"
}

pub fn features_route() -> &'static str {
    "/features"
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities {
    pub malignant: f64,
    pub benign: f64,
}

/// Classification returned by `POST /predict-simple`.
///
/// Percentages are taken as reported; nothing here checks that the two
/// probabilities add up to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: String,
    pub confidence: f64,
    pub probability: ClassProbabilities,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_features: Option<serde_json::Value>,
}

impl PredictionResult {
    pub fn diagnosis(&self) -> Diagnosis {
        Diagnosis::from_label(&self.prediction)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
    #[serde(default)]
    pub scaler_loaded: bool,
}

impl ServiceHealth {
    pub fn is_ready(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy") && self.model_loaded && self.scaler_loaded
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureCatalog {
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub count: usize,
}
