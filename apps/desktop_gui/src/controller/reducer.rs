//! Form state and the idle/loading/success/error transitions.

use shared::{
    domain::{FeatureKey, FeatureSet},
    protocol::PredictionResult,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub enum UiState {
    Idle,
    Loading { request_id: RequestId },
    Success(PredictionResult),
    Error(String),
}

/// A prediction the caller must hand to the backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingPrediction {
    pub request_id: RequestId,
    pub features: FeatureSet,
}

#[derive(Debug)]
pub struct FormController {
    features: FeatureSet,
    state: UiState,
    next_request_id: u64,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new()
    }
}

impl FormController {
    pub fn new() -> Self {
        Self {
            features: FeatureSet::default(),
            state: UiState::Idle,
            next_request_id: 1,
        }
    }

    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, UiState::Loading { .. })
    }

    pub fn update_field(&mut self, key: FeatureKey, raw_input: &str) -> f64 {
        self.features.update_from_input(key, raw_input)
    }

    /// Starts a prediction unless one is already in flight.
    pub fn submit_prediction(&mut self) -> Option<PendingPrediction> {
        if self.is_loading() {
            tracing::debug!("prediction already in flight; ignoring submit");
            return None;
        }
        let request_id = RequestId(self.next_request_id);
        self.next_request_id += 1;
        self.state = UiState::Loading { request_id };
        Some(PendingPrediction {
            request_id,
            features: self.features,
        })
    }

    /// Restores defaults. A pending request keeps the loading state; its
    /// outcome is still applied when it lands.
    pub fn reset_form(&mut self) {
        self.features = FeatureSet::default();
        if !self.is_loading() {
            self.state = UiState::Idle;
        }
    }

    /// Applies the outcome of `request_id`. Returns false when that request is
    /// not the one in flight.
    pub fn apply_outcome(
        &mut self,
        request_id: RequestId,
        outcome: Result<PredictionResult, String>,
    ) -> bool {
        match self.state {
            UiState::Loading { request_id: active } if active == request_id => {}
            _ => {
                tracing::warn!(request_id = request_id.0, "dropping stale prediction outcome");
                return false;
            }
        }
        self.state = match outcome {
            Ok(result) => UiState::Success(result),
            Err(message) => UiState::Error(message),
        };
        true
    }
}
