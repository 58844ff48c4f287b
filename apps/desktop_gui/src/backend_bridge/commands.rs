//! Backend commands queued from UI to backend worker.

use shared::domain::FeatureSet;

use crate::controller::reducer::RequestId;

pub enum BackendCommand {
    Predict {
        request_id: RequestId,
        features: FeatureSet,
    },
    CheckHealth,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Predict { .. } => "predict",
            BackendCommand::CheckHealth => "check_health",
        }
    }
}
