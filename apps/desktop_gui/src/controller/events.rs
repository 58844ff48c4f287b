//! Backend-to-UI events and error modeling for the desktop GUI controller.

use client_core::ClientError;
use shared::protocol::{PredictionResult, ServiceHealth};

use crate::controller::reducer::RequestId;

pub enum UiEvent {
    Info(String),
    Error(UiError),
    PredictionCompleted {
        request_id: RequestId,
        outcome: Result<PredictionResult, UiError>,
    },
    ServiceHealthChecked(ServiceHealth),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Configuration,
    Transport,
    Service,
    MalformedResponse,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Prediction,
    HealthCheck,
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Configuration => "Configuration",
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::Service => "Service",
        UiErrorCategory::MalformedResponse => "Response",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("connection")
            || message_lower.contains("disconnected")
            || message_lower.contains("queue is full")
            || message_lower.contains("runtime")
        {
            UiErrorCategory::Transport
        } else if message_lower.contains("url") || message_lower.contains("config") {
            UiErrorCategory::Configuration
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    /// Keeps the user-facing message the service supplied, categorized by
    /// where the request failed.
    pub fn from_client_error(context: UiErrorContext, err: &ClientError) -> Self {
        let category = match err {
            ClientError::InvalidBaseUrl { .. } => UiErrorCategory::Configuration,
            ClientError::Transport { .. } => UiErrorCategory::Transport,
            ClientError::Status { .. } => UiErrorCategory::Service,
            ClientError::MalformedBody { .. } => UiErrorCategory::MalformedResponse,
        };
        Self {
            category,
            context,
            message: err.user_message(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::{StatusCode, FALLBACK_ERROR_MESSAGE};

    #[test]
    fn client_errors_keep_service_message() {
        let err = UiError::from_client_error(
            UiErrorContext::Prediction,
            &ClientError::Status {
                url: "http://localhost:5000/predict-simple".to_string(),
                status: StatusCode::SERVICE_UNAVAILABLE,
                error: Some("model unavailable".to_string()),
            },
        );
        assert_eq!(err.category(), UiErrorCategory::Service);
        assert_eq!(err.context(), UiErrorContext::Prediction);
        assert_eq!(err.message(), "model unavailable");
    }

    #[test]
    fn client_errors_without_message_use_fallback() {
        let err = UiError::from_client_error(
            UiErrorContext::Prediction,
            &ClientError::InvalidBaseUrl {
                url: "nope".to_string(),
                reason: "relative URL without a base".to_string(),
            },
        );
        assert_eq!(err.category(), UiErrorCategory::Configuration);
        assert_eq!(err.message(), FALLBACK_ERROR_MESSAGE);
    }

    #[test]
    fn classifies_backend_command_processor_disconnect_as_transport_error() {
        let err = UiError::from_message(
            UiErrorContext::Prediction,
            "Backend command processor disconnected (possible startup/runtime failure)",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
        assert_eq!(err_label(err.category()), "Transport");
    }
}
