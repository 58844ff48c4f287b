use reqwest::StatusCode;
use thiserror::Error;

/// Shown whenever a failure carries no message from the service.
pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred while making prediction";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid API base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} responded with {status}")]
    Status {
        url: String,
        status: StatusCode,
        error: Option<String>,
    },
    #[error("malformed response body from {url}: {source}")]
    MalformedBody {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// Message for the error panel: the service's own `error` string when it
    /// sent one, the fixed fallback otherwise.
    pub fn user_message(&self) -> String {
        match self {
            Self::Status {
                error: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            _ => FALLBACK_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_surface_the_service_message() {
        let err = ClientError::Status {
            url: "http://localhost:5000/predict-simple".to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: Some("model unavailable".to_string()),
        };
        assert_eq!(err.user_message(), "model unavailable");
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn everything_else_falls_back() {
        let blank = ClientError::Status {
            url: "http://localhost:5000/predict-simple".to_string(),
            status: StatusCode::BAD_REQUEST,
            error: Some(String::new()),
        };
        assert_eq!(blank.user_message(), FALLBACK_ERROR_MESSAGE);

        let malformed = ClientError::MalformedBody {
            url: "http://localhost:5000/predict-simple".to_string(),
            source: serde_json::from_str::<serde_json::Value>("not json").unwrap_err(),
        };
        assert_eq!(malformed.user_message(), FALLBACK_ERROR_MESSAGE);
        assert_eq!(malformed.status(), None);
    }
}
