use reqwest::StatusCode;
use thiserror::Error;

/// Failures of a single request/response exchange with the backend
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to build HTTP client: {source}")]
    Build {
        #[source]
        source: reqwest::Error,
    },
    #[error("network error calling '{endpoint}': {source}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("'{endpoint}' returned invalid response: {reason}")]
    InvalidResponse { endpoint: String, reason: String },
    #[error("'{endpoint}' reported status '{status}'")]
    Unhealthy { endpoint: String, status: String },
}

impl TransportError {
    pub fn network(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            endpoint: endpoint.into(),
            source,
        }
    }

    pub fn invalid_response(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    /// Short sentence suitable for a conversation turn
    pub fn user_message(&self) -> String {
        match self {
            TransportError::Build { .. } => "The HTTP client could not be initialised.".to_string(),
            TransportError::Network { endpoint, source } => {
                if source.is_connect() {
                    format!("Could not connect to the advisor service at {endpoint}.")
                } else if source.is_timeout() {
                    format!("The request to {endpoint} timed out.")
                } else if let Some(status) = source.status() {
                    match status {
                        StatusCode::NOT_FOUND => format!("Endpoint {endpoint} was not found."),
                        StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY => {
                            "The advisor service is currently unavailable.".to_string()
                        }
                        _ => format!("The request to {endpoint} failed: {}", status.as_u16()),
                    }
                } else if source.is_decode() {
                    format!("The reply from {endpoint} could not be read.")
                } else {
                    format!("Network error while calling {endpoint}.")
                }
            }
            TransportError::InvalidResponse { endpoint, .. } => {
                format!("The reply from {endpoint} was not understood.")
            }
            TransportError::Unhealthy { status, .. } => {
                format!("The advisor service reported status '{status}'.")
            }
        }
    }
}
