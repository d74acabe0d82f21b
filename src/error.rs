use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not configured: {0}")]
    NotConfigured(String),

    #[error("upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("unrecognized response shape: {0}")]
    UnrecognizedResponseShape(String),

    #[error("network failure: {0}")]
    Network(#[from] reqwest::Error),
}

impl GenError {
    /// Stable tag for the error variant, safe to match on across versions.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::NotConfigured(_) => "not_configured",
            Self::Upstream { .. } => "upstream_error",
            Self::UnrecognizedResponseShape(_) => "unrecognized_response_shape",
            Self::Network(_) => "network_failure",
        }
    }

    /// HTTP status for upstream failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true for transient errors that may succeed on retry.
    /// Advisory only: nothing in this crate retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            // 429 and 5xx are transient, other 4xx are the caller's problem
            Self::Upstream { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Produce a sanitized error message safe for showing to end users.
    /// Does not leak connection details or request URLs.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput(msg) => msg.clone(),
            Self::NotConfigured(msg) => format!("missing setup: {msg}"),
            Self::Upstream { message, .. } => message.clone(),
            Self::UnrecognizedResponseShape(_) => {
                "the text-generation service returned a response this client cannot read"
                    .to_string()
            }
            Self::Network(e) if e.is_timeout() => "request timed out".to_string(),
            Self::Network(_) => "request to the text-generation service failed".to_string(),
        }
    }
}
