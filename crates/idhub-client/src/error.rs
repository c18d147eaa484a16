use std::fmt;

/// Whether a failed hub call is worth retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    /// The hub rejected the call or answered with something unusable.
    FatalError,
    /// The hub could not be reached in time; the same call may succeed later.
    ErrorRetry,
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FatalError => write!(f, "fatal error"),
            Self::ErrorRetry => write!(f, "retryable error"),
        }
    }
}

/// Failure of a hub call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct HubClientError {
    pub status: ResponseStatus,
    pub message: String,
}

impl HubClientError {
    pub fn fatal(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::FatalError,
            message: message.into(),
        }
    }

    pub fn retry(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::ErrorRetry,
            message: message.into(),
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.status == ResponseStatus::FatalError
    }
}

impl From<reqwest::Error> for HubClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() || e.is_connect() {
            Self::retry(format!("identity hub unreachable: {}", e))
        } else {
            Self::fatal(format!("identity hub request failed: {}", e))
        }
    }
}
