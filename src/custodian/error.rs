//! Custodian Error Types
//!
//! Failures are values: nothing in the protocol layer panics or aborts on a
//! bad response.

use thiserror::Error;

use super::response::Outcome;

/// Body parsing failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid JSON")]
    MalformedJson,

    #[error("Missing {0}")]
    MissingField(&'static str),
}

/// Transport failures reported by the HTTP client collaborator
#[derive(Error, Debug, Clone)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Request(String),

    #[error("HTTP request timed out")]
    Timeout,

    #[error("Failed to read response body: {0}")]
    Body(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout
        } else if e.is_body() || e.is_decode() {
            TransportError::Body(e.to_string())
        } else {
            TransportError::Request(e.to_string())
        }
    }
}

/// Endpoint call failures
///
/// Every variant folds back into the three-way [`Outcome`] classification.
#[derive(Error, Debug, Clone)]
pub enum EndpointError {
    #[error("Authorization token expired")]
    ExpiredToken,

    #[error("Custodian returned status {0}")]
    Status(u16),

    #[error("Wallet is null")]
    WalletNotFound,

    #[error("Wallet is not connected")]
    WalletNotConnected,

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl EndpointError {
    /// Classification of this failure
    pub fn outcome(&self) -> Outcome {
        match self {
            EndpointError::ExpiredToken => Outcome::ExpiredToken,
            EndpointError::Status(_)
            | EndpointError::WalletNotFound
            | EndpointError::WalletNotConnected
            | EndpointError::Parse(_)
            | EndpointError::Transport(_) => Outcome::GenericError,
        }
    }

    #[inline]
    pub fn is_expired_token(&self) -> bool {
        matches!(self, EndpointError::ExpiredToken)
    }
}
