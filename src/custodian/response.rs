//! Response Interpretation
//!
//! Maps a raw `(status_code, body)` pair into a semantic outcome and pulls
//! typed fields out of JSON bodies. The same classification is shared by
//! every custodian endpoint.

use serde_json::{Map, Value};
use std::fmt;
use tracing::error;

use super::error::ParseError;

pub const HTTP_OK: u16 = 200;
pub const HTTP_UNAUTHORIZED: u16 = 401;
pub const HTTP_FORBIDDEN: u16 = 403;
pub const HTTP_NOT_FOUND: u16 = 404;

/// Semantic classification of a custodian response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Ok,
    /// The credential no longer grants access; the link must be re-established
    ExpiredToken,
    GenericError,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Ok => "OK",
            Outcome::ExpiredToken => "EXPIRED_TOKEN",
            Outcome::GenericError => "GENERIC_ERROR",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classify an HTTP status code
///
/// 401, 403 and 404 all mean the custodian refuses the token.
pub fn classify(status_code: u16) -> Outcome {
    match status_code {
        HTTP_UNAUTHORIZED | HTTP_NOT_FOUND | HTTP_FORBIDDEN => Outcome::ExpiredToken,
        HTTP_OK => Outcome::Ok,
        _ => Outcome::GenericError,
    }
}

fn parse_object(body: &str) -> Result<Map<String, Value>, ParseError> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        _ => {
            error!("Invalid JSON");
            Err(ParseError::MalformedJson)
        }
    }
}

/// Extract the `available` balance from a card body
///
/// The field must be a JSON string. A present but unparseable value yields
/// `0.0` rather than an error.
pub fn extract_available_balance(body: &str) -> Result<f64, ParseError> {
    let object = parse_object(body)?;

    let Some(available) = object.get("available").and_then(Value::as_str) else {
        error!("Missing available");
        return Err(ParseError::MissingField("available"));
    };

    Ok(match available.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    })
}

/// Extract the created transaction `id` from a create-transaction body
///
/// An empty id is returned as-is; rejecting it is the caller's decision.
pub fn extract_transaction_id(body: &str) -> Result<String, ParseError> {
    let object = parse_object(body)?;

    match object.get("id").and_then(Value::as_str) {
        Some(id) => Ok(id.to_string()),
        None => {
            error!("Missing id");
            Err(ParseError::MissingField("id"))
        }
    }
}
