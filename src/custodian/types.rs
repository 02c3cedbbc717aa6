//! Transfer Core Types

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

use crate::config::CustodianConfig;

/// A proposed value transfer, consumed by one create+commit round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub destination_address: String,
    pub amount: Decimal,
    /// Currency / asset code, e.g. `BAT`
    pub asset: String,
    pub message: Option<String>,
}

impl Transaction {
    pub fn new(
        destination_address: impl Into<String>,
        amount: Decimal,
        asset: impl Into<String>,
    ) -> Self {
        Self {
            destination_address: destination_address.into(),
            amount,
            asset: asset.into(),
            message: None,
        }
    }

    /// Contribution fee paid to the configured fee card
    pub fn fee(config: &CustodianConfig, amount: Decimal) -> Self {
        Self::new(config.fee_address(), amount, "BAT").with_message("5% transaction fee")
    }

    /// Auto-contribute settlement to the configured card
    pub fn auto_contribute(config: &CustodianConfig, amount: Decimal) -> Self {
        Self::new(config.ac_address(), amount, "BAT")
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Body of the create-transaction call
    pub fn to_request_body(&self) -> String {
        let body = CreateTransactionBody {
            denomination: Denomination {
                amount: self.amount.normalize().to_string(),
                currency: &self.asset,
            },
            destination: &self.destination_address,
            message: self.message.as_deref(),
        };
        // Plain strings only, serialization cannot fail
        serde_json::to_string(&body).unwrap_or_default()
    }
}

#[derive(Serialize)]
struct Denomination<'a> {
    amount: String,
    currency: &'a str,
}

#[derive(Serialize)]
struct CreateTransactionBody<'a> {
    denomination: Denomination<'a>,
    destination: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
}

/// Final result of one transfer attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    Success(String),
    /// The custodian rejected the token; the wallet has been disconnected
    ExpiredToken,
    Failed,
}

impl TransferOutcome {
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, TransferOutcome::Success(_))
    }

    pub fn transaction_id(&self) -> Option<&str> {
        match self {
            TransferOutcome::Success(id) => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for TransferOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferOutcome::Success(id) => write!(f, "SUCCESS({})", id),
            TransferOutcome::ExpiredToken => write!(f, "EXPIRED_TOKEN"),
            TransferOutcome::Failed => write!(f, "FAILED"),
        }
    }
}
