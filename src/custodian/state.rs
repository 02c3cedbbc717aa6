//! Transfer Attempt States
//!
//! One attempt walks a single path through these states and ends in exactly
//! one terminal state.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferState {
    /// Wallet not yet resolved
    Start,

    /// Create-transaction call issued
    CreateRequested,

    /// Commit call issued for a created transaction id
    CommitRequested,

    /// Token rejected; disconnect signal emitted
    Disconnected,

    /// Terminal: commit accepted
    Succeeded,

    /// Terminal: reported after `Disconnected`
    ExpiredToken,

    /// Terminal: any other failure
    Failed,
}

impl TransferState {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TransferState::Succeeded | TransferState::ExpiredToken | TransferState::Failed
        )
    }

    /// Remote call in flight
    #[inline]
    pub fn is_awaiting_custodian(&self) -> bool {
        matches!(
            self,
            TransferState::CreateRequested | TransferState::CommitRequested
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransferState::Start => "START",
            TransferState::CreateRequested => "CREATE_REQUESTED",
            TransferState::CommitRequested => "COMMIT_REQUESTED",
            TransferState::Disconnected => "DISCONNECTED",
            TransferState::Succeeded => "SUCCEEDED",
            TransferState::ExpiredToken => "EXPIRED_TOKEN",
            TransferState::Failed => "FAILED",
        }
    }
}

impl fmt::Display for TransferState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
