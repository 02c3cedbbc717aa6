//! Transfer Coordinator
//!
//! Drives one value transfer through the custodian's two-phase protocol.
//!
//! ```text
//! START → CREATE_REQUESTED → COMMIT_REQUESTED → SUCCEEDED
//!   ↓            ↓                  ↓
//! FAILED   FAILED | DISCONNECTED → EXPIRED_TOKEN
//! ```
//!
//! # Invariants
//!
//! 1. The wallet is re-read from the registry before each remote step, and a
//!    wallet that is not connected or lacks a card or token gets no request
//! 2. Commit is only issued for a non-empty transaction id
//! 3. An expired token emits exactly one disconnect signal before the outcome is returned
//! 4. No step is retried; every attempt ends in exactly one terminal state

use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{debug, error, info, warn};

use super::endpoints::CustodianServer;
use super::error::EndpointError;
use super::registry::{WalletDisconnector, WalletRegistry};
use super::response::Outcome;
use super::state::TransferState;
use super::types::{Transaction, TransferOutcome};
use super::wallet::{LinkedWallet, WALLET_KEY, select_wallet};

pub struct TransferCoordinator {
    registry: Arc<dyn WalletRegistry>,
    server: Arc<CustodianServer>,
    disconnector: Arc<dyn WalletDisconnector>,
}

impl TransferCoordinator {
    pub fn new(
        registry: Arc<dyn WalletRegistry>,
        server: Arc<CustodianServer>,
        disconnector: Arc<dyn WalletDisconnector>,
    ) -> Self {
        Self {
            registry,
            server,
            disconnector,
        }
    }

    /// Wallet to address the next remote step with, or `None` after
    /// recording the failure
    fn resolve_wallet(&self, state: TransferState) -> Option<LinkedWallet> {
        let Some(wallet) = select_wallet(&self.registry.external_wallets()) else {
            error!("Wallet is null");
            Self::transition(state, TransferState::Failed);
            return None;
        };

        if !wallet.can_transact() {
            error!(
                step = %state,
                status = %wallet.status,
                has_address = !wallet.address.is_empty(),
                has_token = !wallet.token.is_empty(),
                "Wallet is not connected"
            );
            Self::transition(state, TransferState::Failed);
            return None;
        }

        Some(wallet)
    }

    fn transition(from: TransferState, to: TransferState) -> TransferState {
        debug!(
            from = %from,
            to = %to,
            awaiting_custodian = to.is_awaiting_custodian(),
            "Transfer state transition"
        );
        to
    }

    /// Run one transfer attempt to completion
    pub async fn start(&self, transaction: &Transaction) -> TransferOutcome {
        let state = TransferState::Start;

        let Some(wallet) = self.resolve_wallet(state) else {
            return TransferOutcome::Failed;
        };

        let state = Self::transition(state, TransferState::CreateRequested);
        let created = self
            .server
            .create_transaction(&wallet.token, &wallet.address, transaction)
            .await;

        match created {
            Ok(transaction_id) => self.commit(state, transaction_id).await,
            Err(e) => self.fail(state, e),
        }
    }

    async fn commit(&self, state: TransferState, transaction_id: String) -> TransferOutcome {
        let Some(wallet) = self.resolve_wallet(state) else {
            return TransferOutcome::Failed;
        };

        if transaction_id.is_empty() {
            error!("Transaction id not found");
            Self::transition(state, TransferState::Failed);
            return TransferOutcome::Failed;
        }

        let state = Self::transition(state, TransferState::CommitRequested);
        let committed = self
            .server
            .commit_transaction(&wallet.token, &wallet.address, &transaction_id)
            .await;

        match committed {
            Ok(()) => {
                Self::transition(state, TransferState::Succeeded);
                info!(transaction_id = %transaction_id, "Transfer committed");
                TransferOutcome::Success(transaction_id)
            }
            Err(e) => self.fail(state, e),
        }
    }

    fn fail(&self, state: TransferState, err: EndpointError) -> TransferOutcome {
        let outcome = err.outcome();
        match outcome {
            Outcome::ExpiredToken => {
                let state = Self::transition(state, TransferState::Disconnected);
                warn!(
                    step = %state,
                    outcome = %outcome,
                    "Custodian rejected token, disconnecting wallet"
                );
                self.disconnector.disconnect_wallet(WALLET_KEY);
                Self::transition(state, TransferState::ExpiredToken);
                TransferOutcome::ExpiredToken
            }
            Outcome::GenericError | Outcome::Ok => {
                error!(step = %state, outcome = %outcome, error = %err, "Transfer failed");
                Self::transition(state, TransferState::Failed);
                TransferOutcome::Failed
            }
        }
    }

    /// Run an attempt on the runtime; the receiver resolves exactly once
    pub fn spawn(self: &Arc<Self>, transaction: Transaction) -> oneshot::Receiver<TransferOutcome> {
        let (tx, rx) = oneshot::channel();
        let coordinator = Arc::clone(self);

        tokio::spawn(async move {
            let outcome = coordinator.start(&transaction).await;
            // Receiver dropped means the caller stopped waiting
            let _ = tx.send(outcome);
        });

        rx
    }
}
