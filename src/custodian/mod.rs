//! Custodial Wallet Linking and Transfer
//!
//! Talks to an Uphold-style custodian on behalf of one linked wallet.
//!
//! # Components
//!
//! - [`response`] - status classification and body field extraction
//! - [`wallet`] - wallet status, link projection and registry lookup
//! - [`coordinator`] - two-phase create/commit transfer
//!
//! Supporting seams: [`http`] (transport), [`endpoints`] (request shapes),
//! [`registry`] (external wallet owner), [`nonce`] (randomness).
//!
//! # Error Policy
//!
//! Every failure is returned as a value. `ExpiredToken` is never merged with
//! generic errors because it disconnects the wallet as a side effect.

pub mod balance;
pub mod coordinator;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod links;
pub mod nonce;
pub mod registry;
pub mod response;
pub mod state;
pub mod types;
pub mod wallet;

#[cfg(test)]
pub mod mock;

// Re-exports for convenience
pub use balance::BalanceLookup;
pub use coordinator::TransferCoordinator;
pub use endpoints::CustodianServer;
pub use error::{EndpointError, ParseError, TransportError};
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, ReqwestClient};
pub use links::{Intention, LinkBuilder};
pub use nonce::{FixedNonce, NonceSource, OsNonceSource};
pub use registry::{InMemoryWalletRegistry, WalletDisconnector, WalletRegistry};
pub use response::{Outcome, classify, extract_available_balance, extract_transaction_id};
pub use state::TransferState;
pub use types::{Transaction, TransferOutcome};
pub use wallet::{LinkedWallet, WALLET_KEY, WalletLinks, WalletStateMachine, WalletStatus, select_wallet};
