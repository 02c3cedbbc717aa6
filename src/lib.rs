//! Rewards Custodian - custodial wallet linking and value transfer
//!
//! # Modules
//!
//! - [`config`] - YAML configuration, custodian environment selection
//! - [`logging`] - tracing subscriber setup
//! - [`custodian`] - link derivation, response interpretation, two-phase transfer

pub mod config;
pub mod custodian;
pub mod logging;

// Convenient re-exports at crate root
pub use config::{AppConfig, ConfigError, CustodianConfig, Environment, LogConfig, LogRotation};
pub use logging::{LoggingError, init_logging};
pub use custodian::{
    BalanceLookup, CustodianServer, EndpointError, LinkBuilder, LinkedWallet, Outcome,
    ParseError, Transaction, TransferCoordinator, TransferOutcome, WalletStateMachine,
    WalletStatus,
};
