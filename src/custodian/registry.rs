//! External Wallet Registry
//!
//! The registry is owned outside the protocol core. The core reads a fresh
//! snapshot before every remote step and emits a disconnect signal when the
//! custodian rejects the token.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{info, warn};

use super::nonce::NonceSource;
use super::wallet::LinkedWallet;

/// Read-only view of the external wallets, keyed by custodian name
pub trait WalletRegistry: Send + Sync {
    fn external_wallets(&self) -> HashMap<String, LinkedWallet>;
}

/// Receiver of the "this custodian's link is now invalid" signal
pub trait WalletDisconnector: Send + Sync {
    fn disconnect_wallet(&self, key: &str);
}

/// Process-local registry
///
/// Disconnecting applies [`WalletStatus::disconnected`](super::wallet::WalletStatus::disconnected),
/// drops the credential and address, and rolls the one-time string.
pub struct InMemoryWalletRegistry {
    wallets: RwLock<HashMap<String, LinkedWallet>>,
    nonce: Arc<dyn NonceSource>,
}

impl InMemoryWalletRegistry {
    pub fn new(nonce: Arc<dyn NonceSource>) -> Self {
        Self {
            wallets: RwLock::new(HashMap::new()),
            nonce,
        }
    }

    pub fn insert(&self, key: impl Into<String>, wallet: LinkedWallet) {
        self.write().insert(key.into(), wallet);
    }

    pub fn remove(&self, key: &str) -> Option<LinkedWallet> {
        self.write().remove(key)
    }

    pub fn get(&self, key: &str) -> Option<LinkedWallet> {
        self.read().get(key).cloned()
    }

    // Writers never panic mid-update, so a poisoned map is still consistent
    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, LinkedWallet>> {
        self.wallets.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, LinkedWallet>> {
        self.wallets.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl WalletRegistry for InMemoryWalletRegistry {
    fn external_wallets(&self) -> HashMap<String, LinkedWallet> {
        self.read().clone()
    }
}

impl WalletDisconnector for InMemoryWalletRegistry {
    fn disconnect_wallet(&self, key: &str) {
        let mut wallets = self.write();
        let Some(wallet) = wallets.get_mut(key) else {
            warn!(wallet = key, "Disconnect requested for unknown wallet");
            return;
        };

        let from = wallet.status;
        wallet.status = from.disconnected();
        wallet.token.clear();
        wallet.address.clear();
        wallet.one_time_string = self.nonce.generate();

        info!(wallet = key, from = %from, to = %wallet.status, "Wallet disconnected");
    }
}
