//! Card balance lookup

use std::sync::Arc;
use tracing::{error, warn};

use super::endpoints::CustodianServer;
use super::error::EndpointError;
use super::registry::{WalletDisconnector, WalletRegistry};
use super::wallet::{WALLET_KEY, select_wallet};

pub struct BalanceLookup {
    registry: Arc<dyn WalletRegistry>,
    server: Arc<CustodianServer>,
    disconnector: Arc<dyn WalletDisconnector>,
}

impl BalanceLookup {
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

    /// Available balance of the linked card
    ///
    /// Fails closed on any error; an expired token also disconnects the wallet.
    pub async fn fetch(&self) -> Result<f64, EndpointError> {
        let Some(wallet) = select_wallet(&self.registry.external_wallets()) else {
            error!("Wallet is null");
            return Err(EndpointError::WalletNotFound);
        };

        if !wallet.can_transact() {
            error!(status = %wallet.status, "Wallet is not connected");
            return Err(EndpointError::WalletNotConnected);
        }

        match self.server.get_card(&wallet.address, &wallet.token).await {
            Err(EndpointError::ExpiredToken) => {
                warn!("Custodian rejected token during balance lookup, disconnecting wallet");
                self.disconnector.disconnect_wallet(WALLET_KEY);
                Err(EndpointError::ExpiredToken)
            }
            other => other,
        }
    }
}
