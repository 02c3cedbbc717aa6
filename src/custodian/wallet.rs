//! Linked Wallet State
//!
//! The wallet status is owned elsewhere; this module only reads it to project
//! user-facing links and exposes the disconnect transition rule.
//!
//! # Link Projection
//!
//! ```text
//! status                         add_url        withdraw_url   verify_url
//! Pending                        step2          step2          step2
//! Connected                      add(address)   step2          step2
//! Verified                       add(address)   use(address)   ""
//! NotConnected / Disconnected*   ""             ""             authorize(kyc)
//! ```
//!
//! `account_url` is always the dashboard and `login_url` is always the
//! login-intention authorization URL.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::links::{Intention, LinkBuilder};

/// Registry key of this custodian's wallet
pub const WALLET_KEY: &str = "uphold";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalletStatus {
    NotConnected,
    /// Authorized, but the custodian account has not finished sign-up
    Pending,
    Connected,
    Verified,
    DisconnectedVerified,
    DisconnectedNotVerified,
}

impl WalletStatus {
    pub const ALL: [WalletStatus; 6] = [
        WalletStatus::NotConnected,
        WalletStatus::Pending,
        WalletStatus::Connected,
        WalletStatus::Verified,
        WalletStatus::DisconnectedVerified,
        WalletStatus::DisconnectedNotVerified,
    ];

    /// A live link exists (token may still be rejected by the custodian)
    #[inline]
    pub fn is_connected(&self) -> bool {
        matches!(
            self,
            WalletStatus::Pending | WalletStatus::Connected | WalletStatus::Verified
        )
    }

    /// Status after the link is invalidated
    pub fn disconnected(&self) -> WalletStatus {
        match self {
            WalletStatus::Verified => WalletStatus::DisconnectedVerified,
            WalletStatus::Pending | WalletStatus::Connected => {
                WalletStatus::DisconnectedNotVerified
            }
            other => *other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WalletStatus::NotConnected => "NOT_CONNECTED",
            WalletStatus::Pending => "PENDING",
            WalletStatus::Connected => "CONNECTED",
            WalletStatus::Verified => "VERIFIED",
            WalletStatus::DisconnectedVerified => "DISCONNECTED_VERIFIED",
            WalletStatus::DisconnectedNotVerified => "DISCONNECTED_NOT_VERIFIED",
        }
    }
}

impl fmt::Display for WalletStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One account at the custodian
///
/// The `*_url` fields are a projection of `(status, address, one_time_string)`
/// and are overwritten by every [`WalletStateMachine::derive_links`] call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedWallet {
    /// Custodian card id; empty until assigned
    pub address: String,
    pub token: String,
    pub status: WalletStatus,
    pub one_time_string: String,
    #[serde(default)]
    pub add_url: String,
    #[serde(default)]
    pub withdraw_url: String,
    #[serde(default)]
    pub verify_url: String,
    #[serde(default)]
    pub account_url: String,
    #[serde(default)]
    pub login_url: String,
}

impl LinkedWallet {
    pub fn new(
        status: WalletStatus,
        address: impl Into<String>,
        token: impl Into<String>,
        one_time_string: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            token: token.into(),
            status,
            one_time_string: one_time_string.into(),
            add_url: String::new(),
            withdraw_url: String::new(),
            verify_url: String::new(),
            account_url: String::new(),
            login_url: String::new(),
        }
    }

    /// Connected status plus a card and token to address the custodian with
    pub fn can_transact(&self) -> bool {
        self.status.is_connected() && !self.address.is_empty() && !self.token.is_empty()
    }

    pub fn links(&self) -> WalletLinks {
        WalletLinks {
            add_url: self.add_url.clone(),
            withdraw_url: self.withdraw_url.clone(),
            verify_url: self.verify_url.clone(),
            account_url: self.account_url.clone(),
            login_url: self.login_url.clone(),
        }
    }
}

/// The five derived URLs, for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletLinks {
    pub add_url: String,
    pub withdraw_url: String,
    pub verify_url: String,
    pub account_url: String,
    pub login_url: String,
}

/// Derives account-action links from wallet status
#[derive(Debug, Clone)]
pub struct WalletStateMachine {
    links: LinkBuilder,
}

impl WalletStateMachine {
    pub fn new(links: LinkBuilder) -> Self {
        Self { links }
    }

    pub fn link_builder(&self) -> &LinkBuilder {
        &self.links
    }

    /// Recompute every link of `wallet`
    pub fn derive_links(&self, wallet: &LinkedWallet) -> LinkedWallet {
        let mut derived = wallet.clone();

        let (add_url, withdraw_url) = match wallet.status {
            WalletStatus::Pending => (
                self.links.second_step_verify_url(),
                self.links.second_step_verify_url(),
            ),
            WalletStatus::Connected => (
                self.links.add_url(&wallet.address),
                self.links.second_step_verify_url(),
            ),
            WalletStatus::Verified => (
                self.links.add_url(&wallet.address),
                self.links.withdraw_url(&wallet.address),
            ),
            WalletStatus::NotConnected
            | WalletStatus::DisconnectedVerified
            | WalletStatus::DisconnectedNotVerified => (String::new(), String::new()),
        };

        derived.add_url = add_url;
        derived.withdraw_url = withdraw_url;
        derived.verify_url = self.verify_link(wallet);
        derived.account_url = self.links.account_url();
        derived.login_url = self
            .links
            .authorize_url(&wallet.one_time_string, Intention::Login);

        derived
    }

    pub fn verify_link(&self, wallet: &LinkedWallet) -> String {
        match wallet.status {
            WalletStatus::Pending | WalletStatus::Connected => self.links.second_step_verify_url(),
            WalletStatus::Verified => String::new(),
            WalletStatus::NotConnected
            | WalletStatus::DisconnectedVerified
            | WalletStatus::DisconnectedNotVerified => self
                .links
                .authorize_url(&wallet.one_time_string, Intention::Kyc),
        }
    }
}

/// Pick this custodian's wallet out of the external wallet map
pub fn select_wallet(wallets: &HashMap<String, LinkedWallet>) -> Option<LinkedWallet> {
    wallets.get(WALLET_KEY).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CustodianConfig, Environment};

    fn machine() -> WalletStateMachine {
        WalletStateMachine::new(LinkBuilder::new(CustodianConfig::new(
            Environment::Staging,
            "client",
            "fee",
            "ac",
        )))
    }

    const STEP2: &str = "https://sandbox.uphold.com/signup/step2?application_id=client&intention=kyc";

    #[test]
    fn test_pending_links() {
        let wallet = LinkedWallet::new(WalletStatus::Pending, "abc", "token", "nonce");
        let derived = machine().derive_links(&wallet);

        assert_eq!(derived.add_url, STEP2);
        assert_eq!(derived.withdraw_url, STEP2);
        assert_eq!(derived.verify_url, STEP2);
    }

    #[test]
    fn test_connected_links() {
        let wallet = LinkedWallet::new(WalletStatus::Connected, "abc", "token", "nonce");
        let derived = machine().derive_links(&wallet);

        assert_eq!(
            derived.add_url,
            "https://sandbox.uphold.com/dashboard/cards/abc/add"
        );
        assert_eq!(derived.withdraw_url, STEP2);
        assert_eq!(derived.verify_url, STEP2);
    }

    #[test]
    fn test_verified_links() {
        let wallet = LinkedWallet::new(WalletStatus::Verified, "abc", "token", "nonce");
        let derived = machine().derive_links(&wallet);

        assert_eq!(
            derived.withdraw_url,
            "https://sandbox.uphold.com/dashboard/cards/abc/use"
        );
        assert_eq!(derived.verify_url, "");
    }

    #[test]
    fn test_verified_without_address() {
        let wallet = LinkedWallet::new(WalletStatus::Verified, "", "token", "nonce");
        let derived = machine().derive_links(&wallet);

        assert_eq!(derived.add_url, "");
        assert_eq!(derived.withdraw_url, "");
    }

    #[test]
    fn test_unlinked_states() {
        for status in [
            WalletStatus::NotConnected,
            WalletStatus::DisconnectedVerified,
            WalletStatus::DisconnectedNotVerified,
        ] {
            let wallet = LinkedWallet::new(status, "abc", "", "nonce");
            let derived = machine().derive_links(&wallet);

            assert_eq!(derived.add_url, "", "{status}");
            assert_eq!(derived.withdraw_url, "", "{status}");
            assert!(derived.verify_url.contains("intention=kyc&state=nonce"));
        }
    }

    #[test]
    fn test_static_links_for_every_status() {
        for status in WalletStatus::ALL {
            let wallet = LinkedWallet::new(status, "abc", "token", "nonce");
            let derived = machine().derive_links(&wallet);

            assert_eq!(derived.account_url, "https://sandbox.uphold.com/dashboard");
            assert!(derived.login_url.ends_with("&intention=login&state=nonce"));
        }
    }

    #[test]
    fn test_derive_is_idempotent() {
        let sm = machine();
        for status in WalletStatus::ALL {
            let wallet = LinkedWallet::new(status, "abc", "token", "nonce");
            let once = sm.derive_links(&wallet);
            let twice = sm.derive_links(&once);
            assert_eq!(once, twice);
            assert_eq!(once.links(), sm.derive_links(&wallet).links());
        }
    }

    #[test]
    fn test_derive_overwrites_stale_links() {
        let mut wallet = LinkedWallet::new(WalletStatus::NotConnected, "abc", "", "nonce");
        wallet.add_url = "stale".to_string();
        wallet.withdraw_url = "stale".to_string();

        let derived = machine().derive_links(&wallet);
        assert_eq!(derived.add_url, "");
        assert_eq!(derived.withdraw_url, "");
    }

    #[test]
    fn test_disconnect_transition() {
        assert_eq!(
            WalletStatus::Verified.disconnected(),
            WalletStatus::DisconnectedVerified
        );
        assert_eq!(
            WalletStatus::Connected.disconnected(),
            WalletStatus::DisconnectedNotVerified
        );
        assert_eq!(
            WalletStatus::Pending.disconnected(),
            WalletStatus::DisconnectedNotVerified
        );
        assert_eq!(
            WalletStatus::NotConnected.disconnected(),
            WalletStatus::NotConnected
        );
        assert_eq!(
            WalletStatus::DisconnectedVerified.disconnected(),
            WalletStatus::DisconnectedVerified
        );
    }

    #[test]
    fn test_status_predicates() {
        assert!(WalletStatus::Verified.is_connected());
        assert!(WalletStatus::Pending.is_connected());
        assert!(!WalletStatus::DisconnectedVerified.is_connected());
        assert!(!WalletStatus::NotConnected.is_connected());
    }

    #[test]
    fn test_can_transact() {
        assert!(LinkedWallet::new(WalletStatus::Verified, "card", "token", "n").can_transact());
        assert!(LinkedWallet::new(WalletStatus::Pending, "card", "token", "n").can_transact());
        assert!(!LinkedWallet::new(WalletStatus::DisconnectedVerified, "card", "token", "n")
            .can_transact());
        assert!(!LinkedWallet::new(WalletStatus::Verified, "", "token", "n").can_transact());
        assert!(!LinkedWallet::new(WalletStatus::Verified, "card", "", "n").can_transact());
    }

    #[test]
    fn test_select_wallet() {
        let mut wallets = HashMap::new();
        assert!(select_wallet(&wallets).is_none());

        wallets.insert(
            "bitflyer".to_string(),
            LinkedWallet::new(WalletStatus::Verified, "x", "t", "n"),
        );
        assert!(select_wallet(&wallets).is_none());

        wallets.insert(
            WALLET_KEY.to_string(),
            LinkedWallet::new(WalletStatus::Connected, "abc", "t", "n"),
        );
        let wallet = select_wallet(&wallets).unwrap();
        assert_eq!(wallet.address, "abc");
    }
}
