//! Custodian URL builders
//!
//! Every builder that takes an address returns an empty string for an empty
//! address instead of a URL with a blank path segment.

use std::fmt;

use crate::config::CustodianConfig;

/// Permissions requested during authorization
pub const AUTHORIZE_SCOPE: &str = "accounts:read \
accounts:write \
cards:read \
cards:write \
user:read \
transactions:deposit \
transactions:read \
transactions:transfer:application \
transactions:transfer:others";

/// Why the user is sent to the authorization page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intention {
    /// Identity verification flow
    Kyc,
    Login,
}

impl Intention {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intention::Kyc => "kyc",
            Intention::Login => "login",
        }
    }
}

impl fmt::Display for Intention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct LinkBuilder {
    config: CustodianConfig,
}

impl LinkBuilder {
    pub fn new(config: CustodianConfig) -> Self {
        Self { config }
    }

    pub fn authorize_url(&self, state: &str, intention: Intention) -> String {
        format!(
            "{}/authorize/{}?scope={}&intention={}&state={}",
            self.config.site_url(),
            self.config.client_id,
            AUTHORIZE_SCOPE,
            intention,
            state
        )
    }

    pub fn add_url(&self, address: &str) -> String {
        if address.is_empty() {
            return String::new();
        }
        format!("{}/dashboard/cards/{}/add", self.config.site_url(), address)
    }

    pub fn withdraw_url(&self, address: &str) -> String {
        if address.is_empty() {
            return String::new();
        }
        format!("{}/dashboard/cards/{}/use", self.config.site_url(), address)
    }

    pub fn second_step_verify_url(&self) -> String {
        format!(
            "{}/signup/step2?application_id={}&intention=kyc",
            self.config.site_url(),
            self.config.client_id
        )
    }

    pub fn account_url(&self) -> String {
        format!("{}/dashboard", self.config.site_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;

    fn builder() -> LinkBuilder {
        LinkBuilder::new(CustodianConfig::new(
            Environment::Staging,
            "4c2b665ca060d912fec5c735c734859a06118cc8",
            "fee",
            "ac",
        ))
    }

    #[test]
    fn test_empty_address_guard() {
        let links = builder();
        assert_eq!(links.add_url(""), "");
        assert_eq!(links.withdraw_url(""), "");
    }

    #[test]
    fn test_address_links() {
        let links = builder();
        assert_eq!(
            links.add_url("abc"),
            "https://sandbox.uphold.com/dashboard/cards/abc/add"
        );
        assert_eq!(
            links.withdraw_url("abc"),
            "https://sandbox.uphold.com/dashboard/cards/abc/use"
        );
    }

    #[test]
    fn test_authorize_url() {
        let links = builder();
        let url = links.authorize_url("123456789", Intention::Kyc);
        assert_eq!(
            url,
            "https://sandbox.uphold.com/authorize/4c2b665ca060d912fec5c735c734859a06118cc8\
             ?scope=accounts:read accounts:write cards:read cards:write user:read \
             transactions:deposit transactions:read transactions:transfer:application \
             transactions:transfer:others&intention=kyc&state=123456789"
        );

        let login = links.authorize_url("123456789", Intention::Login);
        assert!(login.ends_with("&intention=login&state=123456789"));
    }

    #[test]
    fn test_static_links() {
        let links = builder();
        assert_eq!(
            links.second_step_verify_url(),
            "https://sandbox.uphold.com/signup/step2\
             ?application_id=4c2b665ca060d912fec5c735c734859a06118cc8&intention=kyc"
        );
        assert_eq!(links.account_url(), "https://sandbox.uphold.com/dashboard");
    }

    #[test]
    fn test_production_site() {
        let links = LinkBuilder::new(CustodianConfig::new(
            Environment::Production,
            "prod-client",
            "fee",
            "ac",
        ));
        assert_eq!(links.account_url(), "https://uphold.com/dashboard");
    }
}
