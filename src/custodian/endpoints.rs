//! Custodian Endpoints
//!
//! Builds card, create-transaction and commit-transaction requests, sends them
//! through the injected [`HttpClient`], and folds every reply through the one
//! shared [`classify`] function.

use std::sync::Arc;
use tracing::debug;

use super::error::EndpointError;
use super::http::{HttpClient, HttpRequest, HttpResponse};
use super::response::{Outcome, classify, extract_available_balance, extract_transaction_id};
use super::types::Transaction;
use crate::config::CustodianConfig;

pub fn authorization_header(token: &str) -> (String, String) {
    ("Authorization".to_string(), format!("Bearer {}", token))
}

pub struct CustodianServer {
    config: CustodianConfig,
    client: Arc<dyn HttpClient>,
}

impl CustodianServer {
    pub fn new(config: CustodianConfig, client: Arc<dyn HttpClient>) -> Self {
        Self { config, client }
    }

    fn card_url(&self, address: &str) -> String {
        format!("{}/v0/me/cards/{}", self.config.api_url(), address)
    }

    pub fn get_card_url(&self, address: &str) -> String {
        self.card_url(address)
    }

    pub fn create_transaction_url(&self, address: &str) -> String {
        format!("{}/transactions", self.card_url(address))
    }

    pub fn commit_transaction_url(&self, address: &str, transaction_id: &str) -> String {
        format!(
            "{}/transactions/{}/commit",
            self.card_url(address),
            transaction_id
        )
    }

    async fn execute(
        &self,
        endpoint: &'static str,
        request: HttpRequest,
    ) -> Result<HttpResponse, EndpointError> {
        let response = self.client.send(request).await?;
        let outcome = classify(response.status_code);

        debug!(
            endpoint,
            status_code = response.status_code,
            outcome = %outcome,
            body_len = response.body.len(),
            "Custodian response"
        );

        match outcome {
            Outcome::Ok => Ok(response),
            Outcome::ExpiredToken => Err(EndpointError::ExpiredToken),
            Outcome::GenericError => Err(EndpointError::Status(response.status_code)),
        }
    }

    /// Available balance of the card at `address`
    pub async fn get_card(&self, address: &str, token: &str) -> Result<f64, EndpointError> {
        let (name, value) = authorization_header(token);
        let request = HttpRequest::get(self.get_card_url(address)).header(name, value);

        let response = self.execute("get_card", request).await?;
        Ok(extract_available_balance(&response.body)?)
    }

    /// Create a transaction from the card at `address`; returns its id
    pub async fn create_transaction(
        &self,
        token: &str,
        address: &str,
        transaction: &Transaction,
    ) -> Result<String, EndpointError> {
        let (name, value) = authorization_header(token);
        let request = HttpRequest::post(self.create_transaction_url(address))
            .header(name, value)
            .json_body(transaction.to_request_body());

        let response = self.execute("post_transaction", request).await?;
        Ok(extract_transaction_id(&response.body)?)
    }

    pub async fn commit_transaction(
        &self,
        token: &str,
        address: &str,
        transaction_id: &str,
    ) -> Result<(), EndpointError> {
        let (name, value) = authorization_header(token);
        let request =
            HttpRequest::post(self.commit_transaction_url(address, transaction_id)).header(name, value);

        self.execute("post_transaction_commit", request).await?;
        Ok(())
    }
}
