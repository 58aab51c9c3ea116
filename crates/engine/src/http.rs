//! HTTP implementation of the Ledger Engine client.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use giftledger_core::ledger::{Account, Metadata, Posting};
use giftledger_shared::config::EngineConfig;

use crate::LedgerEngine;
use crate::error::EngineError;
use crate::wire::{
    ASSET, AccountData, BalancesByAccount, CursorEnvelope, DataEnvelope, PostTransaction,
    Transaction, WirePosting, error_message,
};

/// Ledger Engine client over its JSON/HTTP API.
///
/// Explicitly constructed and injected; holds no global state. All bulk
/// reads follow cursors to exhaustion.
#[derive(Debug, Clone)]
pub struct HttpLedgerEngine {
    http: reqwest::Client,
    base_url: String,
    ledger: String,
    bearer_token: Option<String>,
    page_size: u32,
}

impl HttpLedgerEngine {
    /// Builds a client for the engine described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn connect(config: &EngineConfig) -> Result<Self, EngineError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            ledger: config.ledger.clone(),
            bearer_token: config.bearer_token.clone(),
            page_size: config.page_size,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.ledger, path)
    }

    /// Sends the request with auth applied and fails on non-success
    /// statuses, extracting the engine's error message.
    async fn execute(&self, request: RequestBuilder) -> Result<reqwest::Response, EngineError> {
        let request = match &self.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EngineError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }
        Ok(response)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, EngineError> {
        Ok(self.execute(request).await?.json().await?)
    }

    /// Follows a cursored listing until `has_more` clears.
    async fn list_pages<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, EngineError> {
        let mut items = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let mut request = self
                .http
                .get(self.url(path))
                .query(&[("page_size", self.page_size.to_string())]);
            if let Some(token) = &cursor {
                request = request.query(&[("cursor", token)]);
            }
            let envelope: CursorEnvelope<T> = self.send(request).await?;
            items.extend(envelope.cursor.data);
            match (envelope.cursor.has_more, envelope.cursor.next) {
                (true, Some(next)) => cursor = Some(next),
                _ => return Ok(items),
            }
        }
    }
}

#[async_trait]
impl LedgerEngine for HttpLedgerEngine {
    async fn create_transaction(
        &self,
        metadata: Metadata,
        postings: Vec<Posting>,
    ) -> Result<Transaction, EngineError> {
        debug!(ledger = %self.ledger, postings = postings.len(), "committing transaction");
        let body = PostTransaction {
            metadata,
            postings: postings.into_iter().map(WirePosting::from).collect(),
            timestamp: Utc::now(),
        };
        let request = self.http.post(self.url("transactions")).json(&body);
        let envelope: DataEnvelope<Vec<Transaction>> = self.send(request).await?;
        envelope.data.into_iter().next().ok_or_else(|| {
            EngineError::UnexpectedResponse(
                "expected to create a transaction but none were created".to_string(),
            )
        })
    }

    async fn add_account_metadata(
        &self,
        address: &str,
        metadata: Metadata,
    ) -> Result<(), EngineError> {
        let request = self
            .http
            .post(self.url(&format!("accounts/{address}/metadata")))
            .json(&metadata);
        self.execute(request).await?;
        Ok(())
    }

    async fn get_account(&self, address: &str) -> Result<Option<Account>, EngineError> {
        let request = self.http.get(self.url(&format!("accounts/{address}")));
        match self.send::<DataEnvelope<AccountData>>(request).await {
            Ok(envelope) => Ok(envelope.data.into_account()),
            Err(EngineError::Status { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, EngineError> {
        let accounts = self.list_pages::<AccountData>("accounts").await?;
        Ok(accounts
            .into_iter()
            .filter_map(AccountData::into_account)
            .collect())
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>, EngineError> {
        self.list_pages::<Transaction>("transactions").await
    }

    async fn list_balances(&self) -> Result<HashMap<String, i64>, EngineError> {
        let pages = self.list_pages::<BalancesByAccount>("balances").await?;
        let mut balances = HashMap::new();
        for page in pages {
            for (address, per_asset) in page {
                balances.insert(address, per_asset.get(ASSET).copied().unwrap_or(0));
            }
        }
        Ok(balances)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn engine(url: &str) -> HttpLedgerEngine {
        HttpLedgerEngine::connect(&EngineConfig {
            url: url.to_string(),
            ledger: "gift-card-ledger".to_string(),
            bearer_token: None,
            page_size: 500,
        })
        .unwrap()
    }

    #[rstest]
    #[case("http://engine:3068", "http://engine:3068/gift-card-ledger/transactions")]
    #[case("http://engine:3068/", "http://engine:3068/gift-card-ledger/transactions")]
    fn test_url_joins_base_and_ledger(#[case] base: &str, #[case] expected: &str) {
        assert_eq!(engine(base).url("transactions"), expected);
    }

    #[test]
    fn test_url_embeds_account_address() {
        assert_eq!(
            engine("http://engine:3068").url("accounts/cards:c1/metadata"),
            "http://engine:3068/gift-card-ledger/accounts/cards:c1/metadata"
        );
    }
}
