use crate::commitment::Commitment;
use crate::error::ChainBenchError;
use crate::identifier::{Pubkey, Signature, Slot};
use crate::rpc::config::JsonRpcClientConfig;
use crate::rpc::models::{
    AccountInfo, BlockInfo, JsonRpcRequest, JsonRpcResponse, RpcResponse, TransactionInfo,
    UiAccount, UiConfirmedBlock, UiConfirmedTransaction, JSON_RPC_VERSION,
};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

/// Minimal Solana JSON-RPC 2.0 client over HTTP. Every call is a single
/// attempt, there is no retry policy.
#[derive(Debug)]
pub struct JsonRpcClient {
    endpoint: Url,
    client: reqwest::Client,
    next_id: AtomicU64,
}

impl JsonRpcClient {
    pub fn new(endpoint: &str) -> Result<Self, ChainBenchError> {
        Self::create(JsonRpcClientConfig {
            endpoint: endpoint.to_string(),
            ..Default::default()
        })
    }

    pub fn create(config: JsonRpcClientConfig) -> Result<Self, ChainBenchError> {
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|_| ChainBenchError::CannotParseUrl(config.endpoint.clone()))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ChainBenchError::CannotParseUrl(config.endpoint));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout.enabled() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|_| ChainBenchError::CannotCreateClient)?;

        Ok(Self {
            endpoint,
            client,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Sends one JSON-RPC request, `Ok(None)` stands for a `null` result.
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<Option<T>, ChainBenchError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = JsonRpcRequest {
            jsonrpc: JSON_RPC_VERSION,
            id,
            method,
            params,
        };
        trace!("Sending JSON-RPC request #{id}: {method}");
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?
            .error_for_status()?;
        let response: JsonRpcResponse<T> = response.json().await?;
        response.into_result()
    }

    pub async fn get_account_info(
        &self,
        pubkey: &Pubkey,
        commitment: Commitment,
    ) -> Result<AccountInfo, ChainBenchError> {
        let params = json!([
            pubkey.to_string(),
            { "encoding": "base64", "commitment": commitment.as_str() }
        ]);
        let response = self
            .call::<RpcResponse<UiAccount>>("getAccountInfo", params)
            .await?
            .ok_or_else(|| ChainBenchError::InvalidResponse("missing result".to_string()))?;
        let slot = response.context.slot;
        let account = response
            .value
            .ok_or_else(|| ChainBenchError::AccountNotFound(pubkey.to_string()))?;
        AccountInfo::from_ui(slot, account)
    }

    pub async fn get_transaction(
        &self,
        signature: &Signature,
        commitment: Commitment,
    ) -> Result<TransactionInfo, ChainBenchError> {
        let params = json!([
            signature.to_string(),
            {
                "encoding": "json",
                "commitment": commitment.as_str(),
                "maxSupportedTransactionVersion": 0
            }
        ]);
        let transaction = self
            .call::<UiConfirmedTransaction>("getTransaction", params)
            .await?
            .ok_or_else(|| ChainBenchError::TransactionNotFound(signature.to_string()))?;
        Ok(transaction.into())
    }

    pub async fn get_block(
        &self,
        slot: Slot,
        commitment: Commitment,
    ) -> Result<BlockInfo, ChainBenchError> {
        let params = json!([
            slot,
            {
                "encoding": "json",
                "commitment": commitment.as_str(),
                "transactionDetails": "signatures",
                "rewards": false,
                "maxSupportedTransactionVersion": 0
            }
        ]);
        let block = self
            .call::<UiConfirmedBlock>("getBlock", params)
            .await?
            .ok_or(ChainBenchError::BlockNotFound(slot))?;
        Ok(BlockInfo::from_ui(slot, block))
    }
}
