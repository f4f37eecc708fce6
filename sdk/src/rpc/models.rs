use crate::error::ChainBenchError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const JSON_RPC_VERSION: &str = "2.0";

#[derive(Debug, Serialize)]
pub struct JsonRpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: Value,
}

#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse<T> {
    pub result: Option<T>,
    pub error: Option<JsonRpcErrorObject>,
}

#[derive(Debug, Deserialize)]
pub struct JsonRpcErrorObject {
    pub code: i64,
    pub message: String,
}

impl<T> JsonRpcResponse<T> {
    /// `Ok(None)` when the provider answered with a `null` result.
    pub fn into_result(self) -> Result<Option<T>, ChainBenchError> {
        if let Some(error) = self.error {
            return Err(ChainBenchError::JsonRpc {
                code: error.code,
                message: error.message,
            });
        }
        Ok(self.result)
    }
}

#[derive(Debug, Deserialize)]
pub struct RpcContext {
    pub slot: u64,
}

#[derive(Debug, Deserialize)]
pub struct RpcResponse<T> {
    pub context: RpcContext,
    pub value: Option<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiAccount {
    pub lamports: u64,
    /// `[payload, encoding]`
    pub data: (String, String),
    pub owner: String,
    pub executable: bool,
    pub rent_epoch: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiTransactionMeta {
    #[serde(default)]
    pub err: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiConfirmedTransaction {
    pub slot: u64,
    pub transaction: Value,
    #[serde(default)]
    pub meta: Option<UiTransactionMeta>,
    #[serde(default)]
    pub block_time: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiConfirmedBlock {
    pub blockhash: String,
    pub previous_blockhash: String,
    pub parent_slot: u64,
    #[serde(default)]
    pub signatures: Vec<String>,
    #[serde(default)]
    pub block_time: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountInfo {
    pub slot: u64,
    pub data: Vec<u8>,
    pub owner: String,
    pub lamports: u64,
    pub executable: bool,
    pub rent_epoch: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionInfo {
    pub slot: u64,
    pub transaction: Value,
    pub success: bool,
    pub block_time: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockInfo {
    pub slot: u64,
    pub blockhash: String,
    pub previous_blockhash: String,
    pub parent_slot: u64,
    pub signatures: Vec<String>,
    pub block_time: Option<i64>,
}

impl AccountInfo {
    pub fn from_ui(slot: u64, account: UiAccount) -> Result<Self, ChainBenchError> {
        let (payload, encoding) = account.data;
        if encoding != "base64" {
            return Err(ChainBenchError::InvalidResponse(format!(
                "unsupported account data encoding: {encoding}"
            )));
        }
        let data = STANDARD
            .decode(payload)
            .map_err(|error| ChainBenchError::InvalidResponse(error.to_string()))?;
        Ok(AccountInfo {
            slot,
            data,
            owner: account.owner,
            lamports: account.lamports,
            executable: account.executable,
            rent_epoch: account.rent_epoch,
        })
    }
}

impl From<UiConfirmedTransaction> for TransactionInfo {
    fn from(transaction: UiConfirmedTransaction) -> Self {
        let success = transaction
            .meta
            .as_ref()
            .is_some_and(|meta| meta.err.is_none());
        TransactionInfo {
            slot: transaction.slot,
            transaction: transaction.transaction,
            success,
            block_time: transaction.block_time,
        }
    }
}

impl BlockInfo {
    pub fn from_ui(slot: u64, block: UiConfirmedBlock) -> Self {
        BlockInfo {
            slot,
            blockhash: block.blockhash,
            previous_blockhash: block.previous_blockhash,
            parent_slot: block.parent_slot,
            signatures: block.signatures,
            block_time: block.block_time,
        }
    }
}
