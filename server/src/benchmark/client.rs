use crate::benchmark::target::Target;
use crate::grpc::gateway::Gateway;
use async_trait::async_trait;
use chainbench::commitment::Commitment;
use chainbench::error::ChainBenchError;
use chainbench::identifier::{Pubkey, Signature, Slot};
use chainbench::proto::{
    AccountInfoRequest, AccountInfoResponse, BlockRequest, BlockResponse, TransactionRequest,
    TransactionResponse,
};
use chainbench::resource::Transport;
use chainbench::rpc::client::JsonRpcClient;
use chainbench::rpc::models::{AccountInfo, BlockInfo, TransactionInfo};
use std::sync::Arc;
use std::time::Instant;

/// A payload together with the latency the transport attributes to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Measured<T> {
    pub payload: T,
    pub elapsed_ms: u64,
}

impl<T> Measured<T> {
    pub fn new(payload: T, elapsed_ms: u64) -> Self {
        Self {
            payload,
            elapsed_ms,
        }
    }
}

/// One lookup of one resource kind over one transport.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    fn transport(&self) -> Transport;

    async fn get_account_info(
        &self,
        pubkey: &Pubkey,
        commitment: Commitment,
    ) -> Result<Measured<AccountInfoResponse>, ChainBenchError>;

    async fn get_transaction(
        &self,
        signature: &Signature,
        commitment: Commitment,
    ) -> Result<Measured<TransactionResponse>, ChainBenchError>;

    async fn get_block(
        &self,
        slot: Slot,
        commitment: Commitment,
    ) -> Result<Measured<BlockResponse>, ChainBenchError>;

    /// Looks up `target` and returns only the elapsed time.
    async fn measure(&self, target: &Target, commitment: Commitment) -> Result<u64, ChainBenchError> {
        let elapsed_ms = match target {
            Target::Account(pubkey) => self.get_account_info(pubkey, commitment).await?.elapsed_ms,
            Target::Transaction(signature) => {
                self.get_transaction(signature, commitment).await?.elapsed_ms
            }
            Target::Block(slot) => self.get_block(*slot, commitment).await?.elapsed_ms,
        };
        Ok(elapsed_ms)
    }
}

/// Reference path: direct JSON-RPC calls, timed around each call.
#[derive(Debug)]
pub struct JsonRpcResourceClient {
    client: JsonRpcClient,
}

impl JsonRpcResourceClient {
    pub fn new(client: JsonRpcClient) -> Self {
        Self { client }
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

pub(crate) fn account_response(
    pubkey: &Pubkey,
    account: AccountInfo,
    response_time_ms: u64,
) -> AccountInfoResponse {
    AccountInfoResponse {
        pubkey: pubkey.to_string(),
        data: account.data,
        owner: account.owner,
        lamports: account.lamports,
        executable: account.executable,
        rent_epoch: account.rent_epoch,
        response_time_ms,
        slot: account.slot,
    }
}

pub(crate) fn transaction_response(
    signature: &Signature,
    transaction: TransactionInfo,
    response_time_ms: u64,
) -> Result<TransactionResponse, ChainBenchError> {
    let encoded = serde_json::to_vec(&transaction.transaction)
        .map_err(|error| ChainBenchError::InvalidResponse(error.to_string()))?;
    Ok(TransactionResponse {
        signature: signature.to_string(),
        slot: transaction.slot,
        transaction: encoded,
        success: transaction.success,
        response_time_ms,
    })
}

pub(crate) fn block_response(block: BlockInfo, response_time_ms: u64) -> BlockResponse {
    BlockResponse {
        slot: block.slot,
        blockhash: block.blockhash,
        previous_blockhash: block.previous_blockhash,
        parent_slot: block.parent_slot,
        transactions: block.signatures,
        response_time_ms,
    }
}

#[async_trait]
impl ResourceClient for JsonRpcResourceClient {
    fn transport(&self) -> Transport {
        Transport::JsonRpc
    }

    async fn get_account_info(
        &self,
        pubkey: &Pubkey,
        commitment: Commitment,
    ) -> Result<Measured<AccountInfoResponse>, ChainBenchError> {
        let start = Instant::now();
        let account = self.client.get_account_info(pubkey, commitment).await?;
        let elapsed_ms = elapsed_ms(start);
        Ok(Measured::new(
            account_response(pubkey, account, elapsed_ms),
            elapsed_ms,
        ))
    }

    async fn get_transaction(
        &self,
        signature: &Signature,
        commitment: Commitment,
    ) -> Result<Measured<TransactionResponse>, ChainBenchError> {
        let start = Instant::now();
        let transaction = self.client.get_transaction(signature, commitment).await?;
        let elapsed_ms = elapsed_ms(start);
        Ok(Measured::new(
            transaction_response(signature, transaction, elapsed_ms)?,
            elapsed_ms,
        ))
    }

    async fn get_block(
        &self,
        slot: Slot,
        commitment: Commitment,
    ) -> Result<Measured<BlockResponse>, ChainBenchError> {
        let start = Instant::now();
        let block = self.client.get_block(slot, commitment).await?;
        let elapsed_ms = elapsed_ms(start);
        Ok(Measured::new(block_response(block, elapsed_ms), elapsed_ms))
    }
}

/// Fast path: the façade's own handlers, invoked in process. The latency is
/// the `response_time_ms` the handler reports, not an outer measurement.
pub struct FacadeResourceClient {
    gateway: Arc<Gateway>,
}

impl FacadeResourceClient {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl ResourceClient for FacadeResourceClient {
    fn transport(&self) -> Transport {
        Transport::Grpc
    }

    async fn get_account_info(
        &self,
        pubkey: &Pubkey,
        commitment: Commitment,
    ) -> Result<Measured<AccountInfoResponse>, ChainBenchError> {
        let response = self
            .gateway
            .get_account_info(AccountInfoRequest {
                pubkey: pubkey.to_string(),
                commitment: commitment.to_string(),
                encoding_binary: true,
            })
            .await?;
        let elapsed_ms = response.response_time_ms;
        Ok(Measured::new(response, elapsed_ms))
    }

    async fn get_transaction(
        &self,
        signature: &Signature,
        commitment: Commitment,
    ) -> Result<Measured<TransactionResponse>, ChainBenchError> {
        let response = self
            .gateway
            .get_transaction(TransactionRequest {
                signature: signature.to_string(),
                commitment: commitment.to_string(),
            })
            .await?;
        let elapsed_ms = response.response_time_ms;
        Ok(Measured::new(response, elapsed_ms))
    }

    async fn get_block(
        &self,
        slot: Slot,
        commitment: Commitment,
    ) -> Result<Measured<BlockResponse>, ChainBenchError> {
        let response = self
            .gateway
            .get_block(BlockRequest {
                slot,
                commitment: commitment.to_string(),
            })
            .await?;
        let elapsed_ms = response.response_time_ms;
        Ok(Measured::new(response, elapsed_ms))
    }
}
