use crate::benchmark::client::ResourceClient;
use chainbench::commitment::Commitment;
use chainbench::error::ChainBenchError;
use chainbench::identifier::{Pubkey, Signature};
use chainbench::proto::{
    AccountInfoRequest, AccountInfoResponse, BlockRequest, BlockResponse, TransactionRequest,
    TransactionResponse,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::trace;

/// Handler logic of the façade's unary lookups. Each handler times itself,
/// from parsing the request to the converted upstream payload, and reports
/// it in `response_time_ms`.
pub struct Gateway {
    upstream: Arc<dyn ResourceClient>,
    default_commitment: Commitment,
}

impl Gateway {
    pub fn new(upstream: Arc<dyn ResourceClient>, default_commitment: Commitment) -> Self {
        Self {
            upstream,
            default_commitment,
        }
    }

    pub fn default_commitment(&self) -> Commitment {
        self.default_commitment
    }

    pub async fn get_account_info(
        &self,
        request: AccountInfoRequest,
    ) -> Result<AccountInfoResponse, ChainBenchError> {
        let start = Instant::now();
        let pubkey: Pubkey = request.pubkey.parse()?;
        let commitment = Commitment::from_request(&request.commitment, self.default_commitment)?;
        let mut response = self
            .upstream
            .get_account_info(&pubkey, commitment)
            .await?
            .payload;
        response.response_time_ms = start.elapsed().as_millis() as u64;
        trace!(
            "Account {pubkey} served in {} ms.",
            response.response_time_ms
        );
        Ok(response)
    }

    pub async fn get_transaction(
        &self,
        request: TransactionRequest,
    ) -> Result<TransactionResponse, ChainBenchError> {
        let start = Instant::now();
        let signature: Signature = request.signature.parse()?;
        let commitment = Commitment::from_request(&request.commitment, self.default_commitment)?;
        let mut response = self
            .upstream
            .get_transaction(&signature, commitment)
            .await?
            .payload;
        response.response_time_ms = start.elapsed().as_millis() as u64;
        trace!(
            "Transaction {signature} served in {} ms.",
            response.response_time_ms
        );
        Ok(response)
    }

    pub async fn get_block(&self, request: BlockRequest) -> Result<BlockResponse, ChainBenchError> {
        let start = Instant::now();
        let commitment = Commitment::from_request(&request.commitment, self.default_commitment)?;
        let mut response = self
            .upstream
            .get_block(request.slot, commitment)
            .await?
            .payload;
        response.response_time_ms = start.elapsed().as_millis() as u64;
        trace!(
            "Block {} served in {} ms.",
            request.slot,
            response.response_time_ms
        );
        Ok(response)
    }
}
