use crate::benchmark::aggregator::BenchmarkAggregator;
use crate::benchmark::client::ResourceClient;
use crate::benchmark::request::BenchmarkRequest as ValidatedBenchmarkRequest;
use crate::grpc::deadline::{grpc_timeout, BenchmarkDeadline};
use crate::grpc::gateway::Gateway;
use crate::grpc::streams::{self, StreamSchedule, UpdateStream};
use chainbench::commitment::Commitment;
use chainbench::error::ChainBenchError;
use chainbench::identifier::Pubkey;
use chainbench::proto::benchmark_service_server::BenchmarkService;
use chainbench::proto::{
    AccountInfoRequest, AccountInfoResponse, AccountStreamRequest, AccountUpdate,
    BenchmarkRequest, BenchmarkResults, BlockRequest, BlockResponse, BlockStreamRequest,
    BlockUpdate, TransactionRequest, TransactionResponse, TransactionStreamRequest,
    TransactionUpdate,
};
use std::sync::Arc;
use std::time::Duration;
use tonic::{Request, Response, Status};
use tracing::info;

pub struct ChainBenchService {
    gateway: Arc<Gateway>,
    upstream: Arc<dyn ResourceClient>,
    aggregator: Arc<BenchmarkAggregator>,
    schedule: StreamSchedule,
    deadline_margin: Duration,
}

impl ChainBenchService {
    pub fn new(
        gateway: Arc<Gateway>,
        upstream: Arc<dyn ResourceClient>,
        aggregator: Arc<BenchmarkAggregator>,
        schedule: StreamSchedule,
        deadline_margin: Duration,
    ) -> Self {
        Self {
            gateway,
            upstream,
            aggregator,
            schedule,
            deadline_margin,
        }
    }

    fn commitment(&self, value: &str) -> Result<Commitment, ChainBenchError> {
        Commitment::from_request(value, self.gateway.default_commitment())
    }
}

#[tonic::async_trait]
impl BenchmarkService for ChainBenchService {
    async fn get_account_info(
        &self,
        request: Request<AccountInfoRequest>,
    ) -> Result<Response<AccountInfoResponse>, Status> {
        let response = self.gateway.get_account_info(request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn get_transaction(
        &self,
        request: Request<TransactionRequest>,
    ) -> Result<Response<TransactionResponse>, Status> {
        let response = self.gateway.get_transaction(request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn get_block(
        &self,
        request: Request<BlockRequest>,
    ) -> Result<Response<BlockResponse>, Status> {
        let response = self.gateway.get_block(request.into_inner()).await?;
        Ok(Response::new(response))
    }

    type StreamAccountUpdatesStream = UpdateStream<AccountUpdate>;

    async fn stream_account_updates(
        &self,
        request: Request<AccountStreamRequest>,
    ) -> Result<Response<Self::StreamAccountUpdatesStream>, Status> {
        let request = request.into_inner();
        let commitment = self.commitment(&request.commitment)?;
        let pubkeys = request
            .pubkeys
            .iter()
            .map(|pubkey| pubkey.parse::<Pubkey>())
            .collect::<Result<Vec<_>, _>>()?;
        info!(
            "Streaming updates of {} account(s), {} round(s).",
            pubkeys.len(),
            self.schedule.updates
        );
        Ok(Response::new(streams::account_updates(
            self.upstream.clone(),
            pubkeys,
            commitment,
            self.schedule,
        )))
    }

    type StreamTransactionsStream = UpdateStream<TransactionUpdate>;

    async fn stream_transactions(
        &self,
        request: Request<TransactionStreamRequest>,
    ) -> Result<Response<Self::StreamTransactionsStream>, Status> {
        self.commitment(&request.get_ref().commitment)?;
        info!(
            "Streaming {} simulated transaction(s).",
            self.schedule.updates
        );
        Ok(Response::new(streams::transaction_updates(self.schedule)))
    }

    type StreamBlocksStream = UpdateStream<BlockUpdate>;

    async fn stream_blocks(
        &self,
        request: Request<BlockStreamRequest>,
    ) -> Result<Response<Self::StreamBlocksStream>, Status> {
        self.commitment(&request.get_ref().commitment)?;
        info!("Streaming {} simulated block(s).", self.schedule.updates);
        Ok(Response::new(streams::block_updates(self.schedule)))
    }

    async fn run_benchmark(
        &self,
        request: Request<BenchmarkRequest>,
    ) -> Result<Response<BenchmarkResults>, Status> {
        let timeout = grpc_timeout(request.metadata());
        let request = ValidatedBenchmarkRequest::try_from(request.into_inner())?;
        let deadline = BenchmarkDeadline::start(timeout, self.deadline_margin);
        let results = self.aggregator.run(&request, deadline.token()).await;
        Ok(Response::new(results))
    }
}
