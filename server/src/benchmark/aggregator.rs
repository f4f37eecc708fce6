use crate::benchmark::client::ResourceClient;
use crate::benchmark::request::BenchmarkRequest;
use crate::benchmark::sampler::LatencySampler;
use crate::benchmark::summary::summarize;
use chainbench::commitment::Commitment;
use chainbench::proto::{BenchmarkResults, ResourceBenchmark};
use chainbench::resource::{ResourceKind, Transport};
use futures::future::join_all;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::info;

type SamplerFuture<'a> =
    Pin<Box<dyn Future<Output = (ResourceKind, Transport, ResourceBenchmark)> + Send + 'a>>;

/// Runs the applicable samplers concurrently and reduces their results.
pub struct BenchmarkAggregator {
    grpc: Arc<dyn ResourceClient>,
    jsonrpc: Arc<dyn ResourceClient>,
    commitment: Commitment,
}

impl BenchmarkAggregator {
    pub fn new(
        grpc: Arc<dyn ResourceClient>,
        jsonrpc: Arc<dyn ResourceClient>,
        commitment: Commitment,
    ) -> Self {
        Self {
            grpc,
            jsonrpc,
            commitment,
        }
    }

    fn client(&self, transport: Transport) -> Arc<dyn ResourceClient> {
        match transport {
            Transport::Grpc => self.grpc.clone(),
            Transport::JsonRpc => self.jsonrpc.clone(),
        }
    }

    /// Joins every sampler before returning; per call errors only show up
    /// in the failure counts.
    pub async fn run(
        &self,
        request: &BenchmarkRequest,
        cancellation: &CancellationToken,
    ) -> BenchmarkResults {
        let start = Instant::now();
        let mut futures: Vec<SamplerFuture> = Vec::new();
        for kind in ResourceKind::ALL {
            for transport in Transport::ALL {
                if !request.is_applicable(kind, transport) {
                    continue;
                }

                let sampler = LatencySampler::new(kind, self.client(transport), self.commitment);
                let targets = request.targets(kind);
                let iterations = request.iterations();
                futures.push(Box::pin(async move {
                    let benchmark = sampler.run(iterations, &targets, cancellation).await;
                    (kind, transport, benchmark)
                }));
            }
        }

        info!(
            "Running {} sampler(s) for {} iteration(s)...",
            futures.len(),
            request.iterations()
        );
        let outcomes = join_all(futures).await;

        let mut benchmarks: HashMap<(ResourceKind, Transport), ResourceBenchmark> = outcomes
            .into_iter()
            .map(|(kind, transport, benchmark)| ((kind, transport), benchmark))
            .collect();
        let mut take = |kind: ResourceKind, transport: Transport| {
            benchmarks
                .remove(&(kind, transport))
                .unwrap_or_default()
        };
        let account_grpc = take(ResourceKind::Account, Transport::Grpc);
        let account_jsonrpc = take(ResourceKind::Account, Transport::JsonRpc);
        let transaction_grpc = take(ResourceKind::Transaction, Transport::Grpc);
        let transaction_jsonrpc = take(ResourceKind::Transaction, Transport::JsonRpc);
        let block_grpc = take(ResourceKind::Block, Transport::Grpc);
        let block_jsonrpc = take(ResourceKind::Block, Transport::JsonRpc);

        let total_duration_ms = start.elapsed().as_millis() as u64;
        let summary = summarize(total_duration_ms, &account_grpc, &account_jsonrpc);
        info!(
            "Benchmark finished in {total_duration_ms} ms, speedup: {:.2}.",
            summary.grpc_vs_jsonrpc_speedup
        );
        BenchmarkResults {
            account_grpc: Some(account_grpc),
            account_jsonrpc: Some(account_jsonrpc),
            transaction_grpc: Some(transaction_grpc),
            transaction_jsonrpc: Some(transaction_jsonrpc),
            block_grpc: Some(block_grpc),
            block_jsonrpc: Some(block_jsonrpc),
            summary: Some(summary),
        }
    }
}
