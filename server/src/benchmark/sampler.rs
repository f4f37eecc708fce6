use crate::benchmark::client::ResourceClient;
use crate::benchmark::statistics::LatencyAccumulator;
use crate::benchmark::target::TargetId;
use chainbench::commitment::Commitment;
use chainbench::error::ChainBenchError;
use chainbench::proto::ResourceBenchmark;
use chainbench::resource::ResourceKind;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Samples the latency of one {resource kind, transport} pair.
pub struct LatencySampler {
    kind: ResourceKind,
    client: Arc<dyn ResourceClient>,
    commitment: Commitment,
}

impl LatencySampler {
    pub fn new(kind: ResourceKind, client: Arc<dyn ResourceClient>, commitment: Commitment) -> Self {
        Self {
            kind,
            client,
            commitment,
        }
    }

    /// Performs `iterations` x `targets` sequential attempts, iterations in
    /// the outer loop. Every attempt ends up either as a sample or as a
    /// failure, so the counts always add up to the number of attempts.
    pub async fn run(
        &self,
        iterations: u32,
        targets: &[TargetId],
        cancellation: &CancellationToken,
    ) -> ResourceBenchmark {
        let transport = self.client.transport();
        info!(
            "Sampling {} latency over {transport}: {iterations} iteration(s) x {} target(s)...",
            self.kind,
            targets.len()
        );

        let mut accumulator = LatencyAccumulator::new();
        for iteration in 0..iterations {
            for target_id in targets {
                match self.attempt(target_id, cancellation).await {
                    Ok(elapsed_ms) => accumulator.record_success(elapsed_ms),
                    Err(ChainBenchError::Cancelled) => accumulator.record_failure(),
                    Err(error) => {
                        debug!(
                            "Attempt {iteration} for {target_id} over {transport} failed: {error}"
                        );
                        accumulator.record_failure();
                    }
                }
            }
        }

        if cancellation.is_cancelled() {
            warn!(
                "Sampling {} latency over {transport} was cancelled after {} successful attempt(s).",
                self.kind,
                accumulator.successful()
            );
        }

        info!(
            "Sampled {} latency over {transport}: successful: {}, failed: {}, min: {:?} ms, max: {} ms, avg: {:?} ms.",
            self.kind,
            accumulator.successful(),
            accumulator.failed(),
            accumulator.min_ms(),
            accumulator.max_ms(),
            accumulator.avg_ms()
        );
        accumulator.finish()
    }

    async fn attempt(
        &self,
        target_id: &TargetId,
        cancellation: &CancellationToken,
    ) -> Result<u64, ChainBenchError> {
        if cancellation.is_cancelled() {
            return Err(ChainBenchError::Cancelled);
        }

        let target = target_id.parse()?;
        tokio::select! {
            biased;
            _ = cancellation.cancelled() => Err(ChainBenchError::Cancelled),
            result = self.client.measure(&target, self.commitment) => result,
        }
    }
}
