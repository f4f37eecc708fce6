use chainbench::proto::ResourceBenchmark;

/// Running latency statistics of one sampler, owned exclusively by it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LatencyAccumulator {
    successful: u32,
    failed: u32,
    min_ms: Option<u64>,
    max_ms: u64,
    total_ms: u64,
}

impl LatencyAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self, elapsed_ms: u64) {
        self.successful = self.successful.saturating_add(1);
        self.total_ms = self.total_ms.saturating_add(elapsed_ms);
        self.max_ms = self.max_ms.max(elapsed_ms);
        self.min_ms = Some(match self.min_ms {
            Some(min_ms) => min_ms.min(elapsed_ms),
            None => elapsed_ms,
        });
    }

    pub fn record_failure(&mut self) {
        self.failed = self.failed.saturating_add(1);
    }

    pub fn successful(&self) -> u32 {
        self.successful
    }

    pub fn failed(&self) -> u32 {
        self.failed
    }

    pub fn attempts(&self) -> u32 {
        self.successful.saturating_add(self.failed)
    }

    pub fn min_ms(&self) -> Option<u64> {
        self.min_ms
    }

    pub fn max_ms(&self) -> u64 {
        self.max_ms
    }

    /// Integer average, `None` until the first success.
    pub fn avg_ms(&self) -> Option<u64> {
        if self.successful == 0 {
            return None;
        }
        Some(self.total_ms / self.successful as u64)
    }

    pub fn finish(self) -> ResourceBenchmark {
        ResourceBenchmark {
            avg_response_time_ms: self.avg_ms(),
            min_response_time_ms: self.min_ms,
            max_response_time_ms: self.max_ms,
            successful_requests: self.successful,
            failed_requests: self.failed,
        }
    }
}
