use std::time::Duration;
use tokio_util::sync::{CancellationToken, DropGuard};
use tonic::metadata::MetadataMap;
use tracing::warn;

const GRPC_TIMEOUT_HEADER: &str = "grpc-timeout";

/// Reads the caller's deadline from the `grpc-timeout` header: at most
/// eight ASCII digits followed by a unit (`H`, `M`, `S`, `m`, `u`, `n`).
pub fn grpc_timeout(metadata: &MetadataMap) -> Option<Duration> {
    let value = metadata.get(GRPC_TIMEOUT_HEADER)?.to_str().ok()?;
    parse_grpc_timeout(value)
}

fn parse_grpc_timeout(value: &str) -> Option<Duration> {
    if value.len() < 2 || value.len() > 9 {
        return None;
    }

    let (amount, unit) = value.split_at(value.len() - 1);
    if !amount.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    let amount: u64 = amount.parse().ok()?;
    let duration = match unit {
        "H" => Duration::from_secs(amount * 60 * 60),
        "M" => Duration::from_secs(amount * 60),
        "S" => Duration::from_secs(amount),
        "m" => Duration::from_millis(amount),
        "u" => Duration::from_micros(amount),
        "n" => Duration::from_nanos(amount),
        _ => return None,
    };
    Some(duration)
}

/// How long the benchmark may run so the response still makes it back
/// before the caller gives up.
pub fn benchmark_budget(timeout: Duration, margin: Duration) -> Duration {
    timeout.saturating_sub(margin)
}

/// Cancellation token of one benchmark run, cancelled once the budget is
/// spent. Dropping the deadline cancels the token as well, so the timer task
/// never outlives the run, even when the caller goes away.
pub struct BenchmarkDeadline {
    token: CancellationToken,
    _guard: DropGuard,
}

impl BenchmarkDeadline {
    pub fn start(timeout: Option<Duration>, margin: Duration) -> Self {
        let token = CancellationToken::new();
        if let Some(timeout) = timeout {
            let budget = benchmark_budget(timeout, margin);
            let timer_token = token.clone();
            tokio::spawn(async move {
                tokio::select! {
                    _ = timer_token.cancelled() => {}
                    _ = tokio::time::sleep(budget) => {
                        warn!("Benchmark deadline of {budget:?} reached, cancelling remaining attempts.");
                        timer_token.cancel();
                    }
                }
            });
        }

        Self {
            _guard: token.clone().drop_guard(),
            token,
        }
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}
