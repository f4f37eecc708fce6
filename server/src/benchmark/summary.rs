use chainbench::proto::{BenchmarkSummary, ResourceBenchmark};

/// `jsonrpc_avg / grpc_avg` of the account lookups. Only defined when both
/// averages exist and are non-zero; transaction and block averages do not
/// contribute.
pub fn speedup(
    account_grpc: &ResourceBenchmark,
    account_jsonrpc: &ResourceBenchmark,
) -> Option<f64> {
    match (
        account_grpc.avg_response_time_ms,
        account_jsonrpc.avg_response_time_ms,
    ) {
        (Some(grpc_avg), Some(jsonrpc_avg)) if grpc_avg > 0 && jsonrpc_avg > 0 => {
            Some(jsonrpc_avg as f64 / grpc_avg as f64)
        }
        _ => None,
    }
}

pub fn conclusion(speedup: f64) -> String {
    if speedup > 1.0 {
        format!("gRPC is {speedup:.2}x faster than JSON-RPC")
    } else {
        format!("JSON-RPC is {:.2}x faster than gRPC", 1.0 / speedup)
    }
}

pub fn summarize(
    total_duration_ms: u64,
    account_grpc: &ResourceBenchmark,
    account_jsonrpc: &ResourceBenchmark,
) -> BenchmarkSummary {
    match speedup(account_grpc, account_jsonrpc) {
        Some(speedup) => BenchmarkSummary {
            total_duration_ms,
            grpc_vs_jsonrpc_speedup: speedup,
            conclusion: conclusion(speedup),
        },
        None => BenchmarkSummary {
            total_duration_ms,
            grpc_vs_jsonrpc_speedup: 0.0,
            conclusion: String::new(),
        },
    }
}
