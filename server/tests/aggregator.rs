mod common;

use crate::common::{valid_signature, ScriptedClient, Step, SYSTEM_PROGRAM, TOKEN_PROGRAM};
use chainbench::commitment::Commitment;
use chainbench::proto::{BenchmarkResults, ResourceBenchmark};
use chainbench::resource::Transport;
use server::benchmark::aggregator::BenchmarkAggregator;
use server::benchmark::client::ResourceClient;
use server::benchmark::request::BenchmarkRequest;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

fn request(iterations: u32) -> BenchmarkRequest {
    BenchmarkRequest::new(NonZeroU32::new(iterations).unwrap())
}

fn aggregator(grpc: Arc<ScriptedClient>, jsonrpc: Arc<ScriptedClient>) -> BenchmarkAggregator {
    let grpc: Arc<dyn ResourceClient> = grpc;
    let jsonrpc: Arc<dyn ResourceClient> = jsonrpc;
    BenchmarkAggregator::new(grpc, jsonrpc, Commitment::Finalized)
}

fn pair(benchmark: &Option<ResourceBenchmark>) -> &ResourceBenchmark {
    benchmark.as_ref().expect("missing pair")
}

fn assert_consistent(benchmark: &ResourceBenchmark, attempts: u32) {
    assert_eq!(benchmark.total_requests(), attempts);
    if benchmark.has_samples() {
        let min = benchmark.min_response_time_ms.unwrap();
        let avg = benchmark.avg_response_time_ms.unwrap();
        assert!(min <= avg && avg <= benchmark.max_response_time_ms);
    } else {
        assert_eq!(benchmark.min_response_time_ms, None);
        assert_eq!(benchmark.avg_response_time_ms, None);
    }
}

async fn run(aggregator: &BenchmarkAggregator, request: &BenchmarkRequest) -> BenchmarkResults {
    aggregator.run(request, &CancellationToken::new()).await
}

#[tokio::test]
async fn faster_grpc_path_should_be_reported_with_speedup() {
    let grpc = Arc::new(ScriptedClient::latencies(
        Transport::Grpc,
        &[10, 12, 11, 9, 10],
    ));
    let jsonrpc = Arc::new(ScriptedClient::latencies(
        Transport::JsonRpc,
        &[50, 48, 52, 51, 49],
    ));
    let aggregator = aggregator(grpc.clone(), jsonrpc.clone());
    let request = request(5).with_accounts(vec![SYSTEM_PROGRAM.to_string()]);

    let results = run(&aggregator, &request).await;

    let account_grpc = pair(&results.account_grpc);
    assert_eq!(account_grpc.successful_requests, 5);
    assert_eq!(account_grpc.failed_requests, 0);
    assert_eq!(account_grpc.avg_response_time_ms, Some(10));
    assert_eq!(account_grpc.min_response_time_ms, Some(9));
    assert_eq!(account_grpc.max_response_time_ms, 12);

    let account_jsonrpc = pair(&results.account_jsonrpc);
    assert_eq!(account_jsonrpc.avg_response_time_ms, Some(50));
    assert_eq!(account_jsonrpc.min_response_time_ms, Some(48));
    assert_eq!(account_jsonrpc.max_response_time_ms, 52);

    let summary = results.summary.unwrap();
    assert_eq!(summary.grpc_vs_jsonrpc_speedup, 5.0);
    assert_eq!(summary.conclusion, "gRPC is 5.00x faster than JSON-RPC");
    assert_eq!(grpc.calls(), 5);
    assert_eq!(jsonrpc.calls(), 5);
}

#[tokio::test]
async fn counts_should_cover_every_attempt_across_kinds() {
    let grpc = Arc::new(ScriptedClient::new(
        Transport::Grpc,
        &[Step::Latency(5), Step::Fail, Step::Latency(7)],
    ));
    let jsonrpc = Arc::new(ScriptedClient::new(
        Transport::JsonRpc,
        &[Step::Fail, Step::Latency(30)],
    ));
    let aggregator = aggregator(grpc, jsonrpc);
    let request = request(3)
        .with_accounts(vec![SYSTEM_PROGRAM.to_string(), TOKEN_PROGRAM.to_string()])
        .with_signatures(vec![valid_signature()])
        .with_slots(vec![1, 2, 3]);

    let results = run(&aggregator, &request).await;

    assert_consistent(pair(&results.account_grpc), 6);
    assert_consistent(pair(&results.account_jsonrpc), 6);
    assert_consistent(pair(&results.transaction_grpc), 3);
    assert_consistent(pair(&results.transaction_jsonrpc), 3);
    assert_consistent(pair(&results.block_grpc), 9);
    assert_consistent(pair(&results.block_jsonrpc), 9);
}

#[tokio::test]
async fn only_applicable_pairs_should_run() {
    let grpc = Arc::new(ScriptedClient::latencies(Transport::Grpc, &[4]));
    let jsonrpc = Arc::new(ScriptedClient::latencies(Transport::JsonRpc, &[8]));
    let aggregator = aggregator(grpc.clone(), jsonrpc.clone());
    let request = request(2)
        .with_slots(vec![250_000_000])
        .with_transports(true, false);

    let results = run(&aggregator, &request).await;

    assert_eq!(pair(&results.block_grpc).successful_requests, 2);
    assert_eq!(pair(&results.block_jsonrpc), &ResourceBenchmark::default());
    assert_eq!(pair(&results.account_grpc), &ResourceBenchmark::default());
    assert_eq!(pair(&results.transaction_jsonrpc), &ResourceBenchmark::default());
    assert_eq!(jsonrpc.calls(), 0);
    assert_eq!(grpc.calls(), 2);

    let summary = results.summary.unwrap();
    assert_eq!(summary.grpc_vs_jsonrpc_speedup, 0.0);
    assert!(summary.conclusion.is_empty());
}

#[tokio::test]
async fn failing_reference_path_should_leave_ratio_undefined() {
    let grpc = Arc::new(ScriptedClient::latencies(Transport::Grpc, &[10]));
    let jsonrpc = Arc::new(ScriptedClient::new(Transport::JsonRpc, &[Step::Fail]));
    let aggregator = aggregator(grpc, jsonrpc);
    let request = request(4).with_accounts(vec![SYSTEM_PROGRAM.to_string()]);

    let results = run(&aggregator, &request).await;

    let account_jsonrpc = pair(&results.account_jsonrpc);
    assert_eq!(account_jsonrpc.successful_requests, 0);
    assert_eq!(account_jsonrpc.failed_requests, 4);
    assert_eq!(account_jsonrpc.avg_response_time_ms, None);
    assert_eq!(account_jsonrpc.min_response_time_ms, None);

    let summary = results.summary.unwrap();
    assert_eq!(summary.grpc_vs_jsonrpc_speedup, 0.0);
    assert!(summary.conclusion.is_empty());
}

#[tokio::test]
async fn zero_latency_average_should_leave_ratio_undefined() {
    let grpc = Arc::new(ScriptedClient::latencies(Transport::Grpc, &[0]));
    let jsonrpc = Arc::new(ScriptedClient::latencies(Transport::JsonRpc, &[3]));
    let aggregator = aggregator(grpc, jsonrpc);
    let request = request(2).with_accounts(vec![SYSTEM_PROGRAM.to_string()]);

    let results = run(&aggregator, &request).await;

    assert_eq!(pair(&results.account_grpc).avg_response_time_ms, Some(0));
    assert_eq!(results.summary.unwrap().grpc_vs_jsonrpc_speedup, 0.0);
}

#[tokio::test]
async fn slower_grpc_path_should_invert_conclusion() {
    let grpc = Arc::new(ScriptedClient::latencies(Transport::Grpc, &[40]));
    let jsonrpc = Arc::new(ScriptedClient::latencies(Transport::JsonRpc, &[10]));
    let aggregator = aggregator(grpc, jsonrpc);
    let request = request(1).with_accounts(vec![SYSTEM_PROGRAM.to_string()]);

    let summary = run(&aggregator, &request).await.summary.unwrap();

    assert_eq!(summary.grpc_vs_jsonrpc_speedup, 0.25);
    assert_eq!(summary.conclusion, "JSON-RPC is 4.00x faster than gRPC");
}

#[tokio::test]
async fn repeated_runs_should_report_identical_counts() {
    let grpc = Arc::new(ScriptedClient::new(
        Transport::Grpc,
        &[Step::Latency(3), Step::Fail],
    ));
    let jsonrpc = Arc::new(ScriptedClient::latencies(Transport::JsonRpc, &[9]));
    let aggregator = aggregator(grpc, jsonrpc);
    let request = request(3).with_signatures(vec![valid_signature(), "bad".to_string()]);

    let first = run(&aggregator, &request).await;
    let second = run(&aggregator, &request).await;

    for results in [&first, &second] {
        assert_consistent(pair(&results.transaction_grpc), 6);
        assert_consistent(pair(&results.transaction_jsonrpc), 6);
        assert_eq!(pair(&results.transaction_jsonrpc).successful_requests, 3);
        assert_eq!(pair(&results.transaction_jsonrpc).failed_requests, 3);
    }
    assert_eq!(
        pair(&first.transaction_jsonrpc).successful_requests,
        pair(&second.transaction_jsonrpc).successful_requests
    );
}

#[tokio::test]
async fn cancellation_should_keep_partial_statistics_consistent() {
    let grpc = Arc::new(ScriptedClient::new(
        Transport::Grpc,
        &[Step::Latency(5), Step::Latency(6), Step::Hang],
    ));
    let jsonrpc = Arc::new(ScriptedClient::new(
        Transport::JsonRpc,
        &[Step::Latency(20), Step::Hang],
    ));
    let aggregator = aggregator(grpc.clone(), jsonrpc.clone());
    let request = request(10).with_accounts(vec![SYSTEM_PROGRAM.to_string()]);

    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        canceller.cancel();
    });
    let results = tokio::time::timeout(Duration::from_secs(10), aggregator.run(&request, &token))
        .await
        .expect("cancelled benchmark should return");

    let account_grpc = pair(&results.account_grpc);
    assert_consistent(account_grpc, 10);
    assert_eq!(account_grpc.successful_requests, 2);
    assert_eq!(account_grpc.failed_requests, 8);

    let account_jsonrpc = pair(&results.account_jsonrpc);
    assert_consistent(account_jsonrpc, 10);
    assert_eq!(account_jsonrpc.successful_requests, 1);

    assert_eq!(grpc.calls(), 3);
    assert_eq!(jsonrpc.calls(), 2);
    assert_eq!(results.summary.unwrap().conclusion, "gRPC is 4.00x faster than JSON-RPC");
}

#[tokio::test]
async fn samplers_should_run_concurrently_and_report_wall_clock_duration() {
    const CALL_MS: u64 = 200;
    let grpc = Arc::new(ScriptedClient::new(Transport::Grpc, &[Step::Sleep(CALL_MS)]));
    let jsonrpc = Arc::new(ScriptedClient::new(
        Transport::JsonRpc,
        &[Step::Sleep(CALL_MS)],
    ));
    let aggregator = aggregator(grpc.clone(), jsonrpc.clone());
    let request = request(1)
        .with_accounts(vec![SYSTEM_PROGRAM.to_string()])
        .with_signatures(vec![valid_signature()])
        .with_slots(vec![42]);
    let serial_ms = 6 * CALL_MS;

    let start = Instant::now();
    let results = run(&aggregator, &request).await;
    let elapsed_ms = start.elapsed().as_millis() as u64;

    assert_eq!(grpc.calls(), 3);
    assert_eq!(jsonrpc.calls(), 3);
    assert!(
        elapsed_ms < serial_ms / 2,
        "benchmark took {elapsed_ms} ms, serial execution would take {serial_ms} ms"
    );

    let total_duration_ms = results.summary.unwrap().total_duration_ms;
    assert!(total_duration_ms >= CALL_MS);
    assert!(total_duration_ms < serial_ms);
    assert!(total_duration_ms <= elapsed_ms);
}
