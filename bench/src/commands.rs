use crate::args::BenchmarkArgs;
use crate::error::BenchError;
use crate::output;
use chainbench::identifier::Slot;
use chainbench::proto::benchmark_service_client::BenchmarkServiceClient;
use chainbench::proto::{
    AccountInfoRequest, AccountStreamRequest, BenchmarkRequest, BlockRequest, BlockStreamRequest,
    TransactionRequest, TransactionStreamRequest,
};
use chainbench::resource::ResourceKind;
use chainbench::utils::duration::HumanDuration;
use tokio_stream::StreamExt;
use tonic::transport::Channel;
use tonic::Request;
use tracing::info;

pub type ServiceClient = BenchmarkServiceClient<Channel>;

/// Wraps the message and attaches the deadline, if one is configured.
fn request<T>(message: T, timeout: HumanDuration) -> Request<T> {
    let mut request = Request::new(message);
    if let Some(timeout) = timeout.enabled() {
        request.set_timeout(timeout);
    }
    request
}

pub fn benchmark_request(args: &BenchmarkArgs) -> Result<BenchmarkRequest, BenchError> {
    if !args.has_targets() {
        return Err(BenchError::InvalidArguments(
            "at least one --pubkey, --signature or --slot is required".to_string(),
        ));
    }
    if args.iterations == 0 {
        return Err(BenchError::InvalidArguments(
            "--iterations must be greater than zero".to_string(),
        ));
    }
    if args.skip_grpc && args.skip_jsonrpc {
        return Err(BenchError::InvalidArguments(
            "--skip-grpc and --skip-jsonrpc leave nothing to compare".to_string(),
        ));
    }

    Ok(BenchmarkRequest {
        iterations: args.iterations,
        test_accounts: args.pubkey.clone(),
        test_signatures: args.signature.clone(),
        test_slots: args.slot.clone(),
        run_grpc_tests: !args.skip_grpc,
        run_jsonrpc_tests: !args.skip_jsonrpc,
    })
}

/// Resource kinds the benchmark has targets for, in display order.
pub fn requested_kinds(request: &BenchmarkRequest) -> Vec<ResourceKind> {
    ResourceKind::ALL
        .into_iter()
        .filter(|kind| match kind {
            ResourceKind::Account => !request.test_accounts.is_empty(),
            ResourceKind::Transaction => !request.test_signatures.is_empty(),
            ResourceKind::Block => !request.test_slots.is_empty(),
        })
        .collect()
}

pub async fn benchmark(
    client: &mut ServiceClient,
    args: &BenchmarkArgs,
    timeout: HumanDuration,
) -> Result<(), BenchError> {
    let message = benchmark_request(args)?;
    let kinds = requested_kinds(&message);
    info!(
        "Running benchmark with {} iteration(s), timeout: {timeout}...",
        message.iterations
    );
    let results = client
        .run_benchmark(request(message, timeout))
        .await?
        .into_inner();
    output::print_benchmark(&results, &kinds);
    Ok(())
}

pub async fn account(
    client: &mut ServiceClient,
    pubkey: String,
    commitment: String,
    timeout: HumanDuration,
) -> Result<(), BenchError> {
    let message = AccountInfoRequest {
        pubkey,
        commitment,
        encoding_binary: true,
    };
    let response = client
        .get_account_info(request(message, timeout))
        .await?
        .into_inner();
    output::print_account(&response);
    Ok(())
}

pub async fn transaction(
    client: &mut ServiceClient,
    signature: String,
    commitment: String,
    timeout: HumanDuration,
) -> Result<(), BenchError> {
    let message = TransactionRequest {
        signature,
        commitment,
    };
    let response = client
        .get_transaction(request(message, timeout))
        .await?
        .into_inner();
    output::print_transaction(&response);
    Ok(())
}

pub async fn block(
    client: &mut ServiceClient,
    slot: Slot,
    commitment: String,
    timeout: HumanDuration,
) -> Result<(), BenchError> {
    let message = BlockRequest { slot, commitment };
    let response = client
        .get_block(request(message, timeout))
        .await?
        .into_inner();
    output::print_block(&response);
    Ok(())
}

pub async fn stream_accounts(
    client: &mut ServiceClient,
    pubkeys: Vec<String>,
    commitment: String,
    timeout: HumanDuration,
) -> Result<(), BenchError> {
    let message = AccountStreamRequest {
        pubkeys,
        commitment,
    };
    let mut stream = client
        .stream_account_updates(request(message, timeout))
        .await?
        .into_inner();
    let mut received = 0;
    while let Some(update) = stream.next().await {
        println!("{}", output::account_update_line(&update?));
        received += 1;
    }
    info!("Account stream finished after {received} update(s).");
    Ok(())
}

pub async fn stream_transactions(
    client: &mut ServiceClient,
    commitment: String,
    timeout: HumanDuration,
) -> Result<(), BenchError> {
    let message = TransactionStreamRequest {
        accounts: vec![],
        include_failed: false,
        commitment,
    };
    let mut stream = client
        .stream_transactions(request(message, timeout))
        .await?
        .into_inner();
    while let Some(update) = stream.next().await {
        println!("{}", output::transaction_update_line(&update?));
    }
    info!("Transaction stream finished.");
    Ok(())
}

pub async fn stream_blocks(
    client: &mut ServiceClient,
    commitment: String,
    timeout: HumanDuration,
) -> Result<(), BenchError> {
    let message = BlockStreamRequest { commitment };
    let mut stream = client
        .stream_blocks(request(message, timeout))
        .await?
        .into_inner();
    while let Some(update) = stream.next().await {
        println!("{}", output::block_update_line(&update?));
    }
    info!("Block stream finished.");
    Ok(())
}
