use chainbench::rpc::client::JsonRpcClient;
use chainbench::validatable::Validatable;
use clap::Parser;
use figlet_rs::FIGfont;
use server::args::Args;
use server::benchmark::aggregator::BenchmarkAggregator;
use server::benchmark::client::{FacadeResourceClient, JsonRpcResourceClient, ResourceClient};
use server::configs::config_provider;
use server::configs::server::ServerConfig;
use server::grpc::gateway::Gateway;
use server::grpc::service::ChainBenchService;
use server::grpc::streams::StreamSchedule;
use server::log::logger::Logging;
use server::server_error::ServerError;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    if let Ok(standard_font) = FIGfont::standard() {
        if let Some(figure) = standard_font.convert("ChainBench") {
            println!("{figure}");
        }
    }

    let args = Args::parse();

    let mut logging = Logging::new();
    logging.early_init();

    let config_provider = config_provider::resolve(&args.config_provider)?;
    let mut config = ServerConfig::load(config_provider.as_ref()).await?;
    if let Some(address) = args.address.clone() {
        config.grpc.address = address;
    }
    if let Some(endpoint) = args.rpc_endpoint.clone() {
        config.rpc.endpoint = endpoint;
    }
    if args.has_overrides() {
        config.validate()?;
        info!("Using config with command line overrides: {config}");
    }

    logging.late_init(&config.logging)?;

    let commitment = config.benchmark.commitment;
    let rpc_client = JsonRpcClient::create(config.rpc.client_config())?;
    info!(
        "JSON-RPC endpoint: {}, commitment: {commitment}.",
        rpc_client.endpoint()
    );

    let jsonrpc: Arc<dyn ResourceClient> = Arc::new(JsonRpcResourceClient::new(rpc_client));
    let gateway = Arc::new(Gateway::new(jsonrpc.clone(), commitment));
    let grpc: Arc<dyn ResourceClient> = Arc::new(FacadeResourceClient::new(gateway.clone()));
    let aggregator = Arc::new(BenchmarkAggregator::new(grpc, jsonrpc.clone(), commitment));
    let schedule = StreamSchedule::new(
        config.streaming.updates,
        config.streaming.interval.get_duration(),
    );
    let service = ChainBenchService::new(
        gateway,
        jsonrpc,
        aggregator,
        schedule,
        config.benchmark.deadline_margin.get_duration(),
    );

    server::grpc::server::start(&config.grpc, service).await?;
    info!("ChainBench server has shutdown successfully.");
    Ok(())
}
