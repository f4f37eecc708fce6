mod args;
mod commands;
mod error;
mod output;

use crate::args::{Args, Command};
use crate::error::BenchError;
use clap::Parser;
use tonic::transport::Endpoint;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), BenchError> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or(EnvFilter::new("INFO")))
        .init();

    let endpoint = Endpoint::from_shared(args.server_address.clone())
        .map_err(|_| BenchError::InvalidServerAddress(args.server_address.clone()))?;
    info!("Connecting to chainbench server at: {}...", args.server_address);
    let channel = endpoint.connect().await?;
    let mut client = commands::ServiceClient::new(channel);

    let timeout = args.timeout;
    match args.command {
        Command::Benchmark(benchmark) => {
            commands::benchmark(&mut client, &benchmark, timeout).await?
        }
        Command::Account { pubkey, commitment } => {
            commands::account(&mut client, pubkey, commitment, timeout).await?
        }
        Command::Transaction {
            signature,
            commitment,
        } => commands::transaction(&mut client, signature, commitment, timeout).await?,
        Command::Block { slot, commitment } => {
            commands::block(&mut client, slot, commitment, timeout).await?
        }
        Command::StreamAccounts { pubkey, commitment } => {
            commands::stream_accounts(&mut client, pubkey, commitment, timeout).await?
        }
        Command::StreamTransactions { commitment } => {
            commands::stream_transactions(&mut client, commitment, timeout).await?
        }
        Command::StreamBlocks { commitment } => {
            commands::stream_blocks(&mut client, commitment, timeout).await?
        }
    }
    Ok(())
}
