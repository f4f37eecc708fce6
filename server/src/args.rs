use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration provider, only `file` is supported.
    #[arg(short, long, default_value = "file")]
    pub config_provider: String,

    /// gRPC listen address, overrides `grpc.address`.
    #[arg(short, long)]
    pub address: Option<String>,

    /// Solana JSON-RPC endpoint, overrides `rpc.endpoint`.
    #[arg(short, long)]
    pub rpc_endpoint: Option<String>,
}

impl Args {
    pub fn has_overrides(&self) -> bool {
        self.address.is_some() || self.rpc_endpoint.is_some()
    }
}
