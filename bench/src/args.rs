use chainbench::identifier::Slot;
use chainbench::utils::duration::HumanDuration;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::str::FromStr;

const DEFAULT_SERVER_ADDRESS: &str = "http://127.0.0.1:50051";
const DEFAULT_ITERATIONS: u32 = 10;
const DEFAULT_TIMEOUT: &str = "5m";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Address of the chainbench gRPC server
    #[arg(long, short = 's', global = true, default_value = DEFAULT_SERVER_ADDRESS)]
    pub server_address: String,

    /// Deadline sent with every request, e.g. `30s`; `none` waits indefinitely
    #[arg(long, short = 't', global = true, default_value = DEFAULT_TIMEOUT, value_parser = HumanDuration::from_str)]
    pub timeout: HumanDuration,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compare gRPC and JSON-RPC latency for the given targets
    Benchmark(BenchmarkArgs),

    /// Fetch one account through the gRPC façade
    Account {
        /// Account address, base58
        #[arg(long, short = 'p')]
        pubkey: String,

        /// processed, confirmed or finalized, server default when omitted
        #[arg(long, short = 'c', default_value = "")]
        commitment: String,
    },

    /// Fetch one transaction through the gRPC façade
    Transaction {
        /// Transaction signature, base58
        #[arg(long)]
        signature: String,

        #[arg(long, short = 'c', default_value = "")]
        commitment: String,
    },

    /// Fetch one block through the gRPC façade
    Block {
        #[arg(long)]
        slot: Slot,

        #[arg(long, short = 'c', default_value = "")]
        commitment: String,
    },

    /// Subscribe to the (polled) account update stream
    StreamAccounts {
        /// Account addresses, base58
        #[arg(long, short = 'p', required = true, num_args = 1..)]
        pubkey: Vec<String>,

        #[arg(long, short = 'c', default_value = "")]
        commitment: String,
    },

    /// Subscribe to the simulated transaction stream
    StreamTransactions {
        #[arg(long, short = 'c', default_value = "")]
        commitment: String,
    },

    /// Subscribe to the simulated block stream
    StreamBlocks {
        #[arg(long, short = 'c', default_value = "")]
        commitment: String,
    },
}

#[derive(ClapArgs, Debug, Clone)]
pub struct BenchmarkArgs {
    /// Account addresses to look up
    #[arg(long, short = 'p', num_args = 1..)]
    pub pubkey: Vec<String>,

    /// Transaction signatures to look up
    #[arg(long, num_args = 1..)]
    pub signature: Vec<String>,

    /// Block slots to look up
    #[arg(long, num_args = 1..)]
    pub slot: Vec<Slot>,

    /// Number of passes over all targets
    #[arg(long, short = 'i', default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: u32,

    /// Skip the gRPC façade path
    #[arg(long, default_value_t = false)]
    pub skip_grpc: bool,

    /// Skip the direct JSON-RPC path
    #[arg(long, default_value_t = false)]
    pub skip_jsonrpc: bool,
}

impl BenchmarkArgs {
    pub fn has_targets(&self) -> bool {
        !self.pubkey.is_empty() || !self.signature.is_empty() || !self.slot.is_empty()
    }
}
