use chainbench::proto::{
    AccountInfoResponse, AccountUpdate, BenchmarkResults, BenchmarkSummary, BlockResponse,
    BlockUpdate, ResourceBenchmark, TransactionResponse, TransactionUpdate,
};
use chainbench::resource::{ResourceKind, Transport};
use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use comfy_table::Table;

const NO_DATA: &str = "-";

fn format_ms(value: Option<u64>) -> String {
    match value {
        Some(value) => format!("{value} ms"),
        None => NO_DATA.to_string(),
    }
}

fn format_timestamp(timestamp: u64) -> String {
    match DateTime::<Utc>::from_timestamp(timestamp as i64, 0) {
        Some(date_time) => date_time.to_rfc3339(),
        None => timestamp.to_string(),
    }
}

fn pair(results: &BenchmarkResults, kind: ResourceKind, transport: Transport) -> ResourceBenchmark {
    let benchmark = match (kind, transport) {
        (ResourceKind::Account, Transport::Grpc) => &results.account_grpc,
        (ResourceKind::Account, Transport::JsonRpc) => &results.account_jsonrpc,
        (ResourceKind::Transaction, Transport::Grpc) => &results.transaction_grpc,
        (ResourceKind::Transaction, Transport::JsonRpc) => &results.transaction_jsonrpc,
        (ResourceKind::Block, Transport::Grpc) => &results.block_grpc,
        (ResourceKind::Block, Transport::JsonRpc) => &results.block_jsonrpc,
    };
    benchmark.clone().unwrap_or_default()
}

/// Avg/Min/Max/Successful/Failed rows, one column per transport.
pub fn benchmark_table(results: &BenchmarkResults, kind: ResourceKind) -> Table {
    let grpc = pair(results, kind, Transport::Grpc);
    let jsonrpc = pair(results, kind, Transport::JsonRpc);

    let mut table = Table::new();
    table.set_header(vec![
        "Metric".to_string(),
        Transport::Grpc.to_string(),
        Transport::JsonRpc.to_string(),
    ]);
    table.add_row(vec![
        "Avg".to_string(),
        format_ms(grpc.avg_response_time_ms),
        format_ms(jsonrpc.avg_response_time_ms),
    ]);
    table.add_row(vec![
        "Min".to_string(),
        format_ms(grpc.min_response_time_ms),
        format_ms(jsonrpc.min_response_time_ms),
    ]);
    table.add_row(vec![
        "Max".to_string(),
        format_ms(grpc.has_samples().then_some(grpc.max_response_time_ms)),
        format_ms(jsonrpc.has_samples().then_some(jsonrpc.max_response_time_ms)),
    ]);
    table.add_row(vec![
        "Successful".to_string(),
        grpc.successful_requests.to_string(),
        jsonrpc.successful_requests.to_string(),
    ]);
    table.add_row(vec![
        "Failed".to_string(),
        grpc.failed_requests.to_string(),
        jsonrpc.failed_requests.to_string(),
    ]);
    table
}

pub fn summary_lines(summary: &BenchmarkSummary) -> Vec<ColoredString> {
    let mut lines = Vec::new();
    if summary.conclusion.is_empty() {
        lines.push(
            "No speedup: both transports need successful account lookups to be compared."
                .yellow(),
        );
    } else {
        lines.push(summary.conclusion.as_str().green().bold());
        lines.push(format!("Speedup: {:.2}x", summary.grpc_vs_jsonrpc_speedup).normal());
    }
    lines.push(format!("Total duration: {} ms", summary.total_duration_ms).normal());
    lines
}

pub fn print_benchmark(results: &BenchmarkResults, kinds: &[ResourceKind]) {
    for kind in kinds {
        println!("{}", format!("{kind} lookups").to_uppercase().bold());
        println!("{}", benchmark_table(results, *kind));
    }
    if let Some(summary) = &results.summary {
        for line in summary_lines(summary) {
            println!("{line}");
        }
    }
}

pub fn print_account(response: &AccountInfoResponse) {
    let mut table = Table::new();
    table.set_header(vec!["Account property", "Value"]);
    table.add_row(vec!["Pubkey", response.pubkey.as_str()]);
    table.add_row(vec!["Owner", response.owner.as_str()]);
    table.add_row(vec!["Lamports", response.lamports.to_string().as_str()]);
    table.add_row(vec!["Data length", response.data.len().to_string().as_str()]);
    table.add_row(vec!["Executable", response.executable.to_string().as_str()]);
    table.add_row(vec!["Rent epoch", response.rent_epoch.to_string().as_str()]);
    table.add_row(vec!["Slot", response.slot.to_string().as_str()]);
    table.add_row(vec![
        "Response time",
        format_ms(Some(response.response_time_ms)).as_str(),
    ]);
    println!("{table}");
}

pub fn print_transaction(response: &TransactionResponse) {
    let mut table = Table::new();
    table.set_header(vec!["Transaction property", "Value"]);
    table.add_row(vec!["Signature", response.signature.as_str()]);
    table.add_row(vec!["Slot", response.slot.to_string().as_str()]);
    table.add_row(vec!["Success", response.success.to_string().as_str()]);
    table.add_row(vec![
        "Transaction size",
        format!("{} bytes", response.transaction.len()).as_str(),
    ]);
    table.add_row(vec![
        "Response time",
        format_ms(Some(response.response_time_ms)).as_str(),
    ]);
    println!("{table}");
}

pub fn print_block(response: &BlockResponse) {
    let mut table = Table::new();
    table.set_header(vec!["Block property", "Value"]);
    table.add_row(vec!["Slot", response.slot.to_string().as_str()]);
    table.add_row(vec!["Blockhash", response.blockhash.as_str()]);
    table.add_row(vec!["Previous blockhash", response.previous_blockhash.as_str()]);
    table.add_row(vec!["Parent slot", response.parent_slot.to_string().as_str()]);
    table.add_row(vec![
        "Transactions",
        response.transactions.len().to_string().as_str(),
    ]);
    table.add_row(vec![
        "Response time",
        format_ms(Some(response.response_time_ms)).as_str(),
    ]);
    println!("{table}");
}

pub fn account_update_line(update: &AccountUpdate) -> String {
    format!(
        "[{}] account {} slot: {}, lamports: {}, owner: {}, data: {} bytes",
        format_timestamp(update.timestamp),
        update.pubkey,
        update.slot,
        update.lamports,
        update.owner,
        update.data.len()
    )
}

pub fn transaction_update_line(update: &TransactionUpdate) -> String {
    format!(
        "[{}] transaction {} slot: {}, success: {}",
        format_timestamp(update.timestamp),
        update.signature,
        update.slot,
        update.success
    )
}

pub fn block_update_line(update: &BlockUpdate) -> String {
    format!(
        "[{}] block {} hash: {}, parent: {}",
        format_timestamp(update.timestamp),
        update.slot,
        update.blockhash,
        update.parent_slot
    )
}
