//! Placeholder streaming endpoints. Account updates are obtained by polling
//! the upstream on a fixed interval, transactions and blocks are synthesized.
//! None of them subscribes to anything.

use crate::benchmark::client::ResourceClient;
use chainbench::commitment::Commitment;
use chainbench::identifier::Pubkey;
use chainbench::proto::{AccountUpdate, BlockUpdate, TransactionUpdate};
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::Stream;
use tonic::Status;
use tracing::{debug, warn};

const CHANNEL_CAPACITY: usize = 32;
const SIMULATED_BASE_SLOT: u64 = 100_000;
const SIMULATED_TRANSACTION_DATA: &[u8] = b"simulated_transaction_data";

pub type UpdateStream<T> = Pin<Box<dyn Stream<Item = Result<T, Status>> + Send>>;

/// Number of rounds and the pause between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamSchedule {
    pub updates: u32,
    pub interval: Duration,
}

impl StreamSchedule {
    pub fn new(updates: u32, interval: Duration) -> Self {
        Self { updates, interval }
    }

    fn ticker(&self) -> tokio::time::Interval {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    }
}

fn unix_timestamp() -> u64 {
    chrono::Utc::now().timestamp() as u64
}

pub fn simulated_transaction(index: u32, timestamp: u64) -> TransactionUpdate {
    TransactionUpdate {
        signature: format!("simulated_signature_{index}"),
        slot: SIMULATED_BASE_SLOT + index as u64,
        transaction: SIMULATED_TRANSACTION_DATA.to_vec(),
        success: true,
        timestamp,
    }
}

pub fn simulated_block(index: u32, timestamp: u64) -> BlockUpdate {
    let index = index as i64;
    BlockUpdate {
        slot: SIMULATED_BASE_SLOT + index as u64,
        blockhash: format!("simulated_blockhash_{index}"),
        previous_blockhash: format!("simulated_previous_blockhash_{}", index - 1),
        parent_slot: SIMULATED_BASE_SLOT - 1 + index as u64,
        timestamp,
    }
}

fn synthesized<T, F>(schedule: StreamSchedule, name: &'static str, update: F) -> UpdateStream<T>
where
    T: Send + 'static,
    F: Fn(u32, u64) -> T + Send + 'static,
{
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    tokio::spawn(async move {
        let mut ticker = schedule.ticker();
        for index in 0..schedule.updates {
            ticker.tick().await;
            if tx.send(Ok(update(index, unix_timestamp()))).await.is_err() {
                debug!("Client disconnected from {name} stream after {index} update(s).");
                return;
            }
        }
        debug!("Finished {name} stream.");
    });
    Box::pin(ReceiverStream::new(rx))
}

pub fn transaction_updates(schedule: StreamSchedule) -> UpdateStream<TransactionUpdate> {
    synthesized(schedule, "transaction", simulated_transaction)
}

pub fn block_updates(schedule: StreamSchedule) -> UpdateStream<BlockUpdate> {
    synthesized(schedule, "block", simulated_block)
}

/// Polls every account once per round. Lookup failures are logged and
/// skipped, they never end the stream.
pub fn account_updates(
    upstream: Arc<dyn ResourceClient>,
    pubkeys: Vec<Pubkey>,
    commitment: Commitment,
    schedule: StreamSchedule,
) -> UpdateStream<AccountUpdate> {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    tokio::spawn(async move {
        let mut ticker = schedule.ticker();
        for round in 0..schedule.updates {
            ticker.tick().await;
            for pubkey in &pubkeys {
                let account = match upstream.get_account_info(pubkey, commitment).await {
                    Ok(account) => account.payload,
                    Err(error) => {
                        warn!("Polling account {pubkey} in round {round} failed: {error}");
                        continue;
                    }
                };

                let update = AccountUpdate {
                    pubkey: pubkey.to_string(),
                    data: account.data,
                    owner: account.owner,
                    lamports: account.lamports,
                    slot: account.slot,
                    timestamp: unix_timestamp(),
                };
                if tx.send(Ok(update)).await.is_err() {
                    debug!("Client disconnected from account stream in round {round}.");
                    return;
                }
            }
        }
        debug!("Finished account stream.");
    });
    Box::pin(ReceiverStream::new(rx))
}
