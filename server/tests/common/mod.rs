use async_trait::async_trait;
use chainbench::commitment::Commitment;
use chainbench::error::ChainBenchError;
use chainbench::identifier::{Pubkey, Signature, Slot};
use chainbench::proto::{AccountInfoResponse, BlockResponse, TransactionResponse};
use chainbench::resource::Transport;
use server::benchmark::client::{Measured, ResourceClient};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub const SYSTEM_PROGRAM: &str = "11111111111111111111111111111111";
pub const TOKEN_PROGRAM: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";

/// One scripted answer: a latency or a failure.
#[derive(Debug, Clone, Copy)]
pub enum Step {
    Latency(u64),
    /// Really sleeps for the given milliseconds and reports them.
    Sleep(u64),
    Fail,
    /// Never answers, used to exercise cancellation.
    Hang,
}

/// Deterministic resource client replaying a script of latencies. Once the
/// script is exhausted the last step repeats.
pub struct ScriptedClient {
    transport: Transport,
    script: Mutex<VecDeque<Step>>,
    last: Mutex<Step>,
    calls: AtomicUsize,
}

impl ScriptedClient {
    pub fn new(transport: Transport, steps: &[Step]) -> Self {
        Self {
            transport,
            script: Mutex::new(steps.iter().copied().collect()),
            last: Mutex::new(steps.last().copied().unwrap_or(Step::Fail)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn latencies(transport: Transport, latencies: &[u64]) -> Self {
        let steps: Vec<Step> = latencies.iter().map(|ms| Step::Latency(*ms)).collect();
        Self::new(transport, &steps)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn next(&self) -> Result<u64, ChainBenchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let step = {
            let mut script = self.script.lock().unwrap();
            match script.pop_front() {
                Some(step) => {
                    *self.last.lock().unwrap() = step;
                    step
                }
                None => *self.last.lock().unwrap(),
            }
        };

        match step {
            Step::Latency(ms) => Ok(ms),
            Step::Sleep(ms) => {
                tokio::time::sleep(Duration::from_millis(ms)).await;
                Ok(ms)
            }
            Step::Fail => Err(ChainBenchError::InvalidResponse("scripted failure".to_string())),
            Step::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(ChainBenchError::InvalidResponse("scripted hang".to_string()))
            }
        }
    }
}

#[async_trait]
impl ResourceClient for ScriptedClient {
    fn transport(&self) -> Transport {
        self.transport
    }

    async fn get_account_info(
        &self,
        pubkey: &Pubkey,
        _commitment: Commitment,
    ) -> Result<Measured<AccountInfoResponse>, ChainBenchError> {
        let elapsed_ms = self.next().await?;
        Ok(Measured::new(
            AccountInfoResponse {
                pubkey: pubkey.to_string(),
                data: vec![1, 2, 3],
                owner: SYSTEM_PROGRAM.to_string(),
                lamports: 1_000_000_000,
                executable: false,
                rent_epoch: u64::MAX,
                response_time_ms: elapsed_ms,
                slot: 341_197_053,
            },
            elapsed_ms,
        ))
    }

    async fn get_transaction(
        &self,
        signature: &Signature,
        _commitment: Commitment,
    ) -> Result<Measured<TransactionResponse>, ChainBenchError> {
        let elapsed_ms = self.next().await?;
        Ok(Measured::new(
            TransactionResponse {
                signature: signature.to_string(),
                slot: 341_197_000,
                transaction: b"{}".to_vec(),
                success: true,
                response_time_ms: elapsed_ms,
            },
            elapsed_ms,
        ))
    }

    async fn get_block(
        &self,
        slot: Slot,
        _commitment: Commitment,
    ) -> Result<Measured<BlockResponse>, ChainBenchError> {
        let elapsed_ms = self.next().await?;
        Ok(Measured::new(
            BlockResponse {
                slot,
                blockhash: "blockhash".to_string(),
                previous_blockhash: "previous_blockhash".to_string(),
                parent_slot: slot.saturating_sub(1),
                transactions: vec![],
                response_time_ms: elapsed_ms,
            },
            elapsed_ms,
        ))
    }
}

pub fn valid_signature() -> String {
    Signature::new([7; 64]).to_string()
}
