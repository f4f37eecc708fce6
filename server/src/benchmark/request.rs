use crate::benchmark::target::TargetId;
use chainbench::error::ChainBenchError;
use chainbench::identifier::Slot;
use chainbench::proto;
use chainbench::resource::{ResourceKind, Transport};
use std::num::NonZeroU32;

/// Validated benchmark request, immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkRequest {
    iterations: NonZeroU32,
    accounts: Vec<String>,
    signatures: Vec<String>,
    slots: Vec<Slot>,
    run_grpc: bool,
    run_jsonrpc: bool,
}

impl BenchmarkRequest {
    pub fn new(iterations: NonZeroU32) -> Self {
        Self {
            iterations,
            accounts: vec![],
            signatures: vec![],
            slots: vec![],
            run_grpc: true,
            run_jsonrpc: true,
        }
    }

    pub fn with_accounts(mut self, accounts: Vec<String>) -> Self {
        self.accounts = accounts;
        self
    }

    pub fn with_signatures(mut self, signatures: Vec<String>) -> Self {
        self.signatures = signatures;
        self
    }

    pub fn with_slots(mut self, slots: Vec<Slot>) -> Self {
        self.slots = slots;
        self
    }

    pub fn with_transports(mut self, run_grpc: bool, run_jsonrpc: bool) -> Self {
        self.run_grpc = run_grpc;
        self.run_jsonrpc = run_jsonrpc;
        self
    }

    pub fn iterations(&self) -> u32 {
        self.iterations.get()
    }

    pub fn runs(&self, transport: Transport) -> bool {
        match transport {
            Transport::Grpc => self.run_grpc,
            Transport::JsonRpc => self.run_jsonrpc,
        }
    }

    pub fn targets(&self, kind: ResourceKind) -> Vec<TargetId> {
        match kind {
            ResourceKind::Account => self
                .accounts
                .iter()
                .cloned()
                .map(TargetId::Account)
                .collect(),
            ResourceKind::Transaction => self
                .signatures
                .iter()
                .cloned()
                .map(TargetId::Transaction)
                .collect(),
            ResourceKind::Block => self.slots.iter().copied().map(TargetId::Block).collect(),
        }
    }

    /// Number of targets of the given kind.
    pub fn target_count(&self, kind: ResourceKind) -> usize {
        match kind {
            ResourceKind::Account => self.accounts.len(),
            ResourceKind::Transaction => self.signatures.len(),
            ResourceKind::Block => self.slots.len(),
        }
    }

    /// Attempts one sampler of the given kind performs, `None` when the count
    /// does not fit the reported counters.
    pub fn attempts(&self, kind: ResourceKind) -> Option<u32> {
        u32::try_from(self.target_count(kind))
            .ok()?
            .checked_mul(self.iterations())
    }

    /// A pair runs when it has targets and its transport is enabled.
    pub fn is_applicable(&self, kind: ResourceKind, transport: Transport) -> bool {
        self.target_count(kind) > 0 && self.runs(transport)
    }
}

impl TryFrom<proto::BenchmarkRequest> for BenchmarkRequest {
    type Error = ChainBenchError;

    fn try_from(request: proto::BenchmarkRequest) -> Result<Self, Self::Error> {
        let iterations = NonZeroU32::new(request.iterations).ok_or_else(|| {
            ChainBenchError::InvalidRequest("iterations must be greater than zero".to_string())
        })?;
        let request = BenchmarkRequest::new(iterations)
            .with_accounts(request.test_accounts)
            .with_signatures(request.test_signatures)
            .with_slots(request.test_slots)
            .with_transports(request.run_grpc_tests, request.run_jsonrpc_tests);
        for kind in ResourceKind::ALL {
            if request.attempts(kind).is_none() {
                return Err(ChainBenchError::InvalidRequest(format!(
                    "too many {kind} attempts: {} iteration(s) x {} target(s)",
                    request.iterations(),
                    request.target_count(kind)
                )));
            }
        }
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_iterations_should_be_rejected() {
        let error = BenchmarkRequest::try_from(proto::BenchmarkRequest {
            iterations: 0,
            test_accounts: vec!["11111111111111111111111111111111".to_string()],
            run_grpc_tests: true,
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(error, ChainBenchError::InvalidRequest(_)));
    }

    #[test]
    fn attempt_count_overflow_should_be_rejected() {
        let error = BenchmarkRequest::try_from(proto::BenchmarkRequest {
            iterations: u32::MAX,
            test_slots: vec![1, 2],
            run_grpc_tests: true,
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(error, ChainBenchError::InvalidRequest(_)));

        let request = BenchmarkRequest::try_from(proto::BenchmarkRequest {
            iterations: u32::MAX,
            test_slots: vec![1],
            run_grpc_tests: true,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(request.attempts(ResourceKind::Block), Some(u32::MAX));
        assert_eq!(request.attempts(ResourceKind::Account), Some(0));
    }

    #[test]
    fn applicable_pairs_should_require_targets_and_transport() {
        let request = BenchmarkRequest::try_from(proto::BenchmarkRequest {
            iterations: 3,
            test_slots: vec![250_000_000],
            run_grpc_tests: true,
            run_jsonrpc_tests: false,
            ..Default::default()
        })
        .unwrap();

        assert_eq!(request.iterations(), 3);
        assert!(request.is_applicable(ResourceKind::Block, Transport::Grpc));
        assert!(!request.is_applicable(ResourceKind::Block, Transport::JsonRpc));
        assert!(!request.is_applicable(ResourceKind::Account, Transport::Grpc));
        assert_eq!(
            request.targets(ResourceKind::Block),
            vec![TargetId::Block(250_000_000)]
        );
    }
}
