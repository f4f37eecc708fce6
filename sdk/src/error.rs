use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChainBenchError {
    #[error("Invalid pubkey: {0}")]
    InvalidPubkey(String),
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),
    #[error("Invalid commitment: {0}")]
    InvalidCommitment(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Request error")]
    RequestError(#[from] reqwest::Error),
    #[error("JSON-RPC error {code}: {message}")]
    JsonRpc { code: i64, message: String },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Account not found: {0}")]
    AccountNotFound(String),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),
    #[error("Block not found for slot: {0}")]
    BlockNotFound(u64),
    #[error("Request cancelled")]
    Cancelled,
    #[error("Cannot parse URL: {0}")]
    CannotParseUrl(String),
    #[error("Cannot create client")]
    CannotCreateClient,
}

impl ChainBenchError {
    /// Malformed identifiers supplied by the caller, as opposed to failures
    /// of an otherwise well-formed call.
    pub fn is_invalid_target(&self) -> bool {
        matches!(
            self,
            ChainBenchError::InvalidPubkey(_)
                | ChainBenchError::InvalidSignature(_)
                | ChainBenchError::InvalidCommitment(_)
        )
    }

    /// Client or connection setup errors, fatal before any request is made.
    pub fn is_construction_failure(&self) -> bool {
        matches!(
            self,
            ChainBenchError::CannotParseUrl(_) | ChainBenchError::CannotCreateClient
        )
    }
}

impl From<ChainBenchError> for tonic::Status {
    fn from(error: ChainBenchError) -> Self {
        let message = error.to_string();
        if error.is_invalid_target() {
            return tonic::Status::invalid_argument(message);
        }
        match error {
            ChainBenchError::InvalidRequest(_) => tonic::Status::invalid_argument(message),
            ChainBenchError::Cancelled => tonic::Status::cancelled(message),
            ChainBenchError::AccountNotFound(_)
            | ChainBenchError::TransactionNotFound(_)
            | ChainBenchError::BlockNotFound(_) => tonic::Status::not_found(message),
            _ => tonic::Status::internal(message),
        }
    }
}
