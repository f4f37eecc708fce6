use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("Invalid server address: {0}")]
    InvalidServerAddress(String),
    #[error("Cannot connect to server")]
    CannotConnect(#[from] tonic::transport::Error),
    #[error("Request failed: {}", .0.message())]
    RequestFailed(#[from] tonic::Status),
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}
