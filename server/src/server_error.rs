use chainbench::error::ChainBenchError;
use std::net::AddrParseError;
use thiserror::Error;
use tokio::io;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("IO error")]
    IoError(#[from] io::Error),
    #[error("Invalid configuration provider: {0}")]
    InvalidConfigurationProvider(String),
    #[error("Cannot load configuration: {0}")]
    CannotLoadConfiguration(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Cannot parse address")]
    CannotParseAddress(#[from] AddrParseError),
    #[error("SDK error")]
    SdkError(#[from] ChainBenchError),
    #[error("gRPC transport error")]
    TransportError(#[from] tonic::transport::Error),
    #[error("gRPC reflection error")]
    ReflectionError(#[from] tonic_reflection::server::Error),
    #[error("Logging filter reload failure")]
    FilterReloadFailure,
    #[error("Logging stdout reload failure")]
    StdoutReloadFailure,
    #[error("Logging file reload failure")]
    FileReloadFailure,
}
