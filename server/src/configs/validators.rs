use crate::configs::grpc::GrpcConfig;
use crate::configs::rpc::RpcConfig;
use crate::configs::server::{ServerConfig, StreamingConfig};
use crate::server_error::ServerError;
use chainbench::rpc::client::JsonRpcClient;
use chainbench::validatable::Validatable;
use std::net::SocketAddr;
use tracing::error;

impl Validatable<ServerError> for ServerConfig {
    fn validate(&self) -> Result<(), ServerError> {
        self.rpc.validate()?;
        self.grpc.validate()?;
        self.streaming.validate()?;

        Ok(())
    }
}

impl Validatable<ServerError> for RpcConfig {
    fn validate(&self) -> Result<(), ServerError> {
        if let Err(err) = JsonRpcClient::new(&self.endpoint) {
            error!("RPC configuration -> invalid endpoint: {err}");
            return Err(ServerError::InvalidConfiguration(format!(
                "rpc.endpoint: {}",
                self.endpoint
            )));
        }

        Ok(())
    }
}

impl Validatable<ServerError> for GrpcConfig {
    fn validate(&self) -> Result<(), ServerError> {
        if self.address.parse::<SocketAddr>().is_err() {
            error!("gRPC configuration -> address must be a socket address.");
            return Err(ServerError::InvalidConfiguration(format!(
                "grpc.address: {}",
                self.address
            )));
        }

        Ok(())
    }
}

impl Validatable<ServerError> for StreamingConfig {
    fn validate(&self) -> Result<(), ServerError> {
        if self.updates == 0 {
            error!("Streaming configuration -> updates must be greater than zero.");
            return Err(ServerError::InvalidConfiguration(
                "streaming.updates".to_string(),
            ));
        }

        if self.interval.is_zero() {
            error!("Streaming configuration -> interval cannot be disabled.");
            return Err(ServerError::InvalidConfiguration(
                "streaming.interval".to_string(),
            ));
        }

        Ok(())
    }
}
