use crate::configs::config_provider::ConfigProvider;
use crate::configs::grpc::GrpcConfig;
use crate::configs::rpc::RpcConfig;
use crate::configs::system::LoggingConfig;
use crate::server_error::ServerError;
use chainbench::commitment::Commitment;
use chainbench::utils::duration::HumanDuration;
use chainbench::validatable::Validatable;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use serde_with::DisplayFromStr;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub rpc: RpcConfig,
    pub grpc: GrpcConfig,
    pub benchmark: BenchmarkConfig,
    pub streaming: StreamingConfig,
    pub logging: LoggingConfig,
}

#[serde_as]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BenchmarkConfig {
    pub commitment: Commitment,
    #[serde_as(as = "DisplayFromStr")]
    pub deadline_margin: HumanDuration,
}

#[serde_as]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StreamingConfig {
    pub updates: u32,
    #[serde_as(as = "DisplayFromStr")]
    pub interval: HumanDuration,
}

impl ServerConfig {
    pub async fn load(config_provider: &dyn ConfigProvider) -> Result<ServerConfig, ServerError> {
        let server_config = config_provider.load_config().await?;
        server_config.validate()?;
        Ok(server_config)
    }
}
