use chainbench::rpc::config::JsonRpcClientConfig;
use chainbench::utils::duration::HumanDuration;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use serde_with::DisplayFromStr;

#[serde_as]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RpcConfig {
    pub endpoint: String,
    #[serde_as(as = "DisplayFromStr")]
    pub timeout: HumanDuration,
}

impl RpcConfig {
    pub fn client_config(&self) -> JsonRpcClientConfig {
        JsonRpcClientConfig {
            endpoint: self.endpoint.clone(),
            timeout: self.timeout,
        }
    }
}
