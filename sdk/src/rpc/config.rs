use crate::utils::duration::HumanDuration;

#[derive(Debug, Clone)]
pub struct JsonRpcClientConfig {
    pub endpoint: String,
    /// Per request timeout, disabled (zero) means wait for the provider.
    pub timeout: HumanDuration,
}

impl Default for JsonRpcClientConfig {
    fn default() -> JsonRpcClientConfig {
        JsonRpcClientConfig {
            endpoint: "https://api.mainnet-beta.solana.com".to_string(),
            timeout: HumanDuration::default(),
        }
    }
}
