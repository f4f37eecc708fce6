use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GrpcConfig {
    pub address: String,
    pub reflection: bool,
}
