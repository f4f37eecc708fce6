use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Lookup category being benchmarked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    #[display("account")]
    Account,
    #[display("transaction")]
    Transaction,
    #[display("block")]
    Block,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Account,
        ResourceKind::Transaction,
        ResourceKind::Block,
    ];
}

/// The two transport mechanisms being compared: the gRPC façade is the fast
/// path, direct JSON-RPC is the reference path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transport {
    #[display("gRPC")]
    Grpc,
    #[display("JSON-RPC")]
    JsonRpc,
}

impl Transport {
    pub const ALL: [Transport; 2] = [Transport::Grpc, Transport::JsonRpc];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transports_should_display_protocol_names() {
        assert_eq!(Transport::Grpc.to_string(), "gRPC");
        assert_eq!(Transport::JsonRpc.to_string(), "JSON-RPC");
        assert_eq!(ResourceKind::Transaction.to_string(), "transaction");
    }
}
