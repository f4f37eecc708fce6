use crate::configs::grpc::GrpcConfig;
use crate::configs::rpc::RpcConfig;
use crate::configs::server::{BenchmarkConfig, ServerConfig, StreamingConfig};
use crate::configs::system::LoggingConfig;

static_toml::static_toml! {
    // static_toml crate always starts from CARGO_MANIFEST_DIR (in this case the server crate root)
    static SERVER_CONFIG = include_toml!("../configs/server.toml");
}

impl Default for ServerConfig {
    fn default() -> ServerConfig {
        ServerConfig {
            rpc: RpcConfig::default(),
            grpc: GrpcConfig::default(),
            benchmark: BenchmarkConfig::default(),
            streaming: StreamingConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for RpcConfig {
    fn default() -> RpcConfig {
        RpcConfig {
            endpoint: SERVER_CONFIG.rpc.endpoint.to_string(),
            timeout: SERVER_CONFIG.rpc.timeout.parse().unwrap(),
        }
    }
}

impl Default for GrpcConfig {
    fn default() -> GrpcConfig {
        GrpcConfig {
            address: SERVER_CONFIG.grpc.address.to_string(),
            reflection: SERVER_CONFIG.grpc.reflection,
        }
    }
}

impl Default for BenchmarkConfig {
    fn default() -> BenchmarkConfig {
        BenchmarkConfig {
            commitment: SERVER_CONFIG.benchmark.commitment.parse().unwrap(),
            deadline_margin: SERVER_CONFIG.benchmark.deadline_margin.parse().unwrap(),
        }
    }
}

impl Default for StreamingConfig {
    fn default() -> StreamingConfig {
        StreamingConfig {
            updates: SERVER_CONFIG.streaming.updates as u32,
            interval: SERVER_CONFIG.streaming.interval.parse().unwrap(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> LoggingConfig {
        LoggingConfig {
            level: SERVER_CONFIG.logging.level.to_string(),
            file_enabled: SERVER_CONFIG.logging.file_enabled,
            path: SERVER_CONFIG.logging.path.to_string(),
        }
    }
}
