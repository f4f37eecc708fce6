use crate::configs::grpc::GrpcConfig;
use crate::configs::rpc::RpcConfig;
use crate::configs::server::{BenchmarkConfig, ServerConfig, StreamingConfig};
use crate::configs::system::LoggingConfig;
use std::fmt::{Display, Formatter};

impl Display for ServerConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ rpc: {}, grpc: {}, benchmark: {}, streaming: {}, logging: {} }}",
            self.rpc, self.grpc, self.benchmark, self.streaming, self.logging
        )
    }
}

impl Display for RpcConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ endpoint: {}, timeout: {} }}",
            self.endpoint, self.timeout
        )
    }
}

impl Display for GrpcConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ address: {}, reflection: {} }}",
            self.address, self.reflection
        )
    }
}

impl Display for BenchmarkConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ commitment: {}, deadline_margin: {} }}",
            self.commitment, self.deadline_margin
        )
    }
}

impl Display for StreamingConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ updates: {}, interval: {} }}",
            self.updates, self.interval
        )
    }
}

impl Display for LoggingConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ level: {}, file_enabled: {}, path: {} }}",
            self.level, self.file_enabled, self.path
        )
    }
}
