pub mod args;
pub mod benchmark;
pub mod configs;
pub mod grpc;
pub mod log;
pub mod server_error;
