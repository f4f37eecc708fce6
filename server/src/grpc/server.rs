use crate::configs::grpc::GrpcConfig;
use crate::grpc::service::ChainBenchService;
use crate::server_error::ServerError;
use chainbench::proto::benchmark_service_server::BenchmarkServiceServer;
use chainbench::proto::FILE_DESCRIPTOR_SET;
use std::net::SocketAddr;
use tonic::transport::Server;
use tracing::info;

pub async fn start(config: &GrpcConfig, service: ChainBenchService) -> Result<(), ServerError> {
    let address: SocketAddr = config.address.parse()?;
    let reflection = if config.reflection {
        Some(
            tonic_reflection::server::Builder::configure()
                .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
                .build_v1()?,
        )
    } else {
        None
    };

    info!(
        "gRPC server is listening on: {address}, reflection: {}.",
        config.reflection
    );
    Server::builder()
        .add_service(BenchmarkServiceServer::new(service))
        .add_optional_service(reflection)
        .serve_with_shutdown(address, shutdown_signal())
        .await?;
    info!("gRPC server has been stopped.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("Failed to listen for SIGTERM: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl-C, shutting down gRPC server..."),
        _ = terminate => info!("Received SIGTERM, shutting down gRPC server..."),
    }
}
