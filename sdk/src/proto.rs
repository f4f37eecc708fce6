//! Generated gRPC contract of the benchmark service.

tonic::include_proto!("chainbench.v1");

/// Encoded file descriptor set, used to register server reflection.
pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("chainbench_descriptor");

impl ResourceBenchmark {
    pub fn has_samples(&self) -> bool {
        self.successful_requests > 0
    }

    pub fn total_requests(&self) -> u32 {
        self.successful_requests + self.failed_requests
    }
}
