pub mod aggregator;
pub mod client;
pub mod request;
pub mod sampler;
pub mod statistics;
pub mod summary;
pub mod target;
