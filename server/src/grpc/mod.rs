pub mod deadline;
pub mod gateway;
pub mod server;
pub mod service;
pub mod streams;
