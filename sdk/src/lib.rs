pub mod commitment;
pub mod error;
pub mod identifier;
pub mod proto;
pub mod resource;
pub mod rpc;
pub mod utils;
pub mod validatable;
