//! Products

pub mod codec;
pub mod dynamo;
pub mod errors;
pub mod keys;
mod mapper;
pub mod models;
pub mod service;
pub mod store;

pub use errors::ProductsServiceError;
pub use service::*;
