//! Gateway request handling.

pub mod dispatcher;
pub mod errors;
pub mod request;
pub mod response;

pub use dispatcher::{Dispatcher, Handled};
pub use errors::HandlerError;
pub use request::{GatewayRequest, Operation};
pub use response::{GatewayResponse, ResponseBuilder, StatusPolicy};
