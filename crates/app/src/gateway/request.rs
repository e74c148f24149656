//! Inbound gateway requests.

use http::Method;

use crate::gateway::errors::HandlerError;

/// A request as handed over by the gateway, already stripped to the parts the
/// products handler reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayRequest {
    pub method: Method,
    /// The `id` path parameter, if the route carried one.
    pub id: Option<String>,
    pub body: Option<String>,
}

impl GatewayRequest {
    #[must_use]
    pub fn new(method: Method) -> Self {
        Self {
            method,
            id: None,
            body: None,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Products operation selected by the request verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
}

impl TryFrom<&Method> for Operation {
    type Error = HandlerError;

    fn try_from(method: &Method) -> Result<Self, Self::Error> {
        match *method {
            Method::POST => Ok(Self::Create),
            Method::GET => Ok(Self::Read),
            Method::PUT => Ok(Self::Update),
            Method::DELETE => Ok(Self::Delete),
            _ => Err(HandlerError::UnsupportedOperation(method.to_string())),
        }
    }
}
