//! Response envelope construction.

use std::collections::BTreeMap;

use clap::ValueEnum;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::{gateway::errors::HandlerError, products::ProductsServiceError};

pub const CONTENT_TYPE: &str = "Content-Type";
pub const APPLICATION_JSON: &str = "application/json";

/// Outbound envelope returned to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub status_code: u16,
    pub body: String,
    pub headers: BTreeMap<String, String>,
}

impl GatewayResponse {
    fn new(status: StatusCode, body: String) -> Self {
        Self {
            status_code: status.as_u16(),
            body,
            headers: BTreeMap::from([(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string())]),
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Status codes used for failures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum StatusPolicy {
    /// Client faults are 400, everything else is 500.
    #[default]
    Legacy,

    /// Like `Legacy`, but missing records are 404 and unknown verbs are 405.
    Strict,
}

impl StatusPolicy {
    #[must_use]
    pub fn status_for(self, error: &HandlerError) -> StatusCode {
        if error.is_client_error() {
            return StatusCode::BAD_REQUEST;
        }

        match (self, error) {
            (
                Self::Strict,
                HandlerError::Service(
                    ProductsServiceError::NotFound(_) | ProductsServiceError::PreconditionFailed(_),
                ),
            ) => StatusCode::NOT_FOUND,
            (Self::Strict, HandlerError::UnsupportedOperation(_)) => StatusCode::METHOD_NOT_ALLOWED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Builds envelopes and logs one line per response.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseBuilder {
    policy: StatusPolicy,
}

impl ResponseBuilder {
    #[must_use]
    pub fn new(policy: StatusPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn ok(&self, status: StatusCode, body: String) -> GatewayResponse {
        info!(status = status.as_u16(), "{body}");

        GatewayResponse::new(status, body)
    }

    #[must_use]
    pub fn error(&self, error: &HandlerError) -> GatewayResponse {
        let status = self.policy.status_for(error);

        error!(status = status.as_u16(), "{error}");

        GatewayResponse::new(status, error.to_string())
    }
}
