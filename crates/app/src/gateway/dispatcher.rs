//! Operation dispatch.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use http::StatusCode;
use tracing::field;

use crate::{
    gateway::{
        errors::HandlerError,
        request::{GatewayRequest, Operation},
        response::{GatewayResponse, ResponseBuilder},
    },
    products::{ProductsService, codec::ValidationPolicy, models::ProductId},
};

/// A rendered response, and the error it was rendered from, if any.
#[derive(Debug)]
pub struct Handled {
    pub response: GatewayResponse,
    pub error: Option<HandlerError>,
}

/// Routes gateway requests to the products service and renders the outcome.
#[derive(Clone)]
pub struct Dispatcher {
    products: Arc<dyn ProductsService>,
    validation: ValidationPolicy,
    responses: ResponseBuilder,
}

impl Dispatcher {
    #[must_use]
    pub fn new(
        products: Arc<dyn ProductsService>,
        validation: ValidationPolicy,
        responses: ResponseBuilder,
    ) -> Self {
        Self {
            products,
            validation,
            responses,
        }
    }

    /// Handle one request end to end. Every handled failure is rendered into
    /// the returned envelope.
    #[tracing::instrument(
        name = "products.dispatch",
        skip_all,
        fields(method = %request.method, id = field::Empty)
    )]
    pub async fn dispatch(&self, request: GatewayRequest) -> Handled {
        if let Some(id) = &request.id {
            tracing::Span::current().record("id", field::display(id));
        }

        match self.run(request).await {
            Ok((status, body)) => Handled {
                response: self.responses.ok(status, body),
                error: None,
            },
            Err(error) => Handled {
                response: self.responses.error(&error),
                error: Some(error),
            },
        }
    }

    /// Render a failure that happened before dispatch, such as an unreadable
    /// body encoding at the gateway.
    #[must_use]
    pub fn reject(&self, error: HandlerError) -> Handled {
        Handled {
            response: self.responses.error(&error),
            error: Some(error),
        }
    }

    async fn run(&self, request: GatewayRequest) -> Result<(StatusCode, String), HandlerError> {
        match Operation::try_from(&request.method)? {
            Operation::Create => {
                let product = self.validation.decode(request.body.as_deref().unwrap_or_default())?;

                let item = self.products.create_product(product).await?;

                Ok((
                    StatusCode::CREATED,
                    format!("successfully created product with id: {}", item.id),
                ))
            }
            Operation::Read => {
                let id = required_id(request.id)?;

                let item = self.products.get_product(&id).await?;

                let body = serde_json::to_string(&item).map_err(HandlerError::Encode)?;

                Ok((StatusCode::OK, body))
            }
            Operation::Update => {
                let id = required_id(request.id)?;
                let product = self.validation.decode(request.body.as_deref().unwrap_or_default())?;

                self.products.update_product(&id, product).await?;

                Ok((
                    StatusCode::OK,
                    format!("product with id: {id}, was successfully updated"),
                ))
            }
            Operation::Delete => {
                let id = required_id(request.id)?;

                self.products.delete_product(&id).await?;

                Ok((
                    StatusCode::OK,
                    format!("product with id: {id}, was successfully deleted"),
                ))
            }
        }
    }
}

impl Debug for Dispatcher {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Dispatcher")
            .field("validation", &self.validation)
            .field("responses", &self.responses)
            .finish_non_exhaustive()
    }
}

fn required_id(id: Option<String>) -> Result<ProductId, HandlerError> {
    id.filter(|id| !id.is_empty())
        .map(ProductId::from)
        .ok_or(HandlerError::MissingIdentifier)
}
