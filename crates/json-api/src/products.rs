//! Products Gateway Handler

use salvo::{
    http::header::{HeaderName, HeaderValue},
    prelude::*,
};

use tracing::{Instrument as _, info_span};

use storefront_app::{
    gateway::{GatewayRequest, GatewayResponse, HandlerError},
    products::codec::ProductCodecError,
};

use crate::extensions::*;

const ID_PARAMETER: &str = "id";

/// Products handler
///
/// Forwards any verb on `/products` and `/products/{id}` to the dispatcher
/// and writes the rendered envelope back verbatim.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state_or_500()?;

    let span = info_span!(
        "products.request",
        request_id = depot.request_id().unwrap_or_default()
    );

    let handled = async {
        match into_gateway_request(req).await {
            Ok(request) => state.dispatcher.dispatch(request).await,
            Err(rejection) => state.dispatcher.reject(rejection),
        }
    }
    .instrument(span)
    .await;

    write_response(res, handled.response)
}

async fn into_gateway_request(req: &mut Request) -> Result<GatewayRequest, HandlerError> {
    let method = req.method().clone();
    let id = req.param::<String>(ID_PARAMETER);

    let payload = req
        .payload()
        .await
        .map_err(|source| ProductCodecError::Decode(source.to_string()))?;

    let body = if payload.is_empty() {
        None
    } else {
        Some(
            String::from_utf8(payload.to_vec())
                .map_err(|source| ProductCodecError::Decode(source.to_string()))?,
        )
    };

    Ok(GatewayRequest { method, id, body })
}

fn write_response(res: &mut Response, response: GatewayResponse) -> Result<(), StatusError> {
    res.status_code(response.status());

    for (name, value) in &response.headers {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).or_500("invalid response header name")?;
        let header_value = HeaderValue::from_str(value).or_500("invalid response header value")?;

        res.headers_mut().insert(header_name, header_value);
    }

    res.write_body(response.body)
        .or_500("failed to write response body")
}
