//! API Gateway proxy event conversion.

use aws_lambda_events::{
    apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse},
    encodings::Body,
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use http::{HeaderMap, HeaderName, HeaderValue};
use lambda_runtime::LambdaEvent;
use thiserror::Error;
use tracing::{error, info};

use storefront_app::{
    gateway::{Dispatcher, GatewayRequest, GatewayResponse, HandlerError},
    products::codec::ProductCodecError,
};

const ID_PARAMETER: &str = "id";

#[derive(Debug, Error)]
pub(crate) enum ProxyError {
    #[error("invalid response header {name}: {message}")]
    InvalidHeader { name: String, message: String },
}

/// Handle one proxy event.
///
/// Handled failures come back as ordinary responses; only a response that
/// cannot be represented as a proxy response surfaces as an invocation error.
pub(crate) async fn handle(
    dispatcher: &Dispatcher,
    event: LambdaEvent<ApiGatewayProxyRequest>,
) -> Result<ApiGatewayProxyResponse, ProxyError> {
    let (request, context) = event.into_parts();

    info!(
        method = %request.http_method,
        path = ?request.path,
        request_id = %context.request_id,
        "processing products request"
    );

    let handled = match into_gateway_request(request) {
        Ok(request) => dispatcher.dispatch(request).await,
        Err(rejection) => dispatcher.reject(rejection),
    };

    into_proxy_response(handled.response).inspect_err(|source| {
        error!(request_id = %context.request_id, "failed to build proxy response: {source}");
    })
}

/// Extract the verb, `id` path parameter and body from a proxy event.
///
/// # Errors
///
/// Returns a decode error when a body flagged as base64 does not decode to
/// UTF-8 text.
pub(crate) fn into_gateway_request(
    mut request: ApiGatewayProxyRequest,
) -> Result<GatewayRequest, HandlerError> {
    let body = match request.body.take() {
        Some(body) if request.is_base64_encoded => Some(decode_base64(&body)?),
        body => body,
    };

    Ok(GatewayRequest {
        method: request.http_method,
        id: request.path_parameters.remove(ID_PARAMETER),
        body,
    })
}

fn decode_base64(body: &str) -> Result<String, HandlerError> {
    let bytes = STANDARD
        .decode(body)
        .map_err(|source| ProductCodecError::Decode(source.to_string()))?;

    let text =
        String::from_utf8(bytes).map_err(|source| ProductCodecError::Decode(source.to_string()))?;

    Ok(text)
}

/// Copy a response envelope into a proxy response.
///
/// # Errors
///
/// Returns an error if a header name or value is not valid HTTP.
pub(crate) fn into_proxy_response(
    response: GatewayResponse,
) -> Result<ApiGatewayProxyResponse, ProxyError> {
    let mut headers = HeaderMap::with_capacity(response.headers.len());

    for (name, value) in &response.headers {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|source| ProxyError::InvalidHeader {
                name: name.clone(),
                message: source.to_string(),
            })?;

        let header_value =
            HeaderValue::from_str(value).map_err(|source| ProxyError::InvalidHeader {
                name: name.clone(),
                message: source.to_string(),
            })?;

        headers.insert(header_name, header_value);
    }

    let mut proxy = ApiGatewayProxyResponse::default();

    proxy.status_code = i64::from(response.status_code);
    proxy.headers = headers;
    proxy.body = Some(Body::Text(response.body));
    proxy.is_base64_encoded = false;

    Ok(proxy)
}

#[cfg(test)]
mod tests {
    use std::{collections::BTreeMap, sync::Arc};

    use http::Method;
    use lambda_runtime::Context;
    use testresult::TestResult;

    use storefront_app::{
        gateway::{ResponseBuilder, StatusPolicy},
        products::{
            MockProductsService, ProductsServiceError,
            codec::ValidationPolicy,
            models::{DateMarker, Item, Product},
        },
    };

    use super::*;

    fn proxy_request(method: Method) -> ApiGatewayProxyRequest {
        let mut request = ApiGatewayProxyRequest::default();

        request.http_method = method;

        request
    }

    fn dispatcher(products: MockProductsService) -> Dispatcher {
        Dispatcher::new(
            Arc::new(products),
            ValidationPolicy::Lenient,
            ResponseBuilder::new(StatusPolicy::Legacy),
        )
    }

    fn body_text(response: &ApiGatewayProxyResponse) -> Option<&str> {
        match &response.body {
            Some(Body::Text(text)) => Some(text),
            _ => None,
        }
    }

    #[test]
    fn test_extracts_id_and_plain_body() -> TestResult {
        let mut request = proxy_request(Method::PUT);

        request
            .path_parameters
            .insert("id".to_string(), "abc".to_string());
        request.body = Some(r#"{"name":"Widget"}"#.to_string());

        let request = into_gateway_request(request)?;

        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.id.as_deref(), Some("abc"));
        assert_eq!(request.body.as_deref(), Some(r#"{"name":"Widget"}"#));

        Ok(())
    }

    #[test]
    fn test_decodes_base64_body() -> TestResult {
        let mut request = proxy_request(Method::POST);

        request.body = Some(STANDARD.encode(r#"{"name":"Widget"}"#));
        request.is_base64_encoded = true;

        let request = into_gateway_request(request)?;

        assert_eq!(request.body.as_deref(), Some(r#"{"name":"Widget"}"#));
        assert_eq!(request.id, None);

        Ok(())
    }

    #[test]
    fn test_invalid_base64_is_decode_error() {
        let mut request = proxy_request(Method::POST);

        request.body = Some("not base64!".to_string());
        request.is_base64_encoded = true;

        let result = into_gateway_request(request);

        assert!(matches!(
            result,
            Err(HandlerError::Codec(ProductCodecError::Decode(_)))
        ));
    }

    #[test]
    fn test_copies_envelope_into_proxy_response() -> TestResult {
        let mut headers = BTreeMap::new();

        headers.insert("Content-Type".to_string(), "application/json".to_string());

        let response = into_proxy_response(GatewayResponse {
            status_code: 201,
            body: "successfully created product with id: abc".to_string(),
            headers,
        })?;

        assert_eq!(response.status_code, 201);
        assert_eq!(
            response
                .headers
                .get("content-type")
                .and_then(|value| value.to_str().ok()),
            Some("application/json")
        );
        assert_eq!(
            body_text(&response),
            Some("successfully created product with id: abc")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_handle_routes_get_to_service() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_get_product()
            .once()
            .withf(|id| id.as_str() == "abc")
            .return_once(|id| {
                Ok(Item::new(
                    id.clone(),
                    DateMarker::EpochSeconds(1_709_288_130),
                    Product::new("Widget", "A widget"),
                ))
            });

        let mut request = proxy_request(Method::GET);

        request
            .path_parameters
            .insert("id".to_string(), "abc".to_string());

        let response = handle(
            &dispatcher(products),
            LambdaEvent::new(request, Context::default()),
        )
        .await?;

        assert_eq!(response.status_code, 200);

        let item: serde_json::Value = serde_json::from_str(body_text(&response).unwrap_or(""))?;

        assert_eq!(item["id"], "abc");
        assert_eq!(item["dateModified"], 1_709_288_130);

        Ok(())
    }

    #[tokio::test]
    async fn test_handle_renders_missing_product() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_delete_product()
            .once()
            .return_once(|id| Err(ProductsServiceError::NotFound(id.clone())));

        let mut request = proxy_request(Method::DELETE);

        request
            .path_parameters
            .insert("id".to_string(), "gone".to_string());

        let response = handle(
            &dispatcher(products),
            LambdaEvent::new(request, Context::default()),
        )
        .await?;

        assert_eq!(response.status_code, 500);
        assert_eq!(body_text(&response), Some("no entries found with id: gone"));

        Ok(())
    }

    #[tokio::test]
    async fn test_handle_rejects_undecodable_body() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_create_product().never();

        let mut request = proxy_request(Method::POST);

        request.body = Some("%%%".to_string());
        request.is_base64_encoded = true;

        let response = handle(
            &dispatcher(products),
            LambdaEvent::new(request, Context::default()),
        )
        .await?;

        assert_eq!(response.status_code, 400);
        assert!(
            body_text(&response).is_some_and(|body| body.starts_with("error decoding request body")),
            "expected a decode error body"
        );

        Ok(())
    }
}
