use async_trait::async_trait;
use http::Request;
use reqwest::{Client as ReqwestClient, Response as ReqwestResponse};

use crate::{TransportError, TransportResult};

/// Sends a signed request and hands back the provider's response.
///
/// The session builds the request completely: method, URL with query string
/// and the `Authorization` header. Timeouts, retries and TLS belong to the
/// implementation.
#[async_trait]
pub trait Transport: Send + Sync {
    type Response: TransportResponse;

    async fn send(&self, request: Request<String>) -> TransportResult<Self::Response>;
}

/// What the dance needs to read from a response.
#[async_trait]
pub trait TransportResponse: Send {
    /// HTTP status code.
    fn status(&self) -> u16;

    /// Consume the response and read its body as text.
    async fn text(self) -> TransportResult<String>;
}

#[async_trait]
impl Transport for ReqwestClient {
    type Response = ReqwestResponse;

    async fn send(&self, request: Request<String>) -> TransportResult<Self::Response> {
        let (parts, body) = request.into_parts();
        let response = self
            .request(parts.method, parts.uri.to_string())
            .headers(parts.headers)
            .body(body)
            .send()
            .await?;
        Ok(response)
    }
}

#[async_trait]
impl TransportResponse for ReqwestResponse {
    fn status(&self) -> u16 {
        ReqwestResponse::status(self).as_u16()
    }

    async fn text(self) -> TransportResult<String> {
        ReqwestResponse::text(self)
            .await
            .map_err(TransportError::from)
    }
}
