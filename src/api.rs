//! HTTP plumbing shared by the per-resource API clients.

pub mod activity_api;
pub mod product_api;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{Method, Request, StatusCode};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::ApiError;

/// Pooled hyper client shared by the resource wrappers.
pub(crate) type HttpClient = Client<HttpConnector, Full<Bytes>>;

pub(crate) fn build_client() -> HttpClient {
    Client::builder(TokioExecutor::new()).build_http()
}

/// Issue a request with no body and collect the response.
pub(crate) async fn send_empty(
    client: &HttpClient,
    method: Method,
    url: &str,
) -> Result<(StatusCode, Bytes), ApiError> {
    let request = Request::builder()
        .method(method)
        .uri(url)
        .header("Accept", "application/json")
        .body(empty_body())?;
    dispatch(client, request).await
}

/// Issue a request carrying a JSON body and collect the response.
pub(crate) async fn send_json<B: Serialize>(
    client: &HttpClient,
    method: Method,
    url: &str,
    body: &B,
) -> Result<(StatusCode, Bytes), ApiError> {
    let payload = serde_json::to_vec(body)?;
    let request = Request::builder()
        .method(method)
        .uri(url)
        .header("Content-Type", "application/json")
        .header("Accept", "application/json")
        .body(full_body(payload))?;
    dispatch(client, request).await
}

async fn dispatch(
    client: &HttpClient,
    request: Request<Full<Bytes>>,
) -> Result<(StatusCode, Bytes), ApiError> {
    let response = client.request(request).await?;
    let status = response.status();
    let body = response.into_body().collect().await?.to_bytes();
    Ok((status, body))
}

fn empty_body() -> Full<Bytes> {
    Full::new(Bytes::new())
}

fn full_body(payload: Vec<u8>) -> Full<Bytes> {
    Full::new(Bytes::from(payload))
}

/// Decode a JSON payload after the status has been checked.
pub(crate) fn decode<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    Ok(serde_json::from_slice(body)?)
}

/// Best-effort decode for payloads that are only logged, never consumed.
pub(crate) fn decode_loose(body: &Bytes) -> serde_json::Value {
    if body.is_empty() {
        return serde_json::Value::Null;
    }
    serde_json::from_slice(body).unwrap_or(serde_json::Value::Null)
}

/// Map a non-success status to the error taxonomy. `resource` names the
/// thing a 404 was about.
pub(crate) fn status_error(status: StatusCode, body: &Bytes, resource: &str) -> ApiError {
    if status == StatusCode::NOT_FOUND {
        ApiError::NotFound {
            resource: resource.to_string(),
        }
    } else {
        ApiError::Status {
            status: status.as_u16(),
            body: String::from_utf8_lossy(body).into_owned(),
        }
    }
}
