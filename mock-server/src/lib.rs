//! Canned-response HTTP server for exercising the raw-socket client.
//!
//! Every response carries `Connection: close`, so a client that reads
//! until the peer hangs up gets exactly one response and then EOF.

use axum::{
    extract::{Path, RawQuery},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware,
    response::Response,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

pub const HELLO_BODY: &str = "Hello";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Greeting {
    pub message: String,
}

pub fn app() -> Router {
    Router::new()
        .route("/hello", get(hello))
        .route("/json", get(json_greeting))
        .route("/echo", get(echo_query).post(echo_body))
        .route("/status/{code}", get(status))
        .fallback(not_found)
        .layer(middleware::map_response(close_connection))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn close_connection(mut response: Response) -> Response {
    response
        .headers_mut()
        .insert(header::CONNECTION, HeaderValue::from_static("close"));
    response
}

async fn hello() -> &'static str {
    HELLO_BODY
}

async fn json_greeting() -> Json<Greeting> {
    Json(Greeting {
        message: HELLO_BODY.to_string(),
    })
}

/// Reflect the raw query string, dangling separators included.
async fn echo_query(RawQuery(query): RawQuery) -> String {
    query.unwrap_or_default()
}

/// Reflect `{content-type}|{body}`.
async fn echo_body(headers: HeaderMap, body: String) -> String {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    tracing::debug!(content_type, bytes = body.len(), "echoing body");
    format!("{content_type}|{body}")
}

async fn status(Path(code): Path<u16>) -> Result<(StatusCode, String), StatusCode> {
    let status = StatusCode::from_u16(code).map_err(|_| StatusCode::BAD_REQUEST)?;
    let reason = status.canonical_reason().unwrap_or("Unknown");
    Ok((status, reason.to_string()))
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "not found")
}
