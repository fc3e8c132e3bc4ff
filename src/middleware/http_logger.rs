use axum::{
    body::Body,
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use std::time::Instant;

use crate::config::APP_CONFIG;

fn should_ignore_path(path: &str) -> bool {
    matches!(path, "/health" | "/health/")
}

fn filter_sensitive_data(mut value: Value) -> Value {
    if let Value::Object(ref mut map) = value {
        let sensitive_fields = [
            "password",
            "token",
            "access_token",
            "authorization",
            "secret",
            "credentials",
        ];

        for field in sensitive_fields {
            if map.contains_key(field) {
                map.insert(field.to_string(), Value::String("[REDACTED]".to_string()));
            }
        }
    }
    value
}

fn filter_sensitive_headers(headers: &HeaderMap) -> HeaderMap {
    let mut filtered_headers = headers.clone();

    for header_name in ["authorization", "cookie"] {
        if let Ok(name) = header_name.parse::<http::HeaderName>() {
            if filtered_headers.contains_key(&name) {
                filtered_headers.insert(name, "[REDACTED]".parse().unwrap());
            }
        }
    }

    filtered_headers
}

/// Request/response line logging with body capture on mutating calls.
/// Credentials never reach the log; fields and headers are redacted first.
pub async fn http_logger(
    req: Request,
    next: Next,
) -> std::result::Result<impl IntoResponse, (StatusCode, String)> {
    let start_time = Instant::now();

    let method = req.method().clone();
    let uri = req.uri().clone();
    let path = uri.path().to_string();
    let req_headers = req.headers().clone();
    let x_request_id = req_headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if should_ignore_path(&path) {
        return Ok(next.run(req).await);
    }

    let should_log_body = matches!(method.as_str(), "POST" | "PUT" | "PATCH" | "DELETE");
    let (req, req_body) = if should_log_body {
        let (parts, body) = req.into_parts();
        let bytes = buffer_body("request", body).await?;
        let body_str = String::from_utf8_lossy(&bytes);
        let json_body = match serde_json::from_str::<Value>(&body_str) {
            Ok(json) => filter_sensitive_data(json),
            Err(_) => Value::Object(serde_json::Map::new()),
        };
        (
            Request::from_parts(parts, Body::from(bytes)),
            json_body,
        )
    } else {
        (req, Value::Object(serde_json::Map::new()))
    };

    let response = next.run(req).await;

    if method != Method::OPTIONS {
        log_request(
            &method,
            &path,
            &x_request_id,
            &req_headers,
            &req_body,
            &response,
            start_time,
        );
    }

    Ok(response)
}

fn log_request(
    method: &Method,
    path: &str,
    x_request_id: &str,
    req_headers: &HeaderMap,
    req_body: &Value,
    response: &Response,
    start_time: Instant,
) {
    let latency = start_time.elapsed();
    let filtered_req_headers = filter_sensitive_headers(req_headers);

    tracing::info!(
        method = %method,
        path = %path,
        x_request_id = %x_request_id,
        req_headers = ?filtered_req_headers,
        req_body = %req_body,
        status = %response.status(),
        latency_ms = latency.as_millis(),
        app_env = %APP_CONFIG.app_env,
        "HTTP request completed"
    );
}

pub async fn buffer_body<B>(
    direction: &str,
    body: B,
) -> std::result::Result<Bytes, (StatusCode, String)>
where
    B: BodyExt,
    B::Error: std::fmt::Display,
{
    let bytes = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(err) => {
            return Err((
                StatusCode::BAD_REQUEST,
                format!("failed to read {direction} body: {err}"),
            ));
        }
    };

    Ok(bytes)
}
