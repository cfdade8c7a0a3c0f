//! Correlation ID middleware
//!
//! Every request carries one correlation id: the caller's `X-Correlation-ID`
//! when non-blank (decoded lossily), otherwise a fresh UUID v4. The id is stored in request
//! extensions for handlers and echoed on the response.

use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

pub static CORRELATION_HEADER: HeaderName = HeaderName::from_static("x-correlation-id");

/// Correlation id of the current request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationId(pub String);

impl CorrelationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Resolve the id from the inbound header, generating one when absent
pub fn resolve(header: Option<&HeaderValue>) -> CorrelationId {
    // obs-text bytes are kept, not discarded
    let supplied = header
        .map(|v| String::from_utf8_lossy(v.as_bytes()))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match supplied {
        Some(id) => CorrelationId(id),
        None => CorrelationId(Uuid::new_v4().to_string()),
    }
}

pub async fn correlation_id(mut request: Request, next: Next) -> Response {
    let id = resolve(request.headers().get(&CORRELATION_HEADER));
    let header = HeaderValue::from_str(id.as_str()).ok();
    request.extensions_mut().insert(id);

    let mut response = next.run(request).await;
    if let Some(value) = header {
        response
            .headers_mut()
            .insert(CORRELATION_HEADER.clone(), value);
    }
    response
}
