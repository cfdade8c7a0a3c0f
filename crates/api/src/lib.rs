//! # API
//!
//! HTTP 接入层。
//!
//! 负责：
//! - 解析请求体为 `Event`，错误时返回 400
//! - 分配/透传 `X-Correlation-ID`
//! - 调用 `Dispatcher` 并组装响应
//! - 健康检查、OpenAPI 文档与测试页面

pub mod correlation;
pub mod error;
pub mod handlers;
pub mod pages;
pub mod response;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::{middleware, Router};
use contracts::BrokerPort;
use dispatcher::Dispatcher;

pub use correlation::{CorrelationId, CORRELATION_HEADER};
pub use error::ApiError;
pub use response::{BatchItemResponse, BatchResponse, EventResponse};

/// Shared handler state
pub struct AppState<B> {
    pub dispatcher: Arc<Dispatcher<B>>,
}

impl<B> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: Arc::clone(&self.dispatcher),
        }
    }
}

impl<B: BrokerPort + Sync> AppState<B> {
    pub fn new(dispatcher: Arc<Dispatcher<B>>) -> Self {
        Self { dispatcher }
    }

    pub fn dry_run(&self) -> bool {
        self.dispatcher.mode().is_dry_run()
    }
}

/// Request body limit used by [`router`]
pub const DEFAULT_BODY_LIMIT: usize = 32 * 1024 * 1024;

/// Build the gateway router with the default body limit
pub fn router<B>(dispatcher: Arc<Dispatcher<B>>) -> Router
where
    B: BrokerPort + Send + Sync + 'static,
{
    router_with_body_limit(dispatcher, DEFAULT_BODY_LIMIT)
}

/// Build the gateway router
///
/// Bodies above `body_limit` bytes are rejected with the JSON error shape.
pub fn router_with_body_limit<B>(dispatcher: Arc<Dispatcher<B>>, body_limit: usize) -> Router
where
    B: BrokerPort + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(pages::health))
        .route("/openapi.yaml", get(pages::openapi))
        .route("/ui", get(pages::ui))
        .route("/api/v1/events", post(handlers::post_event::<B>))
        .route("/api/v1/events/batch", post(handlers::post_batch::<B>))
        .with_state(AppState::new(dispatcher))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(correlation::correlation_id))
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}
