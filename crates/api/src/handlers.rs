//! Event ingestion handlers

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::Extension;
use contracts::{BrokerPort, Event};
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::correlation::CorrelationId;
use crate::error::ApiError;
use crate::response::{BatchResponse, EventResponse};
use crate::AppState;

const EVENTS_ROUTE: &str = "/api/v1/events";
const BATCH_ROUTE: &str = "/api/v1/events/batch";

/// POST /api/v1/events
pub async fn post_event<B>(
    State(state): State<AppState<B>>,
    Extension(correlation_id): Extension<CorrelationId>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<EventResponse>), ApiError>
where
    B: BrokerPort + Send + Sync + 'static,
{
    let event: Event = read_body(body)
        .and_then(|body| decode(&body))
        .and_then(|event: Event| {
            event
                .check_required_fields()
                .map(|()| event)
                .map_err(|e| e.to_string())
        })
        .map_err(|details| {
            warn!(
                correlation_id = %correlation_id.as_str(),
                error = %details,
                "Invalid request body"
            );
            observability::record_request_rejected(EVENTS_ROUTE);
            ApiError::InvalidBody {
                details,
                correlation_id: correlation_id.0.clone(),
            }
        })?;

    let mut outcome = state
        .dispatcher
        .dispatch(event, correlation_id.as_str())
        .await
        .map_err(|e| ApiError::from_dispatcher(e, correlation_id.as_str()))?;

    if let Some(failure) = outcome.failure.take() {
        return Err(ApiError::from_failure(failure, outcome.correlation_id));
    }

    Ok((
        StatusCode::CREATED,
        Json(EventResponse::new(outcome, state.dry_run())),
    ))
}

/// POST /api/v1/events/batch
pub async fn post_batch<B>(
    State(state): State<AppState<B>>,
    Extension(correlation_id): Extension<CorrelationId>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<BatchResponse>, ApiError>
where
    B: BrokerPort + Send + Sync + 'static,
{
    let events: Vec<Event> = read_body(body)
        .and_then(|body| decode(&body))
        .and_then(check_batch)
        .map_err(|details| {
            warn!(
                correlation_id = %correlation_id.as_str(),
                error = %details,
                "Invalid batch body"
            );
            observability::record_request_rejected(BATCH_ROUTE);
            ApiError::InvalidBatchBody {
                details,
                correlation_id: correlation_id.0.clone(),
            }
        })?;

    info!(
        count = events.len(),
        correlation_id = %correlation_id.as_str(),
        "Received batch"
    );

    let result = state
        .dispatcher
        .dispatch_batch(events, correlation_id.as_str())
        .await;

    Ok(Json(BatchResponse::new(result, state.dry_run())))
}

/// Body read failures (oversized or interrupted) become decode details
fn read_body(body: Result<Bytes, BytesRejection>) -> Result<Bytes, String> {
    body.map_err(|rejection| rejection.body_text())
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, String> {
    serde_json::from_slice(body).map_err(|e| e.to_string())
}

/// Every element must carry non-empty required fields
fn check_batch(events: Vec<Event>) -> Result<Vec<Event>, String> {
    for (index, event) in events.iter().enumerate() {
        event
            .check_required_fields()
            .map_err(|e| format!("[{index}]: {e}"))?;
    }
    Ok(events)
}
