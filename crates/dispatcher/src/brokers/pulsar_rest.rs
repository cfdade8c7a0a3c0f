//! PulsarRestBroker - publishes through the Pulsar REST producer endpoint

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use bytes::Bytes;
use contracts::{BrokerConfig, BrokerPort, ContractError, TopicName};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

const BROKER_NAME: &str = "pulsar_rest";

/// Producer request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProduceRequest<'a> {
    producer_name: &'a str,
    messages: [ProduceMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ProduceMessage<'a> {
    /// Serialized event as a string
    payload: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProduceResponse {
    #[serde(default)]
    message_publish_results: Vec<PublishResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PublishResult {
    #[serde(default)]
    message_id: Option<String>,
    #[serde(default)]
    error_code: i32,
    #[serde(default)]
    error_msg: Option<String>,
}

/// Broker backed by the Pulsar HTTP producer API
pub struct PulsarRestBroker {
    client: reqwest::Client,
    base_url: String,
    producer_name: String,
    closed: AtomicBool,
}

impl PulsarRestBroker {
    /// Create a broker from `[broker]` config
    #[instrument(name = "pulsar_rest_broker_new", skip(config), fields(url = %config.url))]
    pub fn new(config: &BrokerConfig) -> Result<Self, ContractError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ContractError::BrokerConnection {
                broker: BROKER_NAME.to_string(),
                message: e.to_string(),
            })?;

        debug!(producer = %config.producer_name, "PulsarRestBroker client built");

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            producer_name: config.producer_name.clone(),
            closed: AtomicBool::new(false),
        })
    }

    fn endpoint(&self, topic: &TopicName) -> String {
        format!("{}/topics/{}", self.base_url, topic.rest_path())
    }
}

impl BrokerPort for PulsarRestBroker {
    fn name(&self) -> &str {
        BROKER_NAME
    }

    #[instrument(
        name = "pulsar_rest_send",
        skip(self, payload),
        fields(bytes = payload.len())
    )]
    async fn send(&self, topic: &str, payload: Bytes) -> Result<String, ContractError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(ContractError::broker_unavailable(BROKER_NAME, "producer closed"));
        }

        let topic = TopicName::parse(topic)?;
        let text = std::str::from_utf8(&payload)
            .map_err(|e| ContractError::serialization(e.to_string()))?;
        let body = ProduceRequest {
            producer_name: &self.producer_name,
            messages: [ProduceMessage { payload: text }],
        };

        let response = self
            .client
            .post(self.endpoint(&topic))
            .json(&body)
            .send()
            .await
            .map_err(|e| ContractError::broker_send(BROKER_NAME, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(%status, topic = %topic, "Broker rejected publish");
            let message = if text.is_empty() {
                status.to_string()
            } else {
                text
            };
            return Err(ContractError::broker_send(BROKER_NAME, message));
        }

        let parsed: ProduceResponse = response
            .json()
            .await
            .map_err(|e| ContractError::broker_send(BROKER_NAME, e.to_string()))?;

        let result = parsed
            .message_publish_results
            .into_iter()
            .next()
            .ok_or_else(|| ContractError::broker_send(BROKER_NAME, "empty publish result"))?;

        if result.error_code != 0 {
            let message = result
                .error_msg
                .unwrap_or_else(|| format!("publish failed with code {}", result.error_code));
            return Err(ContractError::broker_send(BROKER_NAME, message));
        }

        result
            .message_id
            .ok_or_else(|| ContractError::broker_send(BROKER_NAME, "missing message id"))
    }

    #[instrument(name = "pulsar_rest_close", skip(self))]
    async fn close(&self) -> Result<(), ContractError> {
        self.closed.store(true, Ordering::Release);
        info!(url = %self.base_url, "PulsarRestBroker closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    async fn produce(
        Path((domain, tenant, ns, topic)): Path<(String, String, String, String)>,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        assert_eq!(domain, "persistent");
        assert_eq!(tenant, "tenant");
        assert_eq!(ns, "ns");
        assert_eq!(body["producerName"], "event-gateway");
        let payload: Value =
            serde_json::from_str(body["messages"][0]["payload"].as_str().unwrap()).unwrap();
        assert_eq!(payload["eventType"], "WAGE_ERROR");

        if topic == "missing" {
            return (
                StatusCode::OK,
                Json(json!({
                    "messagePublishResults": [
                        { "errorCode": 1, "errorMsg": "TopicNotFound" }
                    ]
                })),
            );
        }
        if topic == "broken" {
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!("boom")));
        }
        (
            StatusCode::OK,
            Json(json!({
                "messagePublishResults": [
                    { "messageId": "12:3:-1", "errorCode": 0 }
                ]
            })),
        )
    }

    async fn stub_server() -> String {
        let app = Router::new().route("/topics/{domain}/{tenant}/{ns}/{topic}", post(produce));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn config(url: String) -> BrokerConfig {
        BrokerConfig {
            url,
            default_topic: "persistent://tenant/ns/events".to_string(),
            ..BrokerConfig::default()
        }
    }

    fn payload() -> Bytes {
        Bytes::from_static(br#"{"eventType":"WAGE_ERROR","sourceSystem":"s","payload":{}}"#)
    }

    #[tokio::test]
    async fn test_send_returns_message_id() {
        let broker = PulsarRestBroker::new(&config(stub_server().await)).unwrap();
        let id = broker
            .send("persistent://tenant/ns/wage-errors", payload())
            .await
            .unwrap();
        assert_eq!(id, "12:3:-1");
    }

    #[tokio::test]
    async fn test_publish_error_is_verbatim() {
        let broker = PulsarRestBroker::new(&config(stub_server().await)).unwrap();
        let err = broker
            .send("persistent://tenant/ns/missing", payload())
            .await
            .unwrap_err();
        assert!(!err.is_unavailable());
        assert_eq!(err.to_string(), "TopicNotFound");
    }

    #[tokio::test]
    async fn test_http_error_is_send_error() {
        let broker = PulsarRestBroker::new(&config(stub_server().await)).unwrap();
        let err = broker
            .send("persistent://tenant/ns/broken", payload())
            .await
            .unwrap_err();
        assert!(matches!(err, ContractError::BrokerSend { .. }));
    }

    #[tokio::test]
    async fn test_closed_broker_is_unavailable() {
        let broker = PulsarRestBroker::new(&config("http://127.0.0.1:9".to_string())).unwrap();
        broker.close().await.unwrap();
        let err = broker
            .send("persistent://tenant/ns/events", payload())
            .await
            .unwrap_err();
        assert!(err.is_unavailable());
    }
}
