//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 合约快照测试
//! - 配置文件 → Dispatcher → HTTP 路由的 e2e 测试
//! - 以 HTTP 桩服务模拟 Pulsar REST 的实时发送测试

#[cfg(test)]
mod contract_tests {
    use contracts::{DispatchStatus, Event};
    use serde_json::json;

    #[test]
    fn test_config_defaults_are_frozen() {
        let cfg: contracts::GatewayConfig = serde_json::from_value(json!({
            "broker": { "url": "http://localhost:8080", "default_topic": "t" }
        }))
        .unwrap();

        assert_eq!(cfg.version, contracts::ConfigVersion::V1);
        assert_eq!(cfg.broker.producer_name, "event-gateway");
        assert_eq!(cfg.broker.timeout_ms, 5000);
        assert_eq!(cfg.api.host, "0.0.0.0");
        assert_eq!(cfg.api.port, 8080);
        assert!(!cfg.api.dry_run);
        assert_eq!(cfg.api.max_body_bytes, 32 * 1024 * 1024);
        assert!(!cfg.validation.reject_unknown_types);
    }

    #[test]
    fn test_status_wire_names_are_frozen() {
        let names: Vec<_> = [DispatchStatus::Sent, DispatchStatus::DryRun, DispatchStatus::Error]
            .iter()
            .map(|s| serde_json::to_value(s).unwrap())
            .collect();
        assert_eq!(names, [json!("sent"), json!("dry-run"), json!("error")]);
    }

    /// Decoding an event and re-encoding it yields an equal event
    #[test]
    fn test_event_round_trip() {
        let inputs = [
            json!({ "eventType": "WAGE_ERROR", "sourceSystem": "s", "payload": { "dossierId": "ABC-123" } }),
            json!({ "eventType": "X", "sourceSystem": "s", "payload": {} }),
            json!({
                "eventType": "NESTED",
                "sourceSystem": "s",
                "payload": { "a": [1, 2.5, null, true], "b": { "c": "ü", "d": -7 } }
            }),
        ];
        for input in inputs {
            let event: Event = serde_json::from_value(input.clone()).unwrap();
            let bytes = dispatcher::encode(&event).unwrap();
            let decoded: Event = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(decoded, event);
            assert_eq!(serde_json::to_value(&decoded).unwrap(), input);
        }
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::path::Path;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use config_loader::ConfigLoader;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    /// Config file → schema rules → dispatcher → router
    fn gateway(config_toml: &str, schemas: &[(&str, &str)]) -> Router {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in schemas {
            write(dir.path(), name, content);
        }
        let path = write(dir.path(), "config.toml", config_toml);

        let config = ConfigLoader::load_from_path(&path).unwrap();
        let rules = ConfigLoader::load_schema_rules(&config).unwrap();
        let dispatcher = dispatcher::create_dispatcher(&config, rules).unwrap();
        api::router(Arc::new(dispatcher))
    }

    async fn post(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::post(uri)
            .header("content-type", "application/json")
            .header("x-correlation-id", "e2e-corr")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        assert_eq!(response.headers()["x-correlation-id"], "e2e-corr");
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    const DRY_RUN_CONFIG: &str = r#"
[broker]
kind = "log"
url = "log://local"
default_topic = "persistent://tenant/ns/events"

[api]
dry_run = true
"#;

    /// End-to-end test: two-item batch in dry-run mode, one invalid item
    #[tokio::test]
    async fn test_e2e_dry_run_batch() {
        let app = gateway(DRY_RUN_CONFIG, &[]);
        let (status, body) = post(
            app,
            "/api/v1/events/batch",
            json!([
                { "eventType": "SIGNALITIEK_ERROR", "sourceSystem": "s", "payload": { "errorCode": "1", "employerId": "2" } },
                { "eventType": "WAGE_ERROR", "sourceSystem": "s", "payload": {} }
            ]),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "dry-run");
        assert_eq!(body["count"], 2);
        assert_eq!(body["results"][0]["index"], 0);
        assert_eq!(body["results"][0]["status"], "dry-run");
        assert_eq!(body["results"][1]["index"], 1);
        assert_eq!(body["results"][1]["status"], "error");
        assert!(body["results"][1]["error"]
            .as_str()
            .unwrap()
            .contains("dossierId"));
        assert_eq!(body["results"][1]["correlationId"], "e2e-corr");
    }

    #[tokio::test]
    async fn test_e2e_log_broker_live_send() {
        let config = DRY_RUN_CONFIG.replace("dry_run = true", "dry_run = false");
        let app = gateway(&config, &[]);
        let (status, body) = post(
            app,
            "/api/v1/events",
            json!({ "eventType": "WAGE_ERROR", "sourceSystem": "s", "payload": { "dossierId": "A" } }),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "sent");
        assert_eq!(body["messageId"], "log:0");
        assert_eq!(body["topic"], "persistent://tenant/ns/wage-errors");
    }

    #[tokio::test]
    async fn test_e2e_schema_file_and_routing_override() {
        let config = format!(
            "{DRY_RUN_CONFIG}\n[routing]\nINVOICE = \"persistent://billing/ns/invoices\"\n\n[schemas]\nINVOICE = \"invoice.json\"\n"
        );
        let app = gateway(&config, &[("invoice.json", r#"{ "required": ["invoiceId"] }"#)]);

        let (status, body) = post(
            app.clone(),
            "/api/v1/events",
            json!({ "eventType": "INVOICE", "sourceSystem": "s", "payload": {} }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"], "payload.invoiceId is required for INVOICE");

        let (status, body) = post(
            app.clone(),
            "/api/v1/events",
            json!({ "eventType": "INVOICE", "sourceSystem": "s", "payload": { "invoiceId": 1 } }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["topic"], "persistent://billing/ns/invoices");

        // An explicit routing table replaces the built-in one
        let (_, body) = post(
            app,
            "/api/v1/events",
            json!({ "eventType": "WAGE_ERROR", "sourceSystem": "s", "payload": { "dossierId": "A" } }),
        )
        .await;
        assert_eq!(body["topic"], "persistent://tenant/ns/events");
    }

    #[tokio::test]
    async fn test_e2e_strict_mode_rejects_unknown_type() {
        let config = format!("{DRY_RUN_CONFIG}\n[validation]\nreject_unknown_types = true\n");
        let app = gateway(&config, &[]);
        let (status, body) = post(
            app,
            "/api/v1/events",
            json!({ "eventType": "MYSTERY", "sourceSystem": "s", "payload": {} }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "schema validation failed");
        assert_eq!(body["details"], "unknown event type 'MYSTERY'");
    }

    mod pulsar_stub {
        use std::sync::{Arc, Mutex};

        use axum::extract::{Path, State};
        use axum::routing::post;
        use axum::{Json, Router};
        use serde_json::{json, Value};
        use tokio::net::TcpListener;

        pub type Received = Arc<Mutex<Vec<(String, Value)>>>;

        async fn produce(
            State(received): State<Received>,
            Path((domain, tenant, ns, topic)): Path<(String, String, String, String)>,
            Json(body): Json<Value>,
        ) -> Json<Value> {
            let mut received = received.lock().unwrap();
            received.push((format!("{domain}/{tenant}/{ns}/{topic}"), body));
            let id = format!("{}:0:-1", received.len());
            Json(json!({ "messagePublishResults": [{ "messageId": id, "errorCode": 0 }] }))
        }

        /// Start a Pulsar REST producer stub, returning its base URL
        pub async fn start() -> (String, Received) {
            let received = Received::default();
            let app = Router::new()
                .route("/topics/{domain}/{tenant}/{ns}/{topic}", post(produce))
                .with_state(received.clone());
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });
            (format!("http://{addr}"), received)
        }
    }

    #[tokio::test]
    async fn test_e2e_pulsar_rest_live_batch() {
        let (url, received) = pulsar_stub::start().await;
        let config = format!(
            r#"
[broker]
kind = "pulsar_rest"
url = "{url}"
default_topic = "persistent://tenant/ns/events"
producer_name = "e2e"
"#
        );
        let app = gateway(&config, &[]);

        let (status, body) = post(
            app,
            "/api/v1/events/batch",
            json!([
                { "eventType": "WAGE_ERROR", "sourceSystem": "s", "payload": { "dossierId": "A" } },
                { "eventType": "WAGE_ERROR", "sourceSystem": "s", "payload": {} },
                { "eventType": "AUDIT", "sourceSystem": "s", "payload": { "k": "v" } }
            ]),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "sent");
        assert_eq!(body["dryRun"], false);
        let results = body["results"].as_array().unwrap();
        assert_eq!(results[0]["status"], "sent");
        assert_eq!(results[0]["messageId"], "1:0:-1");
        assert_eq!(results[1]["status"], "error");
        assert_eq!(results[2]["status"], "sent");
        assert_eq!(results[2]["messageId"], "2:0:-1");

        let received = received.lock().unwrap();
        assert_eq!(received.len(), 2);
        assert_eq!(received[0].0, "persistent/tenant/ns/wage-errors");
        assert_eq!(received[1].0, "persistent/tenant/ns/events");
        assert_eq!(received[0].1["producerName"], "e2e");

        // The published payload is the serialized event
        let payload: Value =
            serde_json::from_str(received[1].1["messages"][0]["payload"].as_str().unwrap()).unwrap();
        assert_eq!(
            payload,
            json!({ "eventType": "AUDIT", "sourceSystem": "s", "payload": { "k": "v" } })
        );
    }
}
