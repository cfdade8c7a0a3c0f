//! 配置校验模块
//!
//! 校验规则：
//! - broker.url / broker.default_topic 必填 (缺失即启动失败)
//! - pulsar_rest 模式下 url 必须为 http(s)，topic 必须可解析
//! - api.port > 0
//! - routing 条目 event type 与 topic 均非空
//! - schemas 条目路径非空

use contracts::{BrokerKind, ContractError, GatewayConfig, TopicName};
use ::validator::Validate;

/// 校验 GatewayConfig 配置
///
/// 返回第一个遇到的错误，或 Ok(())。
pub fn validate(config: &GatewayConfig) -> Result<(), ContractError> {
    validate_required_fields(config)?;
    validate_broker_url(config)?;
    validate_topics(config)?;
    validate_routing(config)?;
    validate_schemas(config)?;
    Ok(())
}

/// 字段级规则 (derive 声明)
fn validate_required_fields(config: &GatewayConfig) -> Result<(), ContractError> {
    config
        .validate()
        .map_err(|e| ContractError::config_validation("config", e.to_string()))
}

/// 校验 broker 地址协议
fn validate_broker_url(config: &GatewayConfig) -> Result<(), ContractError> {
    if config.broker.kind != BrokerKind::PulsarRest {
        return Ok(());
    }
    let url = config.broker.url.as_str();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ContractError::config_validation(
            "broker.url",
            format!("pulsar_rest broker requires an http(s) url, got '{url}'"),
        ));
    }
    Ok(())
}

/// 校验 default_topic 可解析
fn validate_topics(config: &GatewayConfig) -> Result<(), ContractError> {
    if config.broker.kind != BrokerKind::PulsarRest {
        return Ok(());
    }
    TopicName::parse(&config.broker.default_topic)
        .map_err(|e| ContractError::config_validation("broker.default_topic", e.to_string()))?;
    Ok(())
}

/// 校验路由表
fn validate_routing(config: &GatewayConfig) -> Result<(), ContractError> {
    let Some(routes) = &config.routing else {
        return Ok(());
    };
    for (event_type, topic) in routes {
        if event_type.is_empty() {
            return Err(ContractError::config_validation(
                "routing",
                "event type cannot be empty",
            ));
        }
        if topic.is_empty() {
            return Err(ContractError::config_validation(
                format!("routing.{event_type}"),
                "topic cannot be empty",
            ));
        }
        if config.broker.kind == BrokerKind::PulsarRest {
            TopicName::parse(topic).map_err(|e| {
                ContractError::config_validation(format!("routing.{event_type}"), e.to_string())
            })?;
        }
    }
    Ok(())
}

/// 校验 schema 文件路径
fn validate_schemas(config: &GatewayConfig) -> Result<(), ContractError> {
    for (event_type, path) in &config.schemas {
        if event_type.is_empty() {
            return Err(ContractError::config_validation(
                "schemas",
                "event type cannot be empty",
            ));
        }
        if path.as_os_str().is_empty() {
            return Err(ContractError::config_validation(
                format!("schemas.{event_type}"),
                "schema path cannot be empty",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{ApiConfig, BrokerConfig, ConfigVersion, ValidationConfig};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn minimal_config() -> GatewayConfig {
        GatewayConfig {
            version: ConfigVersion::V1,
            broker: BrokerConfig {
                kind: BrokerKind::PulsarRest,
                url: "http://localhost:8080".into(),
                default_topic: "persistent://tenant/ns/events".into(),
                producer_name: "event-gateway".into(),
                timeout_ms: 5000,
            },
            api: ApiConfig::default(),
            routing: None,
            schemas: HashMap::new(),
            validation: ValidationConfig::default(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(validate(&minimal_config()).is_ok());
    }

    #[test]
    fn test_missing_broker_url() {
        let mut cfg = minimal_config();
        cfg.broker.url = String::new();
        let err = validate(&cfg).unwrap_err().to_string();
        assert!(err.contains("broker.url must be set"), "got: {err}");
    }

    #[test]
    fn test_missing_default_topic() {
        let mut cfg = minimal_config();
        cfg.broker.default_topic = String::new();
        let err = validate(&cfg).unwrap_err().to_string();
        assert!(err.contains("broker.default_topic must be set"), "got: {err}");
    }

    #[test]
    fn test_zero_port() {
        let mut cfg = minimal_config();
        cfg.api.port = 0;
        assert!(validate(&cfg).is_err());
    }

    #[test]
    fn test_non_http_url_for_rest_broker() {
        let mut cfg = minimal_config();
        cfg.broker.url = "pulsar://localhost:6650".into();
        let err = validate(&cfg).unwrap_err().to_string();
        assert!(err.contains("http(s)"), "got: {err}");
    }

    #[test]
    fn test_log_broker_skips_url_and_topic_format() {
        let mut cfg = minimal_config();
        cfg.broker.kind = BrokerKind::Log;
        cfg.broker.url = "log://local".into();
        cfg.broker.default_topic = "persistent://broken".into();
        assert!(validate(&cfg).is_ok());
    }

    #[test]
    fn test_empty_route_topic() {
        let mut cfg = minimal_config();
        cfg.routing = Some(HashMap::from([("WAGE_ERROR".to_string(), String::new())]));
        let err = validate(&cfg).unwrap_err().to_string();
        assert!(err.contains("routing.WAGE_ERROR"), "got: {err}");
    }

    #[test]
    fn test_unparseable_route_topic() {
        let mut cfg = minimal_config();
        cfg.routing = Some(HashMap::from([(
            "WAGE_ERROR".to_string(),
            "kafka://a/b/c".to_string(),
        )]));
        assert!(validate(&cfg).is_err());
    }

    #[test]
    fn test_empty_schema_path() {
        let mut cfg = minimal_config();
        cfg.schemas.insert("WAGE_ERROR".into(), PathBuf::new());
        let err = validate(&cfg).unwrap_err().to_string();
        assert!(err.contains("cannot be empty"), "got: {err}");
    }
}
