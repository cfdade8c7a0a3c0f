//! 事件网关指标模块
//!
//! 记录事件分发与批量请求的 Prometheus 指标。
//! 未安装 recorder 时所有调用均为空操作。

use contracts::DispatchStatus;
use metrics::{counter, histogram};

/// 未配置路由或 schema 的事件类型统一使用的标签值
pub const OTHER_EVENT_TYPE: &str = "other";

/// 记录单个事件的分发结果
///
/// `event_type` 必须来自有限集合 (调用方负责将未知类型映射为 [`OTHER_EVENT_TYPE`])。
///
/// # Example
///
/// ```ignore
/// use observability::metrics::record_event_dispatched;
///
/// record_event_dispatched("WAGE_ERROR", outcome.status, outcome.byte_size);
/// ```
pub fn record_event_dispatched(event_type: &str, status: DispatchStatus, bytes: Option<usize>) {
    counter!(
        "event_gateway_events_total",
        "event_type" => event_type.to_string(),
        "status" => status.as_str()
    )
    .increment(1);

    // 仅统计成功序列化的事件
    if let Some(bytes) = bytes {
        histogram!(
            "event_gateway_event_bytes",
            "event_type" => event_type.to_string()
        )
        .record(bytes as f64);
    }
}

/// 记录一次批量请求
pub fn record_batch(size: usize, failed: usize) {
    histogram!("event_gateway_batch_size").record(size as f64);
    counter!("event_gateway_batches_total").increment(1);

    if failed > 0 {
        counter!("event_gateway_batch_items_failed_total").increment(failed as u64);
    }
}

/// 记录 HTTP 层拒绝的请求 (请求体无法解析)
pub fn record_request_rejected(route: &'static str) {
    counter!("event_gateway_requests_rejected_total", "route" => route).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_without_recorder_is_noop() {
        record_event_dispatched("WAGE_ERROR", DispatchStatus::Sent, Some(120));
        record_event_dispatched("WAGE_ERROR", DispatchStatus::Error, None);
        record_batch(3, 1);
        record_request_rejected("/api/v1/events");
    }
}
