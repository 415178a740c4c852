use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec_with_registry, register_int_counter_vec_with_registry, Encoder,
    HistogramVec, IntCounterVec, Registry, TextEncoder,
};

lazy_static! {
    /// Gateway-owned registry; every metric name gets the `sbc_gateway_` prefix
    static ref REGISTRY: Registry =
        Registry::new_custom(Some("sbc_gateway".to_string()), None).unwrap();

    /// Handled requests by endpoint and outcome
    pub static ref REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec_with_registry!(
        "requests_total",
        "Total number of requests handled",
        &["endpoint", "outcome"],
        REGISTRY
    )
    .unwrap();

    /// Time spent waiting on SBC REST calls
    pub static ref DEVICE_REQUEST_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        "device_request_duration_seconds",
        "SBC REST API call duration in seconds",
        &["operation"],
        vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 7.5],
        REGISTRY
    )
    .unwrap();
}

pub fn record_request(endpoint: &str, outcome: &str) {
    REQUESTS_TOTAL.with_label_values(&[endpoint, outcome]).inc();
}

/// Text exposition of the gateway registry. Families with no samples yet
/// are omitted by `gather`.
pub fn render() -> prometheus::Result<String> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&REGISTRY.gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}

/// `GET /metrics`
pub async fn metrics_handler() -> Response {
    match render() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendered_text_contains_recorded_counter() {
        record_request("test", "success");
        let text = render().unwrap();
        assert!(text.contains("sbc_gateway_requests_total"));
        assert!(text.contains("endpoint=\"test\""));
    }
}
