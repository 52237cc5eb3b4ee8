use once_cell::sync::Lazy;
use prometheus::{register_int_counter, Encoder, IntCounter, TextEncoder};

// Prometheus metrics (default registry)
pub static WAREHOUSES_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("warehouse_created_total", "Total warehouses created")
        .expect("register warehouse_created_total")
});

pub static WAREHOUSES_DELETED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("warehouse_deleted_total", "Total warehouses deleted")
        .expect("register warehouse_deleted_total")
});

pub static DEPOSITS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("warehouse_deposits_total", "Total accepted deposits")
        .expect("register warehouse_deposits_total")
});

pub static WITHDRAWALS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("warehouse_withdrawals_total", "Total accepted withdrawals")
        .expect("register warehouse_withdrawals_total")
});

pub static VALIDATION_ERRORS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "warehouse_validation_errors_total",
        "Total form submissions rejected by validation"
    )
    .expect("register warehouse_validation_errors_total")
});

/// Force registration so every counter shows up in `/metrics` from the start.
pub fn init() {
    Lazy::force(&WAREHOUSES_CREATED_TOTAL);
    Lazy::force(&WAREHOUSES_DELETED_TOTAL);
    Lazy::force(&DEPOSITS_TOTAL);
    Lazy::force(&WITHDRAWALS_TOTAL);
    Lazy::force(&VALIDATION_ERRORS_TOTAL);
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_output_lists_counters() {
        init();
        DEPOSITS_TOTAL.inc();
        let (status, body) = encode_metrics();
        assert_eq!(status, axum::http::StatusCode::OK);
        assert!(body.contains("warehouse_deposits_total"));
        assert!(body.contains("warehouse_created_total"));
    }
}
