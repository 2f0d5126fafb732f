use pdfrag::infrastructure::observability::{DEFAULT_LOG_FILTER, TracingConfig};

#[test]
fn given_json_requested_when_building_config_then_json_is_enabled() {
    let config = TracingConfig::new("test", true);
    assert!(config.json_format);
    assert_eq!(config.environment, "test");
}

#[test]
fn given_default_filter_when_inspected_then_enables_crate_debug_logs() {
    assert!(DEFAULT_LOG_FILTER.contains("pdfrag=debug"));
}
