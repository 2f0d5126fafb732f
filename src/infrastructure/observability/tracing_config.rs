#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
}

impl TracingConfig {
    /// `LOG_FORMAT=json` forces JSON output regardless of settings.
    pub fn new(environment: impl Into<String>, json_format: bool) -> Self {
        let forced_json = std::env::var("LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        Self {
            environment: environment.into(),
            json_format: json_format || forced_json,
        }
    }
}
