pub const DEFAULT_LOG_FILTER: &str = "info,medscribe=debug,tower_http=debug";

/// Subscriber setup resolved from settings and the process environment.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    /// Used when `RUST_LOG` is unset.
    pub default_filter: String,
}

impl TracingConfig {
    pub fn new(environment: impl Into<String>, json_format: bool) -> Self {
        Self {
            environment: environment.into(),
            json_format,
            default_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }

    pub fn with_default_filter(mut self, filter: impl Into<String>) -> Self {
        self.default_filter = filter.into();
        self
    }

    /// `LOG_FORMAT=json` forces JSON output regardless of settings.
    pub fn apply_env_overrides(mut self) -> Self {
        if let Ok(format) = std::env::var("LOG_FORMAT") {
            self.json_format = format.eq_ignore_ascii_case("json");
        }
        self
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::new(
            std::env::var("APP_ENV").unwrap_or_else(|_| "local".to_string()),
            false,
        )
        .apply_env_overrides()
    }
}
