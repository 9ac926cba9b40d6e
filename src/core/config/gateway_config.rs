use std::env;
use std::time::Duration;

use crate::core::client::gemini::GEMINI_API_BASE;

/// Model used when `GEMINI_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

const DEFAULT_UPSTREAM_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_LOG_DIR: &str = "./logs";

/// Environment-sourced gateway configuration, resolved once at startup and
/// shared through `AppState`. A missing credential does not prevent boot;
/// it surfaces as `NotConfigured` on the first chat request.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    pub upstream_timeout: Duration,
    pub bind_addr: String,
    pub log_dir: String,
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        GatewayConfig {
            api_key: non_empty_var("GEMINI_API_KEY"),
            model: non_empty_var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_base: non_empty_var("GEMINI_API_BASE").unwrap_or_else(|| GEMINI_API_BASE.to_string()),
            upstream_timeout: non_empty_var("GENIBI_UPSTREAM_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(Duration::from_millis(DEFAULT_UPSTREAM_TIMEOUT_MS)),
            bind_addr: non_empty_var("GENIBI_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            log_dir: non_empty_var("GENIBI_LOG_DIR").unwrap_or_else(|| DEFAULT_LOG_DIR.to_string()),
        }
    }

    /// Upstream credential, if one was provided.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig {
            api_key: Some("test-api-key".to_string()),
            model: DEFAULT_MODEL.to_string(),
            api_base: GEMINI_API_BASE.to_string(),
            upstream_timeout: Duration::from_millis(DEFAULT_UPSTREAM_TIMEOUT_MS),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            log_dir: DEFAULT_LOG_DIR.to_string(),
        }
    }
}
