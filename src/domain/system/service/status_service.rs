use std::sync::Arc;

use serde_json::{json, Value};

use crate::core::config::gateway_config::GatewayConfig;

/// Build/version and configuration posture. Reports whether a credential is
/// present, never the credential itself.
pub async fn status(config: Arc<GatewayConfig>) -> anyhow::Result<Value> {
    Ok(json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "model": config.model,
        "api_key_configured": config.has_api_key(),
        "upstream_timeout_ms": config.upstream_timeout.as_millis() as u64,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn status_reports_posture_without_leaking_the_key() {
        let config = Arc::new(GatewayConfig::default());
        let value = status(config).await.unwrap();

        assert_eq!(value["api_key_configured"], true);
        assert_eq!(value["model"], "gemini-1.5-flash");
        assert!(!value.to_string().contains("test-api-key"));
    }
}
