use std::sync::Arc;

use crate::core::client::gemini::GeminiHttpClient;
use crate::core::config::gateway_config::GatewayConfig;
use crate::core::persistence::logs::log_repository::LogRepositoryImpl;
use crate::domain::chat::service::chat_service::ChatService;
use crate::domain::system::service::log_service::LogService;

macro_rules! delegate_async_service {
    ($(fn $name:ident($($arg:ident : $typ:ty),*) -> $ret:ty => $path:path;)+) => {
        $(
            pub async fn $name(&self, $($arg: $typ),*) -> anyhow::Result<$ret> {
                $path($($arg),*).await
            }
        )+
    };
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub chat_service: Arc<ChatService>,
    pub system_service: Arc<SystemService>,
    pub log_service: Arc<LogService<LogRepositoryImpl>>,
}

pub fn build_app_state(config: GatewayConfig) -> AppState {
    let config = Arc::new(config);
    let upstream = Arc::new(GeminiHttpClient::new(config.api_base.clone()));

    AppState {
        chat_service: Arc::new(ChatService::new(config.clone(), upstream)),
        system_service: Arc::new(SystemService),
        log_service: Arc::new(LogService::new(LogRepositoryImpl::new(config.log_dir.clone()))),
        config,
    }
}

#[derive(Clone, Default)]
pub struct SystemService;

impl SystemService {
    delegate_async_service! {
        fn status(config: Arc<GatewayConfig>) -> serde_json::Value => crate::domain::system::service::status_service::status;
        fn health() -> serde_json::Value => crate::domain::system::service::health_service::health;
    }
}
