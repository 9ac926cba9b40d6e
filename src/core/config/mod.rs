pub mod gateway_config;
