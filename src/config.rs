//! Environment-derived configuration, resolved once at startup and passed
//! down explicitly. Nothing below this layer reads the environment.

use std::env;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub tavily_api_key: Option<String>,
    pub uspto_api_key: Option<String>,
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: non_empty_env("VIVARIUM_BIND")
                .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            tavily_api_key: non_empty_env("TAVILY_API_KEY"),
            uspto_api_key: non_empty_env("USPTO_API_KEY"),
        }
    }
}
