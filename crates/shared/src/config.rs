//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Ledger Engine configuration.
    pub engine: EngineConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Ledger Engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Base URL of the Ledger Engine HTTP API.
    pub url: String,
    /// Name of the ledger all postings are committed to.
    #[serde(default = "default_ledger")]
    pub ledger: String,
    /// Optional bearer token for the engine API.
    pub bearer_token: Option<String>,
    /// Page size used when following cursors on bulk reads.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_ledger() -> String {
    "gift-card-ledger".to_string()
}

fn default_page_size() -> u32 {
    500
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("GIFTLEDGER").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_omitted_fields() {
        let config = config::Config::builder()
            .set_override("server.host", "127.0.0.1")
            .unwrap()
            .set_override("engine.url", "http://localhost:3068")
            .unwrap()
            .build()
            .unwrap();
        let app: AppConfig = config.try_deserialize().unwrap();

        assert_eq!(app.server.port, 8080);
        assert_eq!(app.engine.ledger, "gift-card-ledger");
        assert_eq!(app.engine.page_size, 500);
        assert!(app.engine.bearer_token.is_none());
    }
}
