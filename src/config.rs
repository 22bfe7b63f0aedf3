use std::env;

use crate::services::catalog_service::SpecWriteMode;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    pub spec_write_mode: SpecWriteMode,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|n| n.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(10);
        let spec_write_mode = env::var("CATALOG_ATOMIC_CREATE")
            .ok()
            .map(|v| SpecWriteMode::from_flag(&v))
            .unwrap_or_default();
        Ok(Self {
            port,
            database_url,
            host,
            max_connections,
            spec_write_mode,
        })
    }
}
